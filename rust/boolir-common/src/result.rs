pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[macro_export]
macro_rules! verify_data {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_data(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn verify_data(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_format(name, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn invalid_format(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidFormat {
        element: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn check_len(values: &[u32]) -> super::Result<()> {
        verify_arg!(values, !values.is_empty());
        Ok(())
    }

    fn check_sorted(values: &[u32]) -> super::Result<()> {
        verify_data!(postings, values.windows(2).all(|w| w[0] < w[1]));
        Ok(())
    }

    #[test]
    fn test_verify_arg() {
        assert!(check_len(&[1]).is_ok());
        let err = check_len(&[]).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "values");
                assert!(message.contains("is_empty"));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_verify_data() {
        assert!(check_sorted(&[1, 2, 5]).is_ok());
        let err = check_sorted(&[1, 1]).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidFormat { element, .. } if element == "postings"
        ));
    }
}
