/// One lexical unit of a query line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryToken<'a> {
    /// A raw, not yet normalized term literal.
    Term(&'a str),
    And,
    Or,
    Not,
    Open,
    Close,
}

impl<'a> QueryToken<'a> {
    fn classify(word: &'a str) -> QueryToken<'a> {
        match word {
            "AND" => QueryToken::And,
            "OR" => QueryToken::Or,
            "NOT" => QueryToken::Not,
            _ => QueryToken::Term(word),
        }
    }
}

/// Splits a query line into tokens.
///
/// Words are separated by whitespace. Leading `(` and trailing `)` characters
/// are split off a word as separate tokens. Operators are case sensitive:
/// `and` is a term.
pub fn tokenize_query(line: &str) -> Vec<QueryToken<'_>> {
    let mut tokens = Vec::new();
    for word in line.split_whitespace() {
        let mut rest = word;
        while let Some(stripped) = rest.strip_prefix('(') {
            tokens.push(QueryToken::Open);
            rest = stripped;
        }
        let mut closes = 0;
        while let Some(stripped) = rest.strip_suffix(')') {
            closes += 1;
            rest = stripped;
        }
        if !rest.is_empty() {
            tokens.push(QueryToken::classify(rest));
        }
        tokens.extend(std::iter::repeat_n(QueryToken::Close, closes));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::QueryToken::*;
    use super::*;

    #[test]
    fn test_operators_and_terms() {
        assert_eq!(
            tokenize_query("cat AND NOT dog OR bird"),
            vec![Term("cat"), And, Not, Term("dog"), Or, Term("bird")]
        );
        assert_eq!(tokenize_query("and or"), vec![Term("and"), Term("or")]);
        assert!(tokenize_query("  \t ").is_empty());
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(
            tokenize_query("(cat OR dog) AND NOT cat"),
            vec![Open, Term("cat"), Or, Term("dog"), Close, And, Not, Term("cat")]
        );
        assert_eq!(
            tokenize_query("((a AND b))"),
            vec![Open, Open, Term("a"), And, Term("b"), Close, Close]
        );
        assert_eq!(tokenize_query("( )"), vec![Open, Close]);
        assert_eq!(tokenize_query("()"), vec![Open, Close]);
        assert_eq!(tokenize_query("(NOT"), vec![Open, Not]);
    }

    #[test]
    fn test_inner_parentheses_stay_in_term() {
        assert_eq!(tokenize_query("f(x)y"), vec![Term("f(x)y")]);
    }
}
