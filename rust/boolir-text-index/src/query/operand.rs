use crate::{
    set_ops::{intersect, subtract, union},
    skip_list::PostingList,
};

/// A binary boolean operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    And,
    Or,
}

/// A value on the evaluator's operand stack.
///
/// A negated operand stands for the complement of `list` with respect to the
/// universe; the complement itself is only materialized when the final result
/// of a query is negated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    pub negated: bool,
    pub list: PostingList,
    /// Document frequency used to order operands. For combined operands it is
    /// the length of the combined list.
    pub frequency: u32,
}

impl Operand {
    pub fn new(list: PostingList, frequency: u32) -> Operand {
        Operand {
            negated: false,
            list,
            frequency,
        }
    }

    pub fn negate(mut self) -> Operand {
        self.negated = !self.negated;
        self
    }

    /// Combines two operands without ever materializing a complement:
    ///
    /// | op  | left | right | result               |
    /// |-----|------|-------|----------------------|
    /// | AND | +    | +     | `L ∩ R`              |
    /// | AND | +    | −     | `L \ R`              |
    /// | AND | −    | +     | `R \ L`              |
    /// | AND | −    | −     | `¬(L ∪ R)`           |
    /// | OR  | +    | +     | `L ∪ R`              |
    /// | OR  | +    | −     | `¬(R \ L)`           |
    /// | OR  | −    | +     | `¬(L \ R)`           |
    /// | OR  | −    | −     | `¬(L ∩ R)`           |
    pub fn combine(op: BooleanOp, left: &Operand, right: &Operand) -> Operand {
        let (l, r) = (&left.list, &right.list);
        let (list, negated) = match (op, left.negated, right.negated) {
            (BooleanOp::And, false, false) => (intersect(l, r), false),
            (BooleanOp::And, false, true) => (subtract(l, r), false),
            (BooleanOp::And, true, false) => (subtract(r, l), false),
            (BooleanOp::And, true, true) => (union(l, r), true),
            (BooleanOp::Or, false, false) => (union(l, r), false),
            (BooleanOp::Or, false, true) => (subtract(r, l), true),
            (BooleanOp::Or, true, false) => (subtract(l, r), true),
            (BooleanOp::Or, true, true) => (intersect(l, r), true),
        };
        Operand {
            negated,
            frequency: list.len() as u32,
            list,
        }
    }

    /// Materializes the operand against `universe`.
    pub fn resolve(self, universe: &PostingList) -> PostingList {
        if self.negated {
            subtract(universe, &self.list)
        } else {
            self.list
        }
    }
}
