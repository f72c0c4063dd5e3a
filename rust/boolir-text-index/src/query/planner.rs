//! Cost-based reordering of long operator runs.
//!
//! Before a run of `n` identical operators is reduced, its `n + 1` operands
//! may be reordered. Both operators are commutative and associative, so the
//! result is unchanged, but evaluating cheap operands first keeps the
//! intermediate lists short.
//!
//! Orders below are evaluation orders: the first operand is combined first.
//! - `AND` runs longer than [`AND_REORDER_THRESHOLD`]: negated operands first,
//!   in their original order, then the remaining operands by ascending
//!   frequency.
//! - `OR` runs longer than [`OR_REORDER_THRESHOLD`]: negated operands first,
//!   by ascending frequency, then the plain operands in their original order.

use crate::query::operand::{BooleanOp, Operand};

pub const AND_REORDER_THRESHOLD: usize = 6;
pub const OR_REORDER_THRESHOLD: usize = 3;

/// Reorders the top `run + 1` operands of `stack` for a run of `run`
/// operators `op`. The top of the stack is evaluated first.
pub(crate) fn reorder(op: BooleanOp, run: usize, stack: &mut Vec<Operand>) {
    let threshold = match op {
        BooleanOp::And => AND_REORDER_THRESHOLD,
        BooleanOp::Or => OR_REORDER_THRESHOLD,
    };
    if run <= threshold || stack.len() <= run {
        return;
    }

    let group = stack.split_off(stack.len() - (run + 1));
    // Top of the stack first.
    let (mut negated, mut plain): (Vec<Operand>, Vec<Operand>) =
        group.into_iter().rev().partition(|operand| operand.negated);
    match op {
        BooleanOp::And => plain.sort_by_key(|operand| operand.frequency),
        BooleanOp::Or => negated.sort_by_key(|operand| operand.frequency),
    }

    let ordered = negated.into_iter().chain(plain);
    let mut ordered: Vec<Operand> = ordered.collect();
    ordered.reverse();
    stack.extend(ordered);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skip_list::PostingList;

    fn operand(frequency: u32, negated: bool) -> Operand {
        let list: PostingList = (0..frequency).collect();
        let op = Operand::new(list, frequency);
        if negated { op.negate() } else { op }
    }

    /// Evaluation order of the stack: top first.
    fn evaluation_order(stack: &[Operand]) -> Vec<(u32, bool)> {
        stack
            .iter()
            .rev()
            .map(|operand| (operand.frequency, operand.negated))
            .collect()
    }

    #[test]
    fn test_short_runs_are_untouched() {
        let mut stack: Vec<Operand> = (0..7).map(|i| operand(7 - i, false)).collect();
        let before = stack.clone();
        reorder(BooleanOp::And, 6, &mut stack);
        assert_eq!(stack, before);
        reorder(BooleanOp::Or, 3, &mut stack);
        assert_eq!(stack, before);
    }

    #[test]
    fn test_too_few_operands_are_untouched() {
        let mut stack: Vec<Operand> = (0..7).map(|i| operand(i, false)).collect();
        let before = stack.clone();
        reorder(BooleanOp::And, 7, &mut stack);
        assert_eq!(stack, before);
    }

    #[test]
    fn test_and_run() {
        // Bottom operand stays in place, the top 8 belong to a run of 7.
        let mut stack = vec![
            operand(100, false),
            operand(9, false),
            operand(3, true),
            operand(5, false),
            operand(1, false),
            operand(4, true),
            operand(7, false),
            operand(2, false),
            operand(6, false),
        ];
        reorder(BooleanOp::And, 7, &mut stack);
        assert_eq!(stack[0].frequency, 100);
        assert_eq!(
            evaluation_order(&stack[1..]),
            vec![
                (4, true),
                (3, true),
                (1, false),
                (2, false),
                (5, false),
                (6, false),
                (7, false),
                (9, false),
            ]
        );
    }

    #[test]
    fn test_or_run() {
        let mut stack = vec![
            operand(9, false),
            operand(3, true),
            operand(5, false),
            operand(1, true),
            operand(8, false),
        ];
        reorder(BooleanOp::Or, 4, &mut stack);
        assert_eq!(
            evaluation_order(&stack),
            vec![(1, true), (3, true), (8, false), (5, false), (9, false)]
        );
    }
}
