use boolir_common::Result;

use crate::{
    normalizer::Normalizer,
    query::{
        TermSource,
        operand::{BooleanOp, Operand},
        parser::{QueryToken, tokenize_query},
        planner,
    },
    skip_list::PostingList,
};

/// Entries of the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
    Not,
    Open,
}

impl From<BooleanOp> for Operator {
    fn from(op: BooleanOp) -> Self {
        match op {
            BooleanOp::And => Operator::And,
            BooleanOp::Or => Operator::Or,
        }
    }
}

/// Outcome of evaluating one query line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Matching document ids; empty for malformed queries.
    pub postings: PostingList,
    pub well_formed: bool,
}

/// Two-stack boolean evaluator.
///
/// Tokens are fed one at a time through [`step`](QueryEvaluator::step);
/// [`finish`](QueryEvaluator::finish) reduces what is left, produces the
/// result and resets the evaluator for the next query. Once a query is found
/// to be malformed, the remaining tokens of that query are ignored.
pub struct QueryEvaluator<'a, S: TermSource + ?Sized> {
    source: &'a S,
    normalizer: &'a Normalizer,
    operators: Vec<Operator>,
    operands: Vec<Operand>,
    malformed: bool,
}

impl<'a, S: TermSource + ?Sized> QueryEvaluator<'a, S> {
    pub fn new(source: &'a S, normalizer: &'a Normalizer) -> Self {
        QueryEvaluator {
            source,
            normalizer,
            operators: Vec::new(),
            operands: Vec::new(),
            malformed: false,
        }
    }

    /// Evaluates a complete query line.
    pub fn evaluate(&mut self, line: &str) -> Result<QueryResult> {
        self.reset();
        for token in tokenize_query(line) {
            self.step(token)?;
        }
        self.finish()
    }

    pub fn step(&mut self, token: QueryToken<'_>) -> Result<()> {
        if self.malformed {
            return Ok(());
        }
        log::trace!("step {token:?}: {:?}", self.operators);
        match token {
            QueryToken::Term(raw) => {
                let operand = self.resolve_term(raw)?;
                let operand = if self.pop_if(Operator::Not) {
                    operand.negate()
                } else {
                    operand
                };
                self.operands.push(operand);
            }
            QueryToken::Open => self.operators.push(Operator::Open),
            QueryToken::Close => self.close_group(),
            QueryToken::Or => {
                self.reduce_run(BooleanOp::And);
                self.operators.push(Operator::Or);
            }
            QueryToken::Not => {
                if !self.pop_if(Operator::Not) {
                    self.operators.push(Operator::Not);
                }
            }
            QueryToken::And => self.operators.push(Operator::And),
        }
        Ok(())
    }

    /// Reduces the remaining operators and returns the query result. The
    /// evaluator is reset afterwards.
    pub fn finish(&mut self) -> Result<QueryResult> {
        if !self.malformed {
            self.reduce_run(BooleanOp::And);
            self.reduce_run(BooleanOp::Or);
        }
        let well_formed = !self.malformed && self.operators.is_empty() && self.operands.len() == 1;
        let postings = match self.operands.pop() {
            Some(operand) if well_formed => operand.resolve(self.source.universe()),
            _ => PostingList::new(),
        };
        self.reset();
        Ok(QueryResult {
            postings,
            well_formed,
        })
    }

    fn reset(&mut self) {
        self.operators.clear();
        self.operands.clear();
        self.malformed = false;
    }

    /// Looks up every term of a literal. A literal that tokenizes into several
    /// terms matches the documents containing all of them, intersected rarest
    /// first.
    fn resolve_term(&self, raw: &str) -> Result<Operand> {
        let mut operands = self
            .normalizer
            .query_terms(raw)
            .iter()
            .map(|term| -> Result<Operand> {
                let (frequency, list) = self.source.lookup(term)?;
                Ok(Operand::new(list, frequency))
            })
            .collect::<Result<Vec<_>>>()?;
        operands.sort_by_key(|operand| operand.frequency);
        let mut operands = operands.into_iter();
        let Some(first) = operands.next() else {
            return Ok(Operand::new(PostingList::new(), 0));
        };
        Ok(operands.fold(first, |acc, next| {
            Operand::combine(BooleanOp::And, &acc, &next)
        }))
    }

    fn pop_if(&mut self, expected: Operator) -> bool {
        if self.operators.last() == Some(&expected) {
            self.operators.pop();
            true
        } else {
            false
        }
    }

    fn close_group(&mut self) {
        self.reduce_run(BooleanOp::And);
        self.reduce_run(BooleanOp::Or);
        if self.malformed {
            return;
        }
        if !self.pop_if(Operator::Open) {
            self.malformed = true;
            return;
        }
        if self.pop_if(Operator::Not) {
            match self.operands.pop() {
                Some(operand) => self.operands.push(operand.negate()),
                None => self.malformed = true,
            }
        }
    }

    /// Reduces the run of `op` operators on top of the operator stack.
    fn reduce_run(&mut self, op: BooleanOp) {
        let top = Operator::from(op);
        let run = self
            .operators
            .iter()
            .rev()
            .take_while(|&&operator| operator == top)
            .count();
        if run == 0 {
            return;
        }
        planner::reorder(op, run, &mut self.operands);
        for _ in 0..run {
            self.operators.pop();
            let (Some(right), Some(left)) = (self.operands.pop(), self.operands.pop()) else {
                self.malformed = true;
                return;
            };
            self.operands.push(Operand::combine(op, &left, &right));
        }
    }
}
