//! Boolean query evaluation.
//!
//! A query line is split into [`QueryToken`]s by [`tokenize_query`] and fed,
//! token by token, into a [`QueryEvaluator`]. The evaluator resolves terms
//! through a [`TermSource`] and combines posting lists with the skip-aware
//! set operations of [`set_ops`](crate::set_ops).
//!
//! Operator precedence, from strongest to weakest: `NOT`, `AND`, `OR`.
//! Parentheses group. A line that does not form exactly one expression is
//! malformed and evaluates to the empty set.

mod evaluator;
mod operand;
mod parser;
mod planner;

use std::io::{BufRead, Write};

use boolir_common::{Result, error::Error};

use crate::{normalizer::Normalizer, read::IndexStore, skip_list::PostingList};

pub use evaluator::{QueryEvaluator, QueryResult};
pub use operand::{BooleanOp, Operand};
pub use parser::{QueryToken, tokenize_query};

/// Source of posting lists for query evaluation.
pub trait TermSource {
    /// Returns the document frequency and posting list of a normalized term,
    /// `(0, empty)` for unknown terms.
    fn lookup(&self, term: &str) -> Result<(u32, PostingList)>;

    /// Ids of every indexed document.
    fn universe(&self) -> &PostingList;
}

impl TermSource for IndexStore {
    fn lookup(&self, term: &str) -> Result<(u32, PostingList)> {
        IndexStore::lookup(self, term)
    }

    fn universe(&self) -> &PostingList {
        IndexStore::universe(self)
    }
}

/// Counters of a query batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub queries: usize,
    pub malformed: usize,
}

/// Evaluates every line of `queries` and writes one result line per query to
/// `out`: ascending document ids separated by single spaces, or an empty
/// line when the query is malformed or matches nothing.
///
/// Lines that are not valid UTF-8 are decoded lossily and evaluated like any
/// other line.
pub fn search_batch<S, R, W>(
    source: &S,
    normalizer: &Normalizer,
    mut queries: R,
    out: &mut W,
) -> Result<BatchStats>
where
    S: TermSource + ?Sized,
    R: BufRead,
    W: Write + ?Sized,
{
    let mut evaluator = QueryEvaluator::new(source, normalizer);
    let mut stats = BatchStats::default();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = queries
            .read_until(b'\n', &mut buf)
            .map_err(|e| Error::io("query stream", e))?;
        if read == 0 {
            break;
        }
        let raw = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = String::from_utf8_lossy(raw);
        let result = evaluator.evaluate(&line)?;
        stats.queries += 1;
        if !result.well_formed {
            stats.malformed += 1;
            log::debug!("malformed query on line {}: {line:?}", stats.queries);
        }
        write_result_line(out, &result.postings)?;
    }
    log::info!(
        "evaluated {} queries ({} malformed)",
        stats.queries,
        stats.malformed
    );
    Ok(stats)
}

/// Writes one results line.
pub fn write_result_line<W: Write + ?Sized>(out: &mut W, postings: &PostingList) -> Result<()> {
    let mut first = true;
    for doc_id in postings.doc_ids() {
        if !first {
            out.write_all(b" ")?;
        }
        write!(out, "{doc_id}")?;
        first = false;
    }
    out.write_all(b"\n")?;
    Ok(())
}
