//! Index construction.
//!
//! Building an index is a two-phase external-memory process:
//!
//! 1. **Block building**: documents are normalized into term sets and
//!    accumulated in memory by [`block_builder::BlockBuilder`]. After each
//!    document, if the number of (term, document) pairs added since the last
//!    flush exceeds the memory limit, the accumulator is flushed to a sorted
//!    block file on disk.
//! 2. **Block merging**: [`block_merger::BlockMerger`] reads all block files in
//!    bounded rounds and emits every term exactly once, in lexicographic order,
//!    with its complete posting list, into a [`PostingSink`].
//!
//! [`index_writer::IndexWriter`] is the sink used for real indexes: it appends
//! skip-encoded posting lists to the postings file and records their offsets in
//! the [`Dictionary`](crate::dictionary::Dictionary).
//!
//! [`builder::IndexBuilder`] ties the phases together and is the entry point
//! for callers.

pub(crate) mod block_builder;
pub(crate) mod block_file;
pub(crate) mod block_merger;
pub mod builder;
pub mod documents;
pub mod index_writer;

use boolir_common::Result;

use crate::skip_list::PostingList;

/// Consumer of finalized terms produced by the block merger.
///
/// Terms arrive in strictly ascending lexicographic order, each exactly once,
/// and each with its complete, skip-encoded posting list.
pub trait PostingSink {
    /// Accepts the complete posting list of `term`. `frequency` is the number
    /// of documents containing the term and always equals `postings.len()`.
    fn push_term(&mut self, term: &str, frequency: u32, postings: &PostingList) -> Result<()>;
}
