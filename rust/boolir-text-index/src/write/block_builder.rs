//! In-memory accumulation of document term sets and spilling to block files.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use ahash::AHashMap;
use boolir_common::{Result, error::Error};

use crate::{
    skip_list::DocId,
    write::block_file::{self, BlockRecord},
};

/// Partial posting data of one term.
#[derive(Debug, Default)]
pub(crate) struct TermAccumulator {
    pub frequency: u32,
    pub doc_ids: Vec<DocId>,
}

impl TermAccumulator {
    fn push(&mut self, doc_id: DocId) {
        self.frequency += 1;
        self.doc_ids.push(doc_id);
    }
}

/// Result of the block building phase.
#[derive(Debug)]
pub(crate) struct BlockSet {
    /// Block files, in the order they were written.
    pub blocks: Vec<PathBuf>,
    /// Ids of every document that was added, ascending.
    pub documents: Vec<DocId>,
}

/// Accumulates `term -> doc ids` in memory and flushes sorted blocks to disk.
///
/// Memory usage is approximated by the number of (term, document) pairs added
/// since the last flush. The check runs at document boundaries only, so a
/// single document is never split across blocks.
pub(crate) struct BlockBuilder {
    work_dir: PathBuf,
    memory_limit: usize,
    accumulator: AHashMap<String, TermAccumulator>,
    pairs: usize,
    blocks: Vec<PathBuf>,
    documents: BTreeSet<DocId>,
}

impl BlockBuilder {
    pub fn new(work_dir: &Path, memory_limit: usize) -> BlockBuilder {
        BlockBuilder {
            work_dir: work_dir.to_path_buf(),
            memory_limit,
            accumulator: AHashMap::new(),
            pairs: 0,
            blocks: Vec::new(),
            documents: BTreeSet::new(),
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Adds the term set of one document. Document ids must be unique across
    /// the build, but may arrive in any order.
    pub fn add_document<I>(&mut self, doc_id: DocId, terms: I) -> Result<()>
    where
        I: IntoIterator<Item = String>,
    {
        if !self.documents.insert(doc_id) {
            return Err(Error::invalid_arg(
                "doc_id",
                format!("document {doc_id} was added more than once"),
            ));
        }

        for term in terms {
            let entry = self.accumulator.entry(term).or_default();
            if entry.doc_ids.last() != Some(&doc_id) {
                entry.push(doc_id);
                self.pairs += 1;
            }
        }
        if self.pairs > self.memory_limit {
            self.flush()?;
        }
        Ok(())
    }

    /// Writes the current accumulator as a sorted block file and clears it.
    /// Does nothing when the accumulator is empty.
    fn flush(&mut self) -> Result<()> {
        if self.accumulator.is_empty() {
            return Ok(());
        }
        let mut records: Vec<BlockRecord> = self
            .accumulator
            .drain()
            .map(|(term, mut acc)| {
                debug_assert_eq!(acc.frequency as usize, acc.doc_ids.len());
                acc.doc_ids.sort_unstable();
                BlockRecord::new(term, acc.doc_ids)
            })
            .collect();
        records.sort_unstable_by(|a, b| a.term().cmp(b.term()));
        self.pairs = 0;

        let path = self
            .work_dir
            .join(format!("block{}.jsonl", self.blocks.len()));
        let terms = records.len();
        let bytes = block_file::write_block(&path, records)?;
        log::debug!(
            "flushed block {} ({terms} terms, {bytes} bytes) to {}",
            self.blocks.len(),
            path.display()
        );
        self.blocks.push(path);
        Ok(())
    }

    /// Flushes the residual accumulator and returns the written blocks.
    pub fn finish(mut self) -> Result<BlockSet> {
        self.flush()?;
        Ok(BlockSet {
            blocks: self.blocks,
            documents: self.documents.into_iter().collect(),
        })
    }
}
