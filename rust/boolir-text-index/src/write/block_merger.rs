//! Bounded-memory k-way merge of block files.
//!
//! The merger works in rounds. In every round each open block contributes a
//! chunk of records whose summed frequencies stay within a per-block budget.
//! Records are merged into an ordered pending map. A term is complete once no
//! open block can still hold more postings for it, which is the case for
//! every term up to the smallest "last term read" among the blocks that
//! stopped on their budget. Complete terms are handed to the
//! [`PostingSink`] and dropped from memory.

use std::{collections::BTreeMap, path::PathBuf};

use boolir_common::{Result, verify_data};

use crate::{
    skip_list::PostingList,
    write::{
        PostingSink,
        block_builder::TermAccumulator,
        block_file::{BlockCursor, BlockRecord, ChunkEnd},
    },
};

/// Upper bound of the terms that are safe to finalize after a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Cutoff {
    /// Terms `<=` the given term are complete.
    Term(String),
    /// Sorts after every term: everything pending is complete.
    Sentinel,
}

impl Cutoff {
    fn admits(&self, term: &str) -> bool {
        match self {
            Cutoff::Term(cutoff) => term <= cutoff.as_str(),
            Cutoff::Sentinel => true,
        }
    }

    fn lower_to(&mut self, term: String) {
        let lower = match self {
            Cutoff::Term(current) => term < *current,
            Cutoff::Sentinel => true,
        };
        if lower {
            *self = Cutoff::Term(term);
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MergeStats {
    pub rounds: usize,
    pub terms: usize,
}

pub(crate) struct BlockMerger {
    memory_limit: usize,
    cursors: Vec<BlockCursor>,
    pending: BTreeMap<String, TermAccumulator>,
    stats: MergeStats,
}

impl BlockMerger {
    pub fn new(blocks: Vec<PathBuf>, memory_limit: usize) -> BlockMerger {
        BlockMerger {
            memory_limit,
            cursors: blocks.into_iter().map(BlockCursor::new).collect(),
            pending: BTreeMap::new(),
            stats: MergeStats::default(),
        }
    }

    /// Runs all rounds and pushes every term, in ascending order, into `sink`.
    /// Block files are deleted as soon as they are fully consumed.
    pub fn merge_into<S: PostingSink + ?Sized>(mut self, sink: &mut S) -> Result<MergeStats> {
        while !self.cursors.is_empty() {
            let cutoff = self.read_round()?;
            self.finalize(&cutoff, sink)?;
            self.retire_exhausted()?;
        }
        self.finalize(&Cutoff::Sentinel, sink)?;
        debug_assert!(self.pending.is_empty());
        Ok(self.stats)
    }

    fn round_budget(&self) -> u64 {
        let open = self.cursors.len().max(1) as u64;
        (self.memory_limit as u64 / 2) / open
    }

    /// Reads one chunk from every open block and merges it into the pending
    /// map. Returns the cutoff for this round.
    fn read_round(&mut self) -> Result<Cutoff> {
        let budget = self.round_budget();
        let mut cutoff = Cutoff::Sentinel;
        let mut records = Vec::new();

        for cursor in &mut self.cursors {
            match cursor.read_chunk(budget, &mut records)? {
                ChunkEnd::Budget { last_term } => cutoff.lower_to(last_term),
                ChunkEnd::Eof => {}
            }
        }

        self.stats.rounds += 1;
        log::debug!(
            "merge round {}: {} open blocks, budget {budget}, {} records, cutoff {cutoff:?}",
            self.stats.rounds,
            self.cursors.len(),
            records.len()
        );

        for record in records {
            self.merge_record(record);
        }
        Ok(cutoff)
    }

    fn merge_record(&mut self, record: BlockRecord) {
        let (term, frequency, doc_ids) = record.into_parts();
        let entry = self.pending.entry(term).or_default();
        entry.frequency += frequency;
        entry.doc_ids.extend(doc_ids);
    }

    /// Emits every pending term admitted by `cutoff`, in ascending order.
    fn finalize<S: PostingSink + ?Sized>(&mut self, cutoff: &Cutoff, sink: &mut S) -> Result<()> {
        while let Some(entry) = self.pending.first_entry() {
            if !cutoff.admits(entry.key()) {
                break;
            }
            let (term, accumulator) = entry.remove_entry();
            let TermAccumulator {
                frequency,
                mut doc_ids,
            } = accumulator;
            verify_data!(block_frequency, frequency as usize == doc_ids.len());
            doc_ids.sort_unstable();
            verify_data!(block_doc_ids, doc_ids.windows(2).all(|w| w[0] < w[1]));

            let postings = PostingList::from_sorted(doc_ids);
            sink.push_term(&term, frequency, &postings)?;
            self.stats.terms += 1;
        }
        Ok(())
    }

    fn retire_exhausted(&mut self) -> Result<()> {
        let (done, open): (Vec<_>, Vec<_>) = std::mem::take(&mut self.cursors)
            .into_iter()
            .partition(BlockCursor::is_exhausted);
        self.cursors = open;
        for cursor in done {
            log::debug!("block {} consumed", cursor.path().display());
            cursor.remove()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{skip_list::DocId, write::block_file::write_block};

    #[derive(Default)]
    struct CollectSink {
        terms: Vec<(String, u32, Vec<DocId>)>,
    }

    impl PostingSink for CollectSink {
        fn push_term(&mut self, term: &str, frequency: u32, postings: &PostingList) -> Result<()> {
            postings.validate()?;
            self.terms
                .push((term.to_string(), frequency, postings.to_doc_ids()));
            Ok(())
        }
    }

    fn block(dir: &Path, n: usize, records: &[(&str, &[DocId])]) -> PathBuf {
        let path = dir.join(format!("block{n}.jsonl"));
        write_block(
            &path,
            records
                .iter()
                .map(|(term, ids)| BlockRecord::new(term.to_string(), ids.to_vec())),
        )
        .unwrap();
        path
    }

    fn sample_blocks(dir: &Path) -> Vec<PathBuf> {
        vec![
            block(
                dir,
                0,
                &[("ant", &[1]), ("cat", &[1, 2]), ("dog", &[2]), ("eel", &[1])],
            ),
            block(dir, 1, &[("bee", &[3]), ("cat", &[4]), ("fox", &[3, 4])]),
            block(dir, 2, &[("cat", &[6, 5]), ("dog", &[5])]),
        ]
    }

    fn expected() -> Vec<(String, u32, Vec<DocId>)> {
        vec![
            ("ant".into(), 1, vec![1]),
            ("bee".into(), 1, vec![3]),
            ("cat".into(), 5, vec![1, 2, 4, 5, 6]),
            ("dog".into(), 2, vec![2, 5]),
            ("eel".into(), 1, vec![1]),
            ("fox".into(), 2, vec![3, 4]),
        ]
    }

    #[test]
    fn test_cutoff_ordering() {
        let mut cutoff = Cutoff::Sentinel;
        assert!(cutoff.admits("zzz"));
        cutoff.lower_to("m".into());
        cutoff.lower_to("t".into());
        assert_eq!(cutoff, Cutoff::Term("m".into()));
        assert!(cutoff.admits("m"));
        assert!(cutoff.admits("apple"));
        assert!(!cutoff.admits("ma"));
    }

    #[test]
    fn test_merge_independent_of_budget() {
        for limit in [0, 1, 2, 4, 8, 1000] {
            let dir = tempfile::tempdir().unwrap();
            let blocks = sample_blocks(dir.path());
            let mut sink = CollectSink::default();
            let stats = BlockMerger::new(blocks.clone(), limit)
                .merge_into(&mut sink)
                .unwrap();
            assert_eq!(sink.terms, expected(), "memory limit {limit}");
            assert_eq!(stats.terms, 6);
            assert!(stats.rounds >= 1);
            assert!(blocks.iter().all(|path| !path.exists()));
        }
    }

    #[test]
    fn test_small_budget_needs_more_rounds() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CollectSink::default();
        let tight = BlockMerger::new(sample_blocks(dir.path()), 0)
            .merge_into(&mut sink)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let mut sink = CollectSink::default();
        let loose = BlockMerger::new(sample_blocks(dir.path()), 1000)
            .merge_into(&mut sink)
            .unwrap();

        assert_eq!(loose.rounds, 1);
        assert!(tight.rounds > loose.rounds);
    }

    #[test]
    fn test_no_blocks() {
        let mut sink = CollectSink::default();
        let stats = BlockMerger::new(Vec::new(), 100)
            .merge_into(&mut sink)
            .unwrap();
        assert!(sink.terms.is_empty());
        assert_eq!(stats.rounds, 0);
    }

    #[test]
    fn test_overlapping_doc_ids_are_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let blocks = vec![
            block(dir.path(), 0, &[("cat", &[1])]),
            block(dir.path(), 1, &[("cat", &[1])]),
        ];
        let mut sink = CollectSink::default();
        let err = BlockMerger::new(blocks, 100)
            .merge_into(&mut sink)
            .unwrap_err();
        assert!(err.is_corruption());
    }
}
