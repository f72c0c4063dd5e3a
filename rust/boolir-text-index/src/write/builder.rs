//! # Index Builder
//!
//! [`IndexBuilder`] is the entry point for constructing an index. Documents
//! are normalized into term sets and accumulated into bounded in-memory
//! blocks that spill to scratch files; [`IndexBuilder::finish`] merges the
//! blocks into the final postings and dictionary files.
//!
//! ## Usage Flow
//!
//! 1. Create an [`IndexBuilderConfig`] (or use the default).
//! 2. Feed documents with [`IndexBuilder::add_document`] or
//!    [`IndexBuilder::add_directory`].
//! 3. Call [`IndexBuilder::finish`] with the output paths.

use std::path::{Path, PathBuf};

use boolir_common::{Result, error::Error, verify_arg};
use tempfile::TempDir;

use crate::{
    normalizer::{LexiconSettings, Normalizer},
    skip_list::DocId,
    write::{
        block_builder::BlockBuilder, block_merger::BlockMerger, documents::DocumentSource,
        index_writer::IndexWriter,
    },
};

/// Configuration parameters for building an index.
#[derive(Debug, Clone)]
pub struct IndexBuilderConfig {
    /// Proxy memory limit, in (term, document) pairs. Controls both how often
    /// blocks are flushed and how much block data a merge round reads.
    pub memory_limit: usize,

    /// Directory for block files. A temporary directory owned by the builder
    /// is used when not set.
    pub work_dir: Option<PathBuf>,

    /// Tokenizer name, see [`create_tokenizer`](crate::tokenizers::create_tokenizer).
    pub tokenizer: String,

    /// Whether terms are stemmed.
    pub stemming: bool,
}

impl IndexBuilderConfig {
    pub const DEFAULT_MEMORY_LIMIT: usize = 100_000;

    pub fn lexicon(&self) -> LexiconSettings {
        LexiconSettings {
            tokenizer: self.tokenizer.clone(),
            stemming: self.stemming,
        }
    }
}

impl Default for IndexBuilderConfig {
    fn default() -> Self {
        let lexicon = LexiconSettings::default();
        IndexBuilderConfig {
            memory_limit: Self::DEFAULT_MEMORY_LIMIT,
            work_dir: None,
            tokenizer: lexicon.tokenizer,
            stemming: lexicon.stemming,
        }
    }
}

/// Summary of a completed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub documents: usize,
    pub blocks: usize,
    pub terms: usize,
    pub merge_rounds: usize,
    pub postings_bytes: u64,
}

pub struct IndexBuilder {
    memory_limit: usize,
    normalizer: Normalizer,
    blocks: BlockBuilder,
    /// Keeps the scratch directory alive until the builder is dropped.
    _scratch: Option<TempDir>,
}

impl IndexBuilder {
    pub fn new(config: IndexBuilderConfig) -> Result<IndexBuilder> {
        verify_arg!(memory_limit, config.memory_limit > 0);
        let normalizer = Normalizer::new(config.lexicon())?;

        let (work_dir, scratch) = match &config.work_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .map_err(|e| Error::io(dir.display().to_string(), e))?;
                (dir.clone(), None)
            }
            None => {
                let scratch = TempDir::with_prefix("boolir-blocks-")
                    .map_err(|e| Error::io("temporary block directory", e))?;
                (scratch.path().to_path_buf(), Some(scratch))
            }
        };
        log::debug!("writing blocks to {}", work_dir.display());

        Ok(IndexBuilder {
            memory_limit: config.memory_limit,
            normalizer,
            blocks: BlockBuilder::new(&work_dir, config.memory_limit),
            _scratch: scratch,
        })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Normalizes `text` and adds its terms under `doc_id`. A document with no
    /// terms is still part of the indexed collection.
    pub fn add_document(&mut self, doc_id: DocId, text: &str) -> Result<()> {
        let terms = self.normalizer.term_set(text);
        self.blocks.add_document(doc_id, terms)
    }

    /// Adds every document of `dir`, see [`DocumentSource`]. Returns the
    /// number of documents added.
    pub fn add_directory(&mut self, dir: &Path) -> Result<usize> {
        let source = DocumentSource::open(dir)?;
        log::info!(
            "indexing {} documents from {}",
            source.len(),
            source.dir().display()
        );
        for document in source.iter() {
            let (doc_id, text) = document?;
            self.add_document(doc_id, &text)?;
        }
        Ok(source.len())
    }

    /// Merges all blocks and writes the postings file, then the dictionary
    /// file. Existing files at either path are replaced.
    pub fn finish(self, dictionary_path: &Path, postings_path: &Path) -> Result<BuildSummary> {
        let documents = self.blocks.document_count();
        let lexicon = self.normalizer.settings().clone();
        let block_set = self.blocks.finish()?;
        let blocks = block_set.blocks.len();
        log::info!("merging {blocks} blocks for {documents} documents");

        let mut writer = IndexWriter::create(postings_path, lexicon)?;
        let merged = BlockMerger::new(block_set.blocks, self.memory_limit).merge_into(&mut writer)?;
        writer.write_universe(block_set.documents)?;
        let written = writer.finish(dictionary_path)?;
        debug_assert_eq!(merged.terms, written.terms);

        let summary = BuildSummary {
            documents: written.documents,
            blocks,
            terms: written.terms,
            merge_rounds: merged.rounds,
            postings_bytes: written.postings_bytes,
        };
        log::info!(
            "index complete: {} terms, {} documents, {} merge rounds, {} postings bytes",
            summary.terms,
            summary.documents,
            summary.merge_rounds,
            summary.postings_bytes
        );
        Ok(summary)
    }
}
