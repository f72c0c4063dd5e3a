//! Boolean retrieval over an external-memory inverted index.
//!
//! This crate builds a compact on-disk inverted index from a document
//! collection and answers boolean queries (`AND`, `OR`, `NOT`, parentheses)
//! against it.
//!
//! # Overview
//!
//! - **Lexical front end** ([`tokenizers`], [`normalizer`]): turns raw text
//!   into a deduplicated set of normalized terms.
//! - **Index construction** ([`write`]): bounded-memory block building and a
//!   k-way block merge that writes skip-encoded posting lists to an
//!   append-only postings file and a term [`dictionary`].
//! - **Index access** ([`read`]): [`IndexStore`] resolves terms to posting
//!   lists.
//! - **Query evaluation** ([`query`]): a two-stack evaluator combining posting
//!   lists with the skip-aware [`set_ops`].
//!
//! # Quick Start
//!
//! ```rust
//! use boolir_text_index::{IndexBuilder, IndexBuilderConfig, IndexStore, QueryEvaluator};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let dictionary = dir.path().join("dictionary.bin");
//! let postings = dir.path().join("postings.bin");
//!
//! let mut builder = IndexBuilder::new(IndexBuilderConfig::default()).unwrap();
//! builder.add_document(1, "cat dog").unwrap();
//! builder.add_document(2, "dog").unwrap();
//! builder.add_document(3, "cat").unwrap();
//! builder.finish(&dictionary, &postings).unwrap();
//!
//! let store = IndexStore::open(&dictionary, &postings).unwrap();
//! let normalizer = store.normalizer().unwrap();
//! let mut evaluator = QueryEvaluator::new(&store, &normalizer);
//! let result = evaluator.evaluate("(cat OR dog) AND NOT cat").unwrap();
//! assert_eq!(result.postings.to_doc_ids(), vec![2]);
//! ```

pub mod dictionary;
pub mod normalizer;
pub mod query;
pub mod read;
pub mod set_ops;
pub mod skip_list;
pub mod tokenizers;
pub mod write;

pub use normalizer::{LexiconSettings, Normalizer};
pub use query::{QueryEvaluator, QueryResult, TermSource, search_batch};
pub use read::{IndexStats, IndexStore};
pub use skip_list::{DocId, PostingEntry, PostingList};
pub use tokenizers::{Tokenizer, create_tokenizer};
pub use write::builder::{BuildSummary, IndexBuilder, IndexBuilderConfig};
pub use write::documents::DocumentSource;
