//! Index command implementation

use std::path::PathBuf;

use anyhow::{Context, Result};
use boolir_text_index::{IndexBuilder, IndexBuilderConfig};

use crate::utils::{format_size, validate_dir_exists};

pub struct IndexArgs {
    pub input: PathBuf,
    pub dictionary: PathBuf,
    pub postings: PathBuf,
    pub memory_limit: usize,
    pub work_dir: Option<PathBuf>,
    pub tokenizer: String,
    pub stemming: bool,
}

pub fn run(args: IndexArgs) -> Result<()> {
    validate_dir_exists(&args.input)?;
    println!("Indexing {}...", args.input.display());

    let config = IndexBuilderConfig {
        memory_limit: args.memory_limit,
        work_dir: args.work_dir,
        tokenizer: args.tokenizer,
        stemming: args.stemming,
    };
    let mut builder = IndexBuilder::new(config).context("Invalid index configuration")?;
    builder
        .add_directory(&args.input)
        .with_context(|| format!("Failed to read documents from {}", args.input.display()))?;
    let summary = builder
        .finish(&args.dictionary, &args.postings)
        .with_context(|| {
            format!(
                "Failed to write index to {} / {}",
                args.dictionary.display(),
                args.postings.display()
            )
        })?;

    println!("Documents:     {}", summary.documents);
    println!("Terms:         {}", summary.terms);
    println!("Blocks:        {}", summary.blocks);
    println!("Merge rounds:  {}", summary.merge_rounds);
    println!("Postings size: {}", format_size(summary.postings_bytes));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_directory() {
        let docs = tempfile::tempdir().unwrap();
        std::fs::write(docs.path().join("1"), "cat dog").unwrap();
        std::fs::write(docs.path().join("2"), "dog").unwrap();
        let out = tempfile::tempdir().unwrap();

        run(IndexArgs {
            input: docs.path().to_path_buf(),
            dictionary: out.path().join("dictionary.bin"),
            postings: out.path().join("postings.bin"),
            memory_limit: 1,
            work_dir: None,
            tokenizer: "unicode-word".to_string(),
            stemming: true,
        })
        .unwrap();
        assert!(out.path().join("dictionary.bin").is_file());
        assert!(out.path().join("postings.bin").is_file());
    }

    #[test]
    fn test_missing_input_dir() {
        let out = tempfile::tempdir().unwrap();
        let result = run(IndexArgs {
            input: out.path().join("missing"),
            dictionary: out.path().join("dictionary.bin"),
            postings: out.path().join("postings.bin"),
            memory_limit: 100,
            work_dir: None,
            tokenizer: "unicode-word".to_string(),
            stemming: true,
        });
        assert!(result.is_err());
    }
}
