//! Search command implementation

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};
use boolir_text_index::search_batch;

use crate::utils::{open_index, validate_file_exists};

pub fn run(dictionary: &Path, postings: &Path, queries: &Path, output: &Path) -> Result<()> {
    validate_file_exists(queries)?;
    let store = open_index(dictionary, postings)?;
    let normalizer = store
        .normalizer()
        .context("Index was built with an unsupported lexicon")?;

    println!("Running search on {}...", queries.display());
    let reader = BufReader::new(
        File::open(queries)
            .with_context(|| format!("Failed to open queries file {}", queries.display()))?,
    );
    let mut writer = BufWriter::new(
        File::create(output)
            .with_context(|| format!("Failed to create results file {}", output.display()))?,
    );
    let stats = search_batch(&store, &normalizer, reader, &mut writer)
        .context("Query evaluation failed")?;
    writer
        .flush()
        .with_context(|| format!("Failed to write results file {}", output.display()))?;

    if stats.malformed > 0 {
        log::warn!("{} of {} queries were malformed", stats.malformed, stats.queries);
    }
    println!(
        "Wrote {} results to {}",
        stats.queries,
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boolir_text_index::{IndexBuilder, IndexBuilderConfig};

    #[test]
    fn test_search_writes_results() {
        let dir = tempfile::tempdir().unwrap();
        let dictionary = dir.path().join("dictionary.bin");
        let postings = dir.path().join("postings.bin");
        let mut builder = IndexBuilder::new(IndexBuilderConfig::default()).unwrap();
        builder.add_document(1, "cat dog").unwrap();
        builder.add_document(2, "dog").unwrap();
        builder.add_document(3, "cat").unwrap();
        builder.finish(&dictionary, &postings).unwrap();

        let queries = dir.path().join("queries.txt");
        std::fs::write(&queries, "cat AND dog\n(cat OR dog) AND NOT cat\nNOT\n").unwrap();
        let output = dir.path().join("results.txt");
        run(&dictionary, &postings, &queries, &output).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "1\n2\n\n");
    }
}
