//! Lookup command implementation

use std::path::Path;

use anyhow::{Context, Result};

use crate::utils::open_index;

pub fn run(dictionary: &Path, postings: &Path, term: &str) -> Result<()> {
    let store = open_index(dictionary, postings)?;
    let normalizer = store
        .normalizer()
        .context("Index was built with an unsupported lexicon")?;

    let terms = normalizer.query_terms(term);
    if terms.is_empty() {
        println!("'{term}' normalizes to nothing");
        return Ok(());
    }
    for (i, normalized) in terms.iter().enumerate() {
        let (frequency, list) = store
            .lookup(normalized)
            .with_context(|| format!("Failed to read postings of '{normalized}'"))?;

        if i > 0 {
            println!();
        }
        println!("Term:      {normalized}");
        println!("Frequency: {frequency}");
        let ids: Vec<String> = list.doc_ids().map(|id| id.to_string()).collect();
        println!("Documents: {}", ids.join(" "));
    }
    Ok(())
}
