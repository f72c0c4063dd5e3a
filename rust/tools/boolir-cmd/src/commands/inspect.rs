//! Inspect command implementation

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::utils::{format_size, open_index};

#[derive(Serialize)]
struct InspectSummary {
    terms: usize,
    documents: usize,
    postings_bytes: u64,
    postings_size: String,
    lexicon: LexiconInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_terms: Option<Vec<TermInfo>>,
}

#[derive(Serialize)]
struct LexiconInfo {
    tokenizer: String,
    stemming: bool,
}

#[derive(Serialize)]
struct TermInfo {
    term: String,
    frequency: u32,
}

pub fn run(dictionary: &Path, postings: &Path, top: Option<usize>) -> Result<()> {
    let store = open_index(dictionary, postings)?;
    let stats = store.stats();
    let lexicon = store.lexicon();

    let top_terms = top.map(|n| {
        let mut terms: Vec<(&str, u32)> = store.terms().collect();
        // Most frequent first, ties in lexicographic order.
        terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        terms
            .into_iter()
            .take(n)
            .map(|(term, frequency)| TermInfo {
                term: term.to_string(),
                frequency,
            })
            .collect()
    });

    let summary = InspectSummary {
        terms: stats.terms,
        documents: stats.documents,
        postings_bytes: stats.postings_bytes,
        postings_size: format_size(stats.postings_bytes),
        lexicon: LexiconInfo {
            tokenizer: lexicon.tokenizer.clone(),
            stemming: lexicon.stemming,
        },
        top_terms,
    };

    println!("Inspecting index: {}", dictionary.display());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
