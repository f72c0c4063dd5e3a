//! Lexical normalization shared by indexing and query evaluation.
//!
//! A document body is tokenized, every token is case-folded, stemmed with the
//! English Snowball stemmer and stripped of leading/trailing ASCII punctuation;
//! tokens that end up empty are dropped. The result is the document's
//! deduplicated term set. Query literals go through [`Normalizer::query_terms`],
//! which runs the same tokenizer and per-token steps, so a literal such as
//! `e-mail` may produce more than one term.

use std::collections::BTreeSet;

use bincode::{Decode, Encode};
use boolir_common::Result;
use rust_stemmers::{Algorithm, Stemmer};

use crate::tokenizers::{self, Tokenizer, TokenizerType};

/// Persisted description of how terms were normalized at indexing time.
///
/// Stored in the dictionary file, so the search side rebuilds exactly the
/// normalizer the index was built with.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct LexiconSettings {
    /// Name of the tokenizer, see [`tokenizers::create_tokenizer`].
    pub tokenizer: String,
    /// Whether terms were stemmed.
    pub stemming: bool,
}

impl Default for LexiconSettings {
    fn default() -> Self {
        LexiconSettings {
            tokenizer: "unicode-word".to_string(),
            stemming: true,
        }
    }
}

pub struct Normalizer {
    settings: LexiconSettings,
    tokenizer: TokenizerType,
    stemmer: Option<Stemmer>,
}

impl Normalizer {
    pub fn new(settings: LexiconSettings) -> Result<Normalizer> {
        let tokenizer = tokenizers::create_tokenizer(&settings.tokenizer)?;
        let stemmer = settings
            .stemming
            .then(|| Stemmer::create(Algorithm::English));
        Ok(Normalizer {
            settings,
            tokenizer,
            stemmer,
        })
    }

    pub fn settings(&self) -> &LexiconSettings {
        &self.settings
    }

    /// Normalizes a single raw token. Returns `None` when nothing is left
    /// after punctuation stripping.
    fn normalize_term(&self, raw: &str) -> Option<String> {
        let lowered = raw.to_lowercase();
        let stemmed = match &self.stemmer {
            Some(stemmer) => stemmer.stem(&lowered).into_owned(),
            None => lowered,
        };
        let stripped = stemmed.trim_matches(|c: char| c.is_ascii_punctuation());
        if stripped.is_empty() {
            None
        } else if stripped.len() == stemmed.len() {
            Some(stemmed)
        } else {
            Some(stripped.to_string())
        }
    }

    /// Produces the deduplicated, sorted set of normalized terms of a document.
    pub fn term_set(&self, text: &str) -> BTreeSet<String> {
        self.tokenizer
            .tokenize(text)
            .filter_map(|token| self.normalize_term(token))
            .collect()
    }

    /// Terms a single query literal stands for, sorted and deduplicated.
    ///
    /// The literal is tokenized exactly like a document body. An empty result
    /// means the literal matches nothing; several terms must all be present.
    pub fn query_terms(&self, raw: &str) -> Vec<String> {
        self.term_set(raw).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(tokenizer: &str, stemming: bool) -> Normalizer {
        Normalizer::new(LexiconSettings {
            tokenizer: tokenizer.to_string(),
            stemming,
        })
        .unwrap()
    }

    #[test]
    fn test_normalize_term() {
        let n = normalizer("unicode-word", true);
        assert_eq!(n.normalize_term("Cats").as_deref(), Some("cat"));
        assert_eq!(n.normalize_term("RUNNING").as_deref(), Some("run"));
        assert_eq!(n.normalize_term("dog,").as_deref(), Some("dog"));
        assert_eq!(n.normalize_term("..."), None);
        assert_eq!(n.normalize_term(""), None);

        let n = normalizer("unicode-word", false);
        assert_eq!(n.normalize_term("Cats").as_deref(), Some("cats"));
        assert_eq!(n.normalize_term("(cats)").as_deref(), Some("cats"));
    }

    #[test]
    fn test_term_set_is_deduplicated() {
        let n = normalizer("unicode-word", true);
        let terms = n.term_set("The cat chased the cats. THE END!");
        let terms: Vec<&str> = terms.iter().map(String::as_str).collect();
        assert_eq!(terms, vec!["cat", "chase", "end", "the"]);
    }

    #[test]
    fn test_whitespace_tokenizer_strips_punctuation() {
        let n = normalizer("whitespace", false);
        let terms = n.term_set("\"hello,\" she said -- hello!");
        let terms: Vec<&str> = terms.iter().map(String::as_str).collect();
        assert_eq!(terms, vec!["hello", "said", "she"]);
    }

    #[test]
    fn test_query_terms_follow_document_tokenization() {
        let n = normalizer("unicode-word", false);
        assert_eq!(n.query_terms("Cats"), vec!["cats"]);
        assert_eq!(n.query_terms("e-mail"), vec!["e", "mail"]);
        assert_eq!(
            n.query_terms("state-of-the-art"),
            vec!["art", "of", "state", "the"]
        );
        assert!(n.query_terms("--").is_empty());

        let long_word = "x".repeat(150);
        let query = n.query_terms(&long_word);
        assert_eq!(query.len(), 1);
        assert_eq!(query[0].len(), tokenizers::DEFAULT_MAX_TERM_LENGTH);
        assert!(n.term_set(&format!("a {long_word} b")).contains(&query[0]));

        let n = normalizer("whitespace", false);
        assert_eq!(n.query_terms("e-mail,"), vec!["e-mail"]);
    }

    #[test]
    fn test_unknown_tokenizer_is_rejected() {
        let result = Normalizer::new(LexiconSettings {
            tokenizer: "nope".to_string(),
            stemming: true,
        });
        assert!(result.is_err());
    }
}
