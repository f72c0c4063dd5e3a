//! Whitespace Tokenizer - splits on Unicode whitespace only.

use std::str::SplitWhitespace;

use super::{DEFAULT_MAX_TERM_LENGTH, Tokenizer, truncate_str};

/// Whitespace Tokenizer - returns every whitespace-separated chunk.
///
/// Punctuation is left attached (`"dog,"`); the normalizer strips it. Chunks
/// longer than the maximum term length are truncated.
pub struct WhitespaceTokenizer {
    max_term_length: usize,
}

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self {
            max_term_length: DEFAULT_MAX_TERM_LENGTH,
        }
    }
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WhitespaceTokenIterator<'a> {
    inner: SplitWhitespace<'a>,
    max_term_length: usize,
}

impl<'a> Iterator for WhitespaceTokenIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|chunk| truncate_str(chunk, self.max_term_length))
    }
}

impl Tokenizer for WhitespaceTokenizer {
    type TokenIter<'a> = WhitespaceTokenIterator<'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        WhitespaceTokenIterator {
            inner: input.split_whitespace(),
            max_term_length: self.max_term_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();

        let terms: Vec<&str> = tokenizer.tokenize("  the cat,\tsat\n on ").collect();
        assert_eq!(terms, vec!["the", "cat,", "sat", "on"]);

        let terms: Vec<&str> = tokenizer.tokenize("").collect();
        assert!(terms.is_empty());
    }

    #[test]
    fn test_long_chunks_are_truncated() {
        let tokenizer = WhitespaceTokenizer::new();
        let long_chunk = "-".repeat(200);
        let text = format!("a {long_chunk}");
        let terms: Vec<&str> = tokenizer.tokenize(&text).collect();
        assert_eq!(terms, vec!["a", &long_chunk[..DEFAULT_MAX_TERM_LENGTH]]);
    }
}
