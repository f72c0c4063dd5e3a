//! Unicode Word Tokenizer - extracts words using Unicode word boundaries.

use unicode_segmentation::{UnicodeSegmentation, UnicodeWords};

use super::{DEFAULT_MAX_TERM_LENGTH, Tokenizer, truncate_str};

/// Word Tokenizer - extracts words as defined by UAX #29.
///
/// Boundaries are computed by `unicode-segmentation`; segments that contain no
/// alphanumeric character (punctuation, whitespace, emoji) are dropped, and
/// apostrophes inside words are kept (`"don't"` is a single word). Hyphenated
/// words are split at the hyphen.
pub struct UnicodeWordTokenizer {
    max_term_length: usize,
}

impl UnicodeWordTokenizer {
    pub fn new() -> Self {
        Self {
            max_term_length: DEFAULT_MAX_TERM_LENGTH,
        }
    }
}

impl Default for UnicodeWordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator that yields word tokens from a string input.
pub struct WordTokenIterator<'a> {
    words: UnicodeWords<'a>,
    max_term_length: usize,
}

impl<'a> Iterator for WordTokenIterator<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.words
            .next()
            .map(|word| truncate_str(word, self.max_term_length))
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    type TokenIter<'a> = WordTokenIterator<'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        WordTokenIterator {
            words: input.unicode_words(),
            max_term_length: self.max_term_length,
        }
    }
}
