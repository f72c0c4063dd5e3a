//! Tokenizers for extracting raw terms from document and query text.
//!
//! Tokenizers are used in two key scenarios:
//!
//! 1. **Index Creation**: When building the inverted index, tokenizers break the
//!    document body into raw words, which the [`Normalizer`](crate::Normalizer)
//!    then case-folds, stems and deduplicates into the document's term set.
//!
//! 2. **Query Processing**: Query literals are tokenized and normalized the same
//!    way, so the terms extracted at query time match the ones stored at
//!    indexing time.
//!
//! The tokenizers return iterators of string slices to avoid memory allocations during
//! the tokenization process.

pub mod unicode_word;
pub mod whitespace;

use boolir_common::{Result, error::Error};
pub use unicode_word::UnicodeWordTokenizer;
pub use whitespace::WhitespaceTokenizer;

/// Default maximum length of a single term in bytes before truncation
pub const DEFAULT_MAX_TERM_LENGTH: usize = 128;

/// A tokenizer extracts terms (tokens) from raw text.
///
/// This trait returns an iterator of string slices to avoid memory allocations.
/// Terms longer than [`DEFAULT_MAX_TERM_LENGTH`] are truncated at UTF-8 character
/// boundaries.
pub trait Tokenizer: Send + Sync {
    /// The iterator type returned by tokenize.
    type TokenIter<'a>: Iterator<Item = &'a str>
    where
        Self: 'a;

    /// Extract terms from the input string as an iterator of string slices.
    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a>;
}

/// Creates a tokenizer instance based on the provided name string.
///
/// # Errors
/// Returns an [`Error::invalid_arg`] if the provided tokenizer name is not recognized.
pub fn create_tokenizer(name: &str) -> Result<TokenizerType> {
    match name.try_into()? {
        TokenizerKind::Whitespace => Ok(TokenizerType::Whitespace(WhitespaceTokenizer::new())),
        TokenizerKind::UnicodeWord => Ok(TokenizerType::UnicodeWord(UnicodeWordTokenizer::new())),
    }
}

/// Truncate a string slice to the maximum allowed length at a codepoint boundary.
///
/// If the input is longer than `max_term_length`, it is cut at the last valid
/// UTF-8 character boundary that fits within the limit.
pub(crate) fn truncate_str(input: &str, max_term_length: usize) -> &str {
    if input.len() <= max_term_length {
        return input;
    }

    let mut boundary = max_term_length;
    while boundary > 0 && !input.is_char_boundary(boundary) {
        boundary -= 1;
    }

    &input[..boundary]
}

/// Identifies the tokenization strategy. The name is persisted alongside the
/// index so that queries are tokenized the same way documents were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerKind {
    /// Splits on Unicode whitespace only; punctuation stays attached to the
    /// words and is removed later by the normalizer.
    Whitespace,
    /// Splits input into words based on Unicode word boundaries (UAX #29).
    UnicodeWord,
}

impl TryFrom<&str> for TokenizerKind {
    type Error = boolir_common::error::Error;

    fn try_from(name: &str) -> Result<Self> {
        match name {
            "whitespace" => Ok(TokenizerKind::Whitespace),
            "unicode-word" => Ok(TokenizerKind::UnicodeWord),
            _ => Err(Error::invalid_arg(
                "name",
                format!("Unrecognized tokenizer: {name}"),
            )),
        }
    }
}

/// Enum that holds all available tokenizer types.
/// This allows for dynamic dispatch while maintaining the iterator-based API.
pub enum TokenizerType {
    Whitespace(WhitespaceTokenizer),
    UnicodeWord(UnicodeWordTokenizer),
}

impl Tokenizer for TokenizerType {
    type TokenIter<'a> = Box<dyn Iterator<Item = &'a str> + 'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        match self {
            TokenizerType::Whitespace(tokenizer) => Box::new(tokenizer.tokenize(input)),
            TokenizerType::UnicodeWord(tokenizer) => Box::new(tokenizer.tokenize(input)),
        }
    }
}
