use std::path::Path;

use boolir_common::{Result, error::Error, verify_data};

use crate::{
    dictionary::{Dictionary, TermInfo},
    normalizer::{LexiconSettings, Normalizer},
    skip_list::PostingList,
};

/// Summary figures of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub terms: usize,
    pub documents: usize,
    pub postings_bytes: u64,
}

/// A read-only index: the dictionary plus the postings file contents.
///
/// The postings file is loaded into memory when the store is opened, so
/// lookups never touch the file system and the store can be shared between
/// threads.
pub struct IndexStore {
    dictionary: Dictionary,
    postings: Vec<u8>,
    universe: PostingList,
}

impl IndexStore {
    pub fn open(dictionary_path: &Path, postings_path: &Path) -> Result<IndexStore> {
        let dictionary = Dictionary::read_from(dictionary_path)?;
        let postings = std::fs::read(postings_path)
            .map_err(|e| Error::io(postings_path.display().to_string(), e))?;
        let store = Self::from_parts(dictionary, postings)?;
        log::info!(
            "opened index with {} terms over {} documents",
            store.dictionary.len(),
            store.universe.len()
        );
        Ok(store)
    }

    pub fn from_parts(dictionary: Dictionary, postings: Vec<u8>) -> Result<IndexStore> {
        let info = dictionary.universe().ok_or_else(|| {
            Error::invalid_format("dictionary_universe", "universe entry is missing")
        })?;
        let universe = read_list(&postings, info)?;
        Ok(IndexStore {
            dictionary,
            postings,
            universe,
        })
    }

    /// Returns the document frequency and posting list of a normalized term.
    /// Unknown terms yield `(0, empty)`.
    pub fn lookup(&self, term: &str) -> Result<(u32, PostingList)> {
        match self.dictionary.get(term) {
            Some(info) => Ok((info.frequency, read_list(&self.postings, info)?)),
            None => Ok((0, PostingList::new())),
        }
    }

    /// Ids of every indexed document.
    pub fn universe(&self) -> &PostingList {
        &self.universe
    }

    pub fn lexicon(&self) -> &LexiconSettings {
        self.dictionary.lexicon()
    }

    /// Builds the normalizer the index was built with, for query terms.
    pub fn normalizer(&self) -> Result<Normalizer> {
        Normalizer::new(self.lexicon().clone())
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            terms: self.dictionary.len(),
            documents: self.universe.len(),
            postings_bytes: self.postings.len() as u64,
        }
    }

    /// Terms with their document frequencies, in lexicographic order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.dictionary
            .iter()
            .map(|(term, info)| (term, info.frequency))
    }
}

fn read_list(postings: &[u8], info: TermInfo) -> Result<PostingList> {
    let offset = usize::try_from(info.offset)
        .map_err(|_| Error::invalid_format("postings_offset", "offset out of range"))?;
    verify_data!(postings_offset, offset < postings.len());
    let (list, _): (PostingList, usize) =
        bincode::decode_from_slice(&postings[offset..], bincode::config::standard())?;
    list.validate()?;
    verify_data!(postings_frequency, list.len() == info.frequency as usize);
    Ok(list)
}
