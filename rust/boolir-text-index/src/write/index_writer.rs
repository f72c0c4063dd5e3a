//! Append-only postings writer and dictionary assembly.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use boolir_common::{Result, error::Error};

use crate::{
    dictionary::{Dictionary, TermInfo},
    normalizer::LexiconSettings,
    skip_list::{DocId, PostingList},
    write::PostingSink,
};

/// Sizes of a completed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrittenIndex {
    pub terms: usize,
    pub documents: usize,
    pub postings_bytes: u64,
}

/// Writes posting lists to the postings file and records where each one
/// starts. The postings file is truncated on creation.
pub struct IndexWriter {
    postings_path: PathBuf,
    postings: BufWriter<File>,
    offset: u64,
    dictionary: Dictionary,
}

impl IndexWriter {
    pub fn create(postings_path: &Path, lexicon: LexiconSettings) -> Result<IndexWriter> {
        let file = File::create(postings_path)
            .map_err(|e| Error::io(postings_path.display().to_string(), e))?;
        Ok(IndexWriter {
            postings_path: postings_path.to_path_buf(),
            postings: BufWriter::new(file),
            offset: 0,
            dictionary: Dictionary::new(lexicon),
        })
    }

    /// Appends one list and returns the offset it was written at.
    fn append(&mut self, postings: &PostingList) -> Result<u64> {
        let offset = self.offset;
        let written =
            bincode::encode_into_std_write(postings, &mut self.postings, bincode::config::standard())?;
        self.offset += written as u64;
        Ok(offset)
    }

    /// Appends the list of all indexed documents and records it in the
    /// dictionary's universe slot. No term can be pushed afterwards.
    pub fn write_universe(&mut self, documents: Vec<DocId>) -> Result<()> {
        let universe = PostingList::from_sorted(documents);
        let offset = self.append(&universe)?;
        self.dictionary.set_universe(TermInfo {
            frequency: universe.len() as u32,
            offset,
        });
        Ok(())
    }

    /// Flushes the postings file, then persists the dictionary.
    pub fn finish(mut self, dictionary_path: &Path) -> Result<WrittenIndex> {
        let universe = self.dictionary.universe().ok_or_else(|| {
            Error::invalid_operation("index finished without a universe entry")
        })?;
        self.postings
            .flush()
            .map_err(|e| Error::io(self.postings_path.display().to_string(), e))?;
        self.dictionary.write_to(dictionary_path)?;
        Ok(WrittenIndex {
            terms: self.dictionary.len(),
            documents: universe.frequency as usize,
            postings_bytes: self.offset,
        })
    }
}

impl PostingSink for IndexWriter {
    fn push_term(&mut self, term: &str, frequency: u32, postings: &PostingList) -> Result<()> {
        debug_assert_eq!(frequency as usize, postings.len());
        let offset = self.append(postings)?;
        self.dictionary.insert(term, TermInfo { frequency, offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_address_lists() {
        let dir = tempfile::tempdir().unwrap();
        let postings_path = dir.path().join("postings.bin");
        let dictionary_path = dir.path().join("dictionary.bin");

        let mut writer = IndexWriter::create(&postings_path, LexiconSettings::default()).unwrap();
        writer
            .push_term("cat", 2, &PostingList::from_sorted(vec![1, 3]))
            .unwrap();
        writer
            .push_term("dog", 5, &PostingList::from_sorted(vec![1, 2, 3, 4, 5]))
            .unwrap();
        writer.write_universe(vec![1, 2, 3, 4, 5]).unwrap();
        let written = writer.finish(&dictionary_path).unwrap();
        assert_eq!(written.terms, 2);
        assert_eq!(written.documents, 5);

        let bytes = std::fs::read(&postings_path).unwrap();
        assert_eq!(bytes.len() as u64, written.postings_bytes);

        let dictionary = Dictionary::read_from(&dictionary_path).unwrap();
        let dog = dictionary.get("dog").unwrap();
        let (list, _): (PostingList, usize) = bincode::decode_from_slice(
            &bytes[dog.offset as usize..],
            bincode::config::standard(),
        )
        .unwrap();
        assert_eq!(list.to_doc_ids(), vec![1, 2, 3, 4, 5]);
        assert_eq!(list.entries()[0].skip, Some(2));
    }

    #[test]
    fn test_finish_requires_universe() {
        let dir = tempfile::tempdir().unwrap();
        let writer =
            IndexWriter::create(&dir.path().join("postings.bin"), LexiconSettings::default())
                .unwrap();
        assert!(writer.finish(&dir.path().join("dictionary.bin")).is_err());
    }
}
