//! The persisted term dictionary.
//!
//! The dictionary maps every indexed term to its document frequency and the byte
//! offset of its posting list inside the postings file. The posting list of all
//! indexed documents (the universe) has its own slot, so it can never collide
//! with a real term.
//!
//! # File layout
//!
//! ```text
//! +----------------------+---------------------+--------------------------+
//! | magic "BIRDICT\0" 8B | format version u32  | bincode(Dictionary) ...  |
//! +----------------------+---------------------+--------------------------+
//! ```

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use bincode::{Decode, Encode};
use boolir_common::{Result, error::Error, verify_data};

use crate::normalizer::LexiconSettings;

pub const DICTIONARY_MAGIC: &[u8; 8] = b"BIRDICT\0";
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = DICTIONARY_MAGIC.len() + std::mem::size_of::<u32>();

/// Location and document frequency of one posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct TermInfo {
    /// Number of documents in the posting list.
    pub frequency: u32,
    /// Byte offset of the serialized list in the postings file.
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Dictionary {
    lexicon: LexiconSettings,
    terms: BTreeMap<String, TermInfo>,
    universe: Option<TermInfo>,
}

impl Dictionary {
    pub fn new(lexicon: LexiconSettings) -> Dictionary {
        Dictionary {
            lexicon,
            terms: BTreeMap::new(),
            universe: None,
        }
    }

    pub fn lexicon(&self) -> &LexiconSettings {
        &self.lexicon
    }

    /// Records a finalized term. Each term can be recorded only once.
    pub fn insert(&mut self, term: &str, info: TermInfo) -> Result<()> {
        if self.universe.is_some() {
            return Err(Error::invalid_operation(
                "dictionary insert after the universe was recorded",
            ));
        }
        if self.terms.insert(term.to_string(), info).is_some() {
            return Err(Error::invalid_arg(
                "term",
                format!("term '{term}' was finalized twice"),
            ));
        }
        Ok(())
    }

    pub fn set_universe(&mut self, info: TermInfo) {
        self.universe = Some(info);
    }

    pub fn get(&self, term: &str) -> Option<TermInfo> {
        self.terms.get(term).copied()
    }

    pub fn universe(&self) -> Option<TermInfo> {
        self.universe
    }

    /// Number of real terms (the universe is not counted).
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over the terms in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TermInfo)> + '_ {
        self.terms.iter().map(|(term, info)| (term.as_str(), *info))
    }

    /// Persists the dictionary. Called once, after the last posting list has
    /// been appended to the postings file.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(DICTIONARY_MAGIC)?;
        writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
        bincode::encode_into_std_write(self, &mut writer, bincode::config::standard())?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Dictionary> {
        let bytes = std::fs::read(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        Self::decode(&bytes)
    }

    pub fn decode(bytes: &[u8]) -> Result<Dictionary> {
        verify_data!(dictionary_header, bytes.len() >= HEADER_LEN);
        let (magic, rest) = bytes.split_at(DICTIONARY_MAGIC.len());
        verify_data!(dictionary_magic, magic == DICTIONARY_MAGIC);
        let (version, payload) = rest.split_at(std::mem::size_of::<u32>());
        let version = u32::from_le_bytes([version[0], version[1], version[2], version[3]]);
        if version != FORMAT_VERSION {
            return Err(Error::invalid_format(
                "dictionary_version",
                format!("unsupported format version {version}, expected {FORMAT_VERSION}"),
            ));
        }

        let (dictionary, consumed): (Dictionary, usize) =
            bincode::decode_from_slice(payload, bincode::config::standard())?;
        verify_data!(dictionary_payload, consumed == payload.len());
        dictionary.validate()?;
        Ok(dictionary)
    }

    /// Terms are finalized in lexicographic order and the universe is written
    /// last, so offsets must strictly increase along that order.
    fn validate(&self) -> Result<()> {
        let universe = self.universe.ok_or_else(|| {
            Error::invalid_format("dictionary_universe", "universe entry is missing")
        })?;
        let offsets: Vec<u64> = self
            .terms
            .values()
            .map(|info| info.offset)
            .chain(std::iter::once(universe.offset))
            .collect();
        verify_data!(
            dictionary_offsets,
            offsets.windows(2).all(|w| w[0] < w[1])
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        let mut dictionary = Dictionary::new(LexiconSettings::default());
        dictionary
            .insert("cat", TermInfo { frequency: 2, offset: 0 })
            .unwrap();
        dictionary
            .insert("dog", TermInfo { frequency: 2, offset: 9 })
            .unwrap();
        dictionary.set_universe(TermInfo {
            frequency: 3,
            offset: 18,
        });
        dictionary
    }

    #[test]
    fn test_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.bin");
        let dictionary = sample();
        dictionary.write_to(&path).unwrap();

        let loaded = Dictionary::read_from(&path).unwrap();
        assert_eq!(loaded, dictionary);
        assert_eq!(loaded.get("dog").unwrap().offset, 9);
        assert_eq!(loaded.get("bird"), None);
        assert_eq!(loaded.universe().unwrap().frequency, 3);
        let terms: Vec<&str> = loaded.iter().map(|(t, _)| t).collect();
        assert_eq!(terms, vec!["cat", "dog"]);
    }

    #[test]
    fn test_duplicate_term_is_rejected() {
        let mut dictionary = Dictionary::new(LexiconSettings::default());
        let info = TermInfo {
            frequency: 1,
            offset: 0,
        };
        dictionary.insert("cat", info).unwrap();
        assert!(dictionary.insert("cat", info).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(Dictionary::decode(b"short").is_err());
        assert!(Dictionary::decode(b"NOTADICT\x01\x00\x00\x00").is_err());

        let mut bytes = Vec::new();
        bytes.extend_from_slice(DICTIONARY_MAGIC);
        bytes.extend_from_slice(&7u32.to_le_bytes());
        let err = Dictionary::decode(&bytes).unwrap_err();
        assert!(err.is_corruption());
    }

    #[test]
    fn test_missing_universe_is_corruption() {
        let mut dictionary = Dictionary::new(LexiconSettings::default());
        dictionary
            .insert("cat", TermInfo { frequency: 1, offset: 0 })
            .unwrap();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(DICTIONARY_MAGIC);
        bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        bytes.extend(bincode::encode_to_vec(&dictionary, bincode::config::standard()).unwrap());
        assert!(Dictionary::decode(&bytes).unwrap_err().is_corruption());
    }

    #[test]
    fn test_out_of_order_offsets_are_corruption() {
        let raw = |dictionary: &Dictionary| {
            let mut bytes = Vec::new();
            bytes.extend_from_slice(DICTIONARY_MAGIC);
            bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
            bytes.extend(
                bincode::encode_to_vec(dictionary, bincode::config::standard()).unwrap(),
            );
            bytes
        };

        let mut dictionary = Dictionary::new(LexiconSettings::default());
        dictionary
            .insert("ant", TermInfo { frequency: 1, offset: 9 })
            .unwrap();
        dictionary
            .insert("bee", TermInfo { frequency: 1, offset: 0 })
            .unwrap();
        dictionary.set_universe(TermInfo {
            frequency: 2,
            offset: 18,
        });
        assert!(Dictionary::decode(&raw(&dictionary)).unwrap_err().is_corruption());

        let mut dictionary = sample();
        dictionary.set_universe(TermInfo {
            frequency: 3,
            offset: 4,
        });
        assert!(Dictionary::decode(&raw(&dictionary)).unwrap_err().is_corruption());

        assert!(Dictionary::decode(&raw(&sample())).is_ok());
    }
}
