//! Block files: sorted runs of partial posting data spilled during indexing.
//!
//! A block file holds one JSON record per line, `[term, [frequency, [doc_id, ...]]]`,
//! with terms in strictly ascending order and doc ids ascending within a record.
//! Block files are private scratch data of a single build.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use boolir_common::{Result, error::Error};
use serde::{Deserialize, Serialize};

use crate::skip_list::DocId;

/// One line of a block file: a term with its partial document frequency and
/// the ids of the documents of this block that contain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord(pub String, pub (u32, Vec<DocId>));

impl BlockRecord {
    pub fn new(term: String, doc_ids: Vec<DocId>) -> BlockRecord {
        let frequency = doc_ids.len() as u32;
        BlockRecord(term, (frequency, doc_ids))
    }

    pub fn term(&self) -> &str {
        &self.0
    }

    pub fn frequency(&self) -> u32 {
        self.1.0
    }

    pub fn into_parts(self) -> (String, u32, Vec<DocId>) {
        let BlockRecord(term, (frequency, doc_ids)) = self;
        (term, frequency, doc_ids)
    }
}

/// Writes `records` to a new block file at `path`. The records must already
/// be sorted by term. Returns the number of bytes written.
pub fn write_block<I>(path: &Path, records: I) -> Result<u64>
where
    I: IntoIterator<Item = BlockRecord>,
{
    let file = File::create(path).map_err(|e| Error::io(path.display().to_string(), e))?;
    let mut writer = BufWriter::new(file);
    let mut last_term: Option<String> = None;
    for record in records {
        debug_assert!(
            last_term.as_deref().is_none_or(|last| last < record.term()),
            "block records must be strictly ascending"
        );
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
        if cfg!(debug_assertions) {
            last_term = Some(record.0.clone());
        }
    }
    writer.flush()?;
    let len = writer
        .get_ref()
        .metadata()
        .map_err(|e| Error::io(path.display().to_string(), e))?
        .len();
    Ok(len)
}

/// How a merge round over one block ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkEnd {
    /// The read budget was spent and the block still has records left.
    /// `last_term` is the term of the last record consumed.
    Budget { last_term: String },
    /// All records of the block have been consumed.
    Eof,
}

/// Resumable reader over a single block file.
///
/// The cursor only keeps the byte offset to resume from; the file is opened
/// for the duration of one [`read_chunk`](BlockCursor::read_chunk) call.
#[derive(Debug)]
pub struct BlockCursor {
    path: PathBuf,
    offset: u64,
    exhausted: bool,
}

impl BlockCursor {
    pub fn new(path: PathBuf) -> BlockCursor {
        BlockCursor {
            path,
            offset: 0,
            exhausted: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Reads records into `out` until their summed frequencies exceed `budget`
    /// or the file ends. At least one record is read per call unless the
    /// block is already exhausted.
    ///
    /// A block whose budget runs out exactly on its last record reports
    /// [`ChunkEnd::Eof`].
    pub fn read_chunk(&mut self, budget: u64, out: &mut Vec<BlockRecord>) -> Result<ChunkEnd> {
        if self.exhausted {
            return Ok(ChunkEnd::Eof);
        }
        let path = self.path.clone();
        let context = || path.display().to_string();

        let mut file = File::open(&path).map_err(|e| Error::io(context(), e))?;
        file.seek(SeekFrom::Start(self.offset))
            .map_err(|e| Error::io(context(), e))?;
        let mut reader = BufReader::new(file);

        let mut consumed = 0u64;
        let mut line = String::new();
        loop {
            line.clear();
            let n = reader
                .read_line(&mut line)
                .map_err(|e| Error::io(context(), e))?;
            if n == 0 {
                self.exhausted = true;
                return Ok(ChunkEnd::Eof);
            }
            self.offset += n as u64;

            let text = line.trim_end();
            if text.is_empty() {
                continue;
            }
            let record: BlockRecord = serde_json::from_str(text).map_err(|e| {
                Error::invalid_format(
                    format!("{} @ {}", context(), self.offset - n as u64),
                    e.to_string(),
                )
            })?;
            consumed += record.frequency() as u64;
            let term = (consumed > budget).then(|| record.term().to_string());
            out.push(record);

            if let Some(last_term) = term {
                let at_end = reader
                    .fill_buf()
                    .map_err(|e| Error::io(context(), e))?
                    .is_empty();
                if at_end {
                    self.exhausted = true;
                    return Ok(ChunkEnd::Eof);
                }
                return Ok(ChunkEnd::Budget { last_term });
            }
        }
    }

    /// Deletes the underlying block file.
    pub fn remove(self) -> Result<()> {
        std::fs::remove_file(&self.path).map_err(|e| Error::io(self.path.display().to_string(), e))
    }
}
