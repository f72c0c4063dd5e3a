//! Directory-backed document collections.

use std::path::{Path, PathBuf};

use boolir_common::{Result, error::Error};

use crate::skip_list::DocId;

/// A directory of documents, one file per document, where each file name is
/// the document id.
///
/// Entries whose names do not parse as a [`DocId`] are skipped with a
/// warning; subdirectories are ignored. Documents are yielded in ascending
/// id order.
#[derive(Debug)]
pub struct DocumentSource {
    dir: PathBuf,
    documents: Vec<(DocId, PathBuf)>,
}

impl DocumentSource {
    pub fn open(dir: &Path) -> Result<DocumentSource> {
        let context = || dir.display().to_string();
        let mut documents = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(|e| Error::io(context(), e))? {
            let entry = entry.map_err(|e| Error::io(context(), e))?;
            let file_type = entry.file_type().map_err(|e| Error::io(context(), e))?;
            if !file_type.is_file() {
                continue;
            }
            let name = entry.file_name();
            match name.to_str().and_then(|name| name.parse::<DocId>().ok()) {
                Some(doc_id) => documents.push((doc_id, entry.path())),
                None => log::warn!(
                    "skipping {}: file name is not a document id",
                    entry.path().display()
                ),
            }
        }

        documents.sort_unstable_by_key(|(doc_id, _)| *doc_id);
        if let Some(pair) = documents.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::invalid_arg(
                "documents",
                format!(
                    "{} and {} map to the same document id {}",
                    pair[0].1.display(),
                    pair[1].1.display(),
                    pair[0].0
                ),
            ));
        }

        Ok(DocumentSource {
            dir: dir.to_path_buf(),
            documents,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Reads the documents in ascending id order. Invalid UTF-8 is replaced
    /// rather than rejected.
    pub fn iter(&self) -> impl Iterator<Item = Result<(DocId, String)>> + '_ {
        self.documents.iter().map(|(doc_id, path)| {
            let bytes =
                std::fs::read(path).map_err(|e| Error::io(path.display().to_string(), e))?;
            Ok((*doc_id, String::from_utf8_lossy(&bytes).into_owned()))
        })
    }
}
