//! Common utilities for boolir-cmd

use std::path::Path;

use anyhow::{Context, Result};
use boolir_text_index::IndexStore;

/// Checks if a file exists and is readable
pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Path is not a file: {}", path.display());
    }
    Ok(())
}

/// Checks if a directory exists
pub fn validate_dir_exists(path: &Path) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Directory does not exist: {}", path.display());
    }
    Ok(())
}

/// Opens an index after checking that both of its files exist
pub fn open_index(dictionary: &Path, postings: &Path) -> Result<IndexStore> {
    validate_file_exists(dictionary)?;
    validate_file_exists(postings)?;
    IndexStore::open(dictionary, postings).with_context(|| {
        format!(
            "Failed to open index {} / {}",
            dictionary.display(),
            postings.display()
        )
    })
}

/// Formats file size in human-readable format
pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}
