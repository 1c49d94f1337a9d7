//! CSV output for harvested books.
//!
//! The file is written as UTF-8 with a byte-order mark so spreadsheet
//! applications pick the right encoding. Any previous file is replaced.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::BookRecord;

/// UTF-8 byte-order mark
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column names, in output order
pub const CSV_HEADER: [&str; 3] = ["title", "author", "year"];

/// Errors that can occur while writing the CSV file
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write `books` to `path`, creating parent directories as needed.
///
/// Returns `Ok(false)` without touching the file system when `books` is empty.
pub fn write_csv(books: &[BookRecord], path: &Path) -> Result<bool, WriterError> {
    if books.is_empty() {
        tracing::debug!("No records, skipping write to {}", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    wtr.write_record(CSV_HEADER)?;
    for book in books {
        wtr.serialize(book)?;
    }
    wtr.flush()?;

    tracing::info!(records = books.len(), "Wrote {}", path.display());
    Ok(true)
}
