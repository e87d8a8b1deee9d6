//! Workspace archive export.
//!
//! Packs every file in the collection into a zip-compatible container, one
//! entry per file at a path equal to its name. Pure function of store state.

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::models::WorkspaceFile;

/// Errors raised while building the export archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build a deflate-compressed zip of the given files, in collection order.
///
/// CPU-bound; callers on the async runtime should wrap this in
/// `spawn_blocking`.
pub fn build_archive(files: &[WorkspaceFile]) -> Result<Vec<u8>, ArchiveError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for file in files {
        zip.start_file(file.name.as_str(), options)?;
        zip.write_all(file.content.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}
