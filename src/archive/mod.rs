//! Zip packaging of chunk files.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Errors from archive packaging.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("chunk path {0} has no usable file name")]
    InvalidFileName(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Pack the given files into a single deflate-compressed zip archive.
///
/// Entries are stored flat under their base names, in input order.
pub fn write_archive(archive_path: &Path, files: &[PathBuf]) -> Result<(), ArchiveError> {
    let mut writer = ZipWriter::new(File::create(archive_path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in files {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ArchiveError::InvalidFileName(path.clone()))?;
        writer.start_file(name, options)?;
        let mut file = File::open(path)?;
        io::copy(&mut file, &mut writer)?;
    }

    writer.finish()?;
    debug!(path = %archive_path.display(), entries = files.len(), "wrote archive");
    Ok(())
}
