//! Document splitting.
//!
//! A split run reads the uploaded document once, plans fixed-size paragraph
//! ranges, and writes one branded chunk document per range.

mod plan;
mod split;

pub use plan::chunk_ranges;
pub use split::split_document;

use std::path::PathBuf;

use thiserror::Error;

use crate::docx::DocxError;

/// Errors from a split run.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("failed to prepare output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Docx(#[from] DocxError),
}
