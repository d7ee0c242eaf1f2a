//! Word document I/O.
//!
//! Reading goes through the raw zip container and pulls paragraph text out of
//! `word/document.xml` with an event parser; writing rebuilds chunk documents
//! from extracted text via `docx_rs`.

mod reader;
mod writer;

pub use reader::{parse_document_xml, read_document_xml, read_source_document};
pub use writer::{write_chunk, LoadedBranding};

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing Word documents.
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("failed to open document {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("not a valid Word document: {0}")]
    Read(String),

    #[error("malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write document: {0}")]
    Write(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
