//! Document Split Service Library
//!
//! A small web service that splits an uploaded Word document into fixed-size
//! chunks by paragraph count, stamps optional company branding on each chunk,
//! and serves the results back as a single zip archive.

pub mod api;
pub mod archive;
pub mod docx;
pub mod sessions;
pub mod splitter;
pub mod types;

pub use archive::{write_archive, ArchiveError};
pub use docx::{read_source_document, write_chunk, DocxError, LoadedBranding};
pub use sessions::{ArchiveRecord, SessionStore};
pub use splitter::{chunk_ranges, split_document, SplitError};
pub use types::{
    BrandingAssets, FontApplication, Paragraph, ServiceConfig, SourceDocument, SplitConfig,
    SplitOutcome,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::archive::*;
    pub use crate::docx::*;
    pub use crate::sessions::*;
    pub use crate::splitter::*;
    pub use crate::types::*;
}

/// Default paragraph-count heuristic for one rendered page
pub const DEFAULT_PARAGRAPHS_PER_PAGE: usize = 25;

/// Pages' worth of paragraphs gathered into one chunk
pub const PAGES_PER_CHUNK: usize = 2;

/// Default maximum accepted upload size in bytes (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Default lifetime of an unclaimed archive before the sweep removes it
pub const DEFAULT_ARCHIVE_TTL_SECS: u64 = 3600;

/// Seconds between expiry sweeps of the archive store
pub const SWEEP_INTERVAL_SECS: u64 = 60;

/// File name stem for produced chunk documents
pub const CHUNK_FILE_PREFIX: &str = "job_description_";

/// File name of the served archive
pub const ARCHIVE_FILE_NAME: &str = "split_documents.zip";

/// Logo asset file name inside the assets directory
pub const LOGO_ASSET_NAME: &str = "company_logo.png";

/// Font asset file name inside the assets directory
pub const FONT_ASSET_NAME: &str = "company_font.ttf";

/// Named font assigned to chunk paragraphs when the font asset exists
pub const COMPANY_FONT_NAME: &str = "Company Font";

/// Header logo width in EMU (one inch)
pub const LOGO_WIDTH_EMU: u32 = 914_400;

/// Name of the session cookie carrying the client's token
pub const SESSION_COOKIE: &str = "sid";
