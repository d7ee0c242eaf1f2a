//! Configuration types for the split service.

use std::path::PathBuf;

use crate::{
    DEFAULT_ARCHIVE_TTL_SECS, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PARAGRAPHS_PER_PAGE,
    FONT_ASSET_NAME, LOGO_ASSET_NAME, PAGES_PER_CHUNK,
};

/// Global service configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory uploaded files are saved into before processing.
    pub upload_dir: PathBuf,

    /// Directory holding the fixed branding assets.
    pub assets_dir: PathBuf,

    /// Paragraph-count heuristic for one rendered page.
    pub paragraphs_per_page: usize,

    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,

    /// How long an unclaimed archive is kept before the sweep removes it.
    pub archive_ttl_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("static/uploads"),
            assets_dir: PathBuf::from("assets"),
            paragraphs_per_page: DEFAULT_PARAGRAPHS_PER_PAGE,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            archive_ttl_secs: DEFAULT_ARCHIVE_TTL_SECS,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/uploads")),
            assets_dir: std::env::var("ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("assets")),
            paragraphs_per_page: std::env::var("PARAGRAPHS_PER_PAGE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PARAGRAPHS_PER_PAGE),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            archive_ttl_secs: std::env::var("ARCHIVE_TTL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ARCHIVE_TTL_SECS),
        }
    }

    /// Paragraphs accumulated into one chunk before flushing.
    pub fn paragraphs_per_job(&self) -> usize {
        (self.paragraphs_per_page * PAGES_PER_CHUNK).max(1)
    }

    /// Fixed path of the company logo asset.
    pub fn logo_path(&self) -> PathBuf {
        self.assets_dir.join(LOGO_ASSET_NAME)
    }

    /// Fixed path of the company font asset.
    pub fn font_path(&self) -> PathBuf {
        self.assets_dir.join(FONT_ASSET_NAME)
    }

    /// Per-operation configuration for the splitter.
    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            paragraphs_per_job: self.paragraphs_per_job(),
        }
    }
}

/// Configuration for individual split operations.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Maximum paragraphs per chunk.
    pub paragraphs_per_job: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            paragraphs_per_job: DEFAULT_PARAGRAPHS_PER_PAGE * PAGES_PER_CHUNK,
        }
    }
}

impl SplitConfig {
    /// Create a config with the given chunk size in paragraphs.
    pub fn with_paragraphs_per_job(paragraphs_per_job: usize) -> Self {
        Self {
            paragraphs_per_job: paragraphs_per_job.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chunk_size_is_two_pages() {
        let config = ServiceConfig::default();
        assert_eq!(config.paragraphs_per_job(), 50);
        assert_eq!(SplitConfig::default().paragraphs_per_job, 50);
    }

    #[test]
    fn test_asset_paths_join_assets_dir() {
        let config = ServiceConfig {
            assets_dir: PathBuf::from("assets"),
            ..Default::default()
        };
        assert_eq!(config.logo_path(), PathBuf::from("assets/company_logo.png"));
        assert_eq!(config.font_path(), PathBuf::from("assets/company_font.ttf"));
    }

    #[test]
    fn test_split_config_floors_at_one() {
        assert_eq!(SplitConfig::with_paragraphs_per_job(0).paragraphs_per_job, 1);
    }
}
