//! The split run itself.

use std::path::Path;

use tracing::{debug, info};

use crate::docx::{read_source_document, write_chunk, LoadedBranding};
use crate::types::{BrandingAssets, SplitConfig, SplitOutcome};
use crate::CHUNK_FILE_PREFIX;

use super::{chunk_ranges, SplitError};

/// Split a source document into chunk files under `output_dir`.
///
/// Chunk files are numbered from one (`job_description_1.docx` onward).
/// Branding resolves once per run and applies uniformly to every chunk.
pub fn split_document(
    source_path: &Path,
    output_dir: &Path,
    branding: &BrandingAssets,
    config: &SplitConfig,
) -> Result<SplitOutcome, SplitError> {
    let document = read_source_document(source_path)?;
    std::fs::create_dir_all(output_dir).map_err(|source| SplitError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let loaded = LoadedBranding::load(branding);
    let ranges = chunk_ranges(document.paragraph_count(), config.paragraphs_per_job);

    let mut files = Vec::with_capacity(ranges.len());
    for (index, range) in ranges.into_iter().enumerate() {
        let path = output_dir.join(format!("{CHUNK_FILE_PREFIX}{}.docx", index + 1));
        write_chunk(&path, &document.paragraphs[range], &loaded)?;
        debug!(chunk = index + 1, path = %path.display(), "wrote chunk");
        files.push(path);
    }

    let outcome = SplitOutcome {
        files,
        paragraph_count: document.paragraph_count(),
        font_application: loaded.font_application(),
    };

    info!(
        source = %source_path.display(),
        paragraphs = outcome.paragraph_count,
        chunks = outcome.chunk_count(),
        font = %outcome.font_application,
        "split document"
    );

    Ok(outcome)
}
