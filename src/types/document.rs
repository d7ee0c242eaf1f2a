//! Document and branding type definitions.

use std::path::PathBuf;

/// A single paragraph extracted from a source document.
///
/// Only the text and the paragraph style name survive extraction; run-level
/// formatting, images, and tables do not (chunks are rebuilt from text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// The paragraph text, with run-level tabs and breaks flattened in.
    pub text: String,

    /// Named paragraph style from the source, if any (e.g. "Heading1").
    pub style: Option<String>,
}

impl Paragraph {
    /// Create a plain paragraph with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Set the paragraph style name.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Check if the paragraph carries no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// An uploaded document reduced to its ordered paragraph sequence.
///
/// Read-only once loaded; the splitter slices it into chunks.
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    /// Paragraphs in document order (empty paragraphs included).
    pub paragraphs: Vec<Paragraph>,
}

impl SourceDocument {
    /// Create a document from an ordered paragraph list.
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Number of paragraphs in the document.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the document has no paragraphs at all.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Optional branding applied uniformly to every chunk of one run.
///
/// Paths are fixed at configuration time; whether each asset actually exists
/// is resolved once per run when the splitter loads them.
#[derive(Debug, Clone, Default)]
pub struct BrandingAssets {
    /// Path to a PNG logo stamped into each chunk's header.
    pub logo_path: Option<PathBuf>,

    /// Path to a font file; its presence enables the named company font.
    pub font_path: Option<PathBuf>,
}

impl BrandingAssets {
    /// Branding with both assets configured.
    pub fn new(logo_path: impl Into<PathBuf>, font_path: impl Into<PathBuf>) -> Self {
        Self {
            logo_path: Some(logo_path.into()),
            font_path: Some(font_path.into()),
        }
    }

    /// No branding at all; chunks keep default fonts and an empty header.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Outcome of attempting to assign the company font to chunk paragraphs.
///
/// Surfaced in logs instead of being swallowed; `Unavailable` means the font
/// asset was missing and the chunks keep the default font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontApplication {
    /// The named company font was assigned to every paragraph run.
    Applied,
    /// The font asset was not supplied or not found; default font kept.
    Unavailable,
}

impl std::fmt::Display for FontApplication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontApplication::Applied => write!(f, "applied"),
            FontApplication::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Result of one split run.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Chunk file paths in order, one per produced document.
    pub files: Vec<PathBuf>,

    /// Paragraph count of the source document.
    pub paragraph_count: usize,

    /// Whether the company font was applied to the chunks.
    pub font_application: FontApplication,
}

impl SplitOutcome {
    /// Number of chunks produced.
    pub fn chunk_count(&self) -> usize {
        self.files.len()
    }
}
