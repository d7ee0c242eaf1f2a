//! Chunk document assembly.
//!
//! Chunks are rebuilt from extracted paragraph text via `docx_rs`, with the
//! company branding stamped on when the configured assets resolve: a one-inch
//! logo centered in the header and the named company font on every run.

use std::fs::File;
use std::path::Path;

use docx_rs::{AlignmentType, Docx, Header, Paragraph as DocxParagraph, Pic, Run, RunFonts};
use tracing::warn;

use crate::types::{BrandingAssets, FontApplication, Paragraph};
use crate::{COMPANY_FONT_NAME, LOGO_WIDTH_EMU};

use super::DocxError;

/// Branding assets resolved against the filesystem, once per split run.
///
/// Missing assets are not an error; the chunks simply go out unbranded and
/// the caller logs the outcome.
#[derive(Debug, Default)]
pub struct LoadedBranding {
    logo: Option<LogoImage>,
    font_available: bool,
}

#[derive(Debug)]
struct LogoImage {
    bytes: Vec<u8>,
    width_px: u32,
    height_px: u32,
}

impl LogoImage {
    /// Header logo height in EMU at one inch wide, preserving aspect ratio.
    ///
    /// Clamped at `u32::MAX` for degenerate aspect ratios.
    fn scaled_height_emu(&self) -> u32 {
        let height =
            u64::from(LOGO_WIDTH_EMU) * u64::from(self.height_px) / u64::from(self.width_px.max(1));
        u32::try_from(height).unwrap_or(u32::MAX)
    }
}

impl LoadedBranding {
    /// Resolve the configured assets against the filesystem.
    pub fn load(assets: &BrandingAssets) -> Self {
        Self {
            logo: assets.logo_path.as_deref().and_then(load_logo),
            font_available: assets
                .font_path
                .as_deref()
                .map(Path::is_file)
                .unwrap_or(false),
        }
    }

    /// Whether the company font will be assigned to chunk runs.
    pub fn font_application(&self) -> FontApplication {
        if self.font_available {
            FontApplication::Applied
        } else {
            FontApplication::Unavailable
        }
    }

    /// Whether a header logo was loaded.
    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }
}

fn load_logo(path: &Path) -> Option<LogoImage> {
    if !path.is_file() {
        return None;
    }
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "logo asset unreadable, chunks get no header image");
            return None;
        }
    };
    match png_dimensions(&bytes) {
        Some((width_px, height_px)) => Some(LogoImage {
            bytes,
            width_px,
            height_px,
        }),
        None => {
            warn!(path = %path.display(), "logo asset is not a PNG, chunks get no header image");
            None
        }
    }
}

/// Read pixel dimensions from a PNG's IHDR without decoding the image.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    if bytes.len() < 24 || bytes[..8] != SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

/// Write one chunk of paragraphs as a standalone `.docx` file.
///
/// Only paragraph text is carried over; source styles and run formatting
/// are not.
pub fn write_chunk(
    path: &Path,
    paragraphs: &[Paragraph],
    branding: &LoadedBranding,
) -> Result<(), DocxError> {
    let mut docx = Docx::new();

    if let Some(logo) = &branding.logo {
        let pic = Pic::new_with_dimensions(logo.bytes.clone(), logo.width_px, logo.height_px)
            .size(LOGO_WIDTH_EMU, logo.scaled_height_emu());
        let header = Header::new().add_paragraph(
            DocxParagraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_image(pic)),
        );
        docx = docx.header(header);
    }

    for paragraph in paragraphs {
        docx = docx.add_paragraph(build_paragraph(paragraph, branding.font_available));
    }

    let file = File::create(path).map_err(|source| DocxError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    docx.build()
        .pack(file)
        .map_err(|e| DocxError::Write(e.to_string()))?;
    Ok(())
}

fn build_paragraph(paragraph: &Paragraph, company_font: bool) -> DocxParagraph {
    let mut run = Run::new().add_text(paragraph.text.as_str());
    if company_font {
        run = run.fonts(
            RunFonts::new()
                .ascii(COMPANY_FONT_NAME)
                .hi_ansi(COMPANY_FONT_NAME),
        );
    }
    DocxParagraph::new().add_run(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::read_source_document;
    use std::io::Read;
    use tempfile::TempDir;

    // Signature plus IHDR is all the prober and the writer look at.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes
    }

    fn read_zip_part(path: &Path, name: &str) -> String {
        let file = File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_png_dimensions_probe() {
        assert_eq!(png_dimensions(&png_bytes(320, 120)), Some((320, 120)));
        assert_eq!(png_dimensions(b"GIF89a not a png"), None);
        assert_eq!(png_dimensions(&png_bytes(320, 120)[..20]), None);
        assert_eq!(png_dimensions(&png_bytes(0, 120)), None);
    }

    #[test]
    fn test_logo_scales_to_one_inch() {
        let logo = LogoImage {
            bytes: Vec::new(),
            width_px: 400,
            height_px: 100,
        };
        assert_eq!(logo.scaled_height_emu(), LOGO_WIDTH_EMU / 4);
    }

    #[test]
    fn test_extreme_logo_aspect_clamps_height() {
        let logo = LogoImage {
            bytes: Vec::new(),
            width_px: 1,
            height_px: 10_000,
        };
        assert_eq!(logo.scaled_height_emu(), u32::MAX);
    }

    #[test]
    fn test_branding_resolution() {
        let dir = TempDir::new().unwrap();
        let logo_path = dir.path().join("company_logo.png");
        let font_path = dir.path().join("company_font.ttf");

        let missing = LoadedBranding::load(&BrandingAssets::new(&logo_path, &font_path));
        assert!(!missing.has_logo());
        assert_eq!(missing.font_application(), FontApplication::Unavailable);

        std::fs::write(&logo_path, png_bytes(200, 80)).unwrap();
        std::fs::write(&font_path, b"font bytes").unwrap();
        let present = LoadedBranding::load(&BrandingAssets::new(&logo_path, &font_path));
        assert!(present.has_logo());
        assert_eq!(present.font_application(), FontApplication::Applied);

        assert!(!LoadedBranding::load(&BrandingAssets::none()).has_logo());
    }

    #[test]
    fn test_written_chunk_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunk.docx");
        let paragraphs = vec![
            Paragraph::new("Role summary").with_style("Heading1"),
            Paragraph::new(""),
            Paragraph::new("Own the on-call rotation."),
        ];

        write_chunk(&path, &paragraphs, &LoadedBranding::default()).unwrap();

        let doc = read_source_document(&path).unwrap();
        assert_eq!(doc.paragraph_count(), 3);
        assert_eq!(doc.paragraphs[0].text, "Role summary");
        // Chunks are rebuilt from text; the source style does not carry.
        assert_eq!(doc.paragraphs[0].style, None);
        assert!(doc.paragraphs[1].is_empty());
        assert_eq!(doc.paragraphs[2].text, "Own the on-call rotation.");
    }

    #[test]
    fn test_company_font_assigned_when_available() {
        let dir = TempDir::new().unwrap();
        let font_path = dir.path().join("company_font.ttf");
        std::fs::write(&font_path, b"font bytes").unwrap();
        let branding = LoadedBranding::load(&BrandingAssets {
            logo_path: None,
            font_path: Some(font_path),
        });

        let path = dir.path().join("chunk.docx");
        write_chunk(&path, &[Paragraph::new("body text")], &branding).unwrap();

        let document_xml = read_zip_part(&path, "word/document.xml");
        assert!(document_xml.contains(COMPANY_FONT_NAME));
    }

    #[test]
    fn test_header_logo_embedded() {
        let dir = TempDir::new().unwrap();
        let logo_path = dir.path().join("company_logo.png");
        std::fs::write(&logo_path, png_bytes(300, 90)).unwrap();
        let branding = LoadedBranding::load(&BrandingAssets {
            logo_path: Some(logo_path),
            font_path: None,
        });
        assert!(branding.has_logo());

        let path = dir.path().join("chunk.docx");
        write_chunk(&path, &[Paragraph::new("body text")], &branding).unwrap();

        let file = File::open(&path).unwrap();
        let archive = zip::ZipArchive::new(file).unwrap();
        let header_parts: Vec<String> = archive
            .file_names()
            .filter(|name| name.starts_with("word/header"))
            .map(String::from)
            .collect();
        assert!(!header_parts.is_empty());

        let header_xml = read_zip_part(&path, &header_parts[0]);
        assert!(header_xml.contains("drawing"));
    }
}
