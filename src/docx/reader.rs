//! Paragraph extraction from `.docx` containers.
//!
//! A `.docx` file is a zip archive whose main part, `word/document.xml`,
//! holds the body. We stream that part through an event parser instead of
//! building a DOM; only top-level paragraphs and their run text survive.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::types::{Paragraph, SourceDocument};

use super::DocxError;

/// Read a `.docx` file into its ordered paragraph sequence.
pub fn read_source_document(path: &Path) -> Result<SourceDocument, DocxError> {
    let xml = read_document_xml(path)?;
    let document = parse_document_xml(&xml)?;
    debug!(
        path = %path.display(),
        paragraphs = document.paragraph_count(),
        "extracted source document"
    );
    Ok(document)
}

/// Pull the raw `word/document.xml` part out of the zip container.
pub fn read_document_xml(path: &Path) -> Result<String, DocxError> {
    let file = File::open(path).map_err(|source| DocxError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut container = zip::ZipArchive::new(file)
        .map_err(|e| DocxError::Read(format!("not a zip container: {e}")))?;
    let mut part = container
        .by_name("word/document.xml")
        .map_err(|_| DocxError::Read("missing word/document.xml part".to_string()))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Parse the body XML of a Word document into paragraphs.
///
/// Paragraphs nested in tables are skipped, matching how the chunks are
/// rebuilt from plain text. Tabs flatten to `\t`, line and carriage breaks
/// to `\n`, and text across runs concatenates in document order. Empty
/// paragraphs are kept so chunk boundaries stay faithful to the source.
pub fn parse_document_xml(xml: &str) -> Result<SourceDocument, DocxError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();

    let mut table_depth = 0usize;
    let mut in_paragraph = false;
    let mut in_run = false;
    let mut in_text = false;
    let mut text = String::new();
    let mut style: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:p" if table_depth == 0 => {
                    in_paragraph = true;
                    text.clear();
                    style = None;
                }
                b"w:r" if in_paragraph => in_run = true,
                b"w:t" if in_run => in_text = true,
                b"w:pStyle" if in_paragraph && !in_run => style = style_value(&e)?,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                // A childless paragraph still counts as one.
                b"w:p" if table_depth == 0 => paragraphs.push(Paragraph::new("")),
                b"w:tab" if in_run => text.push('\t'),
                b"w:br" | b"w:cr" if in_run => text.push('\n'),
                b"w:pStyle" if in_paragraph && !in_run => style = style_value(&e)?,
                _ => {}
            },
            Event::Text(t) if in_text => text.push_str(&t.unescape()?),
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:p" if in_paragraph => {
                    in_paragraph = false;
                    let mut paragraph = Paragraph::new(std::mem::take(&mut text));
                    paragraph.style = style.take();
                    paragraphs.push(paragraph);
                }
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(SourceDocument::new(paragraphs))
}

/// Extract the `w:val` attribute from a style element.
fn style_value(e: &BytesStart<'_>) -> Result<Option<String>, DocxError> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == b"w:val" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
