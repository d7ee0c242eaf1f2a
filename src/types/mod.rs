//! Core types for the document split service.

mod config;
mod document;

pub use config::{ServiceConfig, SplitConfig};
pub use document::{
    BrandingAssets, FontApplication, Paragraph, SourceDocument, SplitOutcome,
};
