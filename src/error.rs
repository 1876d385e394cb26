//! Error types for the asset revisioning engine.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the revisioning and manifest stages.
///
/// Malformed auxiliary data (a sourcemap whose JSON does not parse, an
/// existing manifest that the transformer rejects) is deliberately NOT an
/// error here: those degrade to documented fallbacks inside the stages.
#[derive(Debug, Error)]
pub enum RevError {
    /// The record's contents arrive as a progressive feed the hasher cannot
    /// consume as a whole buffer. Fatal for the pipeline run.
    #[error("Streaming not supported: {}", .0.display())]
    StreamedContents(PathBuf),

    #[error("Manifest I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured transformer could not parse or serialize manifest
    /// contents.
    #[error("Manifest format error: {0}")]
    ManifestFormat(String),
}
