//! File records flowing through the pipeline.
//!
//! A [`FileRecord`] is one in-memory asset as supplied by the pipeline host.
//! Revisioning never mutates a record in place: the [`Revisioner`] wraps its
//! output in an immutable [`Revisioned`] value that carries the provenance
//! (original path/base) and the computed fingerprint alongside the renamed
//! record.
//!
//! [`Revisioner`]: crate::revision::Revisioner

use std::path::{Path, PathBuf};

/// Logical contents of a file record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    /// Marker/placeholder record with no content; passes through untouched.
    Absent,
    /// Complete in-memory body, the only form the hasher consumes.
    Buffer(Vec<u8>),
    /// Progressive chunked feed. Constructing one is legal; asking the
    /// engine to process one is a hard error.
    Streamed,
}

impl Contents {
    /// The buffered bytes, if this record carries a whole body.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Contents::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// One asset flowing through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Absolute or pipeline-relative location of the file.
    pub path: PathBuf,
    /// Root directory against which `path` is made relative for manifest
    /// keys. May differ per file when trees are merged upstream.
    pub base: PathBuf,
    pub contents: Contents,
}

impl FileRecord {
    /// Record with a complete in-memory body.
    pub fn new(
        path: impl Into<PathBuf>,
        base: impl Into<PathBuf>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            path: path.into(),
            base: base.into(),
            contents: Contents::Buffer(contents.into()),
        }
    }

    /// Contentless marker record.
    pub fn absent(path: impl Into<PathBuf>, base: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base: base.into(),
            contents: Contents::Absent,
        }
    }

    /// Record whose contents arrive as a progressive feed.
    pub fn streamed(path: impl Into<PathBuf>, base: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base: base.into(),
            contents: Contents::Streamed,
        }
    }

    /// Whether the record carries the reserved sourcemap suffix (`.map`).
    pub fn is_sourcemap(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|extension| extension == "map")
    }

    /// Basename as UTF-8, lossy on exotic encodings.
    pub fn file_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Current path made relative to this record's own base.
    pub fn relative_path(&self) -> PathBuf {
        crate::path::relative_to(&self.base, &self.path)
    }
}

/// Result of revisioning one file: the renamed record plus provenance,
/// captured exactly once at revision time and never overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revisioned {
    /// The record with its revisioned path.
    pub record: FileRecord,
    /// Path the file had before revisioning.
    pub original_path: PathBuf,
    /// Base the file had before revisioning.
    pub original_base: PathBuf,
    /// Fingerprint embedded in the new filename. For a resolved sourcemap
    /// this is the parent asset's hash, not a hash of the map's own bytes.
    pub hash: String,
}

impl Revisioned {
    /// Original basename as a path component.
    pub fn original_file_name(&self) -> Option<&Path> {
        self.original_path.file_name().map(Path::new)
    }
}

/// What the [`Revisioner`] emits and the [`ManifestBuilder`] consumes.
///
/// [`Revisioner`]: crate::revision::Revisioner
/// [`ManifestBuilder`]: crate::manifest::ManifestBuilder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineItem {
    /// A record that was never revisioned (contentless marker); invisible to
    /// the manifest.
    Passthrough(FileRecord),
    Revisioned(Revisioned),
}

impl PipelineItem {
    /// The record in its current (possibly renamed) state.
    pub fn record(&self) -> &FileRecord {
        match self {
            PipelineItem::Passthrough(record) => record,
            PipelineItem::Revisioned(revisioned) => &revisioned.record,
        }
    }

    pub fn as_revisioned(&self) -> Option<&Revisioned> {
        match self {
            PipelineItem::Revisioned(revisioned) => Some(revisioned),
            PipelineItem::Passthrough(_) => None,
        }
    }
}
