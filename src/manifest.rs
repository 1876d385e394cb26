//! The manifest stage: accumulates original-path -> revisioned-path entries
//! and emits one serialized manifest record at end-of-stream.
//!
//! Keys and values are forward-slash-normalized relative paths, and the
//! output is always key-sorted lexicographically so repeated runs diff
//! cleanly. Merge mode folds the new entries into an existing manifest file
//! on disk, new entries winning on collision.

use crate::config::ManifestOptions;
use crate::error::RevError;
use crate::path;
use crate::record::{FileRecord, PipelineItem, Revisioned};
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Serialization strategy for manifest contents.
///
/// The default is JSON with two-space indentation; a host can substitute any
/// format that can parse and stringify a flat string-to-string mapping.
pub trait ManifestTransformer: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<BTreeMap<String, String>, RevError>;
    fn stringify(&self, manifest: &BTreeMap<String, String>) -> Result<Vec<u8>, RevError>;
}

/// JSON transformer, the default. Pretty-prints with two-space indentation.
pub struct JsonTransformer;

impl ManifestTransformer for JsonTransformer {
    fn parse(&self, bytes: &[u8]) -> Result<BTreeMap<String, String>, RevError> {
        serde_json::from_slice(bytes).map_err(|error| RevError::ManifestFormat(error.to_string()))
    }

    fn stringify(&self, manifest: &BTreeMap<String, String>) -> Result<Vec<u8>, RevError> {
        serde_json::to_vec_pretty(manifest)
            .map_err(|error| RevError::ManifestFormat(error.to_string()))
    }
}

/// Stateful manifest-building stage.
///
/// Feed every item the revisioner emits through [`record`](Self::record),
/// then call [`finalize`](Self::finalize) once after end-of-stream. One
/// instance serves exactly one run.
pub struct ManifestBuilder {
    options: ManifestOptions,
    transformer: Box<dyn ManifestTransformer>,
    manifest: BTreeMap<String, String>,
}

impl ManifestBuilder {
    pub fn new(options: ManifestOptions) -> Self {
        Self {
            options,
            transformer: Box::new(JsonTransformer),
            manifest: BTreeMap::new(),
        }
    }

    /// Replace the serialization strategy.
    pub fn with_transformer(mut self, transformer: impl ManifestTransformer + 'static) -> Self {
        self.transformer = Box::new(transformer);
        self
    }

    /// Record one pipeline item. Items that were never revisioned are
    /// ignored; there is nothing to map for them.
    pub fn record(&mut self, item: &PipelineItem) {
        if let PipelineItem::Revisioned(revisioned) = item {
            self.insert(revisioned);
        }
    }

    /// Relativize against each file's OWN base. Records merged from
    /// different source trees carry different bases; encoding them all
    /// against the first file's base would corrupt the keys.
    fn insert(&mut self, revisioned: &Revisioned) {
        let revisioned_file = revisioned.record.relative_path();
        let original_name = match revisioned.original_file_name() {
            Some(name) => name,
            None => return,
        };
        let original_file = match revisioned_file.parent() {
            Some(directory) => directory.join(original_name),
            None => original_name.to_path_buf(),
        };

        let key = path::manifest_key(&original_file);
        let value = path::manifest_key(&revisioned_file);
        debug!(original = %key, revisioned = %value, "manifest entry");
        self.manifest.insert(key, value);
    }

    /// Produce the manifest record, or `None` when nothing was revisioned
    /// this run (an empty output would stomp an existing manifest).
    ///
    /// The single disk read happens here: in merge mode the existing manifest
    /// at the output path is parsed and the new entries are layered on top.
    /// A missing file is the expected first-run case; an unparsable one is
    /// treated as empty, with a diagnostic, for compatibility.
    pub async fn finalize(self) -> Result<Option<FileRecord>, RevError> {
        if self.manifest.is_empty() {
            debug!("no revisioned files seen, skipping manifest output");
            return Ok(None);
        }

        let base = self
            .options
            .base
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let output_path = if self.options.path.is_absolute() {
            self.options.path.clone()
        } else {
            base.join(&self.options.path)
        };

        let mut manifest = if self.options.merge {
            self.read_existing(&output_path).await?
        } else {
            BTreeMap::new()
        };
        manifest.extend(self.manifest);

        let bytes = self.transformer.stringify(&manifest)?;
        debug!(path = %output_path.display(), entries = manifest.len(), "emitting manifest");
        Ok(Some(FileRecord::new(output_path, base, bytes)))
    }

    async fn read_existing(
        &self,
        output_path: &std::path::Path,
    ) -> Result<BTreeMap<String, String>, RevError> {
        let bytes = match tokio::fs::read(output_path).await {
            Ok(bytes) => bytes,
            // First run: nothing on disk yet.
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => return Err(error.into()),
        };

        match self.transformer.parse(&bytes) {
            Ok(existing) => Ok(existing),
            Err(error) => {
                warn!(
                    path = %output_path.display(),
                    %error,
                    "existing manifest is unparsable, treating it as empty"
                );
                Ok(BTreeMap::new())
            }
        }
    }
}
