//! The revisioning stage: renames files by their content fingerprint and
//! resolves deferred sourcemaps against their parent assets.
//!
//! One `Revisioner` serves exactly one pipeline run. All state (the
//! path-to-fingerprint index and the deferred sourcemap buffer) is scoped to
//! the instance; construct a fresh one per run.

use crate::config::RevConfig;
use crate::error::RevError;
use crate::fingerprint;
use crate::record::{Contents, FileRecord, PipelineItem, Revisioned};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Stateful revisioning stage.
///
/// Call [`process`](Self::process) once per incoming record, in arrival
/// order. Sourcemaps are held back; once the upstream source signals
/// completion, call [`finalize`](Self::finalize) to drain them. If the
/// upstream errors mid-stream, drop the instance without finalizing.
pub struct Revisioner {
    config: RevConfig,
    /// Original (pre-revision) path -> fingerprint, populated during the
    /// main pass and read-only during finalize.
    path_map: HashMap<PathBuf, String>,
    /// Sourcemaps deferred until end-of-stream, in arrival order.
    pending_maps: Vec<FileRecord>,
}

impl Revisioner {
    pub fn new(config: RevConfig) -> Self {
        Self {
            config,
            path_map: HashMap::new(),
            pending_maps: Vec::new(),
        }
    }

    /// Process one incoming record.
    ///
    /// Returns `Ok(Some(_))` with the renamed record for regular files,
    /// `Ok(None)` for a deferred sourcemap, and a passthrough item for
    /// contentless markers. Streamed contents are a hard error: the hasher
    /// needs the whole body.
    pub fn process(&mut self, file: FileRecord) -> Result<Option<PipelineItem>, RevError> {
        match file.contents {
            Contents::Absent => {
                trace!(path = %file.path.display(), "passing through contentless record");
                return Ok(Some(PipelineItem::Passthrough(file)));
            }
            Contents::Streamed => return Err(RevError::StreamedContents(file.path)),
            Contents::Buffer(_) => {}
        }

        if file.is_sourcemap() {
            trace!(path = %file.path.display(), "deferring sourcemap until end of stream");
            self.pending_maps.push(file);
            return Ok(None);
        }

        let revisioned = self.rename(file);
        self.path_map
            .insert(revisioned.original_path.clone(), revisioned.hash.clone());
        Ok(Some(PipelineItem::Revisioned(revisioned)))
    }

    /// Drain the deferred sourcemaps, in their original arrival order.
    ///
    /// Call exactly once, after the upstream source has signaled completion.
    /// A map whose reverse reference matches an asset revisioned this run is
    /// renamed with the asset's hash; anything else is revisioned
    /// independently.
    pub fn finalize(mut self) -> Result<Vec<PipelineItem>, RevError> {
        let pending = std::mem::take(&mut self.pending_maps);
        let mut emitted = Vec::with_capacity(pending.len());
        for map in pending {
            emitted.push(PipelineItem::Revisioned(self.resolve_sourcemap(map)));
        }
        Ok(emitted)
    }

    /// Revision a file on its own content: capture provenance, fingerprint,
    /// rename. Does not touch the path index.
    fn rename(&self, file: FileRecord) -> Revisioned {
        // Only whole-buffer records reach this point; process() rejects the rest.
        let bytes = file.contents.as_bytes().unwrap_or(&[]);
        let hash = fingerprint::fingerprint(bytes, self.config.hash_length);
        let new_path = fingerprint::revisioned_path(&file.path, &hash, &self.config.separator);
        debug!(from = %file.path.display(), to = %new_path.display(), "revisioned file");
        Revisioned {
            original_path: file.path,
            original_base: file.base.clone(),
            record: FileRecord {
                path: new_path,
                base: file.base,
                contents: file.contents,
            },
            hash,
        }
    }

    fn resolve_sourcemap(&self, map: FileRecord) -> Revisioned {
        let reference = self.reverse_reference(&map);
        match self.path_map.get(&reference) {
            Some(hash) => {
                debug!(
                    map = %map.path.display(),
                    subject = %reference.display(),
                    "sourcemap matched a revisioned asset"
                );
                let new_path = fingerprint::revisioned_sourcemap_path(
                    &map.path,
                    hash,
                    &self.config.separator,
                );
                Revisioned {
                    original_path: map.path,
                    original_base: map.base.clone(),
                    record: FileRecord {
                        path: new_path,
                        base: map.base,
                        contents: map.contents,
                    },
                    hash: hash.clone(),
                }
            }
            None => {
                debug!(
                    map = %map.path.display(),
                    subject = %reference.display(),
                    "sourcemap has no matching asset this run, revisioning independently"
                );
                self.rename(map)
            }
        }
    }

    /// The "reverse filename" a sourcemap points back at: the embedded `file`
    /// field when the contents parse as JSON, otherwise the map's own path
    /// with the `.map` suffix removed. Malformed JSON is not an error.
    fn reverse_reference(&self, map: &FileRecord) -> PathBuf {
        if let Some(bytes) = map.contents.as_bytes() {
            match serde_json::from_slice::<serde_json::Value>(bytes) {
                Ok(value) => {
                    if let Some(subject) = value.get("file").and_then(|f| f.as_str()) {
                        return PathBuf::from(subject);
                    }
                }
                Err(error) => {
                    debug!(
                        map = %map.path.display(),
                        %error,
                        "sourcemap contents are not valid JSON, using filename fallback"
                    );
                }
            }
        }

        let name = map.file_name().unwrap_or_default();
        let subject = name.strip_suffix(".map").unwrap_or(&name).to_string();
        map.path.with_file_name(subject)
    }
}
