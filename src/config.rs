//! Configuration for the revisioning and manifest stages.
//!
//! Both structs deserialize from the host's configuration layer with the
//! defaults specified here; every field is optional on the wire.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Revisioner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevConfig {
    /// Fingerprint truncation length in hex characters (default: 8)
    #[serde(default = "default_hash_length")]
    pub hash_length: usize,

    /// Joiner between the filename stem and the hash (default: "-")
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_hash_length() -> usize {
    8
}

fn default_separator() -> String {
    "-".to_string()
}

impl Default for RevConfig {
    fn default() -> Self {
        Self {
            hash_length: default_hash_length(),
            separator: default_separator(),
        }
    }
}

/// Manifest builder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestOptions {
    /// Output file location (default: "rev-manifest.json")
    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,

    /// Fold new entries into an existing manifest on disk (default: false).
    /// New entries win on key collision.
    #[serde(default)]
    pub merge: bool,

    /// Directory used to resolve a relative `path` and assigned as the base
    /// of the emitted manifest record (default: ".")
    #[serde(default)]
    pub base: Option<PathBuf>,
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("rev-manifest.json")
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            path: default_manifest_path(),
            merge: false,
            base: None,
        }
    }
}
