//! Path helpers for manifest keys and relative paths.

use std::path::{Path, PathBuf};

/// Make `path` relative to `base`.
///
/// When `path` does not live under `base` it is returned unchanged, so a
/// record from a foreign tree keeps its full path instead of a corrupted one.
pub fn relative_to(base: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(base) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

/// Encode a relative path as a manifest key: components joined by `/`
/// regardless of the host OS separator conventions.
pub fn manifest_key(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
