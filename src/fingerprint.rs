//! Content fingerprinting and revisioned-filename derivation using BLAKE3.
//!
//! Pure functions, no I/O, safe to call concurrently. The fingerprint is a
//! change-detection digest, not a security boundary: a prefix of the full
//! BLAKE3 digest in lowercase hex, truncated to a configured length.

use std::path::{Path, PathBuf};

/// Full digest length in hex characters; truncation is clamped to this.
const DIGEST_HEX_LEN: usize = 64;

/// Compute the content fingerprint for a byte buffer.
///
/// Deterministic: identical bytes always yield the identical string,
/// independent of path or processing order.
pub fn fingerprint(content: &[u8], length: usize) -> String {
    let digest = blake3::hash(content);
    let hex = digest.to_hex();
    hex[..length.min(DIGEST_HEX_LEN)].to_string()
}

/// Derive a revisioned filename: `stem + separator + hash + extension`.
///
/// The name is split at the FIRST dot, so composite extensions stay intact:
/// `archive.tar.gz` -> `archive-<hash>.tar.gz`, `app.min.js` ->
/// `app-<hash>.min.js`. This intentionally differs from OS-style last-dot
/// splitting so that `.css.map` companions land the hash in the same slot as
/// their parent asset. A name with no dot gets the hash appended.
pub fn revisioned_file_name(name: &str, hash: &str, separator: &str) -> String {
    match name.find('.') {
        Some(index) => format!(
            "{}{}{}{}",
            &name[..index],
            separator,
            hash,
            &name[index..]
        ),
        None => format!("{name}{separator}{hash}"),
    }
}

/// Apply [`revisioned_file_name`] to the basename of `path`, leaving the
/// directory component unchanged.
pub fn revisioned_path(path: &Path, hash: &str, separator: &str) -> PathBuf {
    match path.file_name() {
        Some(name) => {
            let name = name.to_string_lossy();
            path.with_file_name(revisioned_file_name(&name, hash, separator))
        }
        None => path.to_path_buf(),
    }
}

/// Revision a sourcemap path against its parent asset's hash: the `.map`
/// suffix is stripped, the subject filename is revisioned, and `.map` is
/// re-appended. `maps/app.css.map` with hash `H` becomes `maps/app-H.css.map`.
pub fn revisioned_sourcemap_path(path: &Path, hash: &str, separator: &str) -> PathBuf {
    match path.file_name() {
        Some(name) => {
            let name = name.to_string_lossy();
            let subject = name.strip_suffix(".map").unwrap_or(&name);
            let renamed = format!("{}.map", revisioned_file_name(subject, hash, separator));
            path.with_file_name(renamed)
        }
        None => path.to_path_buf(),
    }
}
