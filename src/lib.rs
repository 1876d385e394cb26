//! asset-rev: Content-Hash Revisioning for Static Asset Pipelines
//!
//! Renames build outputs by embedding a content fingerprint into their
//! filenames (`app.js` -> `app-9f8c3a1b.js`) and produces a manifest mapping
//! original paths to revisioned paths, enabling long-term cache busting.
//! Companion source-map files are kept in filename-sync with the asset they
//! annotate.
//!
//! The crate is the engine only: an external pipeline host owns filesystem
//! traversal, end-of-stream signaling, and writing the emitted records back
//! to disk. The two stages ([`revision::Revisioner`] and
//! [`manifest::ManifestBuilder`]) are independent and composable.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod manifest;
pub mod path;
pub mod record;
pub mod revision;

pub use config::{ManifestOptions, RevConfig};
pub use error::RevError;
pub use manifest::ManifestBuilder;
pub use record::{Contents, FileRecord, PipelineItem, Revisioned};
pub use revision::Revisioner;
