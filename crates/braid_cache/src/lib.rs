//! Build cache and freshness tracking for compiled asset bundles.
//!
//! This crate decides whether a previously built artifact is still valid,
//! computes theme- and version-qualified filenames, and persists per-build
//! version stamps across a fast cache layer and a durable fallback file.
//! Rebuilds run under an invalidate/finalize lifecycle so an interrupted
//! build can never be mistaken for a finished one.

#![warn(missing_docs)]

pub mod cache;
pub mod error;
pub mod naming;
pub mod probe;
pub mod record;
pub mod store;
pub mod target;

pub use cache::BuildCache;
pub use error::CacheError;
pub use naming::{build_file_name, cache_name, is_versioned_variant};
pub use probe::{RemoteFreshness, RemoteProbe};
pub use record::{BuildState, VersionEntry, VersionRecord};
pub use store::{DecodeOutcome, FastCache, FileStore, MemoryCache, RecordStore, TieredStore};
pub use target::{BuildTarget, ResolvedSource, SourceResolver};
