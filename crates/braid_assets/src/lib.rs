//! Source file discovery and resolution for asset bundles.
//!
//! This crate expands the source patterns of a bundle definition into
//! concrete build inputs, applying wildcard matching, theme shadowing, and
//! remote URL normalization.

#![warn(missing_docs)]

pub mod discovery;
pub mod error;
pub mod resolver;

pub use discovery::{expand_pattern, is_remote, normalize_remote};
pub use error::AssetError;
pub use resolver::AssetResolver;
