//! Parsing and validation of `braid.toml` project configuration files.
//!
//! This crate reads the project configuration file and produces a strongly-typed
//! [`ProjectConfig`] with bundle resolution, output directory mapping, and cache
//! policy handling.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{config_modified_time, load_config, load_config_from_str};
pub use resolve::{resolve_all, resolve_bundle, ResolvedBundle};
pub use types::*;
