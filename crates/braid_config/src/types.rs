//! Configuration types deserialized from `braid.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The top-level project configuration parsed from `braid.toml`.
///
/// Describes the asset bundles to build, where compiled output lands per
/// extension, and how the version cache behaves.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Core project metadata (name, version).
    pub project: ProjectMeta,
    /// Output directory per file extension (e.g. `js = "public/js"`).
    #[serde(default)]
    pub output: BTreeMap<String, String>,
    /// Version-cache behavior settings.
    #[serde(default)]
    pub cache: CacheSettings,
    /// Named bundle definitions, keyed by output name (e.g. `"libs.js"`).
    #[serde(default)]
    pub bundles: BTreeMap<String, BundleSpec>,
}

/// Core project metadata required in every `braid.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// The project version string.
    pub version: String,
    /// A brief description of the project.
    #[serde(default)]
    pub description: String,
    /// List of project authors.
    #[serde(default)]
    pub authors: Vec<String>,
}

/// Settings controlling the build-version cache.
#[derive(Debug, Deserialize)]
pub struct CacheSettings {
    /// Extensions whose bundle filenames carry a version timestamp
    /// (e.g. `["js", "css"]`). Extensions not listed produce unversioned
    /// filenames and their cache operations are inert.
    #[serde(default)]
    pub versioning: Vec<String>,
    /// Which fast key-value backend fronts the durable version file.
    #[serde(default)]
    pub fast_backend: FastBackend,
    /// Override for the durable version-file path. Relative paths are
    /// resolved against the project root. Defaults to a file in the
    /// system temporary directory.
    #[serde(default)]
    pub version_file: Option<PathBuf>,
    /// Timeout in seconds for remote freshness probes.
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout_secs: u64,
    /// Maximum redirect hops a remote probe will follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            versioning: Vec::new(),
            fast_backend: FastBackend::default(),
            version_file: None,
            remote_timeout_secs: default_remote_timeout(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_remote_timeout() -> u64 {
    10
}

fn default_max_redirects() -> u32 {
    5
}

/// Fast cache backend selection for the version store.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FastBackend {
    /// No fast backend; the version file is the only store (default).
    #[default]
    None,
    /// An in-process memory map in front of the version file.
    Memory,
}

/// Definition of a single asset bundle.
#[derive(Debug, Deserialize)]
pub struct BundleSpec {
    /// Ordered source identifiers: paths relative to the project root,
    /// `*` patterns expanded at build time, or remote URLs.
    pub files: Vec<String>,
    /// Optional theme name. Themed bundles get a slug prefix on their
    /// filename and themed source lookups.
    #[serde(default)]
    pub theme: Option<String>,
}
