//! Build target descriptors and the source resolution seam.

use std::path::PathBuf;

/// Descriptor for one compiled artifact.
///
/// Carries everything the cache needs to name, locate, and check an
/// artifact. Built from configuration by the caller and borrowed read-only
/// for the duration of each operation.
#[derive(Debug, Clone)]
pub struct BuildTarget {
    /// Build name including extension, e.g. `libs.js`.
    pub name: String,
    /// Optional theme applied to the filename and source lookup.
    pub theme: Option<String>,
    /// Logical source identifiers, in build order.
    pub sources: Vec<String>,
    /// Directory artifacts are written to.
    pub output_dir: PathBuf,
    /// Whether filenames for this build carry a version stamp.
    pub versioned: bool,
}

/// A source input resolved to a concrete location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedSource {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// A resource fetched over the network.
    Remote(String),
}

/// Resolves logical source identifiers to concrete locations.
///
/// Implemented by the file-discovery layer; freshness checks go through
/// this seam so they never touch pattern expansion or theme lookup rules
/// directly. An identifier that resolves to nothing yields an empty vec,
/// which freshness checks treat as stale.
pub trait SourceResolver {
    /// Resolves one source identifier for a target, in discovery order.
    fn resolve(&self, target: &BuildTarget, source: &str) -> Vec<ResolvedSource>;
}
