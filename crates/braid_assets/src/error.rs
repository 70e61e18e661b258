//! Error types for source resolution.

/// Errors that can occur while resolving bundle sources.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// A source identifier matched no files.
    #[error("source pattern '{pattern}' matched no files")]
    MissingSource {
        /// The identifier as written in the bundle definition.
        pattern: String,
    },
}
