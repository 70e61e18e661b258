//! Error types for cache operations.

use std::path::PathBuf;

/// Errors that can occur during cache operations.
///
/// Most cache reads are fail-safe: missing or corrupt data yields an empty
/// record rather than an error. This enum covers the write side, where
/// failures must reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while reading or writing files.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The output directory for an artifact is missing or not writable.
    #[error("output directory {path} is missing or not writable")]
    UnwritableOutput {
        /// The output directory path.
        path: PathBuf,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = CacheError::Io {
            path: PathBuf::from("/tmp/braid-versions.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache I/O error"));
        assert!(msg.contains("braid-versions.json"));
    }

    #[test]
    fn unwritable_output_display() {
        let err = CacheError::UnwritableOutput {
            path: PathBuf::from("public/js"),
        };
        let msg = err.to_string();
        assert!(msg.contains("public/js"));
        assert!(msg.contains("not writable"));
    }

    #[test]
    fn serialization_error_display() {
        let err = CacheError::Serialization {
            reason: "unexpected EOF".to_string(),
        };
        assert!(err.to_string().contains("unexpected EOF"));
    }
}
