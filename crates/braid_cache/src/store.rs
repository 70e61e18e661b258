//! Two-backend persistence for the version record.
//!
//! The durable copy lives in a flat JSON file; an optional fast key-value
//! layer sits in front of it purely as an accelerator. Reads try the fast
//! layer first and fall back to the file; writes go through to both, and
//! only a file write failure is reported. Missing or corrupt data never
//! raises, it decodes to an empty record so every build simply looks stale.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::CacheError;
use crate::record::VersionRecord;

/// Namespace under which the version payload is stored in the fast layer.
const CACHE_NAMESPACE: &str = "braid";

/// Key of the version payload within [`CACHE_NAMESPACE`].
const CACHE_KEY: &str = "versions";

/// File name of the durable record in the default temporary location.
const RECORD_FILE: &str = "braid-versions.json";

/// Outcome of decoding a persisted version record.
///
/// Distinguishes "nothing persisted yet" from "persisted but unreadable" so
/// the corrupt branch is observable instead of silently folded into a miss.
#[derive(Debug)]
pub enum DecodeOutcome {
    /// A record was present and parsed.
    Loaded(VersionRecord),
    /// No record has been persisted yet.
    Missing,
    /// A record was present but could not be parsed.
    Corrupt,
}

impl DecodeOutcome {
    /// Collapses the outcome into a record, treating missing or corrupt
    /// data as empty.
    pub fn into_record(self) -> VersionRecord {
        match self {
            DecodeOutcome::Loaded(record) => record,
            DecodeOutcome::Missing | DecodeOutcome::Corrupt => VersionRecord::default(),
        }
    }
}

/// Decodes a serialized version record payload.
pub fn decode_record(payload: &str) -> DecodeOutcome {
    match serde_json::from_str(payload) {
        Ok(record) => DecodeOutcome::Loaded(record),
        Err(_) => DecodeOutcome::Corrupt,
    }
}

/// Durable read/write access to the full version record.
///
/// Injected into the build cache so tests can substitute an in-memory fake.
pub trait RecordStore {
    /// Reads the current record. Missing or corrupt data yields an empty record.
    fn read(&self) -> VersionRecord;

    /// Persists the full record.
    fn write(&self, record: &VersionRecord) -> Result<(), CacheError>;
}

/// An accelerating key-value layer in front of the durable file.
///
/// Both operations are best-effort: a failed store is reported by the
/// return value and never escalated.
pub trait FastCache {
    /// Fetches a payload by namespace and key.
    fn fetch(&self, namespace: &str, key: &str) -> Option<String>;

    /// Stores a payload. Returns whether the store succeeded.
    fn store(&self, namespace: &str, key: &str, payload: &str) -> bool;
}

/// In-process fast cache backend.
///
/// Keeps payloads in a mutex-guarded map. A poisoned lock degrades to
/// misses and failed stores rather than panicking.
#[derive(Default)]
pub struct MemoryCache {
    slots: Mutex<HashMap<(String, String), String>>,
}

impl MemoryCache {
    /// Creates an empty in-process cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FastCache for MemoryCache {
    fn fetch(&self, namespace: &str, key: &str) -> Option<String> {
        let slots = self.slots.lock().ok()?;
        slots.get(&(namespace.to_string(), key.to_string())).cloned()
    }

    fn store(&self, namespace: &str, key: &str, payload: &str) -> bool {
        let Ok(mut slots) = self.slots.lock() else {
            return false;
        };
        slots.insert(
            (namespace.to_string(), key.to_string()),
            payload.to_string(),
        );
        true
    }
}

/// Durable file-backed record store.
///
/// The record is serialized as pretty JSON and written with owner
/// read/write, group/other read permissions.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store persisting to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The well-known default location in the system temporary directory.
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(RECORD_FILE)
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes the record file.
    pub fn decode(&self) -> DecodeOutcome {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => decode_record(&payload),
            Err(_) => DecodeOutcome::Missing,
        }
    }

    fn persist(&self, record: &VersionRecord) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CacheError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }
        let json = serde_json::to_string_pretty(record).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        std::fs::write(&self.path, json).map_err(|e| CacheError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o644)).map_err(
                |e| CacheError::Io {
                    path: self.path.clone(),
                    source: e,
                },
            )?;
        }
        Ok(())
    }
}

impl RecordStore for FileStore {
    fn read(&self) -> VersionRecord {
        self.decode().into_record()
    }

    fn write(&self, record: &VersionRecord) -> Result<(), CacheError> {
        self.persist(record)
    }
}

/// Record store layering an optional fast cache over the durable file.
pub struct TieredStore {
    fast: Option<Box<dyn FastCache>>,
    file: FileStore,
}

impl TieredStore {
    /// Creates a store backed by the file alone.
    pub fn new(file: FileStore) -> Self {
        Self { fast: None, file }
    }

    /// Creates a store with a fast layer in front of the file.
    pub fn with_fast(file: FileStore, fast: Box<dyn FastCache>) -> Self {
        Self {
            fast: Some(fast),
            file,
        }
    }
}

impl RecordStore for TieredStore {
    fn read(&self) -> VersionRecord {
        if let Some(fast) = &self.fast {
            if let Some(payload) = fast.fetch(CACHE_NAMESPACE, CACHE_KEY) {
                if let DecodeOutcome::Loaded(record) = decode_record(&payload) {
                    return record;
                }
                // corrupt fast payload: fall back to the durable copy
            }
        }
        self.file.read()
    }

    fn write(&self, record: &VersionRecord) -> Result<(), CacheError> {
        if let Some(fast) = &self.fast {
            if let Ok(payload) = serde_json::to_string(record) {
                let _ = fast.store(CACHE_NAMESPACE, CACHE_KEY, &payload);
            }
        }
        // the file is the durable source of truth, written unconditionally
        self.file.write(record)
    }
}
