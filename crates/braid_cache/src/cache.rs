//! High-level build cache orchestrator.
//!
//! The `BuildCache` type ties together the version record store, the
//! filename resolver, and the remote probe into a single interface for the
//! build pipeline. It answers whether an artifact is still fresh, mints and
//! commits version stamps, and runs the invalidate/finalize lifecycle
//! around each rebuild.

use std::path::PathBuf;

use braid_common::{mtime_secs, unix_now};

use crate::error::CacheError;
use crate::naming;
use crate::probe::RemoteFreshness;
use crate::record::{VersionEntry, VersionRecord};
use crate::store::RecordStore;
use crate::target::{BuildTarget, ResolvedSource, SourceResolver};

/// Build cache and freshness engine.
///
/// Holds the injected record store and remote probe plus the configuration
/// modification time used as the "config changed" signal. All operations
/// read and write the version record as a whole, keeping the store's
/// backends coherent.
pub struct BuildCache {
    store: Box<dyn RecordStore>,
    probe: Box<dyn RemoteFreshness>,
    config_modified: u64,
}

impl BuildCache {
    /// Creates a cache over the given store and probe.
    ///
    /// `config_modified` is the configuration's last-modified time in Unix
    /// seconds; any artifact at least that old is considered stale.
    pub fn new(
        store: Box<dyn RecordStore>,
        probe: Box<dyn RemoteFreshness>,
        config_modified: u64,
    ) -> Self {
        Self {
            store,
            probe,
            config_modified,
        }
    }

    /// The version-record key for a target.
    pub fn cache_name(&self, target: &BuildTarget) -> String {
        naming::cache_name(&target.name, target.theme.as_deref())
    }

    /// Returns the target's current version stamp, or `None` when
    /// versioning is disabled for it.
    ///
    /// A missing or zero stamp is lazily minted from the current wall
    /// clock and persisted best-effort, so every build gets exactly one
    /// canonical first stamp. While the target is invalidated the stamp
    /// comes from (and is minted into) the pending slot, leaving the
    /// committed time untouched until finalize.
    pub fn version(&self, target: &BuildTarget) -> Option<u64> {
        if !target.versioned {
            return None;
        }
        let mut record = self.store.read();
        let name = self.cache_name(target);
        let current = record.entries.get(&name).map(VersionEntry::active);
        if let Some(version) = current {
            if version > 0 {
                return Some(version);
            }
        }
        let minted = unix_now();
        match record.entries.get_mut(&name) {
            Some(entry) => entry.set_active(minted),
            None => {
                record.entries.insert(name, VersionEntry::new(minted));
            }
        }
        // a failed persist still yields a usable stamp; the next read
        // simply mints again
        let _ = self.store.write(&record);
        Some(minted)
    }

    /// Sets the target's version stamp explicitly. No-op when versioning
    /// is disabled.
    pub fn set_version(&self, target: &BuildTarget, time: u64) -> Result<(), CacheError> {
        if !target.versioned {
            return Ok(());
        }
        let mut record = self.store.read();
        let name = self.cache_name(target);
        match record.entries.get_mut(&name) {
            Some(entry) => entry.set_active(time),
            None => {
                record.entries.insert(name, VersionEntry::new(time));
            }
        }
        self.store.write(&record)
    }

    /// Marks a target as mid-rebuild. No-op when versioning is disabled.
    ///
    /// The committed stamp is kept, so a rebuild that never completes can
    /// fall back to it on finalize. Versions minted while invalidated land
    /// in a pending slot and are committed by [`BuildCache::finalize`].
    pub fn invalidate(&self, target: &BuildTarget) -> Result<(), CacheError> {
        if !target.versioned {
            return Ok(());
        }
        let mut record = self.store.read();
        let name = self.cache_name(target);
        record.entries.entry(name).or_default().invalidate();
        self.store.write(&record)
    }

    /// Completes a rebuild, committing any pending stamp.
    ///
    /// No-op when versioning is disabled, when the target has no entry, or
    /// when the entry is not invalidated. An invalidated entry without a
    /// pending stamp transitions back to valid with its old time intact.
    pub fn finalize(&self, target: &BuildTarget) -> Result<(), CacheError> {
        if !target.versioned {
            return Ok(());
        }
        let mut record = self.store.read();
        let name = self.cache_name(target);
        let Some(entry) = record.entries.get_mut(&name) else {
            return Ok(());
        };
        if !entry.is_invalidated() {
            return Ok(());
        }
        entry.finalize();
        self.store.write(&record)
    }

    /// Removes a target's entry from the version record.
    pub fn forget(&self, target: &BuildTarget) -> Result<(), CacheError> {
        let mut record = self.store.read();
        if record.entries.remove(&self.cache_name(target)).is_none() {
            return Ok(());
        }
        self.store.write(&record)
    }

    /// Computes the on-disk filename for a target.
    ///
    /// With `include_version` the current stamp is fetched (minting one if
    /// necessary); without it, or when versioning is disabled, the plain
    /// themed name is returned.
    pub fn build_file_name(&self, target: &BuildTarget, include_version: bool) -> String {
        let version = if include_version {
            self.version(target).unwrap_or(0)
        } else {
            0
        };
        naming::build_file_name(&target.name, target.theme.as_deref(), version)
    }

    /// The full path the target's artifact is expected at.
    pub fn artifact_path(&self, target: &BuildTarget) -> PathBuf {
        target.output_dir.join(self.build_file_name(target, true))
    }

    /// Decides whether the on-disk artifact for a target is still valid.
    ///
    /// Stale when: the target is marked mid-rebuild, the artifact is
    /// missing, the configuration is as new as the artifact, or any source
    /// is as new as the artifact or cannot be checked at all. The source
    /// scan short-circuits on the first stale input.
    pub fn is_fresh(&self, target: &BuildTarget, resolver: &dyn SourceResolver) -> bool {
        if target.versioned {
            let record = self.store.read();
            let invalidated = record
                .entries
                .get(&self.cache_name(target))
                .is_some_and(VersionEntry::is_invalidated);
            // an interrupted rebuild must never present as fresh
            if invalidated {
                return false;
            }
        }

        let Some(built) = mtime_secs(&self.artifact_path(target)) else {
            return false;
        };
        if self.config_modified >= built {
            return false;
        }

        for source in &target.sources {
            let resolved = resolver.resolve(target, source);
            if resolved.is_empty() {
                return false;
            }
            for input in resolved {
                let modified = match input {
                    ResolvedSource::Local(path) => mtime_secs(&path),
                    ResolvedSource::Remote(url) => self.probe.last_modified(&url),
                };
                match modified {
                    Some(time) if time < built => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Writes compiled content to the target's versioned path and runs
    /// finalize.
    ///
    /// Fails up front when the output directory is missing or read-only.
    /// Finalize runs even when the byte write fails, but a write failure
    /// takes precedence in the returned error. Returns the path written.
    pub fn write(&self, target: &BuildTarget, content: &[u8]) -> Result<PathBuf, CacheError> {
        let dir = &target.output_dir;
        let writable = std::fs::metadata(dir)
            .map(|m| m.is_dir() && !m.permissions().readonly())
            .unwrap_or(false);
        if !writable {
            return Err(CacheError::UnwritableOutput { path: dir.clone() });
        }

        let path = dir.join(self.build_file_name(target, true));
        let written = std::fs::write(&path, content).map_err(|e| CacheError::Io {
            path: path.clone(),
            source: e,
        });
        let finalized = self.finalize(target);
        match written {
            Ok(()) => finalized.map(|_| path),
            Err(e) => Err(e),
        }
    }

    /// A point-in-time copy of the full version record.
    pub fn snapshot(&self) -> VersionRecord {
        self.store.read()
    }
}
