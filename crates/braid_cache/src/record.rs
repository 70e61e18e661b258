//! Persistent record of build versions and rebuild state.
//!
//! The record maps each build's cache name to a [`VersionEntry`] holding the
//! committed version stamp and the entry's lifecycle state. Each entry tracks
//! its own rebuild state, so distinct builds can be mid-rebuild at the same
//! time without interfering with one another.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a tracked build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildState {
    /// The committed version is current.
    #[default]
    Valid,

    /// A rebuild is underway.
    Invalidated {
        /// Version stamp minted for the in-flight rebuild, or 0 when the
        /// rebuild has not yet requested one.
        pending: u64,
    },
}

/// Version state for a single build.
///
/// `time` is the committed version stamp in Unix seconds; it survives an
/// invalidation so an abandoned rebuild can fall back to it. While the entry
/// is invalidated, newly minted stamps land in the pending slot and are only
/// committed on finalize.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Committed version stamp in Unix seconds (0 = never built).
    pub time: u64,

    /// Lifecycle state. Defaults to valid when absent from stored data.
    #[serde(default)]
    pub state: BuildState,
}

impl VersionEntry {
    /// Creates a valid entry committed at `time`.
    pub fn new(time: u64) -> Self {
        Self {
            time,
            state: BuildState::Valid,
        }
    }

    /// Returns the version current readers should use: the committed time
    /// when valid, or the pending rebuild stamp while invalidated.
    pub fn active(&self) -> u64 {
        match self.state {
            BuildState::Valid => self.time,
            BuildState::Invalidated { pending } => pending,
        }
    }

    /// Writes `version` into the active slot.
    pub fn set_active(&mut self, version: u64) {
        match &mut self.state {
            BuildState::Valid => self.time = version,
            BuildState::Invalidated { pending } => *pending = version,
        }
    }

    /// Returns `true` while a rebuild is underway.
    pub fn is_invalidated(&self) -> bool {
        matches!(self.state, BuildState::Invalidated { .. })
    }

    /// Marks the entry as mid-rebuild, discarding any previously pending
    /// stamp. The committed time is kept.
    pub fn invalidate(&mut self) {
        self.state = BuildState::Invalidated { pending: 0 };
    }

    /// Completes a rebuild: commits the pending stamp when one was minted,
    /// otherwise restores the previous committed time. No-op on a valid entry.
    pub fn finalize(&mut self) {
        if let BuildState::Invalidated { pending } = self.state {
            if pending > 0 {
                self.time = pending;
            }
            self.state = BuildState::Valid;
        }
    }
}

/// The full persisted mapping from cache name to version entry.
///
/// Reads and writes always operate on the whole mapping so the fast and
/// file backends stay coherent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Per-build entries keyed by cache name.
    pub entries: BTreeMap<String, VersionEntry>,
}
