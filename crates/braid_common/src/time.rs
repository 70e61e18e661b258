//! Unix-time helpers for freshness comparisons.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall-clock time as whole Unix seconds.
///
/// A clock set before the epoch yields `0` rather than panicking; that value
/// is also the "no timestamp" sentinel everywhere else, which is the safe
/// degraded reading for a nonsense clock.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Returns a file's modification time as Unix seconds, or `None` when the
/// file is missing or its metadata cannot be read.
pub fn mtime_secs(path: &Path) -> Option<u64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_now_is_past_2020() {
        // 2020-01-01T00:00:00Z
        assert!(unix_now() > 1_577_836_800);
    }

    #[test]
    fn mtime_of_written_file_is_recent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.txt");
        std::fs::write(&path, "x").unwrap();

        let mtime = mtime_secs(&path).unwrap();
        let now = unix_now();
        assert!(mtime <= now + 1);
        assert!(now - mtime < 60);
    }

    #[test]
    fn mtime_of_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(mtime_secs(&dir.path().join("absent")).is_none());
    }

    #[test]
    fn mtime_tracks_set_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.txt");
        std::fs::write(&path, "x").unwrap();

        let past = UNIX_EPOCH + std::time::Duration::from_secs(1_000_000);
        let file = std::fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(past).unwrap();
        drop(file);

        assert_eq!(mtime_secs(&path), Some(1_000_000));
    }
}
