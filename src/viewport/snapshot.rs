//! Versioned viewport snapshot persisted across restarts.
//!
//! Only the user's window is saved, never bar data.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Timeframe;

/// Current on-disk format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted part of a [`ViewportState`](super::ViewportState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    pub version: u32,
    pub timeframe: Timeframe,
    pub visible_bars_count: usize,
    pub scrolled_by: f64,
}

impl ViewportSnapshot {
    /// Writes the snapshot as JSON, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Io`](crate::ChartError::Io) if the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| {
            crate::ChartError::Io(format!("failed to write {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "saved viewport snapshot");
        Ok(())
    }

    /// Reads a snapshot, returning `Ok(None)` when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Json`](crate::ChartError::Json) for a corrupt
    /// file and [`ChartError::State`](crate::ChartError::State) for a
    /// snapshot written by another format version.
    pub fn load(path: &Path) -> crate::Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(crate::ChartError::Io(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        let snapshot: Self = serde_json::from_str(&contents)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(crate::ChartError::State(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewport.json");
        let snapshot = ViewportSnapshot {
            version: SNAPSHOT_VERSION,
            timeframe: Timeframe::M30,
            visible_bars_count: 64,
            scrolled_by: 128.5,
        };

        snapshot.save(&path).unwrap();
        assert_eq!(ViewportSnapshot::load(&path).unwrap(), Some(snapshot));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ViewportSnapshot::load(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn rejects_other_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewport.json");
        std::fs::write(
            &path,
            r#"{"version":7,"timeframe":"H1","visible_bars_count":50,"scrolled_by":0.0}"#,
        )
        .unwrap();

        let err = ViewportSnapshot::load(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported snapshot version 7"));
    }

    #[test]
    fn corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewport.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            ViewportSnapshot::load(&path),
            Err(crate::ChartError::Json(_))
        ));
    }
}
