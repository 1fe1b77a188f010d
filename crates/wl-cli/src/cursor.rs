//! Clock-in state kept between invocations.
//!
//! Each log's pending clock-in is stored in `<state_dir>/cursors/<name>.json`.
//! A missing file means nothing is pending.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use wl_core::{Cursor, LogName};

/// Reads and writes per-log cursor files.
#[derive(Debug, Clone)]
pub struct CursorStore {
    dir: PathBuf,
}

impl CursorStore {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            dir: state_dir.join("cursors"),
        }
    }

    /// Returns the cursor file path for a log.
    pub fn path(&self, name: &LogName) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Loads a log's cursor, idle if none was saved.
    pub fn load(&self, name: &LogName) -> Result<Cursor> {
        let path = self.path(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Cursor::default()),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    /// Saves a log's cursor, removing the file once nothing is left to keep.
    pub fn save(&self, name: &LogName, cursor: &Cursor) -> Result<()> {
        let path = self.path(name);

        if *cursor == Cursor::default() {
            return match std::fs::remove_file(&path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                    Err(e).with_context(|| format!("failed to remove {}", path.display()))
                }
                _ => Ok(()),
            };
        }

        std::fs::create_dir_all(&self.dir).context("failed to create state directory")?;
        let json = serde_json::to_string_pretty(cursor).context("failed to serialize cursor")?;
        std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
