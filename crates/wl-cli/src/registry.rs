//! Named logs from configuration.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use wl_core::{LogName, Targets};
use wl_engine::LogEngine;

use crate::config::{Config, LogConfig};
use crate::cursor::CursorStore;

/// Opens configured logs by name and keeps their clock-in state.
#[derive(Debug, Clone)]
pub struct LogRegistry {
    logs: BTreeMap<LogName, LogConfig>,
    default_log: LogName,
    targets: Targets,
    cursors: CursorStore,
}

impl LogRegistry {
    pub fn from_config(config: &Config) -> Self {
        Self {
            logs: config.logs.clone(),
            default_log: config.default_log.clone(),
            targets: config.targets,
            cursors: CursorStore::new(&config.state_dir),
        }
    }

    /// Resolves `--log` (or the default log) to a configured name.
    pub fn resolve(&self, name: Option<&str>) -> Result<LogName> {
        let name = match name {
            Some(name) => LogName::new(name)?,
            None => self.default_log.clone(),
        };

        if !self.logs.contains_key(&name) {
            let known: Vec<&str> = self.logs.keys().map(LogName::as_str).collect();
            bail!(
                "unknown log '{name}' (configured: {})",
                if known.is_empty() {
                    "none".to_string()
                } else {
                    known.join(", ")
                }
            );
        }
        Ok(name)
    }

    /// Configured logs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&LogName, &LogConfig)> {
        self.logs.iter()
    }

    pub const fn default_log(&self) -> &LogName {
        &self.default_log
    }

    pub const fn cursors(&self) -> &CursorStore {
        &self.cursors
    }

    /// Opens a log with its saved clock-in state restored.
    pub fn open(&self, name: &LogName) -> Result<LogEngine> {
        let log = self
            .logs
            .get(name)
            .with_context(|| format!("unknown log '{name}'"))?;

        if let Some(parent) = log.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).context("failed to create log directory")?;
        }

        let cursor = self.cursors.load(name)?;
        let engine = LogEngine::open(&log.path, log.mode)
            .with_context(|| format!("failed to open log '{name}'"))?
            .with_targets(self.targets)
            .with_cursor(cursor);
        tracing::debug!(log = %name, ?engine, "opened log");
        Ok(engine)
    }

    /// Saves the engine's clock-in state for the next invocation.
    pub fn save(&self, name: &LogName, engine: &LogEngine) -> Result<()> {
        self.cursors.save(name, &engine.cursor())
    }
}
