//! Configuration loading and management.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wl_core::{LogName, Mode, Targets};

/// Name of the log configured out of the box.
const DEFAULT_LOG: &str = "work";

/// Where one named log lives and how it records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Path to the log's text file.
    pub path: PathBuf,
    /// `interval` or `discrete`. Default: `interval`.
    #[serde(default)]
    pub mode: Mode,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log used when `--log` is not given.
    pub default_log: LogName,
    /// Configured logs by name.
    pub logs: BTreeMap<LogName, LogConfig>,
    /// Directory holding pending clock-in state.
    pub state_dir: PathBuf,
    /// Daily and weekly hour targets for `status`.
    #[serde(default)]
    pub targets: Targets,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        let state_dir = dirs_state_path().unwrap_or_else(|| data_dir.clone());
        let default_log = LogName::new(DEFAULT_LOG).expect("default log name is valid");

        let mut logs = BTreeMap::new();
        logs.insert(
            default_log.clone(),
            LogConfig {
                path: data_dir.join(format!("{DEFAULT_LOG}.txt")),
                mode: Mode::Interval,
            },
        );

        Self {
            default_log,
            logs,
            state_dir,
            targets: Targets::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Log tables merge with the defaults, so the `work` log stays available
    /// unless a file overrides its entry.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (WL_*)
        figment = figment.merge(Env::prefixed("WL_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for wl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wl"))
}

/// Returns the platform-specific data directory for wl.
///
/// On Linux: `~/.local/share/wl`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("wl"))
}

/// Returns the platform-specific state directory for wl.
///
/// On Linux: `~/.local/state/wl`. Other platforms have no state directory.
pub fn dirs_state_path() -> Option<PathBuf> {
    dirs::state_dir().map(|p| p.join("wl"))
}
