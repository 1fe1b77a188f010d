//! Fixtures shared by tests in several modules.

use std::collections::BTreeMap;
use std::path::Path;

use wl_core::{LogName, Mode, Targets};

use crate::config::{Config, LogConfig};

/// A config with an interval `work` log and a discrete `todo` log under `dir`.
pub fn test_config(dir: &Path) -> Config {
    let mut logs = BTreeMap::new();
    logs.insert(
        LogName::new("work").unwrap(),
        LogConfig {
            path: dir.join("logs").join("work.txt"),
            mode: Mode::Interval,
        },
    );
    logs.insert(
        LogName::new("todo").unwrap(),
        LogConfig {
            path: dir.join("logs").join("todo.txt"),
            mode: Mode::Discrete,
        },
    );
    Config {
        default_log: LogName::new("work").unwrap(),
        logs,
        state_dir: dir.join("state"),
        targets: Targets::default(),
    }
}
