//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The log name contained a character that cannot appear in a file name.
    #[error("log name {value:?} contains a path separator")]
    PathSeparator { value: String },

    /// Invalid log mode value.
    #[error("invalid log mode: {value} (expected \"interval\" or \"discrete\")")]
    InvalidMode { value: String },
}

/// How a log records events.
///
/// This enum encodes the two valid modes, preventing invalid string values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Start and finish pairs with daily and weekly totals.
    #[default]
    Interval,
    /// Single timepoints with no finish time and no totals.
    Discrete,
}

impl Mode {
    /// String representation used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Interval => "interval",
            Self::Discrete => "discrete",
        }
    }

    /// Whether this mode records durations and prints totals.
    #[must_use]
    pub const fn tracks_totals(&self) -> bool {
        matches!(self, Self::Interval)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interval" => Ok(Self::Interval),
            "discrete" => Ok(Self::Discrete),
            _ => Err(ValidationError::InvalidMode {
                value: s.to_string(),
            }),
        }
    }
}

/// A validated log name.
///
/// Log names key the configuration table and name the cursor state file,
/// so they must be non-empty and free of path separators.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogName(String);

impl LogName {
    /// Creates a new name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "log name" });
        }
        if name.contains(['/', '\\']) {
            return Err(ValidationError::PathSeparator { value: name });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LogName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LogName> for String {
    fn from(name: LogName) -> Self {
        name.0
    }
}

impl fmt::Display for LogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LogName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_from_config_strings() {
        assert_eq!("interval".parse::<Mode>().unwrap(), Mode::Interval);
        assert_eq!("discrete".parse::<Mode>().unwrap(), Mode::Discrete);
        assert_eq!(
            "hourly".parse::<Mode>(),
            Err(ValidationError::InvalidMode {
                value: "hourly".to_string()
            })
        );
    }

    #[test]
    fn mode_serializes_lowercase() {
        let json = serde_json::to_string(&Mode::Discrete).unwrap();
        assert_eq!(json, "\"discrete\"");
    }

    #[test]
    fn log_name_rejects_empty_and_separators() {
        assert!(matches!(
            LogName::new("  "),
            Err(ValidationError::Empty { .. })
        ));
        assert!(matches!(
            LogName::new("../etc"),
            Err(ValidationError::PathSeparator { .. })
        ));
        assert_eq!(LogName::new("todo").unwrap().as_str(), "todo");
    }

    #[test]
    fn log_name_deserialization_validates() {
        let result: Result<LogName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
