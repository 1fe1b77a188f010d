//! Work log CLI library.
//!
//! This crate provides the CLI interface for the work log: configuration,
//! the registry of named logs, and the subcommands.

mod cli;
pub mod commands;
mod config;
mod cursor;
mod prompt;
mod registry;
#[cfg(test)]
mod test_support;

pub use cli::{Cli, Commands, joined_note};
pub use config::{Config, LogConfig};
pub use cursor::CursorStore;
pub use prompt::PromptNotes;
pub use registry::LogRegistry;
