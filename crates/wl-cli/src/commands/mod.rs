//! CLI subcommand implementations.

pub mod clock;
pub mod logs;
pub mod maintain;
pub mod status;
