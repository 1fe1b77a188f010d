//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Plain-text work log.
///
/// Clocks in and out of named logs kept as human-readable text files, one
/// day block per date with daily and weekly hour totals.
#[derive(Debug, Parser)]
#[command(name = "wl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log to operate on (defaults to `default_log` from the config).
    #[arg(short, long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clock in.
    In,

    /// Clock out, recording an entry since the last clock-in.
    Out {
        /// Note for the entry (prompted for when omitted).
        note: Vec<String>,
    },

    /// Undo an accidental clock-in and clock out from the one before it.
    Fix {
        /// Note for the entry (prompted for when omitted).
        note: Vec<String>,
    },

    /// Record a single timepoint.
    #[command(alias = "mark")]
    Event {
        /// Note for the entry (prompted for when omitted).
        note: Vec<String>,
    },

    /// Remove entries whose note ends in `X`.
    Purge,

    /// Rewrite the log file, recomputing its totals.
    Refresh,

    /// Show hours so far today and this week.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List configured logs.
    Logs,
}

/// Joins note words given on the command line.
pub fn joined_note(words: &[String]) -> Option<String> {
    (!words.is_empty()).then(|| words.join(" "))
}
