//! Log engine errors.

use std::path::PathBuf;

use thiserror::Error;
use wl_core::ParseError;

/// Errors from reading, writing or mutating a log.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log file could not be read, created or replaced.
    #[error("failed to access log file {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A line of the log file does not fit the format.
    #[error("malformed log file {}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    /// Clock-out or correction without a pending clock-in.
    #[error("no open clock-in")]
    NoOpenClockIn,
    /// No note was given and the note source could not supply one.
    #[error("a note is required")]
    MissingNote,
    /// The note source failed while asking for a note.
    #[error("failed to read note")]
    NoteInput(#[source] std::io::Error),
}
