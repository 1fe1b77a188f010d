//! File-backed engine for the work log.
//!
//! The log file is the source of truth. Every mutation re-reads it, applies
//! the change and rewrites the whole file, so the in-memory [`LogEngine`]
//! model is only ever a projection of what is on disk.
//!
//! # Concurrency
//!
//! A [`LogEngine`] assumes it is the only writer of its file for the duration
//! of each call. There is no locking; two processes mutating the same file at
//! once can lose an update. Writes replace the file atomically, so a crash
//! mid-write leaves the previous contents in place.

mod engine;
mod error;
mod file;
mod notes;

pub use engine::{ClockIn, ClockOut, LogEngine, local_now};
pub use error::LogError;
pub use notes::{NoNotes, NoteSource};
