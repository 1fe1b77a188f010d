//! Note supply for entries recorded without one.

use crate::LogError;

/// Supplies a note when a clock-out or event is recorded without one.
///
/// Closures returning `Result<String, LogError>` implement this trait, which
/// keeps canned notes in tests short.
pub trait NoteSource {
    fn note(&mut self) -> Result<String, LogError>;
}

impl<F> NoteSource for F
where
    F: FnMut() -> Result<String, LogError>,
{
    fn note(&mut self) -> Result<String, LogError> {
        self()
    }
}

/// A source that never has a note; callers must always pass one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNotes;

impl NoteSource for NoNotes {
    fn note(&mut self) -> Result<String, LogError> {
        Err(LogError::MissingNote)
    }
}
