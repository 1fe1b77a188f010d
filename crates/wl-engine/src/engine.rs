//! The clock state machine over one log file.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime, SubsecRound};
use wl_core::{
    Cursor, Day, ElapsedReport, Entry, Mode, Targets, elapsed_report, format_hours,
    opens_new_day, parse_log, render_log, round_hours,
};

use crate::file::{read_or_create, write_atomic};
use crate::{LogError, NoNotes, NoteSource};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time at second precision.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Joins the lines of a note with single spaces; entries are one line each.
fn single_line(note: &str) -> String {
    note.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Acknowledgment of a clock-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockIn {
    pub at: NaiveDateTime,
    /// Whether the clock-in started a new day.
    pub opened_day: bool,
}

impl fmt::Display for ClockIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clocked in at {}", self.at.format(TIMESTAMP_FORMAT))
    }
}

/// Acknowledgment of a committed entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockOut {
    pub entry: Entry,
    /// Rounded hours recorded on the entry's day, interval logs only.
    pub day_hours: Option<f64>,
}

impl fmt::Display for ClockOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "clocked out at {}",
            self.entry.finish().format(TIMESTAMP_FORMAT)
        )?;
        if let Some(hours) = self.day_hours {
            write!(f, "\n{} hours today.", format_hours(hours))?;
        }
        Ok(())
    }
}

/// One log file and its clock-in state.
///
/// Days are held most recent first. The model is replaced wholesale on every
/// ingest; a failed ingest or digest leaves it as it was.
pub struct LogEngine {
    path: PathBuf,
    mode: Mode,
    targets: Targets,
    days: Vec<Day>,
    cursor: Cursor,
    notes: Box<dyn NoteSource>,
}

impl fmt::Debug for LogEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEngine")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("days", &self.days.len())
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl LogEngine {
    /// Opens the log at `path`, creating an empty file if it does not exist.
    pub fn open(path: impl Into<PathBuf>, mode: Mode) -> Result<Self, LogError> {
        let mut engine = Self {
            path: path.into(),
            mode,
            targets: Targets::default(),
            days: Vec::new(),
            cursor: Cursor::default(),
            notes: Box::new(NoNotes),
        };
        engine.ingest()?;
        Ok(engine)
    }

    #[must_use]
    pub fn with_targets(mut self, targets: Targets) -> Self {
        self.targets = targets;
        self
    }

    /// Restores clock-in state saved from an earlier session.
    #[must_use]
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = cursor;
        self
    }

    /// Sets where notes come from when a call does not pass one.
    #[must_use]
    pub fn with_note_source(mut self, notes: impl NoteSource + 'static) -> Self {
        self.notes = Box::new(notes);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// All days, most recent first.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// The day at `index`, where 0 is the current day.
    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    pub fn count(&self) -> usize {
        self.days.len()
    }

    /// Re-reads the file, replacing the in-memory days.
    pub fn ingest(&mut self) -> Result<(), LogError> {
        self.days = self.load()?;
        Ok(())
    }

    /// Rewrites the file from the in-memory days.
    pub fn digest(&self) -> Result<(), LogError> {
        self.store(&self.days)
    }

    fn load(&self) -> Result<Vec<Day>, LogError> {
        let text = read_or_create(&self.path)?;
        let days = parse_log(&text, self.mode).map_err(|source| LogError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = ?self.path, days = days.len(), "ingested log");
        Ok(days)
    }

    fn store(&self, days: &[Day]) -> Result<(), LogError> {
        write_atomic(&self.path, &render_log(days, self.mode))?;
        tracing::debug!(path = ?self.path, days = days.len(), "digested log");
        Ok(())
    }

    /// Writes `days` and adopts them as the model once the write succeeded.
    fn commit(&mut self, days: Vec<Day>) -> Result<(), LogError> {
        self.store(&days)?;
        self.days = days;
        Ok(())
    }

    pub fn clock_in(&mut self) -> ClockIn {
        self.clock_in_at(local_now())
    }

    /// Starts an interval at `now`.
    ///
    /// Opens a new day when the log is empty, or when `now` is on a later date
    /// than the current day and past the 4 a.m. rollover. Nothing is written.
    pub fn clock_in_at(&mut self, now: NaiveDateTime) -> ClockIn {
        self.cursor.clock_in(now);

        let opened_day = opens_new_day(&self.days, now);
        if opened_day {
            self.days.insert(0, Day::new(now.date()));
        }

        tracing::info!(path = ?self.path, at = %now, opened_day, "clocked in");
        ClockIn { at: now, opened_day }
    }

    pub fn clock_out(&mut self, note: Option<&str>) -> Result<ClockOut, LogError> {
        self.clock_out_at(note, local_now())
    }

    /// Ends the pending interval at `now` and commits it as an entry.
    pub fn clock_out_at(
        &mut self,
        note: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<ClockOut, LogError> {
        let start = self.cursor.start.ok_or(LogError::NoOpenClockIn)?;
        let note = self.resolve_note(note)?;

        let outcome = self.record(start, now, note)?;
        self.cursor.take_start();
        Ok(outcome)
    }

    pub fn correction(&mut self, note: Option<&str>) -> Result<ClockOut, LogError> {
        self.correction_at(note, local_now())
    }

    /// Undoes the latest clock-in and clocks out from the one before it.
    ///
    /// Only one level of history is kept, so a second correction in a row
    /// fails with [`LogError::NoOpenClockIn`].
    pub fn correction_at(
        &mut self,
        note: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<ClockOut, LogError> {
        let start = self.cursor.previous.ok_or(LogError::NoOpenClockIn)?;
        let note = self.resolve_note(note)?;

        let outcome = self.record(start, now, note)?;
        self.cursor.rewind();
        self.cursor.take_start();
        tracing::info!(path = ?self.path, start = %start, "corrected clock-in");
        Ok(outcome)
    }

    pub fn single_event(&mut self, note: Option<&str>) -> Result<ClockOut, LogError> {
        self.single_event_at(note, local_now())
    }

    /// Records a zero-length entry at `now`, as a clock-in immediately
    /// followed by a clock-out.
    pub fn single_event_at(
        &mut self,
        note: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<ClockOut, LogError> {
        let note = self.resolve_note(note)?;

        let outcome = self.record(now, now, note)?;
        self.cursor.clock_in(now);
        self.cursor.take_start();
        Ok(outcome)
    }

    /// Removes every entry whose note ends in `X`, returning how many went.
    pub fn purge_completed(&mut self) -> Result<usize, LogError> {
        let mut removed = 0;
        let days: Vec<Day> = self
            .load()?
            .into_iter()
            .filter_map(|day| {
                let (day, dropped) = day.without_completed();
                removed += dropped;
                (!day.is_empty()).then_some(day)
            })
            .collect();

        self.commit(days)?;
        tracing::info!(path = ?self.path, removed, "purged completed entries");
        Ok(removed)
    }

    /// Re-reads and rewrites the file without changing its entries.
    pub fn refresh(&mut self) -> Result<(), LogError> {
        let days = self.load()?;
        self.commit(days)
    }

    pub fn query_elapsed(&self) -> ElapsedReport {
        self.query_elapsed_at(local_now())
    }

    /// Hours so far today and this week, counting the pending interval up to
    /// `now`. Reads only the in-memory model.
    ///
    /// "Today" is the day a pending clock-in belongs to, or without one, the
    /// day a clock-in at `now` would land on. A log last written weeks ago
    /// therefore reports nothing for today or this week.
    #[allow(clippy::cast_precision_loss)]
    pub fn query_elapsed_at(&self, now: NaiveDateTime) -> ElapsedReport {
        let elapsed = self
            .cursor
            .start
            .map(|start| ((now - start).num_seconds() as f64 / 3600.0).max(0.0));
        let anchor = self.cursor.start.unwrap_or(now);

        if opens_new_day(&self.days, anchor) {
            let mut days = Vec::with_capacity(self.days.len() + 1);
            days.push(Day::new(anchor.date()));
            days.extend_from_slice(&self.days);
            elapsed_report(&days, elapsed, self.targets)
        } else {
            elapsed_report(&self.days, elapsed, self.targets)
        }
    }

    fn resolve_note(&mut self, note: Option<&str>) -> Result<String, LogError> {
        let note = match note.map(single_line) {
            Some(note) if !note.is_empty() => note,
            _ => single_line(&self.notes.note()?),
        };
        if note.is_empty() {
            return Err(LogError::MissingNote);
        }
        Ok(note)
    }

    /// Re-reads the file, appends an entry from `start` to `finish` to the day
    /// `start` belongs to, and rewrites the file.
    ///
    /// That day is re-opened if needed, since a clock-in's new day exists only
    /// in memory until its first entry is written.
    fn record(
        &mut self,
        start: NaiveDateTime,
        finish: NaiveDateTime,
        note: String,
    ) -> Result<ClockOut, LogError> {
        let entry = match self.mode {
            Mode::Interval => Entry::interval(start, finish, note),
            Mode::Discrete => Entry::point(start, note),
        };

        let mut days = self.load()?;
        let today = if opens_new_day(&days, start) {
            Day::new(start.date())
        } else {
            days.remove(0)
        };
        let today = today.with_entry(entry.clone());
        let day_hours = self
            .mode
            .tracks_totals()
            .then(|| round_hours(today.total_hours()));
        days.insert(0, today);

        self.commit(days)?;
        tracing::info!(path = ?self.path, start = %entry.start(), finish = %entry.finish(), "recorded entry");
        Ok(ClockOut { entry, day_hours })
    }
}
