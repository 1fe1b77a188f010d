//! Entries, days and the clock-in cursor.
//!
//! A log is an ordered sequence of [`Day`]s, most recent first. Each day holds
//! its [`Entry`]s in the order they were recorded. Both are values: changing a
//! day produces a new day rather than editing one in place.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Local hour at which a clock-in on a new calendar date starts a new day.
///
/// Work continuing past midnight belongs to the previous day until then.
pub const DAY_ROLLOVER_HOUR: u32 = 4;

/// Marker at the end of a note that flags the entry as completed.
pub const COMPLETED_MARKER: char = 'X';

/// One recorded event.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    start: NaiveDateTime,
    finish: NaiveDateTime,
    duration: f64,
    note: String,
}

impl Entry {
    /// Creates an entry spanning `start` to `finish`.
    ///
    /// Both times are truncated to the minute, the precision the log file
    /// keeps. A finish clock-time earlier than the start is taken to have
    /// crossed midnight and gains 24 hours.
    pub fn interval(start: NaiveDateTime, finish: NaiveDateTime, note: impl Into<String>) -> Self {
        let start = to_minute(start);
        let finish = to_minute(finish);
        Self {
            start,
            finish,
            duration: hours_between(start, finish),
            note: note.into(),
        }
    }

    /// Creates a zero-length entry at a single timepoint.
    pub fn point(at: NaiveDateTime, note: impl Into<String>) -> Self {
        Self::interval(at, at, note)
    }

    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub const fn finish(&self) -> NaiveDateTime {
        self.finish
    }

    /// Duration in hours, never negative.
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Whether the note is checked off and eligible for purging.
    pub fn is_completed(&self) -> bool {
        self.note.ends_with(COMPLETED_MARKER)
    }
}

/// One calendar day's entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    date: NaiveDate,
    entries: Vec<Entry>,
}

impl Day {
    /// Opens an empty day.
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: Vec::new(),
        }
    }

    pub const fn with_entries(date: NaiveDate, entries: Vec<Entry>) -> Self {
        Self { date, entries }
    }

    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns this day with `entry` appended.
    #[must_use]
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Returns this day without its completed entries, and how many were dropped.
    #[must_use]
    pub fn without_completed(self) -> (Self, usize) {
        let before = self.entries.len();
        let entries: Vec<Entry> = self
            .entries
            .into_iter()
            .filter(|entry| !entry.is_completed())
            .collect();
        let removed = before - entries.len();
        (Self::with_entries(self.date, entries), removed)
    }

    /// Unrounded sum of entry durations in hours.
    pub fn total_hours(&self) -> f64 {
        self.entries.iter().map(Entry::duration).sum()
    }
}

/// Pending clock-in state for one log.
///
/// `previous` keeps the clock-in before the latest one so that a mistaken
/// second clock-in can be undone once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<NaiveDateTime>,
}

impl Cursor {
    /// Records a clock-in, shifting the current start into `previous`.
    pub fn clock_in(&mut self, now: NaiveDateTime) {
        self.previous = self.start;
        self.start = Some(now);
    }

    /// Consumes the pending clock-in.
    pub fn take_start(&mut self) -> Option<NaiveDateTime> {
        self.start.take()
    }

    /// Replaces the pending clock-in with the one before it.
    ///
    /// Only one level is kept: `previous` is consumed, so rewinding twice in a
    /// row leaves no pending clock-in.
    pub fn rewind(&mut self) {
        self.start = self.previous.take();
    }

    pub const fn is_open(&self) -> bool {
        self.start.is_some()
    }
}

/// Whether a clock-in at `at` opens a new day in front of `days`.
///
/// True when there are no days yet, or when `at` falls on a different date
/// than the most recent day and at or after [`DAY_ROLLOVER_HOUR`].
pub fn opens_new_day(days: &[Day], at: NaiveDateTime) -> bool {
    days.first()
        .is_none_or(|today| at.date() != today.date() && at.hour() >= DAY_ROLLOVER_HOUR)
}

fn to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|at| at.with_nanosecond(0))
        .unwrap_or(at)
}

/// Hours from `start` to `finish`, wrapping negative spans by one day.
#[allow(clippy::cast_precision_loss)]
fn hours_between(start: NaiveDateTime, finish: NaiveDateTime) -> f64 {
    let hours = (finish - start).num_seconds() as f64 / 3600.0;
    if hours < 0.0 { hours + 24.0 } else { hours }
}

/// Rounds hours to two decimal places.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Formats hours as the shortest decimal of their 2-place rounding.
///
/// Whole numbers keep one fractional digit: `3.0`, `1.5`, `8.33`.
pub fn format_hours(hours: f64) -> String {
    let rounded = round_hours(hours);
    // -0.0 prints with a sign
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        format!("{rounded}")
    }
}
