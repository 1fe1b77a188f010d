//! Plain-text log format.
//!
//! A log file is a sequence of day blocks, most recent first:
//!
//! ```text
//! Mon 01/06/2025
//! 09:00 - 12:00) design
//! 13:00 - 14:30) review
//! Total: 4.5 hours
//! Total Week Hours: 4.5 hours
//!
//!
//! ```
//!
//! Discrete logs leave the finish time blank (`09:00 - ) buy milk`) and never
//! carry `Total` lines. Only the first `)` on an entry line ends the time
//! portion, so notes may contain parentheses.

use std::fmt::Write;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use regex::Regex;
use thiserror::Error;

use crate::model::{Day, Entry, format_hours, round_hours};
use crate::types::Mode;

/// Pre-compiled regex for `HH:MM` clock times.
static CLOCK_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap());

const DATE_FORMAT: &str = "%m/%d/%Y";
const TIME_FORMAT: &str = "%H:%M";

/// Lines starting with this prefix close a day block.
const TOTAL_PREFIX: &str = "Total";

/// A line of the log file that does not fit the grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// What was wrong with a rejected line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected a `<weekday> <MM/DD/YYYY>` date header, found {text:?}")]
    InvalidHeader { text: String },

    #[error("entry has no `)` before its note: {text:?}")]
    MissingNoteDelimiter { text: String },

    #[error("entry has no `-` between its times: {text:?}")]
    MissingTimeSeparator { text: String },

    #[error("invalid clock time {text:?} (expected HH:MM)")]
    InvalidTime { text: String },

    #[error("interval entry has no finish time: {text:?}")]
    MissingFinish { text: String },
}

/// Weekday labels as written in day headers.
const fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tues",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thurs",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Parses log text into days, in file order.
///
/// Blocks without entries are dropped. Days are not re-sorted: the file is
/// trusted to list the most recent day first.
pub fn parse_log(text: &str, mode: Mode) -> Result<Vec<Day>, ParseError> {
    let mut days = Vec::new();
    let mut block: Option<(NaiveDate, Vec<Entry>)> = None;

    // A trailing blank line closes the final block.
    for (index, raw) in text.lines().chain(std::iter::once("")).enumerate() {
        let line = raw.trim();

        if line.is_empty() || line.starts_with(TOTAL_PREFIX) {
            if let Some((date, entries)) = block.take() {
                if entries.is_empty() {
                    tracing::debug!(%date, "dropping day block without entries");
                } else {
                    days.push(Day::with_entries(date, entries));
                }
            }
            continue;
        }

        let located = |kind| ParseError {
            line: index + 1,
            kind,
        };
        match &mut block {
            None => block = Some((parse_header(line).map_err(located)?, Vec::new())),
            Some((date, entries)) => entries.push(parse_entry(line, *date, mode).map_err(located)?),
        }
    }

    Ok(days)
}

fn parse_header(line: &str) -> Result<NaiveDate, ParseErrorKind> {
    let invalid = || ParseErrorKind::InvalidHeader {
        text: line.to_string(),
    };

    let mut tokens = line.split_whitespace();
    let (Some(weekday), Some(date), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(invalid());
    };
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;

    if weekday != weekday_label(date.weekday()) {
        tracing::warn!(%date, weekday, "day header weekday does not match its date");
    }

    Ok(date)
}

fn parse_entry(line: &str, date: NaiveDate, mode: Mode) -> Result<Entry, ParseErrorKind> {
    let Some((times, note)) = line.split_once(')') else {
        return Err(ParseErrorKind::MissingNoteDelimiter {
            text: line.to_string(),
        });
    };
    let Some((start, finish)) = times.split_once('-') else {
        return Err(ParseErrorKind::MissingTimeSeparator {
            text: line.to_string(),
        });
    };

    let start = date.and_time(parse_clock_time(start.trim())?);
    let finish = match mode {
        Mode::Discrete => start,
        Mode::Interval => {
            let finish = finish.trim();
            if finish.is_empty() {
                return Err(ParseErrorKind::MissingFinish {
                    text: line.to_string(),
                });
            }
            date.and_time(parse_clock_time(finish)?)
        }
    };

    Ok(Entry::interval(start, finish, note.trim()))
}

fn parse_clock_time(text: &str) -> Result<NaiveTime, ParseErrorKind> {
    let invalid = || ParseErrorKind::InvalidTime {
        text: text.to_string(),
    };
    let caps = CLOCK_TIME_RE.captures(text).ok_or_else(invalid)?;
    let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
    let minute: u32 = caps[2].parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Renders days as log text.
///
/// Interval logs get a `Total` line per day and a `Total Week Hours` line
/// after each Monday, covering the days written since the previous one.
pub fn render_log(days: &[Day], mode: Mode) -> String {
    let mut output = String::new();
    let mut week = 0.0;

    for day in days.iter().filter(|day| !day.is_empty()) {
        let date = day.date();
        writeln!(
            output,
            "{} {}",
            weekday_label(date.weekday()),
            date.format(DATE_FORMAT)
        )
        .unwrap();

        for entry in day.entries() {
            let start = entry.start().format(TIME_FORMAT);
            if mode.tracks_totals() {
                let finish = entry.finish().format(TIME_FORMAT);
                writeln!(output, "{start} - {finish}) {}", entry.note()).unwrap();
            } else {
                writeln!(output, "{start} - ) {}", entry.note()).unwrap();
            }
        }

        if mode.tracks_totals() {
            let total = round_hours(day.total_hours());
            writeln!(output, "Total: {} hours", format_hours(total)).unwrap();

            week += total;
            if date.weekday() == Weekday::Mon {
                writeln!(output, "Total Week Hours: {} hours", format_hours(week)).unwrap();
                week = 0.0;
            }
        }

        output.push_str("\n\n");
    }

    output
}
