//! Core domain logic for the work log.
//!
//! This crate contains the fundamental types and logic for:
//! - Model: entries, days and the clock-in cursor
//! - Format: parsing and rendering the plain-text log file
//! - Summary: daily and weekly hour totals against targets

pub mod format;
pub mod model;
pub mod summary;
pub mod types;

pub use format::{ParseError, ParseErrorKind, parse_log, render_log};
pub use model::{Cursor, Day, Entry, format_hours, opens_new_day, round_hours};
pub use summary::{ElapsedReport, Targets, elapsed_report};
pub use types::{LogName, Mode, ValidationError};
