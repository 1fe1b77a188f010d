//! Clock commands: in, out, fix and event.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use wl_core::LogName;
use wl_engine::NoteSource;

use crate::LogRegistry;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which clock operation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAction {
    In,
    Out,
    Fix,
    Event,
}

/// Runs a clock operation on a log at `now` and saves its clock-in state.
///
/// `notes` is asked for a note when `note` is missing or blank.
pub fn run<W: Write>(
    writer: &mut W,
    registry: &LogRegistry,
    name: &LogName,
    action: ClockAction,
    note: Option<&str>,
    notes: impl NoteSource + 'static,
    now: NaiveDateTime,
) -> Result<()> {
    let mut engine = registry.open(name)?.with_note_source(notes);

    match action {
        ClockAction::In => {
            let pending = engine.cursor().start;
            let ack = engine.clock_in_at(now);
            writeln!(writer, "{ack}")?;
            if let Some(pending) = pending {
                writeln!(
                    writer,
                    "Replaced pending clock-in from {}; run `wl fix` to undo.",
                    pending.format(TIMESTAMP_FORMAT)
                )?;
            }
        }
        ClockAction::Out => {
            let ack = engine
                .clock_out_at(note, now)
                .with_context(|| format!("failed to clock out of '{name}'"))?;
            writeln!(writer, "{ack}")?;
        }
        ClockAction::Fix => {
            let ack = engine
                .correction_at(note, now)
                .with_context(|| format!("failed to correct clock-in on '{name}'"))?;
            writeln!(writer, "{ack}")?;
        }
        ClockAction::Event => {
            let ack = engine
                .single_event_at(note, now)
                .with_context(|| format!("failed to record event on '{name}'"))?;
            writeln!(
                writer,
                "event recorded at {}",
                ack.entry.start().format(TIMESTAMP_FORMAT)
            )?;
        }
    }

    registry.save(name, &engine)?;
    Ok(())
}
