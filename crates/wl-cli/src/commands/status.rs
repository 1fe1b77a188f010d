//! Status command: hours so far today and this week.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use wl_core::{ElapsedReport, LogName, Mode};

use crate::LogRegistry;

/// JSON form of the status report.
#[derive(Debug, Serialize)]
struct StatusJson<'a> {
    log: &'a str,
    mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    clocked_in_at: Option<NaiveDateTime>,
    #[serde(flatten)]
    report: &'a ElapsedReport,
}

/// Prints hours so far against the daily and weekly targets, as of `now`.
pub fn run<W: Write>(
    writer: &mut W,
    registry: &LogRegistry,
    name: &LogName,
    json: bool,
    now: NaiveDateTime,
) -> Result<()> {
    let engine = registry.open(name)?;
    let report = engine.query_elapsed_at(now);

    if json {
        let status = StatusJson {
            log: name.as_str(),
            mode: engine.mode(),
            clocked_in_at: engine.cursor().start,
            report: &report,
        };
        let json = serde_json::to_string_pretty(&status).context("failed to serialize status")?;
        writeln!(writer, "{json}")?;
        return Ok(());
    }

    if engine.mode() == Mode::Discrete {
        let today = engine.day(0).map_or(0, |day| day.entries().len());
        writeln!(writer, "{today} entries in the latest day of '{name}'.")?;
        return Ok(());
    }

    writeln!(writer, "{report}")?;
    Ok(())
}
