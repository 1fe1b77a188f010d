//! Daily and weekly hour totals.

use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::model::{Day, format_hours, round_hours};

/// Hour targets the summary counts down towards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Targets {
    /// Default: 8 hours.
    pub daily_hours: f64,
    /// Default: 40 hours.
    pub weekly_hours: f64,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            daily_hours: 8.0,
            weekly_hours: 40.0,
        }
    }
}

/// Hours worked so far against the daily and weekly targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElapsedReport {
    /// Whether a clock-in is pending.
    pub clocked_in: bool,
    /// Hours since the pending clock-in, zero when none.
    pub elapsed_hours: f64,
    pub today_hours: f64,
    pub today_remaining: f64,
    pub week_hours: f64,
    pub week_remaining: f64,
}

/// Projects today's and this week's hours.
///
/// `days` must already include the day a pending clock-in belongs to at
/// index 0. The week runs back from day 0 through every day in the same ISO
/// week, stopping at the first day that is not.
pub fn elapsed_report(days: &[Day], elapsed_hours: Option<f64>, targets: Targets) -> ElapsedReport {
    let elapsed = elapsed_hours.unwrap_or(0.0);

    let Some((today, earlier)) = days.split_first() else {
        let today_hours = round_hours(elapsed);
        return report(elapsed_hours.is_some(), elapsed, today_hours, today_hours, targets);
    };

    let today_hours = round_hours(today.total_hours() + elapsed);
    let week = today.date().iso_week();
    let earlier_hours: f64 = earlier
        .iter()
        .take_while(|day| day.date().iso_week() == week)
        .map(|day| round_hours(day.total_hours()))
        .sum();

    report(
        elapsed_hours.is_some(),
        elapsed,
        today_hours,
        round_hours(earlier_hours + today_hours),
        targets,
    )
}

fn report(
    clocked_in: bool,
    elapsed_hours: f64,
    today_hours: f64,
    week_hours: f64,
    targets: Targets,
) -> ElapsedReport {
    ElapsedReport {
        clocked_in,
        elapsed_hours: round_hours(elapsed_hours),
        today_hours,
        today_remaining: round_hours(targets.daily_hours - today_hours),
        week_hours,
        week_remaining: round_hours(targets.weekly_hours - week_hours),
    }
}

impl fmt::Display for ElapsedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.clocked_in {
            writeln!(f, "Not clocked in.")?;
        }
        writeln!(f, "{} hours so far...", format_hours(self.today_hours))?;
        writeln!(f, "{} hours left today.", format_hours(self.today_remaining))?;
        write!(f, "{} hours left this week.", format_hours(self.week_remaining))
    }
}
