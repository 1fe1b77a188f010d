//! Logs command for listing configured logs.

use std::io::Write;

use anyhow::Result;

use crate::LogRegistry;

pub fn run<W: Write>(writer: &mut W, registry: &LogRegistry) -> Result<()> {
    let mut logs = registry.iter().peekable();
    if logs.peek().is_none() {
        writeln!(writer, "No logs configured.")?;
        return Ok(());
    }

    for (name, log) in logs {
        let marker = if name == registry.default_log() { "*" } else { " " };
        write!(writer, "{marker} {name} ({}) {}", log.mode, log.path.display())?;
        if let Some(start) = registry.cursors().load(name)?.start {
            write!(writer, " [clocked in since {}]", start.format("%Y-%m-%d %H:%M"))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use wl_core::Cursor;

    use crate::test_support::test_config;

    #[test]
    fn logs_lists_modes_paths_and_pending_clock_ins() {
        let dir = tempfile::tempdir().unwrap();
        let registry = LogRegistry::from_config(&test_config(dir.path()));
        let work = registry.resolve(Some("work")).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        registry
            .cursors()
            .save(
                &work,
                &Cursor {
                    start: Some(start),
                    previous: None,
                },
            )
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &registry).unwrap();

        let output = String::from_utf8(output).unwrap();
        let output = output.replace(&dir.path().display().to_string(), "[TEMP]");
        assert_eq!(
            output,
            "  todo (discrete) [TEMP]/logs/todo.txt\n\
             * work (interval) [TEMP]/logs/work.txt [clocked in since 2025-01-06 09:30]\n"
        );
    }
}
