//! Maintenance commands: purge and refresh.

use std::io::Write;

use anyhow::{Context, Result};
use wl_core::LogName;

use crate::LogRegistry;

/// Removes completed entries (notes ending in `X`) from a log.
pub fn purge<W: Write>(writer: &mut W, registry: &LogRegistry, name: &LogName) -> Result<()> {
    let mut engine = registry.open(name)?;
    let removed = engine
        .purge_completed()
        .with_context(|| format!("failed to purge '{name}'"))?;

    match removed {
        0 => writeln!(writer, "No completed entries in '{name}'.")?,
        1 => writeln!(writer, "Removed 1 completed entry from '{name}'.")?,
        n => writeln!(writer, "Removed {n} completed entries from '{name}'.")?,
    }
    Ok(())
}

/// Rewrites a log file from its parsed contents.
pub fn refresh<W: Write>(writer: &mut W, registry: &LogRegistry, name: &LogName) -> Result<()> {
    let mut engine = registry.open(name)?;
    engine
        .refresh()
        .with_context(|| format!("failed to refresh '{name}'"))?;

    let days = engine.count();
    let unit = if days == 1 { "day" } else { "days" };
    writeln!(writer, "Refreshed '{name}': {days} {unit}.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_support::test_config;

    #[test]
    fn purge_reports_removed_entries() {
        let dir = tempfile::tempdir().unwrap();
        let registry = LogRegistry::from_config(&test_config(dir.path()));
        let name = registry.resolve(Some("todo")).unwrap();
        let path = dir.path().join("logs/todo.txt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "Tues 01/07/2025\n08:00 - ) call bank X\n\n\nMon 01/06/2025\n09:00 - ) write docs\n10:00 - ) ship it X\n\n\n",
        )
        .unwrap();

        let mut output = Vec::new();
        purge(&mut output, &registry, &name).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Removed 2 completed entries from 'todo'.\n"
        );
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Mon 01/06/2025\n09:00 - ) write docs\n\n\n"
        );
    }

    #[test]
    fn purge_on_clean_log() {
        let dir = tempfile::tempdir().unwrap();
        let registry = LogRegistry::from_config(&test_config(dir.path()));
        let name = registry.resolve(Some("todo")).unwrap();

        let mut output = Vec::new();
        purge(&mut output, &registry, &name).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No completed entries in 'todo'.\n"
        );
    }

    #[test]
    fn refresh_rewrites_hand_edited_log() {
        let dir = tempfile::tempdir().unwrap();
        let registry = LogRegistry::from_config(&test_config(dir.path()));
        let name = registry.resolve(Some("work")).unwrap();
        let path = dir.path().join("logs/work.txt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "  Tues 01/07/2025\n 09:00 - 09:45)   standup  \n").unwrap();

        let mut output = Vec::new();
        refresh(&mut output, &registry, &name).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "Refreshed 'work': 1 day.\n");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Tues 01/07/2025\n09:00 - 09:45) standup\nTotal: 0.75 hours\n\n\n"
        );
    }

    #[test]
    fn refresh_reports_malformed_log() {
        let dir = tempfile::tempdir().unwrap();
        let registry = LogRegistry::from_config(&test_config(dir.path()));
        let name = registry.resolve(Some("work")).unwrap();
        let path = dir.path().join("logs/work.txt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "Tues 01/07/2025\n09:00 - 9:xx) standup\n").unwrap();

        let mut output = Vec::new();
        let err = refresh(&mut output, &registry, &name).unwrap_err();
        assert_eq!(format!("{err:#}"), format!(
            "failed to open log 'work': malformed log file {}: line 2: invalid clock time \"9:xx\" (expected HH:MM)",
            path.display()
        ));
    }
}
