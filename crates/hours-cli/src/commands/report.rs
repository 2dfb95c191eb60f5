//! Report command: render task hours into a markdown report file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use hours_core::{load_tasks, total_hours, write_report};

/// Runs the report command.
///
/// A missing task file behaves as an empty task list; any other
/// filesystem error is fatal.
pub fn run<W: Write>(writer: &mut W, task_file: &Path, report_dir: &Path) -> Result<()> {
    let text = match fs::read_to_string(task_file) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %task_file.display(), "task file missing; using empty list");
            String::new()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", task_file.display()));
        }
    };

    let tasks = load_tasks(text.lines());
    let report_path = write_report(report_dir, &tasks)
        .with_context(|| format!("failed to write report under {}", report_dir.display()))?;

    writeln!(writer, "Report saved to: {}", report_path.display())?;
    writeln!(writer, "Total hours: {:.2}", total_hours(&tasks))?;
    Ok(())
}
