//! Fixed-format markdown report rendering and writing.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::task::{TaskHours, total_hours};

/// File name of the report written into the report directory.
pub const REPORT_FILE_NAME: &str = "summary.md";

/// Renders the report body: a fixed header, one line per task in input
/// order, a placeholder when there are no tasks, and a two-decimal total.
#[must_use]
pub fn render_report(tasks: &[TaskHours]) -> String {
    let mut output = String::new();
    output.push_str("# Work Report\n\n");
    output.push_str("## Task Summary\n\n");

    if tasks.is_empty() {
        output.push_str("- No tasks provided.\n");
    } else {
        for task in tasks {
            writeln!(output, "- {} → {:.2} hours", task.description, task.hours).unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "**Total Hours:** {:.2}", total_hours(tasks)).unwrap();
    output
}

/// Writes the rendered report into `report_dir`, creating the directory
/// recursively if needed and overwriting any previous report.
///
/// Returns the path of the written file.
pub fn write_report(report_dir: &Path, tasks: &[TaskHours]) -> io::Result<PathBuf> {
    fs::create_dir_all(report_dir)?;
    let report_path = report_dir.join(REPORT_FILE_NAME);
    fs::write(&report_path, render_report(tasks))?;
    tracing::debug!(path = %report_path.display(), tasks = tasks.len(), "report written");
    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn task(description: &str, hours: f64) -> TaskHours {
        TaskHours {
            description: description.to_string(),
            hours,
        }
    }

    #[test]
    fn render_report_lists_tasks_in_input_order() {
        let tasks = vec![
            task("Fix login flow 2.5h", 2.5),
            task("Review auth PR 90 min", 1.5),
        ];
        assert_snapshot!(render_report(&tasks), @r"
        # Work Report

        ## Task Summary

        - Fix login flow 2.5h → 2.50 hours
        - Review auth PR 90 min → 1.50 hours

        **Total Hours:** 4.00
        ");
    }

    #[test]
    fn render_report_for_empty_task_list() {
        assert_snapshot!(render_report(&[]), @r"
        # Work Report

        ## Task Summary

        - No tasks provided.

        **Total Hours:** 0.00
        ");
    }

    #[test]
    fn render_report_total_matches_task_sum() {
        let tasks = vec![task("a", 1.25), task("b", 0.25), task("c", 0.0)];
        assert!(render_report(&tasks).contains("**Total Hours:** 1.50"));
    }

    #[test]
    fn write_report_creates_directory_and_returns_path() {
        let temp = tempfile::tempdir().unwrap();
        let report_dir = temp.path().join("nested").join("Report");

        let path = write_report(&report_dir, &[task("Deploy 1h", 1.0)]).unwrap();
        assert_eq!(path, report_dir.join(REPORT_FILE_NAME));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("- Deploy 1h → 1.00 hours"));
        assert!(content.contains("**Total Hours:** 1.00"));
    }

    #[test]
    fn write_report_overwrites_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let report_dir = temp.path().to_path_buf();

        write_report(&report_dir, &[task("old entry 4h", 4.0)]).unwrap();
        let path = write_report(&report_dir, &[task("new entry 1h", 1.0)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("old entry"));
        assert!(content.contains("- new entry 1h → 1.00 hours"));
    }
}
