//! Task records and per-day hour accumulation.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::duration::parse_hours;

/// Pre-compiled regex for ISO calendar dates (YYYY-MM-DD) inside a line.
static ISO_DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// A task description paired with the hours parsed out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskHours {
    /// The trimmed original line.
    pub description: String,
    /// Summed hours for the line; 0.0 when no duration token was found.
    pub hours: f64,
}

/// Accumulated hours per calendar date.
///
/// Entries are always positive: lines that sum to zero are not inserted.
pub type DailyHours = BTreeMap<NaiveDate, f64>;

/// Builds task records from raw lines, skipping blank ones.
///
/// Lines without duration tokens are kept with 0.0 hours so the report
/// still lists them.
pub fn load_tasks<'a, I>(lines: I) -> Vec<TaskHours>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .filter_map(|raw| {
            let line = raw.trim();
            if line.is_empty() {
                return None;
            }
            Some(TaskHours {
                description: line.to_string(),
                hours: parse_hours(line),
            })
        })
        .collect()
}

/// Sum of hours across tasks.
#[must_use]
pub fn total_hours(tasks: &[TaskHours]) -> f64 {
    tasks.iter().map(|task| task.hours).sum()
}

/// Accumulates per-day hours from lines that carry an ISO date.
///
/// Lines without a recognizable date are skipped even when they contain
/// duration tokens; multiple lines for the same date add up.
#[must_use]
pub fn parse_daily_hours(text: &str) -> DailyHours {
    let mut per_day = DailyHours::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(found) = ISO_DATE_RE.find(line) else {
            continue;
        };
        let Ok(day) = NaiveDate::parse_from_str(found.as_str(), "%Y-%m-%d") else {
            // Date-shaped but not a real calendar date (e.g. 2026-13-40).
            tracing::debug!(line, "skipping line with invalid calendar date");
            continue;
        };
        let hours = parse_hours(line);
        if hours > 0.0 {
            *per_day.entry(day).or_insert(0.0) += hours;
        }
    }
    per_day
}
