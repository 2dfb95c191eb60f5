//! Range command: aggregate a date range and publish the summary comment.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use hours_core::{DailyHours, DateRange, RangeMode, aggregate_range, parse_daily_hours};
use hours_github::{Client, PublishOutcome, RepoId, build_comment};

use crate::Config;

/// Inputs for the range command, straight from the CLI.
#[derive(Debug, Clone)]
pub struct RangeRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub issue: u64,
    pub tasks_file: Option<PathBuf>,
    pub calendar: bool,
    pub repo: Option<String>,
}

/// Runs the range command.
///
/// Configuration is validated before any computation; the first failure
/// aborts the invocation with no partial output.
pub fn run<W: Write>(writer: &mut W, request: &RangeRequest, config: &Config) -> Result<()> {
    let token = config
        .github_token
        .as_deref()
        .context("GITHUB_TOKEN environment variable is required")?;
    let repo = request
        .repo
        .as_deref()
        .or(config.github_repository.as_deref())
        .context("repository (owner/repo) must be given via --repo or GITHUB_REPOSITORY")?;
    let repo: RepoId = repo.parse()?;

    let range = DateRange::new(request.start, request.end)?;
    let mode = if request.calendar {
        RangeMode::Calendar
    } else {
        RangeMode::Workdays
    };

    let per_day = match &request.tasks_file {
        Some(path) => load_daily_hours(path)?,
        None => DailyHours::new(),
    };

    let summary = aggregate_range(range, mode, &per_day);
    tracing::debug!(
        day_count = summary.day_count,
        total = ?summary.total,
        "aggregated range"
    );

    let body = build_comment(&summary);
    let client = Client::new(token)?;
    match client.publish_comment(&repo, request.issue, &body)? {
        PublishOutcome::Created { id } => writeln!(writer, "Posted new comment id={id}")?,
        PublishOutcome::Updated { id } => writeln!(writer, "Updated comment id={id}")?,
    }
    Ok(())
}

/// Reads the tasks file into per-day totals. A missing file is an empty
/// table, so the aggregation falls back to the estimate.
fn load_daily_hours(path: &Path) -> Result<DailyHours> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(parse_daily_hours(&text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "tasks file missing; using empty table");
            Ok(DailyHours::new())
        }
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}
