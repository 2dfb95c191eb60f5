//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Work-hours reporter.
///
/// Parses time markers out of free-text task descriptions and turns them
/// into a local markdown report or a published issue-comment summary.
#[derive(Debug, Parser)]
#[command(name = "hours", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a local markdown report from a task file.
    Report {
        /// Path to a text file with task descriptions and time markers.
        #[arg(default_value = "tasks.txt")]
        task_file: PathBuf,

        /// Directory name for the generated report.
        #[arg(long, default_value = "Report")]
        report_dir: PathBuf,
    },

    /// Total a date range and post the summary to a GitHub issue.
    Range {
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,

        /// End date (YYYY-MM-DD), inclusive.
        #[arg(long)]
        end: NaiveDate,

        /// Issue number to post the summary to.
        #[arg(long)]
        issue: u64,

        /// Optional tasks file with ISO-dated lines for exact totals.
        #[arg(long)]
        tasks_file: Option<PathBuf>,

        /// Count all calendar days instead of workdays.
        #[arg(long)]
        calendar: bool,

        /// Target repository as owner/repo (defaults to GITHUB_REPOSITORY).
        #[arg(long)]
        repo: Option<String>,
    },
}
