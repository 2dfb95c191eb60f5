use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hours_cli::commands::{range, report};
use hours_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = io::stdout();
    match cli.command {
        Commands::Report {
            task_file,
            report_dir,
        } => {
            report::run(&mut stdout, &task_file, &report_dir)?;
        }
        Commands::Range {
            start,
            end,
            issue,
            tasks_file,
            calendar,
            repo,
        } => {
            let config = Config::load().context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let request = range::RangeRequest {
                start,
                end,
                issue,
                tasks_file,
                calendar,
                repo,
            };
            range::run(&mut stdout, &request, &config)?;
        }
    }

    Ok(())
}
