#![forbid(unsafe_code)]

mod app;
mod catalog;
mod categories;
mod cli;
mod commands;
mod config;
mod constants;
mod error;
mod pack;
mod persistence;
mod render;
mod report;
mod transfer;
mod types;
mod units;
mod weights;

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{Level as TraceLevel, debug};
use tracing_subscriber::FmtSubscriber;

use app::NoticeLevel;
use cli::Cli;
use commands::Session;
use config::Settings;

fn init_logging(level: &str) -> Result<()> {
    let log_level = match level {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "info" => TraceLevel::INFO,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::WARN,
    };

    // stderr keeps command output clean for piping
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Interactive y/N confirmation; anything but y/yes declines
fn prompt(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Settings already carry the LOG_LEVEL override
    let (settings, warnings) = Settings::load()?;
    init_logging(&settings.log_level)?;
    for warning in &warnings {
        warning.log();
    }
    debug!(?settings, "Loaded settings");

    let mut session = Session::open(settings, cli.data_dir, cli.unit)?;
    debug!(path = %session.store.path().display(), "Using gear data");

    let outcome = commands::run(&mut session, cli.command, &mut prompt)?;

    if let Some(output) = outcome.output {
        println!("{output}");
    }
    match outcome.notice {
        Some(notice) if notice.level == NoticeLevel::Error => {
            eprintln!("{notice}");
            Ok(ExitCode::FAILURE)
        }
        Some(notice) => {
            println!("{notice}");
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
