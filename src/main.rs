use anyhow::{Context, Result};
use capture_intervals::{config, extractor, WriteMode};
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "capture-intervals",
    version,
    about = "Reconstructs the time between trap captures from a node's photo log"
)]
struct Cli {
    /// Path to a TOML or JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Capture log to read (default: log_banda.txt)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Report file to write (default: output.txt)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Append to the report or replace it
    #[arg(long, value_enum)]
    write_mode: Option<WriteMode>,

    /// Log every skipped Photo line at debug level
    #[arg(long)]
    log_skipped: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn resolve_config(cli: Cli) -> Result<config::Config> {
    let mut config = config::load_config(cli.config.as_deref())?;

    if let Some(log) = cli.log {
        config.extractor.log_path = log;
    }
    if let Some(output) = cli.output {
        config.extractor.output_path = output;
    }
    if let Some(mode) = cli.write_mode {
        config.extractor.write_mode = mode;
    }
    if cli.log_skipped {
        config.extractor.log_skipped = true;
    }
    if let Some(level) = cli.log_level {
        config.logging.log_level = level;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run_app() -> Result<()> {
    let config = resolve_config(Cli::parse())?;

    // Initialize logging, RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.log_level.as_str()),
    )
    .init();
    info!("Starting capture interval extraction");

    let stdout = std::io::stdout();
    let mut console = stdout.lock();
    let summary = extractor::run(&config.extractor, &mut console)?;

    info!(
        "Done: {} event(s), {} row(s) written",
        summary.events, summary.rows_written
    );
    Ok(())
}

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Application error: {:#}", e);
        std::process::exit(1);
    }
}
