//! `build-dataset`: raw CSV export to compressed JSON dataset.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use winedata_cli::{completion_message, run, Args, DEFAULT_LOG_FILTER};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the completion line.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    let config = args.to_config();

    let summary = run(&config, args.reference_date()).with_context(|| {
        format!(
            "failed to build {} from {}",
            config.io.output_path.display(),
            config.io.input_path.display()
        )
    })?;

    println!("{}", completion_message(&summary));
    Ok(())
}
