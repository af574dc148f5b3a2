//! Snapsort - file JPEG photos into month-named folders by EXIF date

use anyhow::Result;
use clap::Parser;
use snapsort::{Cli, dispatch};
use tracing::{Level, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "Snapsort starting");

    let config = cli.to_config();

    match dispatch::run(&config) {
        Ok(report) => {
            // Per-file failures do not change the exit status; they are
            // reported newline-joined on stderr.
            if report.has_errors() {
                eprintln!("{}", report.joined_errors());
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Run aborted");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Console logging on stderr; DEBUG with --verbose, JSON with --json-log.
fn setup_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if cli.json_log {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
