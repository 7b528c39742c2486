//! Moeda command-line front end.
//!
//! Formats, parses, and masks Brazilian-locale currency amounts.

mod commands;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moeda_shared::{AppConfig, AppError, AppResult};

use crate::commands::Command;

/// Brazilian-locale currency codec
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = load_config().unwrap_or_else(|err| fail(&err));

    // Initialize tracing on stderr so stdout carries only results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(
            config
                .log
                .json
                .then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
        .with(
            (!config.log.json)
                .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        )
        .init();

    info!(show_symbol = config.format.show_symbol, "configuration loaded");

    match cli.command.run(&config.format) {
        Ok(output) => println!("{output}"),
        Err(err) => fail(&err),
    }
}

fn load_config() -> AppResult<AppConfig> {
    AppConfig::load().map_err(AppError::from)
}

/// Line written to stderr when a command fails.
fn failure_line(err: &AppError) -> String {
    format!("error [{}]: {err}", err.error_code())
}

/// Reports the error once and exits with its status.
fn fail(err: &AppError) -> ! {
    eprintln!("{}", failure_line(err));
    std::process::exit(err.exit_code())
}
