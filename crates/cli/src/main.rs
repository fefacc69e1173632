// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pacer - drive the coordination primitives with simulated work

mod commands;
mod output;
mod simulate;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use commands::{debounce, guard, queue};
use output::OutputFormat;
use pacer_core::PacerConfig;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pacer",
    version,
    about = "Pacer - sequential queue, debounce and exclusion guard playground"
)]
struct Cli {
    /// TOML config file with [debounce] and [guard] sections
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log coordination events to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run simulated operations one at a time, in submission order
    Queue(queue::QueueArgs),
    /// Coalesce a burst of calls into one execution
    Debounce(debounce::DebounceArgs),
    /// Issue overlapping calls through an exclusion guard
    Guard(guard::GuardArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => PacerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PacerConfig::default(),
    };
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Queue(args) => queue::queue(args, cli.format).await,
        Commands::Debounce(args) => debounce::debounce(args, &config.debounce, cli.format).await,
        Commands::Guard(args) => guard::guard(args, &config.guard, cli.format).await,
    }
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_filter = match verbose {
        0 => "warn",
        1 => "info,pacer_core=debug,pacer=debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .without_time(),
        )
        .init();
}
