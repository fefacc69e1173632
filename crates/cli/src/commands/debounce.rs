// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pacer debounce` - issue a burst of calls through a debounced caller

use crate::output::{Outcome, OutputFormat, Report};
use crate::simulate;
use anyhow::Result;
use clap::Args;
use pacer_core::{DebounceConfig, DebounceOutcome, DebouncedCaller};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Args)]
pub struct DebounceArgs {
    /// Argument of each call, in order
    #[arg(required = true)]
    pub labels: Vec<String>,

    /// Time between consecutive calls
    #[arg(long, default_value = "0ms", value_parser = humantime::parse_duration)]
    pub gap: Duration,

    /// Debounce window (overrides the config file)
    #[arg(long, value_parser = humantime::parse_duration)]
    pub delay: Option<Duration>,

    /// How long each execution takes
    #[arg(long, default_value = "10ms", value_parser = humantime::parse_duration)]
    pub work: Duration,

    /// Flush right after the last call
    #[arg(long)]
    pub flush: bool,

    /// Cancel right after the last call
    #[arg(long, conflicts_with = "flush")]
    pub cancel: bool,
}

pub async fn debounce(
    args: DebounceArgs,
    config: &DebounceConfig,
    format: OutputFormat,
) -> Result<()> {
    let config = args.delay.map(DebounceConfig::new).unwrap_or_else(|| config.clone());
    let work = args.work;
    let caller: DebouncedCaller<String, _> = DebouncedCaller::from_config(
        move |label: String| simulate::work(label, work, false),
        &config,
    );
    let (tx, rx) = mpsc::unbounded_channel();

    for (index, label) in args.labels.iter().enumerate() {
        if index > 0 && !args.gap.is_zero() {
            tokio::time::sleep(args.gap).await;
        }
        let ticket = caller.call(label.clone());
        let label = label.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let report = match ticket.await {
                Ok(DebounceOutcome::Completed(_)) => Report::new(label, Outcome::Completed),
                Ok(DebounceOutcome::Superseded) => Report::new(label, Outcome::Superseded),
                Ok(DebounceOutcome::Cancelled) => Report::new(label, Outcome::Cancelled),
                Err(e) => Report::failed(label, &e),
            };
            let _ = tx.send(report);
        });
    }
    drop(tx);

    if args.flush {
        let flushed = caller.flush();
        tracing::debug!(flushed, "flush requested");
    } else if args.cancel {
        let cancelled = caller.cancel();
        tracing::debug!(cancelled, "cancel requested");
    }

    tracing::debug!(
        delay = ?config.delay,
        calls = args.labels.len(),
        "calls issued"
    );
    super::print_reports(rx, format).await
}
