// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pacer guard` - issue overlapping calls through an exclusion guard

use crate::output::{Outcome, OutputFormat, Report};
use crate::simulate;
use anyhow::Result;
use clap::Args;
use pacer_core::{ExclusionGuard, GuardConfig, GuardMode, GuardOutcome};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Args)]
pub struct GuardArgs {
    /// Argument of each call, in order
    #[arg(required = true)]
    pub labels: Vec<String>,

    /// Policy for calls arriving while busy: drop, queue or latest
    /// (overrides the config file)
    #[arg(long)]
    pub mode: Option<GuardMode>,

    /// Time between consecutive calls
    #[arg(long, default_value = "10ms", value_parser = humantime::parse_duration)]
    pub gap: Duration,

    /// How long each execution takes
    #[arg(long, default_value = "100ms", value_parser = humantime::parse_duration)]
    pub work: Duration,

    /// Make calls with this label fail
    #[arg(long = "fail", value_name = "LABEL")]
    pub fail: Vec<String>,
}

pub async fn guard(args: GuardArgs, config: &GuardConfig, format: OutputFormat) -> Result<()> {
    let config = args.mode.map(GuardConfig::new).unwrap_or_else(|| config.clone());
    let work = args.work;
    let failing = args.fail.clone();
    let guard = ExclusionGuard::from_config(
        move |label: String| {
            let fail = failing.contains(&label);
            simulate::work(label, work, fail)
        },
        &config,
    );
    tracing::debug!(mode = %guard.mode(), calls = args.labels.len(), "issuing calls");

    let (tx, rx) = mpsc::unbounded_channel();
    for (index, label) in args.labels.iter().enumerate() {
        if index > 0 && !args.gap.is_zero() {
            tokio::time::sleep(args.gap).await;
        }
        let guard = guard.clone();
        let label = label.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let report = match guard.call(label.clone()).await {
                Ok(GuardOutcome::Completed(_)) => Report::new(label, Outcome::Completed),
                Ok(GuardOutcome::Dropped) => Report::new(label, Outcome::Dropped),
                Ok(GuardOutcome::Superseded) => Report::new(label, Outcome::Superseded),
                Err(e) => Report::failed(label, &e),
            };
            let _ = tx.send(report);
        });
        // Let the call reach the guard before the next one is issued
        tokio::task::yield_now().await;
    }
    drop(tx);

    super::print_reports(rx, format).await
}
