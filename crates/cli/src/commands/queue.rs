// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pacer queue` - run simulated operations through a sequential queue

use crate::output::{Outcome, OutputFormat, Report};
use crate::simulate;
use anyhow::Result;
use clap::Args;
use pacer_core::{QueueError, SequentialQueue};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Args)]
pub struct QueueArgs {
    /// Duration of each operation, in submission order (e.g. 30ms 10ms)
    #[arg(required = true, value_parser = humantime::parse_duration)]
    pub durations: Vec<Duration>,

    /// Make the operation at this index fail
    #[arg(long = "fail", value_name = "INDEX")]
    pub fail: Vec<usize>,

    /// Abort the queue this long after submitting
    #[arg(long, value_parser = humantime::parse_duration)]
    pub abort_after: Option<Duration>,
}

pub async fn queue(args: QueueArgs, format: OutputFormat) -> Result<()> {
    let queue = SequentialQueue::new();
    let (tx, rx) = mpsc::unbounded_channel();

    for (index, duration) in args.durations.iter().copied().enumerate() {
        let caller = format!("op-{index}");
        let fail = args.fail.contains(&index);
        let label = caller.clone();
        let ticket = queue.enqueue(move || simulate::work(label, duration, fail));

        let tx = tx.clone();
        tokio::spawn(async move {
            let report = match ticket.await {
                Ok(_) => Report::new(caller, Outcome::Completed)
                    .with_detail(humantime::format_duration(duration).to_string()),
                Err(QueueError::Aborted) => Report::new(caller, Outcome::Aborted),
                Err(QueueError::Operation(e)) => Report::failed(caller, &e),
            };
            let _ = tx.send(report);
        });
    }
    drop(tx);
    tracing::debug!(submitted = args.durations.len(), "operations queued");

    if let Some(after) = args.abort_after {
        tokio::time::sleep(after).await;
        let failed = queue.abort();
        tracing::info!(failed, "queue aborted by request");
    }

    super::print_reports(rx, format).await
}
