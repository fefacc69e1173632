// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod debounce;
pub mod guard;
pub mod queue;

use crate::output::{self, OutputFormat, Report};
use anyhow::{Context, Result};
use tokio::sync::mpsc;

/// Print reports as callers resolve, until every reporter is done
pub async fn print_reports(
    mut rx: mpsc::UnboundedReceiver<Report>,
    format: OutputFormat,
) -> Result<()> {
    while let Some(report) = rx.recv().await {
        output::print(&report, format)
            .with_context(|| format!("printing report for {}", report.caller))?;
    }
    Ok(())
}
