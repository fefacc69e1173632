// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulated operations standing in for real background work

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("simulated failure in {0}")]
pub struct SimulatedFailure(pub String);

/// Sleep for `duration`, then succeed with `label` or fail
pub async fn work(label: String, duration: Duration, fail: bool) -> Result<String, SimulatedFailure> {
    tracing::trace!(label = %label, ?duration, "simulated work");
    tokio::time::sleep(duration).await;
    if fail {
        return Err(SimulatedFailure(label));
    }
    Ok(label)
}
