// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exclusion guard
//!
//! Wraps a [`Handler`] so that at most one call executes at a time. What
//! happens to a call that arrives while another is executing depends on
//! the guard's [`GuardMode`]:
//!
//! - **drop** - the call resolves to [`GuardOutcome::Dropped`] at once
//! - **queue** - the call waits for the guard to free up, in arrival order
//! - **latest** - the call takes the single waiting slot; a caller it
//!   displaces resolves to [`GuardOutcome::Superseded`]
//!
//! The in-flight flag is a single semaphore permit owned by an
//! execution token. Dropping the token releases the permit or, in latest
//! mode, hands it straight to the waiting caller.

use crate::config::GuardConfig;
use crate::operation::Handler;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;
use tokio::sync::{oneshot, OwnedSemaphorePermit, Semaphore};

/// Policy for calls arriving while the guard is busy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardMode {
    /// Ignore the overlapping call
    #[default]
    Drop,
    /// Run every overlapping call once the guard frees up
    Queue,
    /// Keep only the newest overlapping call
    Latest,
}

impl fmt::Display for GuardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GuardMode::Drop => "drop",
            GuardMode::Queue => "queue",
            GuardMode::Latest => "latest",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown guard mode: {0} (expected drop, queue or latest)")]
pub struct ParseModeError(String);

impl FromStr for GuardMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(GuardMode::Drop),
            "queue" => Ok(GuardMode::Queue),
            "latest" => Ok(GuardMode::Latest),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// How a guarded call was resolved, when the handler did not fail
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome<T> {
    /// The handler ran for this call
    Completed(T),
    /// Skipped because another call was executing (drop mode)
    Dropped,
    /// Replaced by a newer waiting call before it started (latest mode)
    Superseded,
}

impl<T> GuardOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, GuardOutcome::Completed(_))
    }

    pub fn completed(self) -> Option<T> {
        match self {
            GuardOutcome::Completed(value) => Some(value),
            GuardOutcome::Dropped | GuardOutcome::Superseded => None,
        }
    }
}

enum Handoff {
    Run(OwnedSemaphorePermit),
    Superseded,
}

enum Admission {
    Run(OwnedSemaphorePermit),
    Dropped,
    Superseded,
}

struct GuardInner<H> {
    handler: H,
    mode: GuardMode,
    running: Arc<Semaphore>,
    /// Latest-mode waiting slot; only ever non-empty while a call runs
    waiter: Mutex<Option<oneshot::Sender<Handoff>>>,
}

/// A handler wrapped so that calls never overlap
pub struct ExclusionGuard<H> {
    inner: Arc<GuardInner<H>>,
}

impl<H> Clone for ExclusionGuard<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H> ExclusionGuard<H> {
    pub fn new(handler: H, mode: GuardMode) -> Self {
        Self {
            inner: Arc::new(GuardInner {
                handler,
                mode,
                running: Arc::new(Semaphore::new(1)),
                waiter: Mutex::new(None),
            }),
        }
    }

    pub fn from_config(handler: H, config: &GuardConfig) -> Self {
        Self::new(handler, config.mode)
    }

    pub fn mode(&self) -> GuardMode {
        self.inner.mode
    }

    /// True while a call is executing
    pub fn is_busy(&self) -> bool {
        self.inner.running.available_permits() == 0
    }

    /// Call the wrapped handler, subject to the guard's mode
    ///
    /// A handler failure is returned as-is to this caller and leaves the
    /// guard usable.
    pub async fn call<A>(
        &self,
        args: A,
    ) -> Result<GuardOutcome<<H as Handler<A>>::Output>, <H as Handler<A>>::Error>
    where
        A: Send + 'static,
        H: Handler<A>,
    {
        let permit = match self.admit().await {
            Admission::Run(permit) => permit,
            Admission::Dropped => {
                tracing::debug!(mode = %self.inner.mode, "call dropped, guard busy");
                return Ok(GuardOutcome::Dropped);
            }
            Admission::Superseded => return Ok(GuardOutcome::Superseded),
        };

        let _token = ExecutionToken {
            permit: Some(permit),
            waiter: &self.inner.waiter,
        };
        let value = self.inner.handler.invoke(args).await?;
        Ok(GuardOutcome::Completed(value))
    }

    async fn admit(&self) -> Admission {
        let running = Arc::clone(&self.inner.running);
        match self.inner.mode {
            GuardMode::Drop => match running.try_acquire_owned() {
                Ok(permit) => Admission::Run(permit),
                Err(_) => Admission::Dropped,
            },
            GuardMode::Queue => match running.acquire_owned().await {
                Ok(permit) => Admission::Run(permit),
                // The semaphore is never closed
                Err(_) => Admission::Dropped,
            },
            GuardMode::Latest => {
                let rx = {
                    // Hold the slot lock across the permit check so a
                    // finishing call cannot release between the two
                    let mut waiter = self.inner.lock_waiter();
                    if let Ok(permit) = running.try_acquire_owned() {
                        return Admission::Run(permit);
                    }
                    let (tx, rx) = oneshot::channel();
                    if let Some(previous) = waiter.replace(tx) {
                        let _ = previous.send(Handoff::Superseded);
                        tracing::debug!("waiting call superseded");
                    }
                    rx
                };
                match rx.await {
                    Ok(Handoff::Run(permit)) => Admission::Run(permit),
                    Ok(Handoff::Superseded) | Err(_) => Admission::Superseded,
                }
            }
        }
    }
}

impl<H> GuardInner<H> {
    fn lock_waiter(&self) -> MutexGuard<'_, Option<oneshot::Sender<Handoff>>> {
        self.waiter.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Marks a call as in flight; released on drop even if the call's future
/// is dropped before the handler finishes
struct ExecutionToken<'a> {
    permit: Option<OwnedSemaphorePermit>,
    waiter: &'a Mutex<Option<oneshot::Sender<Handoff>>>,
}

impl Drop for ExecutionToken<'_> {
    fn drop(&mut self) {
        let Some(permit) = self.permit.take() else {
            return;
        };
        let mut waiter = self.waiter.lock().unwrap_or_else(|e| e.into_inner());
        match waiter.take() {
            Some(next) => {
                tracing::trace!("handing guard to waiting call");
                // A waiter that went away returns the permit, which is then
                // released here under the lock
                let _ = next.send(Handoff::Run(permit));
            }
            None => drop(permit),
        }
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
