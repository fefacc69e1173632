// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! pacer-core: coordination primitives for user-triggered background work
//!
//! This crate provides:
//! - **SequentialQueue** - runs operations one at a time in submission order
//! - **DebouncedCaller** - coalesces bursts of calls into one deferred execution
//! - **ExclusionGuard** - at most one execution at a time, with a policy for
//!   calls that arrive while busy
//!
//! The primitives are independent; calling code composes them.

pub mod config;
pub mod debounce;
pub mod error;
pub mod guard;
pub mod operation;
pub mod queue;

pub use config::{DebounceConfig, GuardConfig, PacerConfig};
pub use debounce::{DebounceOutcome, DebounceTicket, DebouncedCaller};
pub use error::{ConfigError, QueueError};
pub use guard::{ExclusionGuard, GuardMode, GuardOutcome, ParseModeError};
pub use operation::{Handler, Operation};
pub use queue::{QueueTicket, SequentialQueue};

use std::time::Duration;

/// Wrap `handler` in a debounced caller with the given quiet period
pub fn debounced<A, H>(handler: H, delay: Duration) -> DebouncedCaller<A, H>
where
    A: Send + 'static,
    H: Handler<A>,
{
    DebouncedCaller::new(handler, delay)
}

/// Wrap `handler` in an exclusion guard with the given mode
pub fn exclusive<H>(handler: H, mode: GuardMode) -> ExclusionGuard<H> {
    ExclusionGuard::new(handler, mode)
}
