// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trailing-edge debounced caller
//!
//! Each `call` records its arguments as the pending invocation and restarts
//! the delay timer. When the timer fires the most recent arguments execute.
//! Executions never overlap: arguments whose timer fires while a previous
//! execution is still running wait for it to finish, then run straight away.

use crate::config::DebounceConfig;
use crate::operation::Handler;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// How a debounced call was resolved, when its execution did not fail
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DebounceOutcome<T> {
    /// This call's arguments were the ones executed
    Completed(T),
    /// A later call replaced this call's arguments
    Superseded,
    /// `cancel()` discarded this call's arguments
    Cancelled,
}

impl<T> DebounceOutcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            DebounceOutcome::Completed(value) => Some(value),
            DebounceOutcome::Superseded | DebounceOutcome::Cancelled => None,
        }
    }
}

type Reply<T, E> = oneshot::Sender<Result<DebounceOutcome<T>, E>>;

struct PendingCall<A, T, E> {
    args: A,
    reply: Reply<T, E>,
}

struct Timer {
    generation: u64,
    handle: JoinHandle<()>,
}

struct DebounceState<A, T, E> {
    pending: Option<PendingCall<A, T, E>>,
    /// At most one live timer; only the one matching `generation` may fire
    timer: Option<Timer>,
    generation: u64,
    executing: bool,
}

struct DebounceInner<A, H: Handler<A>>
where
    A: Send + 'static,
{
    handler: H,
    delay: Duration,
    state: Mutex<DebounceState<A, H::Output, H::Error>>,
}

/// A handler whose calls are coalesced over a quiet period
pub struct DebouncedCaller<A, H>
where
    A: Send + 'static,
    H: Handler<A>,
{
    inner: Arc<DebounceInner<A, H>>,
}

impl<A, H> Clone for DebouncedCaller<A, H>
where
    A: Send + 'static,
    H: Handler<A>,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, H> DebouncedCaller<A, H>
where
    A: Send + 'static,
    H: Handler<A>,
{
    pub fn new(handler: H, delay: Duration) -> Self {
        Self {
            inner: Arc::new(DebounceInner {
                handler,
                delay,
                state: Mutex::new(DebounceState {
                    pending: None,
                    timer: None,
                    generation: 0,
                    executing: false,
                }),
            }),
        }
    }

    pub fn from_config(handler: H, config: &DebounceConfig) -> Self {
        Self::new(handler, config.delay)
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// Record `args` as the pending invocation and restart the timer
    ///
    /// A call already pending resolves to [`DebounceOutcome::Superseded`].
    /// The returned ticket may be dropped; the invocation still happens.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call(&self, args: A) -> DebounceTicket<H::Output, H::Error> {
        let (reply, rx) = oneshot::channel();
        let mut state = self.inner.lock();
        if let Some(previous) = state.pending.replace(PendingCall { args, reply }) {
            let _ = previous.reply.send(Ok(DebounceOutcome::Superseded));
        }
        DebounceInner::arm(&self.inner, &mut state);
        DebounceTicket { rx }
    }

    /// Drop the pending timer and arguments without executing
    ///
    /// An execution already under way is not affected. Returns whether
    /// anything was discarded.
    pub fn cancel(&self) -> bool {
        let mut state = self.inner.lock();
        let had_timer = match state.timer.take() {
            Some(timer) => {
                timer.handle.abort();
                true
            }
            None => false,
        };
        let discarded = state.pending.take();
        let had_args = discarded.is_some();
        drop(state);

        if let Some(call) = discarded {
            let _ = call.reply.send(Ok(DebounceOutcome::Cancelled));
        }
        if had_timer || had_args {
            tracing::debug!("debounce cancelled");
        }
        had_timer || had_args
    }

    /// Execute the pending invocation now instead of waiting for the timer
    ///
    /// Does nothing when no timer is pending. If an execution is under way
    /// the flushed arguments run as soon as it finishes. Returns whether a
    /// pending timer was flushed.
    pub fn flush(&self) -> bool {
        let mut state = self.inner.lock();
        let Some(timer) = state.timer.take() else {
            return false;
        };
        timer.handle.abort();
        tracing::debug!(generation = timer.generation, "debounce flushed");
        if let Some(call) = DebounceInner::<A, H>::take_runnable(&mut state) {
            drop(state);
            tokio::spawn(DebounceInner::execute(Arc::clone(&self.inner), call));
        }
        true
    }

    /// True while a timer is armed or arguments are waiting to run
    pub fn is_pending(&self) -> bool {
        let state = self.inner.lock();
        state.timer.is_some() || state.pending.is_some()
    }

    pub fn is_executing(&self) -> bool {
        self.inner.lock().executing
    }
}

impl<A, H> DebounceInner<A, H>
where
    A: Send + 'static,
    H: Handler<A>,
{
    fn lock(&self) -> MutexGuard<'_, DebounceState<A, H::Output, H::Error>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace any live timer with a fresh one
    fn arm(this: &Arc<Self>, state: &mut DebounceState<A, H::Output, H::Error>) {
        if let Some(stale) = state.timer.take() {
            stale.handle.abort();
        }
        state.generation += 1;
        let generation = state.generation;
        let inner = Arc::clone(this);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(inner.delay).await;
            Self::fire(inner, generation).await;
        });
        state.timer = Some(Timer { generation, handle });
        tracing::trace!(generation, delay = ?this.delay, "debounce armed");
    }

    async fn fire(this: Arc<Self>, generation: u64) {
        let call = {
            let mut state = this.lock();
            // A stale timer that raced its own abort is a no-op
            if state.timer.as_ref().map(|t| t.generation) != Some(generation) {
                return;
            }
            state.timer = None;
            tracing::debug!(generation, executing = state.executing, "debounce fired");
            Self::take_runnable(&mut state)
        };
        if let Some(call) = call {
            Self::execute(this, call).await;
        }
    }

    /// Claim the pending call unless an execution is under way
    fn take_runnable(
        state: &mut DebounceState<A, H::Output, H::Error>,
    ) -> Option<PendingCall<A, H::Output, H::Error>> {
        if state.executing {
            return None;
        }
        let call = state.pending.take()?;
        state.executing = true;
        Some(call)
    }

    /// Run `call`, then any arguments whose timer fired in the meantime
    ///
    /// Each invocation runs in its own task so that a panicking handler
    /// cannot leave `executing` set.
    async fn execute(this: Arc<Self>, mut call: PendingCall<A, H::Output, H::Error>) {
        loop {
            let PendingCall { args, reply } = call;
            let inner = Arc::clone(&this);
            match tokio::spawn(async move { inner.handler.invoke(args).await }).await {
                Ok(result) => {
                    let _ = reply.send(result.map(DebounceOutcome::Completed));
                }
                // Dropping the reply resolves the ticket as cancelled
                Err(err) => tracing::warn!(error = %err, "debounced handler panicked"),
            }

            let mut state = this.lock();
            let next = if state.timer.is_none() {
                state.pending.take()
            } else {
                None
            };
            match next {
                Some(waiting) => call = waiting,
                None => {
                    state.executing = false;
                    return;
                }
            }
        }
    }
}

/// Handle resolving with a debounced call's outcome
pub struct DebounceTicket<T, E> {
    rx: oneshot::Receiver<Result<DebounceOutcome<T>, E>>,
}

impl<T, E> Future for DebounceTicket<T, E> {
    type Output = Result<DebounceOutcome<T>, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // The call never produced a result: its handler panicked, or
            // the runtime shut down before the timer fired
            Poll::Ready(Err(_)) => Poll::Ready(Ok(DebounceOutcome::Cancelled)),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod tests;
