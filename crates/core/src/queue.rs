// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential operation queue
//!
//! Operations run one at a time in submission order. A single drain task
//! is started lazily when work arrives on an idle queue and exits once
//! the queue is empty or aborted.
//!
//! Each entry carries the sending half of a oneshot channel. An entry that
//! is dropped without running (abort, reset) drops its sender, which is
//! what resolves the caller's ticket with [`QueueError::Aborted`].

use crate::error::QueueError;
use crate::operation::Operation;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::task::{Context, Poll};
use tokio::sync::oneshot;

type Job = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A submitted operation, type-erased
struct QueueEntry {
    seq: u64,
    job: Job,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<QueueEntry>,
    /// Single-flight latch for the drain task
    draining: bool,
    aborted: bool,
    next_seq: u64,
}

/// FIFO queue executing at most one operation at a time
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct SequentialQueue {
    state: Arc<Mutex<QueueState>>,
}

impl SequentialQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit an operation
    ///
    /// The operation is never run inline: it is appended to the queue and
    /// the returned ticket resolves with its outcome once it has run. On an
    /// aborted queue the ticket resolves immediately with
    /// [`QueueError::Aborted`]. Dropping the ticket does not withdraw the
    /// entry.
    ///
    /// Must be called from within a tokio runtime.
    pub fn enqueue<O: Operation>(&self, op: O) -> QueueTicket<O::Output, O::Error> {
        let (tx, rx) = oneshot::channel();
        let ticket = QueueTicket { rx };

        let mut state = self.lock();
        if state.aborted {
            tracing::debug!("enqueue rejected, queue aborted");
            return ticket;
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        let job: Job = Box::pin(async move {
            let result = op.run().await;
            // The caller may have dropped its ticket
            let _ = tx.send(result);
        });
        state.pending.push_back(QueueEntry { seq, job });
        tracing::trace!(seq, pending = state.pending.len(), "enqueued");

        if !state.draining {
            state.draining = true;
            tokio::spawn(drain(Arc::clone(&self.state)));
        }

        ticket
    }

    /// Fail every entry that has not started and refuse further work
    ///
    /// An entry already running is not interrupted; its caller still gets
    /// its real outcome. Returns the number of entries failed.
    pub fn abort(&self) -> usize {
        let dropped = {
            let mut state = self.lock();
            state.aborted = true;
            std::mem::take(&mut state.pending)
        };
        let count = dropped.len();
        tracing::debug!(failed = count, "queue aborted");
        // Senders drop here, outside the lock
        drop(dropped);
        count
    }

    /// Clear the aborted flag and any residual entries
    pub fn reset(&self) {
        let residual = {
            let mut state = self.lock();
            state.aborted = false;
            std::mem::take(&mut state.pending)
        };
        if !residual.is_empty() {
            tracing::debug!(discarded = residual.len(), "queue reset");
        }
    }

    /// True while any entry is queued or a drain is in progress
    pub fn has_pending(&self) -> bool {
        let state = self.lock();
        state.draining || !state.pending.is_empty()
    }

    /// Number of entries waiting to start
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_aborted(&self) -> bool {
        self.lock().aborted
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Drain loop: pop the head, run it to completion in its own task, repeat
async fn drain(state: Arc<Mutex<QueueState>>) {
    tracing::debug!("drain started");
    loop {
        let entry = {
            let mut guard = state.lock().unwrap_or_else(|e| e.into_inner());
            if guard.aborted {
                guard.pending.clear();
            }
            match guard.pending.pop_front() {
                Some(entry) => entry,
                None => {
                    guard.draining = false;
                    break;
                }
            }
        };
        tracing::trace!(seq = entry.seq, "running entry");
        // A panicking entry drops its sender, so its ticket resolves as
        // aborted and the drain moves on to the next entry
        if let Err(err) = tokio::spawn(entry.job).await {
            tracing::warn!(seq = entry.seq, error = %err, "queued operation panicked");
        }
    }
    tracing::debug!("drain finished");
}

/// Handle resolving with a queued operation's outcome
#[must_use = "the ticket is the only way to observe the outcome"]
pub struct QueueTicket<T, E> {
    rx: oneshot::Receiver<Result<T, E>>,
}

impl<T, E> Future for QueueTicket<T, E> {
    type Output = Result<T, QueueError<E>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result.map_err(QueueError::Operation)),
            Poll::Ready(Err(_)) => Poll::Ready(Err(QueueError::Aborted)),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
