// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation seams consumed by the coordination primitives
//!
//! - [`Operation`] is a one-shot unit of work, run at most once.
//! - [`Handler`] is a reusable operation that takes arguments per call.
//!
//! Closures returning futures implement both traits, so callers rarely
//! need to implement them by hand.

use async_trait::async_trait;
use std::future::Future;

/// A one-shot unit of work producing a value or a failure
#[async_trait]
pub trait Operation: Send + 'static {
    type Output: Send + 'static;
    type Error: Send + 'static;

    /// Run the operation to completion
    async fn run(self) -> Result<Self::Output, Self::Error>;
}

#[async_trait]
impl<F, Fut, T, E> Operation for F
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Error = E;

    async fn run(self) -> Result<T, E> {
        (self)().await
    }
}

/// A reusable operation invoked once per call with that call's arguments
///
/// Multiple arguments are passed as a tuple.
#[async_trait]
pub trait Handler<A: Send + 'static>: Send + Sync + 'static {
    type Output: Send + 'static;
    type Error: Send + 'static;

    async fn invoke(&self, args: A) -> Result<Self::Output, Self::Error>;
}

#[async_trait]
impl<F, Fut, A, T, E> Handler<A> for F
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    A: Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;
    type Error = E;

    async fn invoke(&self, args: A) -> Result<T, E> {
        (self)(args).await
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
