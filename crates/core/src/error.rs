// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the coordination primitives

use std::path::PathBuf;
use thiserror::Error;

/// Failure delivered to a queued caller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError<E> {
    /// The entry never ran because the queue was aborted first
    #[error("queue aborted")]
    Aborted,
    /// The operation itself failed
    #[error(transparent)]
    Operation(E),
}

impl<E> QueueError<E> {
    pub fn is_aborted(&self) -> bool {
        matches!(self, QueueError::Aborted)
    }

    /// The operation's own failure, if that is what this is
    pub fn into_operation(self) -> Option<E> {
        match self {
            QueueError::Aborted => None,
            QueueError::Operation(e) => Some(e),
        }
    }
}

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
