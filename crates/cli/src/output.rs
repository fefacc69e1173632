// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How one simulated caller was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The operation ran and succeeded
    Completed,
    /// The operation ran and failed
    Failed,
    /// Never ran, queue aborted first
    Aborted,
    /// Skipped by a busy drop-mode guard
    Dropped,
    /// Replaced by a newer call
    Superseded,
    /// Discarded by a debounce cancel
    Cancelled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Completed => "completed",
            Outcome::Failed => "failed",
            Outcome::Aborted => "aborted",
            Outcome::Dropped => "dropped",
            Outcome::Superseded => "superseded",
            Outcome::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// One line of command output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub caller: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Report {
    pub fn new(caller: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            caller: caller.into(),
            outcome,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Report for a failed operation
    pub fn failed(caller: impl Into<String>, error: &dyn std::error::Error) -> Self {
        Self::new(caller, Outcome::Failed).with_detail(error.to_string())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.caller, self.outcome)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

/// Print one report, as a line of text or a line of JSON
pub fn print<T>(value: &T, format: OutputFormat) -> serde_json::Result<()>
where
    T: Serialize + fmt::Display,
{
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
