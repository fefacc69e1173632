// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration for the coordination primitives
//!
//! ```toml
//! [debounce]
//! delay = "250ms"
//!
//! [guard]
//! mode = "latest"
//! ```

use crate::error::ConfigError;
use crate::guard::GuardMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default debounce window
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacerConfig {
    pub debounce: DebounceConfig,
    pub guard: GuardConfig,
}

impl PacerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebounceConfig {
    /// Quiet period a call must survive before it executes
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
}

impl DebounceConfig {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DEBOUNCE_DELAY,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    pub mode: GuardMode,
}

impl GuardConfig {
    pub fn new(mode: GuardMode) -> Self {
        Self { mode }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
