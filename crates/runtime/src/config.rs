// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Runtime configuration

use serde::Deserialize;
use std::time::Duration;

/// Configuration for the runtime's execution scheduler
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Size of the cognitive worker pool
    pub workers: usize,
    /// Applied when a submission carries no explicit timeout.
    ///
    /// Humantime strings in TOML, e.g. `default_timeout = "30s"`.
    #[serde(with = "humantime_serde")]
    pub default_timeout: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            default_timeout: None,
        }
    }
}

impl RuntimeConfig {
    /// Parse from a TOML document; absent keys fall back to defaults
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
