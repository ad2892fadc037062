// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Cognitive operation kinds and per-operation state

use axon_core::{CorrelationId, InstanceId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// The closed set of cognitive operations the language surface exposes.
///
/// Handlers dispatch over this enum rather than open-ended reflection; each
/// kind owns a `<kind>.complete` / `<kind>.error` terminal event pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Think,
    Generate,
    Chat,
    Learn,
    Search,
    Execute,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Think => "think",
            OpKind::Generate => "generate",
            OpKind::Chat => "chat",
            OpKind::Learn => "learn",
            OpKind::Search => "search",
            OpKind::Execute => "execute",
        }
    }

    /// Event name published on success
    pub fn complete_event(&self) -> String {
        format!("{}.complete", self.as_str())
    }

    /// Event name published on failure or timeout
    pub fn error_event(&self) -> String {
        format!("{}.error", self.as_str())
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a submitted operation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpState {
    Submitted,
    Running,
    Completed,
    Failed,
}

/// A submitted operation awaiting its terminal event
#[derive(Clone, Debug)]
pub struct PendingOperation {
    pub correlation_id: CorrelationId,
    pub kind: OpKind,
    pub origin: Option<InstanceId>,
    pub state: OpState,
    pub submitted_at: Instant,
    pub timeout: Option<Duration>,
}

impl PendingOperation {
    pub fn new(
        correlation_id: CorrelationId,
        kind: OpKind,
        origin: Option<InstanceId>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            correlation_id,
            kind,
            origin,
            state: OpState::Submitted,
            submitted_at: Instant::now(),
            timeout,
        }
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
