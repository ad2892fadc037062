// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Event type published through the dispatcher

use crate::id::{CorrelationId, InstanceId};
use crate::payload::Payload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, timestamped, payload-bearing message.
///
/// Events are created at publish time and discarded after dispatch; this
/// core does not persist them. The optional `sender` is the identity of the
/// publishing instance, never an ownership claim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Dot-segmented event name, e.g. "user.emergency.action"
    pub name: String,
    pub payload: Payload,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: Option<CorrelationId>,
    pub sender: Option<InstanceId>,
}

impl Event {
    pub fn new(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            payload,
            timestamp: Utc::now(),
            correlation_id: None,
            sender: None,
        }
    }

    pub fn with_correlation(mut self, id: CorrelationId) -> Self {
        self.correlation_id = Some(id);
        self
    }

    pub fn with_sender(mut self, id: InstanceId) -> Self {
        self.sender = Some(id);
        self
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
