// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Subscriptions binding a pattern to a handler

use crate::event::Event;
use crate::id::{InstanceId, SubscriptionId};
use crate::pattern::EventPattern;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Failure returned by a handler body; caught by the dispatcher and
/// recorded in the dispatch report, never rethrown to the publisher
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Handler callback invoked inline on the publishing call stack
pub type Handler = Arc<dyn Fn(&Event) -> Result<(), HandlerError> + Send + Sync>;

/// Ownership scope of a subscription.
///
/// Instance ownership controls disposal lifecycle only, never event-source
/// filtering: an instance-owned subscription matches events from every
/// publisher, exactly like a global one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Global,
    InstanceOwned(InstanceId),
}

/// A registered binding of a pattern to a callback
pub struct Subscription {
    pub id: SubscriptionId,
    pub pattern: EventPattern,
    pub scope: Scope,
    pub callback: Handler,
    /// Monotonic registration order within the owning registry
    pub order: u64,
    active: AtomicBool,
}

impl Subscription {
    pub fn new(
        id: SubscriptionId,
        pattern: EventPattern,
        scope: Scope,
        callback: Handler,
        order: u64,
    ) -> Self {
        Self {
            id,
            pattern,
            scope,
            callback,
            order,
            active: AtomicBool::new(true),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Mark the subscription revoked; candidate lists already copied out of
    /// the registry skip deactivated entries at invoke time
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("pattern", &self.pattern)
            .field("scope", &self.scope)
            .field("order", &self.order)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
#[path = "subscription_tests.rs"]
mod tests;
