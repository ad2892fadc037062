// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Event dispatch with per-handler failure isolation

use crate::error::ValidationError;
use crate::event::Event;
use crate::id::SubscriptionId;
use crate::instance::InstanceRegistry;
use crate::registry::EventRegistry;
use crate::subscription::Scope;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// One handler's failure during a dispatch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandlerFailure {
    pub subscription: SubscriptionId,
    pub pattern: String,
    pub message: String,
}

/// Outcome of a single publish
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub handlers_invoked: usize,
    pub handlers_failed: usize,
    pub failures: Vec<HandlerFailure>,
}

/// Routes a published event to every matching subscription.
///
/// Handlers run inline on the publishing call stack, in registration order
/// with exact-literal patterns ahead of wildcard patterns. Candidate lists
/// are copied out of the registry before any handler runs, so a handler may
/// itself register, unregister, publish, or submit without deadlock.
pub struct Dispatcher {
    registry: EventRegistry,
    instances: InstanceRegistry,
}

impl Dispatcher {
    pub fn new(registry: EventRegistry, instances: InstanceRegistry) -> Self {
        Self {
            registry,
            instances,
        }
    }

    /// Publish an event to all matching subscriptions.
    ///
    /// A handler failure (error return or panic) is recorded in the report
    /// and never prevents later handlers from running, nor propagates to
    /// the publisher. Returns once every matching handler has been invoked.
    pub fn publish(&self, event: Event) -> Result<DispatchReport, ValidationError> {
        if event.name.is_empty() {
            return Err(ValidationError::EmptyEventName);
        }

        let candidates = self.registry.find_matching(&event.name);
        let mut report = DispatchReport::default();

        for subscription in candidates {
            // Revocation races: the subscription may have been unregistered
            // or its owner disposed after the candidate list was copied out
            if !subscription.is_active() {
                continue;
            }
            if let Scope::InstanceOwned(owner) = subscription.scope {
                if !self.instances.is_alive(owner) {
                    continue;
                }
            }

            report.handlers_invoked += 1;
            let outcome = catch_unwind(AssertUnwindSafe(|| (subscription.callback)(&event)));
            let failure = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(err.to_string()),
                Err(panic) => Some(panic_message(panic)),
            };

            if let Some(message) = failure {
                tracing::warn!(
                    event = %event.name,
                    subscription = %subscription.id,
                    error = %message,
                    "handler failed"
                );
                report.handlers_failed += 1;
                report.failures.push(HandlerFailure {
                    subscription: subscription.id,
                    pattern: subscription.pattern.as_str().to_string(),
                    message,
                });
            }
        }

        tracing::debug!(
            event = %event.name,
            invoked = report.handlers_invoked,
            failed = report.handlers_failed,
            "dispatched"
        );
        Ok(report)
    }

    pub fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    pub fn instances(&self) -> &InstanceRegistry {
        &self.instances
    }
}

impl Clone for Dispatcher {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            instances: self.instances.clone(),
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
