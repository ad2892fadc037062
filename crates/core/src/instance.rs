// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Instance lifecycle tracking and bulk subscription revocation

use crate::id::{InstanceId, SubscriptionId};
use dashmap::DashMap;
use std::sync::Arc;

/// Opaque handle for a live object instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceHandle {
    id: InstanceId,
}

impl InstanceHandle {
    pub fn id(&self) -> InstanceId {
        self.id
    }
}

/// Tracks object-instance lifecycles and the subscriptions each one owns.
///
/// Disposal removes the instance entry in a single sharded-map operation:
/// a concurrent publish sees the instance either fully alive or fully gone,
/// never a partially-revoked subscription set.
pub struct InstanceRegistry {
    instances: Arc<DashMap<InstanceId, Vec<SubscriptionId>>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self {
            instances: Arc::new(DashMap::new()),
        }
    }

    pub fn create_instance(&self) -> InstanceHandle {
        let id = InstanceId::next();
        self.instances.insert(id, Vec::new());
        tracing::debug!(instance = %id, "instance created");
        InstanceHandle { id }
    }

    pub fn is_alive(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    /// Record that a subscription belongs to this instance.
    ///
    /// Returns false if the instance was already disposed; the caller should
    /// unregister the subscription instead of leaking it.
    pub fn bind_subscription(&self, handle: &InstanceHandle, subscription: SubscriptionId) -> bool {
        match self.instances.get_mut(&handle.id) {
            Some(mut subscriptions) => {
                subscriptions.push(subscription);
                true
            }
            None => false,
        }
    }

    /// Dispose an instance, revoking its whole subscription set atomically.
    ///
    /// Returns the bound subscription ids so the caller can remove them from
    /// the event registry. Idempotent: disposing twice returns an empty set.
    pub fn dispose(&self, handle: &InstanceHandle) -> Vec<SubscriptionId> {
        match self.instances.remove(&handle.id) {
            Some((_, subscriptions)) => {
                tracing::debug!(
                    instance = %handle.id,
                    revoked = subscriptions.len(),
                    "instance disposed"
                );
                subscriptions
            }
            None => Vec::new(),
        }
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InstanceRegistry {
    fn clone(&self) -> Self {
        Self {
            instances: Arc::clone(&self.instances),
        }
    }
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
