// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Concurrent subscription registry with bucketed candidate lookup

use crate::error::ValidationError;
use crate::id::SubscriptionId;
use crate::pattern::EventPattern;
use crate::subscription::{Handler, Scope, Subscription};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Index key grouping patterns so a lookup only scans plausible candidates.
///
/// Patterns with the same segment count and the same first literal segment
/// land in one bucket; patterns whose first segment is a wildcard share the
/// `first_literal: None` bucket for their length; bare "any" has its own.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum BucketKey {
    MatchAll,
    Segments {
        count: usize,
        first_literal: Option<String>,
    },
}

impl BucketKey {
    fn for_pattern(pattern: &EventPattern) -> Self {
        if pattern.is_match_all() {
            BucketKey::MatchAll
        } else {
            BucketKey::Segments {
                count: pattern.segment_count(),
                first_literal: pattern.first_literal().map(str::to_string),
            }
        }
    }
}

/// Stores subscriptions, indexed for fast candidate lookup.
///
/// Buckets live in a sharded concurrent map, so register/unregister/lookup
/// on unrelated patterns never contend on a single lock. `find_matching`
/// copies candidates out before returning; no registry lock is ever held
/// while a handler body runs.
pub struct EventRegistry {
    buckets: Arc<DashMap<BucketKey, Vec<Arc<Subscription>>>>,
    ids: Arc<DashMap<SubscriptionId, BucketKey>>,
    next_order: Arc<AtomicU64>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            buckets: Arc::new(DashMap::new()),
            ids: Arc::new(DashMap::new()),
            next_order: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Register a callback under a pattern.
    ///
    /// Fails on a malformed pattern; the subscription is live as soon as
    /// this returns.
    pub fn register(
        &self,
        pattern: &str,
        scope: Scope,
        callback: Handler,
    ) -> Result<SubscriptionId, ValidationError> {
        let pattern = EventPattern::parse(pattern)?;
        let id = SubscriptionId::next();
        let order = self.next_order.fetch_add(1, Ordering::SeqCst);
        let key = BucketKey::for_pattern(&pattern);

        tracing::debug!(subscription = %id, pattern = %pattern, "register");

        let subscription = Arc::new(Subscription::new(id, pattern, scope, callback, order));
        self.ids.insert(id, key.clone());
        self.buckets.entry(key).or_default().push(subscription);
        Ok(id)
    }

    /// Remove a subscription. Returns false (no-op) on an unknown id.
    pub fn unregister(&self, id: SubscriptionId) -> bool {
        let Some((_, key)) = self.ids.remove(&id) else {
            return false;
        };

        let removed = match self.buckets.get_mut(&key) {
            Some(mut bucket) => match bucket.iter().position(|s| s.id == id) {
                Some(index) => {
                    let subscription = bucket.remove(index);
                    subscription.deactivate();
                    true
                }
                None => false,
            },
            None => false,
        };

        if removed {
            tracing::debug!(subscription = %id, "unregister");
        }
        removed
    }

    /// Find active subscriptions matching an event name, ordered with
    /// exact-literal patterns ahead of wildcard patterns and registration
    /// order within each group.
    pub fn find_matching(&self, event_name: &str) -> Vec<Arc<Subscription>> {
        let segments: Vec<&str> = event_name.split('.').collect();
        let first = segments.first().copied().unwrap_or_default();

        let candidate_keys = [
            BucketKey::Segments {
                count: segments.len(),
                first_literal: Some(first.to_string()),
            },
            BucketKey::Segments {
                count: segments.len(),
                first_literal: None,
            },
            BucketKey::MatchAll,
        ];

        let mut matching = Vec::new();
        for key in candidate_keys {
            if let Some(bucket) = self.buckets.get(&key) {
                matching.extend(
                    bucket
                        .iter()
                        .filter(|s| s.is_active() && s.pattern.matches(event_name))
                        .cloned(),
                );
            }
        }

        matching.sort_by_key(|s| (s.pattern.has_wildcard(), s.order));
        matching
    }

    /// Count of live subscriptions
    pub fn subscription_count(&self) -> usize {
        self.ids.len()
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventRegistry {
    fn clone(&self) -> Self {
        Self {
            buckets: Arc::clone(&self.buckets),
            ids: Arc::clone(&self.ids),
            next_order: Arc::clone(&self.next_order),
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
