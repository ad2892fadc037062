//! Subscription and instance lifecycle

use crate::prelude::*;
use axon_core::Payload;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn unregister_takes_effect_before_it_returns() {
    let runtime = runtime();
    let count = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&count);
    let id = runtime
        .register("tick", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
    assert!(runtime.unregister(id));

    runtime.publish("tick", Payload::new()).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 0);

    // Unknown ids are a no-op
    assert!(!runtime.unregister(id));
}

#[tokio::test]
async fn disposing_one_instance_leaves_identical_subscriptions_alive() {
    let runtime = runtime();

    let a = runtime.create_instance();
    let b = runtime.create_instance();

    let count_a = Arc::new(AtomicUsize::new(0));
    let count_b = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&count_a);
    runtime
        .register_owned(&a, "agent.wake", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
    let counter = Arc::clone(&count_b);
    runtime
        .register_owned(&b, "agent.wake", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

    // Before disposal both instances hear the event
    runtime.publish("agent.wake", Payload::new()).unwrap();
    assert_eq!(count_a.load(Ordering::SeqCst), 1);
    assert_eq!(count_b.load(Ordering::SeqCst), 1);

    assert_eq!(runtime.dispose_instance(&a), 1);

    runtime.publish("agent.wake", Payload::new()).unwrap();
    assert_eq!(count_a.load(Ordering::SeqCst), 1);
    assert_eq!(count_b.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn instance_ownership_does_not_filter_event_sources() {
    // Ownership is a disposal lifecycle, not a per-origin filter: an
    // instance-owned handler hears events emitted by anyone
    let runtime = runtime();
    let count = Arc::new(AtomicUsize::new(0));

    let owner = runtime.create_instance();
    let counter = Arc::clone(&count);
    runtime
        .register_owned(&owner, "broadcast", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

    // Emitted with no sender at all
    runtime.publish("broadcast", Payload::new()).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
