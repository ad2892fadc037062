//! Wildcard dispatch and handler isolation

use crate::prelude::*;
use axon_core::{HandlerError, Payload};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn two_agents_on_one_wildcard_both_receive_the_event() {
    let runtime = runtime();

    // Agents A and B both watch user.any.action in global scope
    let agent_a = capture(&runtime, "user.any.action");
    let agent_b = capture(&runtime, "user.any.action");

    runtime
        .publish(
            "user.emergency.action",
            Payload::new().with("action", "shutdown"),
        )
        .unwrap();

    let agent_a = agent_a.lock().unwrap();
    let agent_b = agent_b.lock().unwrap();
    assert_eq!(agent_a.len(), 1);
    assert_eq!(agent_b.len(), 1);
    assert_eq!(agent_a[0].payload, agent_b[0].payload);
    assert_eq!(agent_a[0].payload.get("action"), Some(&json!("shutdown")));
}

#[tokio::test]
async fn bare_any_observes_every_event() {
    let runtime = runtime();
    let all = capture(&runtime, "any");

    for name in [
        "user.login",
        "system.boot",
        "agent.signal.ready",
        "tick",
        "learn.complete",
    ] {
        runtime.publish(name, Payload::new()).unwrap();
    }

    assert_eq!(all.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn specific_listeners_observe_before_broad_ones() {
    let runtime = runtime();
    let order = Arc::new(Mutex::new(Vec::new()));

    let seen = Arc::clone(&order);
    runtime
        .register("any", move |_| {
            seen.lock().unwrap().push("broad");
            Ok(())
        })
        .unwrap();
    let seen = Arc::clone(&order);
    runtime
        .register("user.login", move |_| {
            seen.lock().unwrap().push("specific");
            Ok(())
        })
        .unwrap();

    runtime.publish("user.login", Payload::new()).unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["specific", "broad"]);
}

#[tokio::test]
async fn one_misbehaving_handler_degrades_gracefully() {
    let runtime = runtime();
    let count = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&count);
    runtime
        .register("alert", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
    runtime
        .register("alert", |_| Err(HandlerError::new("agent offline")))
        .unwrap();
    let counter = Arc::clone(&count);
    runtime
        .register("alert", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();

    // The emitter is never faulted; the report carries the one failure
    let report = runtime.publish("alert", Payload::new()).unwrap();

    assert_eq!(report.handlers_invoked, 3);
    assert_eq!(report.handlers_failed, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}
