//! Fire-and-forget cognitive operations

use crate::prelude::*;
use axon_core::Payload;
use axon_runtime::{FakeExecutor, OpKind};
use serde_json::json;
use std::time::{Duration, Instant};

#[tokio::test]
async fn learn_completes_with_the_submissions_correlation_id() {
    // A memory-learn backend that takes 50ms must surface learn.complete
    // within 200ms, correlated to the submit call
    let executor = FakeExecutor::new()
        .with_delay(Duration::from_millis(50))
        .succeed_with(OpKind::Learn, Payload::new().with("stored", true));
    let runtime = runtime_with(executor);
    let completions = capture(&runtime, "learn.complete");

    let origin = runtime.create_instance();
    let id = runtime
        .submit(
            OpKind::Learn,
            Some(&origin),
            Payload::new().with("text", "x"),
            None,
        )
        .unwrap();

    wait_for(&completions, 1, Duration::from_millis(200)).await;

    let completions = completions.lock().unwrap();
    assert_eq!(completions[0].correlation_id, Some(id));
    assert_eq!(completions[0].payload.get("text"), Some(&json!("x")));
    assert_eq!(completions[0].payload.get("stored"), Some(&json!(true)));
}

#[tokio::test]
async fn submit_latency_is_independent_of_backend_latency() {
    let executor = FakeExecutor::new().with_delay(Duration::from_millis(250));
    let runtime = runtime_with(executor);
    let completions = capture(&runtime, "generate.complete");

    let started = Instant::now();
    runtime
        .submit(OpKind::Generate, None, Payload::new(), None)
        .unwrap();
    assert!(started.elapsed() < Duration::from_millis(100));

    wait_for(&completions, 1, Duration::from_secs(2)).await;
}

#[tokio::test]
async fn every_submission_gets_exactly_one_terminal_event() {
    let executor = FakeExecutor::new().fail_with(OpKind::Search, "index offline");
    let runtime = runtime_with(executor);
    // kind.any matches both the .complete and .error form
    let search_events = capture(&runtime, "search.any");
    let think_events = capture(&runtime, "think.any");

    let search_id = runtime
        .submit(OpKind::Search, None, Payload::new().with("query", "q"), None)
        .unwrap();
    let think_id = runtime
        .submit(OpKind::Think, None, Payload::new(), None)
        .unwrap();

    wait_for(&search_events, 1, Duration::from_secs(2)).await;
    wait_for(&think_events, 1, Duration::from_secs(2)).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let search_events = search_events.lock().unwrap();
    assert_eq!(search_events.len(), 1);
    assert_eq!(search_events[0].name, "search.error");
    assert_eq!(search_events[0].correlation_id, Some(search_id));
    assert_eq!(
        search_events[0].payload.get("error_kind"),
        Some(&json!("backend"))
    );
    // The original payload rides along on the error event
    assert_eq!(search_events[0].payload.get("query"), Some(&json!("q")));

    let think_events = think_events.lock().unwrap();
    assert_eq!(think_events.len(), 1);
    assert_eq!(think_events[0].name, "think.complete");
    assert_eq!(think_events[0].correlation_id, Some(think_id));
}

#[tokio::test]
async fn timed_out_operation_reports_a_timeout_error() {
    let executor = FakeExecutor::new().with_delay(Duration::from_secs(10));
    let runtime = runtime_with(executor);
    let errors = capture(&runtime, "execute.error");

    runtime
        .submit(
            OpKind::Execute,
            None,
            Payload::new().with("command", "ls"),
            Some(Duration::from_millis(50)),
        )
        .unwrap();

    wait_for(&errors, 1, Duration::from_secs(2)).await;

    let errors = errors.lock().unwrap();
    assert_eq!(errors[0].payload.get("error_kind"), Some(&json!("timeout")));
    assert_eq!(errors[0].payload.get("command"), Some(&json!("ls")));
}

#[tokio::test]
async fn origin_disposal_does_not_suppress_the_terminal_event() {
    let executor = FakeExecutor::new().with_delay(Duration::from_millis(50));
    let runtime = runtime_with(executor);

    let origin = runtime.create_instance();
    let own_completions = {
        // The origin listens for its own completion
        let events = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&events);
        runtime
            .register_owned(&origin, "chat.complete", move |event| {
                sink.lock().unwrap().push(event.clone());
                Ok(())
            })
            .unwrap();
        events
    };
    let global_completions = capture(&runtime, "chat.complete");

    runtime
        .submit(OpKind::Chat, Some(&origin), Payload::new(), None)
        .unwrap();
    runtime.dispose_instance(&origin);

    // Fire-and-forget does not require the origin to still exist: the
    // surviving global subscription observes the terminal event
    wait_for(&global_completions, 1, Duration::from_secs(2)).await;
    assert!(own_completions.lock().unwrap().is_empty());
    assert_eq!(
        global_completions.lock().unwrap()[0].sender,
        Some(origin.id())
    );
}
