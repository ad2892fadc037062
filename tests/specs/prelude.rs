//! Shared helpers for spec tests

use axon_core::Event;
use axon_runtime::{FakeExecutor, Runtime};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn runtime() -> Runtime {
    Runtime::new(Arc::new(FakeExecutor::new()))
}

pub fn runtime_with(executor: FakeExecutor) -> Runtime {
    Runtime::new(Arc::new(executor))
}

/// Record every event matching `pattern` for later assertions
pub fn capture(runtime: &Runtime, pattern: &str) -> Arc<Mutex<Vec<Event>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    runtime
        .register(pattern, move |event| {
            sink.lock().unwrap().push(event.clone());
            Ok(())
        })
        .unwrap();
    events
}

/// Wait until `count` events arrived, failing after `limit`
pub async fn wait_for(events: &Arc<Mutex<Vec<Event>>>, count: usize, limit: Duration) {
    tokio::time::timeout(limit, async {
        loop {
            if events.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for {} events", count));
}
