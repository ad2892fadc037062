// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Scripted executor for testing

use crate::error::OperationError;
use crate::executor::OperationExecutor;
use crate::operation::OpKind;
use async_trait::async_trait;
use axon_core::Payload;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded call to the fake executor
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutorCall {
    pub kind: OpKind,
    pub payload: Payload,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<ExecutorCall>,
    results: HashMap<OpKind, Result<Payload, OperationError>>,
}

/// Executor test double: scripted per-kind results, optional artificial
/// latency, recorded calls. Unscripted kinds succeed with `{status: "ok"}`.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    state: Arc<Mutex<FakeState>>,
    delay: Option<Duration>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before completing each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Script a success for one operation kind
    pub fn succeed_with(self, kind: OpKind, result: Payload) -> Self {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .results
            .insert(kind, Ok(result));
        self
    }

    /// Script a failure for one operation kind
    pub fn fail_with(self, kind: OpKind, message: &str) -> Self {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .results
            .insert(kind, Err(OperationError::Backend(message.to_string())));
        self
    }

    /// Calls observed so far, in arrival order
    pub fn calls(&self) -> Vec<ExecutorCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }
}

#[async_trait]
impl OperationExecutor for FakeExecutor {
    async fn execute(&self, kind: OpKind, payload: Payload) -> Result<Payload, OperationError> {
        {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.calls.push(ExecutorCall {
                kind,
                payload: payload.clone(),
            });
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = {
            let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.results.get(&kind).cloned()
        };
        scripted.unwrap_or_else(|| Ok(Payload::new().with("status", "ok")))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
