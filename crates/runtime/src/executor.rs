// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! The seam where cognitive backends plug in

use crate::error::OperationError;
use crate::operation::OpKind;
use async_trait::async_trait;
use axon_core::Payload;

/// Performs the real work behind a cognitive operation.
///
/// Implementations wrap chat-completion APIs, local-model inference, vector
/// memory stores, or process execution. The scheduler owns timeout
/// enforcement: on expiry the in-flight future is dropped, which is the
/// cancellation signal (best-effort; many backends are not preemptible).
///
/// The returned payload carries the operation's result fields; the
/// scheduler merges it over the submission payload in the terminal event.
#[async_trait]
pub trait OperationExecutor: Send + Sync {
    async fn execute(&self, kind: OpKind, payload: Payload) -> Result<Payload, OperationError>;
}
