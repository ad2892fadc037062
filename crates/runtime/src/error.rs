// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Error types for background operation execution

use std::time::Duration;
use thiserror::Error;

/// Failure of a background cognitive operation.
///
/// Never surfaces to the submitter's call stack; the scheduler converts it
/// into the operation's `.error` terminal event.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OperationError {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("operation timed out after {elapsed:?}")]
    Timeout { elapsed: Duration },
    #[error("backend panicked")]
    Panicked,
}

impl OperationError {
    /// Stable discriminant carried in the `error_kind` payload field
    pub fn error_kind(&self) -> &'static str {
        match self {
            OperationError::Backend(_) => "backend",
            OperationError::Timeout { .. } => "timeout",
            OperationError::Panicked => "panic",
        }
    }
}

/// Synchronous submission failure
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("scheduler is closed")]
    Closed,
}
