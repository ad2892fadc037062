// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Error types for registration and publishing

use thiserror::Error;

/// Rejected synchronously at `register`/`publish`, surfaced to the caller
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty pattern")]
    EmptyPattern,
    #[error("empty segment in pattern: {pattern}")]
    EmptySegment { pattern: String },
    #[error("empty event name")]
    EmptyEventName,
}
