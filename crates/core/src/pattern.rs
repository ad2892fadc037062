// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Axon Contributors

//! Event pattern matching
//!
//! Patterns are dot-segmented subscription keys:
//!   - Exact: "user.login" matches only "user.login"
//!   - Wildcard segment: "user.any.action" matches "user.emergency.action"
//!   - Bare "any" matches every event regardless of segment count
//!
//! Apart from bare "any", a pattern only matches names with the same number
//! of segments. There is no multi-segment wildcard.

use crate::error::ValidationError;
use std::fmt;

/// The wildcard token, matching exactly one segment (or, bare, every event)
pub const WILDCARD: &str = "any";

/// A validated dot-segmented event pattern
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventPattern {
    raw: String,
    segments: Vec<String>,
    match_all: bool,
}

impl EventPattern {
    /// Parse and validate a pattern string.
    ///
    /// Fails on empty input or empty segments ("a..b", trailing dots).
    pub fn parse(pattern: &str) -> Result<Self, ValidationError> {
        if pattern.is_empty() {
            return Err(ValidationError::EmptyPattern);
        }

        if pattern == WILDCARD {
            return Ok(Self {
                raw: pattern.to_string(),
                segments: Vec::new(),
                match_all: true,
            });
        }

        let segments: Vec<String> = pattern.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ValidationError::EmptySegment {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
            match_all: false,
        })
    }

    /// Check if this pattern matches an event name
    pub fn matches(&self, event_name: &str) -> bool {
        if self.match_all {
            return true;
        }

        let event_segments: Vec<&str> = event_name.split('.').collect();
        if event_segments.len() != self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(event_segments)
            .all(|(pattern, event)| pattern == WILDCARD || pattern == event)
    }

    /// True for the bare "any" pattern
    pub fn is_match_all(&self) -> bool {
        self.match_all
    }

    /// True if any segment is a wildcard (including bare "any")
    pub fn has_wildcard(&self) -> bool {
        self.match_all || self.segments.iter().any(|s| s == WILDCARD)
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The first segment if it is a literal, None if it is a wildcard.
    ///
    /// Together with `segment_count` this is the registry's bucket key for
    /// pruning candidates before full comparison.
    pub fn first_literal(&self) -> Option<&str> {
        self.segments
            .first()
            .filter(|s| *s != WILDCARD)
            .map(String::as_str)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for EventPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
