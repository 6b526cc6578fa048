// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result of one status read during polling.

use serde::{Deserialize, Serialize};

/// Outcome of a single status check.
///
/// `successful` says the read itself produced a usable answer; `done` says
/// the resource reached its terminal state. `done` without `successful` is
/// never produced by the built-in checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckResponse {
    pub successful: bool,
    pub done: bool,
}

impl CheckResponse {
    /// Terminal state reached.
    pub const fn done() -> Self {
        Self { successful: true, done: true }
    }

    /// Read worked, resource not there yet.
    pub const fn pending() -> Self {
        Self { successful: true, done: false }
    }

    /// Read failed.
    pub const fn failed() -> Self {
        Self { successful: false, done: false }
    }
}
