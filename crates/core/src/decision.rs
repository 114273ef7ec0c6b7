// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The binary skip decision persisted in the completion marker.

use std::fmt;

/// Skip or run the guarded step.
///
/// Persisted as the literal string `true` (skip) or `false` (run) so shell
/// tooling can inspect the marker file directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip,
    Run,
}

impl Decision {
    /// Marker-file representation.
    pub fn as_marker(&self) -> &'static str {
        match self {
            Decision::Skip => "true",
            Decision::Run => "false",
        }
    }

    /// Parse marker-file content. Anything other than the literal `true`
    /// means run: an empty or garbled marker must never grant a skip.
    pub fn from_marker(content: &str) -> Self {
        if content == "true" {
            Decision::Skip
        } else {
            Decision::Run
        }
    }

}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::Skip => "skip",
            Decision::Run => "run",
        })
    }
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
