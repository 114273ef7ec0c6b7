// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exit-code contract consumed by `.gitlab-ci.yml` wrappers.
//!
//! `0` means "skip the rest of the job"; every other code means the job
//! runs (or failed outright). The distinct non-zero codes let a wrapper
//! script tell "no match" from misconfiguration without parsing output.

use tg_engine::Outcome;

/// Unclassified runtime failure (git, network, filesystem).
pub const FATAL: i32 = 1;
/// Precondition failure before any decision was made.
pub const CONFIG_ERROR: i32 = 6;

pub fn code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Skip { .. } | Outcome::SkipArtifactFailed { .. } => 0,
        Outcome::NotFound => 2,
        Outcome::NoSkipCached => 3,
        Outcome::TreeEmpty => 5,
        Outcome::ConfigError(_) => CONFIG_ERROR,
    }
}

#[cfg(test)]
#[path = "exit_tests.rs"]
mod tests;
