// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tg_core::ConfigError;
use tg_engine::{ArtifactAvailability, MatchedJob};
use yare::parameterized;

fn matched() -> MatchedJob {
    MatchedJob {
        id: "7".to_string(),
        web_url: None,
        artifacts: ArtifactAvailability::Unknown,
    }
}

#[parameterized(
    fresh_skip = { Outcome::Skip { matched: Some(matched()) }, 0 },
    cached_skip = { Outcome::Skip { matched: None }, 0 },
    not_found = { Outcome::NotFound, 2 },
    cached_no_skip = { Outcome::NoSkipCached, 3 },
    tree_empty = { Outcome::TreeEmpty, 5 },
    config_error = { Outcome::ConfigError(ConfigError::EmptyPathSet), 6 },
)]
fn outcome_exit_codes(outcome: Outcome, expected: i32) {
    assert_eq!(code(&outcome), expected);
}

#[test]
fn artifact_failure_still_exits_zero() {
    assert_eq!(code(&Outcome::SkipArtifactFailed { matched: matched() }), 0);
}
