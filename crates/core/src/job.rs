// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job records as returned by the CI jobs API.

use serde::{Deserialize, Serialize};

/// One past job of the project, sourced from the CI API.
///
/// Immutable and never persisted by this tool; only the fields the scan
/// needs are deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: u64,
    pub name: String,
    /// Git ref the job ran on. `ref` is a keyword upstream, not here.
    #[serde(rename = "ref")]
    pub job_ref: String,
    pub status: String,
    pub commit: CommitRef,
    #[serde(default)]
    pub artifacts_expire_at: Option<String>,
    #[serde(default)]
    pub web_url: String,
}

/// Commit the job was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRef {
    pub id: String,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
