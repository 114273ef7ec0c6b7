// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Gate configuration, built once at startup and passed into the engine.
//!
//! No algorithm code reads the environment; everything it needs is carried
//! here explicitly.

use crate::Decision;
use std::path::PathBuf;
use thiserror::Error;

/// Which history store answers "has this fingerprint succeeded before".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Paginated scan of the project's successful jobs via the CI API.
    #[default]
    Remote,
    /// Bounded append-only log kept in the CI cache.
    Local,
}

/// Hard bounds on remote scan work. There is no external cancellation
/// mid-scan; these counters are the only thing keeping API traffic finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    /// Pages of job history fetched at most.
    pub pages: u32,
    /// Job records inspected at most, across all pages.
    pub jobs: u32,
    /// Candidates with the current job's name evaluated at most.
    pub same_job: u32,
    /// Non-matching candidates on the current ref tolerated at most.
    pub same_ref: u32,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self { pages: 5, jobs: 1000, same_job: 100, same_ref: 2 }
    }
}

/// Everything the decision engine needs for one invocation.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Directory holding the repository, the marker file, and the history log.
    pub project_dir: PathBuf,
    pub project_id: String,
    pub job_id: String,
    pub job_name: String,
    /// Git ref the current job runs on, when the CI exposes it.
    pub ref_name: Option<String>,
    /// Ordered path set whose tree state is fingerprinted.
    pub paths: Vec<String>,
    pub strategy: Strategy,
    /// CI API base URL (e.g. `https://gitlab.example.com/api/v4`).
    pub api_base_url: Option<String>,
    /// Read token for the jobs API (remote strategy only).
    pub read_token: Option<String>,
    /// Job token for artifact downloads.
    pub job_token: Option<String>,
    /// Emergency override: bypass history entirely and record this decision.
    pub forced: Option<Decision>,
    /// Whether a match should also restore the matched job's artifacts.
    pub fetch_artifacts: bool,
    pub verbose: bool,
    pub limits: ScanLimits,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not defined")]
    Missing(&'static str),
    #[error("the configured path set is empty")]
    EmptyPathSet,
}

impl GateConfig {
    /// Validate the preconditions of the configured strategy.
    ///
    /// Missing required configuration is a fatal precondition failure,
    /// distinct from "no history match".
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.is_empty() || self.paths.iter().all(|p| p.is_empty()) {
            return Err(ConfigError::EmptyPathSet);
        }
        if self.strategy == Strategy::Remote {
            if self.api_base_url.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::Missing("CI_API_V4_URL"));
            }
            if self.read_token.as_deref().map_or(true, str::is_empty) {
                return Err(ConfigError::Missing("API_READ_TOKEN"));
            }
        }
        Ok(())
    }

    /// Path of the per-job completion marker file.
    pub fn marker_path(&self) -> PathBuf {
        self.project_dir.join(format!("ci-skip-{}-{}", self.project_id, self.job_id))
    }

    /// Path of the local bounded history log.
    pub fn history_path(&self) -> PathBuf {
        self.project_dir.join("ci_ok_history")
    }

    /// Jobs API endpoint for this project.
    pub fn jobs_api_url(&self) -> Option<String> {
        self.api_base_url
            .as_deref()
            .map(|base| format!("{}/projects/{}/jobs", base.trim_end_matches('/'), self.project_id))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
