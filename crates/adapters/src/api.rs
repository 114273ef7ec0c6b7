// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Paginated access to the project's successful jobs via the CI API.

use async_trait::async_trait;
use tg_core::JobRecord;
use thiserror::Error;

/// Jobs fetched per API page.
pub const JOBS_PER_PAGE: u32 = 100;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("jobs request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("jobs request returned HTTP {0}")]
    Status(u16),
}

/// One page of the project's job history, filtered server-side to
/// successful jobs. Pages are assumed most-recent-first.
#[async_trait]
pub trait JobsApi: Clone + Send + Sync + 'static {
    async fn successful_jobs(&self, page: u32) -> Result<Vec<JobRecord>, ApiError>;
}

/// Production client for the GitLab jobs endpoint.
#[derive(Debug, Clone)]
pub struct GitlabJobsClient {
    http: reqwest::Client,
    jobs_url: String,
    token: String,
}

impl GitlabJobsClient {
    /// `jobs_url` is the project jobs endpoint, e.g.
    /// `https://gitlab.example.com/api/v4/projects/123/jobs`.
    pub fn new(jobs_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), jobs_url: jobs_url.into(), token: token.into() }
    }
}

#[async_trait]
impl JobsApi for GitlabJobsClient {
    async fn successful_jobs(&self, page: u32) -> Result<Vec<JobRecord>, ApiError> {
        tracing::debug!(page, url = %self.jobs_url, "GET jobs?scope=success");
        let response = self
            .http
            .get(&self.jobs_url)
            .query(&[
                ("scope", "success"),
                ("per_page", &JOBS_PER_PAGE.to_string()),
                ("page", &page.to_string()),
            ])
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        let jobs: Vec<JobRecord> = response.json().await?;
        tracing::debug!(page, count = jobs.len(), "jobs fetched");
        Ok(jobs)
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct FakeApiState {
        pages: Vec<Vec<JobRecord>>,
        fetched: Vec<u32>,
        fail: bool,
    }

    /// In-memory jobs API serving pre-canned pages (page numbers are 1-based).
    #[derive(Debug, Clone, Default)]
    pub struct FakeJobsApi {
        state: Arc<Mutex<FakeApiState>>,
    }

    impl FakeJobsApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_page(&self, jobs: Vec<JobRecord>) {
            self.lock().pages.push(jobs);
        }

        /// Make every call fail with an HTTP 500.
        pub fn fail(&self) {
            self.lock().fail = true;
        }

        /// Page numbers requested so far.
        pub fn fetched_pages(&self) -> Vec<u32> {
            self.lock().fetched.clone()
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, FakeApiState> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    #[async_trait]
    impl JobsApi for FakeJobsApi {
        async fn successful_jobs(&self, page: u32) -> Result<Vec<JobRecord>, ApiError> {
            let mut state = self.lock();
            if state.fail {
                return Err(ApiError::Status(500));
            }
            state.fetched.push(page);
            Ok(state.pages.get(page as usize - 1).cloned().unwrap_or_default())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeJobsApi;

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
