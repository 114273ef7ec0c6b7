// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tg-adapters: External collaborators of the skip gate — git tree listing,
//! the CI jobs API, and artifact retrieval — behind async traits with fake
//! implementations for tests.

pub mod api;
pub mod artifact;
pub mod git;

pub use api::{ApiError, GitlabJobsClient, JobsApi, JOBS_PER_PAGE};
pub use artifact::{ArtifactError, ArtifactFetcher, GitlabArtifactFetcher, MAX_REDIRECTS};
pub use git::{GitCliAdapter, TreeAdapter, TreeError};

#[cfg(any(test, feature = "test-support"))]
pub use api::FakeJobsApi;
#[cfg(any(test, feature = "test-support"))]
pub use artifact::FakeArtifactFetcher;
#[cfg(any(test, feature = "test-support"))]
pub use git::FakeTreeAdapter;
