// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact retrieval: download a matched job's artifact bundle (ZIP) and
//! extract it into the project directory.
//!
//! Retrieval is best-effort side restoration. The caller must never let a
//! failure here roll back an already-decided skip.

use async_trait::async_trait;
use std::io::{Seek, SeekFrom, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Hard cap on followed redirects for one download, chained redirects
/// included.
pub const MAX_REDIRECTS: u32 = 10;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact download failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("artifact download returned HTTP {0}")]
    Status(u16),
    #[error("too many redirects while downloading artifacts (cap {MAX_REDIRECTS})")]
    TooManyRedirects,
    #[error("redirect without a usable Location header")]
    BadRedirect,
    #[error("artifact archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("artifact io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetch and restore the artifacts of a past job.
#[async_trait]
pub trait ArtifactFetcher: Clone + Send + Sync + 'static {
    async fn fetch(&self, job_id: &str) -> Result<(), ArtifactError>;
}

/// Production fetcher for the GitLab artifacts endpoint.
#[derive(Debug, Clone)]
pub struct GitlabArtifactFetcher {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    job_token: String,
    dest_dir: PathBuf,
}

impl GitlabArtifactFetcher {
    /// Redirect handling is an explicit bounded loop rather than the client's
    /// implicit policy, so exceeding the cap surfaces as a distinct error.
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        job_token: impl Into<String>,
        dest_dir: impl Into<PathBuf>,
    ) -> Result<Self, ArtifactError> {
        let http = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none()).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            project_id: project_id.into(),
            job_token: job_token.into(),
            dest_dir: dest_dir.into(),
        })
    }

    /// GET with manual redirect following.
    async fn download(&self, url: String) -> Result<Vec<u8>, ArtifactError> {
        let mut url = url;
        for _ in 0..=MAX_REDIRECTS {
            let response = self.http.get(&url).send().await?;
            let status = response.status();
            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or(ArtifactError::BadRedirect)?;
                // Location may be relative; resolve against the current URL.
                let base = reqwest::Url::parse(&url).map_err(|_| ArtifactError::BadRedirect)?;
                url = base.join(location).map_err(|_| ArtifactError::BadRedirect)?.to_string();
                tracing::debug!(%url, "following artifact redirect");
                continue;
            }
            if !status.is_success() {
                return Err(ArtifactError::Status(status.as_u16()));
            }
            return Ok(response.bytes().await?.to_vec());
        }
        Err(ArtifactError::TooManyRedirects)
    }
}

#[async_trait]
impl ArtifactFetcher for GitlabArtifactFetcher {
    async fn fetch(&self, job_id: &str) -> Result<(), ArtifactError> {
        let url = format!(
            "{}/projects/{}/jobs/{}/artifacts?job_token={}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            job_id,
            self.job_token
        );
        tracing::debug!(job_id, "downloading artifact bundle");
        let bytes = self.download(url).await?;

        // Spool to a temp file: ZipArchive needs Seek, and the bundle should
        // not be re-buffered by the extractor.
        let mut spool = tempfile::tempfile()?;
        spool.write_all(&bytes)?;
        spool.seek(SeekFrom::Start(0))?;
        let mut archive = zip::ZipArchive::new(spool)?;
        tracing::debug!(job_id, files = archive.len(), dest = %self.dest_dir.display(),
            "extracting artifact bundle");
        archive.extract(&self.dest_dir)?;
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct FakeFetchState {
        fetched: Vec<String>,
        fail: bool,
    }

    /// Records fetches; optionally fails every call.
    #[derive(Debug, Clone, Default)]
    pub struct FakeArtifactFetcher {
        state: Arc<Mutex<FakeFetchState>>,
    }

    impl FakeArtifactFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail(&self) {
            self.lock().fail = true;
        }

        pub fn fetched(&self) -> Vec<String> {
            self.lock().fetched.clone()
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, FakeFetchState> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }
    }

    #[async_trait]
    impl ArtifactFetcher for FakeArtifactFetcher {
        async fn fetch(&self, job_id: &str) -> Result<(), ArtifactError> {
            let mut state = self.lock();
            state.fetched.push(job_id.to_string());
            if state.fail {
                return Err(ArtifactError::Status(500));
            }
            Ok(())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeArtifactFetcher;

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
