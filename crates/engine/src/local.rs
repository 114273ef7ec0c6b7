// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local bounded-log strategy: the history lives in a size-capped file in
//! the CI cache, keyed by fingerprint digest.

use crate::store::{ArtifactAvailability, HistoryStore, MatchedJob, StoreError};
use async_trait::async_trait;
use tg_core::Fingerprint;
use tg_history::HistoryLog;

/// History store backed by [`HistoryLog`].
#[derive(Debug, Clone)]
pub struct LocalLogStore {
    log: HistoryLog,
}

impl LocalLogStore {
    pub fn new(log: HistoryLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl HistoryStore for LocalLogStore {
    async fn lookup(&self, fingerprint: &Fingerprint) -> Result<Option<MatchedJob>, StoreError> {
        let digest = fingerprint.digest();
        // The log keeps no artifact metadata, so a fetch is always attempted
        Ok(self.log.lookup(&digest).map(|id| MatchedJob {
            id,
            web_url: None,
            artifacts: ArtifactAvailability::Unknown,
        }))
    }

    async fn record_miss(
        &self,
        fingerprint: &Fingerprint,
        job_id: &str,
    ) -> Result<(), StoreError> {
        self.log.append(&fingerprint.digest(), job_id)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
