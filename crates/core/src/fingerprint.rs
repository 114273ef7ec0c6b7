// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical tree fingerprints and their one-way digests.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;

/// Canonical listing of a configured path set at one revision.
///
/// The raw value is the ordered `git ls-tree` output for the configured
/// paths: one `(mode, type, object-id, path)` entry per line. Two revisions
/// with identical content and modes under those paths produce identical
/// fingerprints; any difference in content, mode, or path set changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(listing: impl Into<String>) -> Self {
        Self(listing.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty fingerprint must never be used as a match key: it would
    /// compare equal across unrelated configurations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn digest(&self) -> Digest {
        Digest::of(self)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// SHA-256 hex digest of a fingerprint.
///
/// Used as the compact key in the local history log so line length stays
/// bounded regardless of the size of the configured path set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    pub fn of(fingerprint: &Fingerprint) -> Self {
        Self(format!("{:x}", Sha256::digest(fingerprint.as_str().as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "fingerprint_tests.rs"]
mod tests;
