// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tg-core: Domain types for the treegate (tg) skip gate

pub mod config;
pub mod decision;
pub mod fingerprint;
pub mod job;

pub use config::{ConfigError, GateConfig, ScanLimits, Strategy};
pub use decision::Decision;
pub use fingerprint::{Digest, Fingerprint};
pub use job::{CommitRef, JobRecord};
