// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tg-history: Local persistence for the skip gate — the per-job completion
//! marker and the bounded success-history log.

pub mod log;
pub mod marker;

pub use log::{HistoryLog, HistoryLogError, HISTORY_CAP};
pub use marker::{Marker, MarkerError};
