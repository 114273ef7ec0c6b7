// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tg-engine: The skip-decision engine — history stores and the gate
//! orchestrator.

pub mod gate;
pub mod local;
pub mod scan;
pub mod store;

pub use gate::{Gate, GateError, Outcome};
pub use local::LocalLogStore;
pub use scan::{RemoteJobScan, ScanOutcome};
pub use store::{ArtifactAvailability, HistoryStore, MatchedJob, StoreError};
