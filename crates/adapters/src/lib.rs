// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Production adapters for the dispatch core
//!
//! Concrete implementations of the collaborator traits declared in
//! `tug-core`: a REST forge client, an in-process task queue, and
//! tracing wrappers.

pub mod forge;
pub mod queue;
pub mod traced;

pub use forge::{RestForge, RestForgeConfig, RestPullRequest};
pub use queue::{group_channel, GroupReceiver, MemoryQueue};
pub use traced::TracedQueue;
