// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tug-core: dispatch engine for the tugboat CI bot
//!
//! This crate provides:
//! - The event model and comment command parser
//! - The static handler registry, job matcher, and config resolver
//! - The dispatcher turning raw forge messages into task groups
//! - The status reporter publishing outcomes back to the forge
//! - Collaborator traits for the forge, allow-list, and task queue

pub mod constants;

pub mod adapters;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod event;
pub mod matcher;
pub mod registry;
pub mod reporting;
pub mod result;

// Re-exports
pub use adapters::{
    Allowlist, CommitFlag, ForgeError, ForgeProject, PullRequest, QueueError, TaskQueue,
    TaskSignature,
};
pub use command::commands_from_comment;
pub use config::{ConfigError, JobConfig, JobType, PackageConfig, ServiceConfig};
pub use dispatcher::{Dispatcher, EventParser};
pub use event::{Event, EventKind, TriggerType};
pub use matcher::{configs_for_handler, handlers_for_comment, handlers_for_event};
pub use registry::{HandlerKind, Registry};
pub use reporting::{CommitState, StatusReporter};
pub use result::TaskResult;

// Re-export fakes for downstream tests
#[cfg(any(test, feature = "test-support"))]
pub use adapters::{FakeAllowlist, FakeForge, FakeParser, FakeQueue, ForgeCall};
