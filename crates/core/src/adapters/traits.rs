// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborator trait definitions for the dispatch layer
//!
//! The dispatch core never talks to a forge, an allow-list store, or a
//! task broker directly; it goes through these traits. Production
//! implementations live in `tug-adapters`, recording fakes in
//! [`fake`](super::fake).

use crate::config::{JobConfig, ServiceConfig};
use crate::event::Event;
use crate::registry::HandlerKind;
use crate::reporting::CommitState;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

// =============================================================================
// Forge (project/pull-request APIs)
// =============================================================================

/// Errors from forge operations
#[derive(Debug, Clone, Error)]
pub enum ForgeError {
    /// The forge rejected a status-create call with a discriminating code
    #[error("status create rejected ({code}): {message}")]
    StatusCreate { code: u16, message: String },
    /// Generic API failure without a usable error code
    #[error("forge api error: {0}")]
    Api(String),
    #[error("pull request not found: {0}")]
    PullRequestNotFound(u64),
    #[error("http transport error: {0}")]
    Transport(String),
}

/// One commit status already set on the forge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitFlag {
    pub check_name: String,
    pub state: CommitState,
    pub url: String,
}

/// A project on the originating forge.
///
/// Object-safe and synchronous: forge calls are blocking remote calls,
/// retries are owned by the caller's infrastructure.
pub trait ForgeProject: Send + Sync {
    fn hostname(&self) -> String;

    fn namespace(&self) -> String;

    fn is_private(&self) -> bool;

    fn set_commit_status(
        &self,
        commit: &str,
        state: CommitState,
        url: &str,
        description: &str,
        check_name: &str,
    ) -> Result<(), ForgeError>;

    fn get_commit_statuses(&self, commit: &str) -> Result<Vec<CommitFlag>, ForgeError>;

    fn commit_comment(&self, commit: &str, body: &str) -> Result<(), ForgeError>;

    fn pr_comment(&self, pr_id: u64, body: &str) -> Result<(), ForgeError>;

    fn get_pull_request(&self, pr_id: u64) -> Result<Arc<dyn PullRequest>, ForgeError>;

    /// Whether this forge rejects status updates with an empty URL
    fn requires_status_url(&self) -> bool {
        false
    }

    /// Whether statuses must be set on the PR's source project rather
    /// than the target project (a PR's source may live in a fork)
    fn status_from_source_project(&self) -> bool {
        false
    }
}

/// A pull request on the originating forge
pub trait PullRequest: Send + Sync {
    /// Current head commit of the pull request
    fn head_commit(&self) -> String;

    /// The repository the PR's commits live in, when distinct from the target
    fn source_project(&self) -> Option<Arc<dyn ForgeProject>> {
        None
    }

    /// Whether the forge exposes a flag-style status API on PRs
    fn supports_flags(&self) -> bool {
        false
    }

    /// Set a status flag directly on the pull request.
    ///
    /// `uid` is stable per check name so repeated reports update the
    /// existing flag instead of stacking new ones.
    fn set_flag(
        &self,
        check_name: &str,
        comment: &str,
        url: &str,
        state: CommitState,
        uid: &str,
    ) -> Result<(), ForgeError>;
}

// =============================================================================
// Allow-list gate
// =============================================================================

/// Policy check restricting which accounts may cause side-effecting
/// automation to run. Reporting a rejection back to the user is the
/// implementation's responsibility.
pub trait Allowlist: Clone + Send + Sync + 'static {
    fn check_and_report(
        &self,
        event: &Event,
        project: Option<&dyn ForgeProject>,
        service_config: &ServiceConfig,
        job_configs: &[JobConfig],
    ) -> bool;
}

// =============================================================================
// Task queue (execution backend)
// =============================================================================

/// Errors from task submission
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("task queue is closed")]
    Closed,
    #[error("failed to submit group: {0}")]
    SubmitFailed(String),
}

/// Opaque unit of work submitted to the execution backend
#[derive(Debug, Clone)]
pub struct TaskSignature {
    pub id: Uuid,
    pub handler: HandlerKind,
    pub event: Event,
    pub job_config: Option<JobConfig>,
}

impl TaskSignature {
    pub fn new(handler: HandlerKind, event: &Event, job_config: Option<&JobConfig>) -> Self {
        Self {
            id: Uuid::new_v4(),
            handler,
            event: event.clone(),
            job_config: job_config.cloned(),
        }
    }
}

/// Execution backend accepting atomic groups of task signatures.
///
/// Submission is fire-and-forget: signatures within a group and across
/// groups carry no ordering guarantee, and a submitted group cannot be
/// withdrawn.
#[async_trait]
pub trait TaskQueue: Clone + Send + Sync + 'static {
    async fn submit_group(&self, group: Vec<TaskSignature>) -> Result<(), QueueError>;
}
