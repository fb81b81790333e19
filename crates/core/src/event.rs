// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event types for the tugboat dispatch layer
//!
//! An [`Event`] is the parsed form of one inbound forge occurrence
//! (webhook or message-bus payload). It is constructed once by an
//! [`EventParser`](crate::dispatcher::EventParser), never mutated, and
//! discarded after a single dispatch cycle.

use crate::adapters::ForgeProject;
use crate::config::PackageConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The concrete kind of an inbound occurrence.
///
/// This is a closed set: one variant per webhook/message kind the bot
/// reacts to. Payload details live on [`Event`], not here, so kinds can
/// be used as cheap set members in the handler registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Pull request opened or synchronized with new commits
    PullRequest,
    /// Commits pushed to a branch
    Push,
    /// Release published
    Release,
    /// Comment added to a pull request
    PullRequestComment,
    /// Comment added to an issue
    IssueComment,
    /// Label added to a pull request
    LabelAdded,
    /// Bot installed on an account (no repository configuration exists)
    Installation,
    /// Build system reported a build has started
    BuildStarted,
    /// Build system reported a build has finished
    BuildFinished,
    /// Test runner delivered results
    TestResults,
}

/// The repository lifecycle point a job declares it reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    PullRequest,
    Commit,
    Release,
}

impl EventKind {
    /// The trigger type derived from this kind.
    ///
    /// Installation events carry no repository lifecycle point; they
    /// never reach the job matcher.
    pub fn trigger(&self) -> Option<TriggerType> {
        match self {
            EventKind::PullRequest
            | EventKind::PullRequestComment
            | EventKind::LabelAdded
            | EventKind::BuildStarted
            | EventKind::BuildFinished
            | EventKind::TestResults => Some(TriggerType::PullRequest),
            EventKind::Push => Some(TriggerType::Commit),
            EventKind::Release | EventKind::IssueComment => Some(TriggerType::Release),
            EventKind::Installation => None,
        }
    }

    /// Whether this kind carries a user comment that may hold a bot command
    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            EventKind::PullRequestComment | EventKind::IssueComment
        )
    }
}

/// Immutable record of one inbound occurrence.
#[derive(Clone)]
pub struct Event {
    kind: EventKind,
    comment: Option<String>,
    project: Option<Arc<dyn ForgeProject>>,
    package_config: Option<PackageConfig>,
    pre_check: bool,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            comment: None,
            project: None,
            package_config: None,
            pre_check: true,
        }
    }

    /// Attach the raw comment text (comment-kind events)
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach the originating project handle
    pub fn with_project(mut self, project: Arc<dyn ForgeProject>) -> Self {
        self.project = Some(project);
        self
    }

    /// Attach the resolved per-repository automation configuration
    pub fn with_package_config(mut self, package_config: PackageConfig) -> Self {
        self.package_config = Some(package_config);
        self
    }

    /// Record the parser's precondition check result
    pub fn with_pre_check(mut self, passed: bool) -> Self {
        self.pre_check = passed;
        self
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn trigger(&self) -> Option<TriggerType> {
        self.kind.trigger()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn project(&self) -> Option<&Arc<dyn ForgeProject>> {
        self.project.as_ref()
    }

    pub fn package_config(&self) -> Option<&PackageConfig> {
        self.package_config.as_ref()
    }

    pub fn pre_check(&self) -> bool {
        self.pre_check
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("trigger", &self.trigger())
            .field("comment", &self.comment)
            .field("has_project", &self.project.is_some())
            .field("package_config", &self.package_config)
            .field("pre_check", &self.pre_check)
            .finish()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
