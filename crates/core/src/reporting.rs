// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commit status reporting back to the originating forge
//!
//! The reporter posts structured commit statuses and degrades to
//! comment-based reporting when the forge rejects the status call. It
//! is independent of the dispatcher; handler code constructs one per
//! (project, commit, pr) and publishes through it.

use crate::adapters::{CommitFlag, ForgeError, ForgeProject};
use crate::constants::{RECOVERABLE_STATUS_CODES, STATUS_CREATE_QUEUED, STATUS_URL_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::{Arc, OnceLock};

/// State of a commit check as understood by the forge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    Pending,
    Success,
    Failure,
    Error,
    Canceled,
}

impl CommitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitState::Pending => "pending",
            CommitState::Success => "success",
            CommitState::Failure => "failure",
            CommitState::Error => "error",
            CommitState::Canceled => "canceled",
        }
    }
}

/// Reports check results for one commit of one project.
///
/// Target project, commit, and PR id are fixed at construction. The
/// concrete project to set statuses on (the PR's source project on
/// forges that require it) is resolved lazily and cached.
pub struct StatusReporter {
    project: Arc<dyn ForgeProject>,
    commit_sha: String,
    pr_id: Option<u64>,
    project_with_commit: OnceLock<Arc<dyn ForgeProject>>,
}

impl StatusReporter {
    pub fn new(
        project: Arc<dyn ForgeProject>,
        commit_sha: impl Into<String>,
        pr_id: Option<u64>,
    ) -> Self {
        let commit_sha = commit_sha.into();
        tracing::debug!(commit = %commit_sha, pr = ?pr_id, "status reporter created");
        Self {
            project,
            commit_sha,
            pr_id,
            project_with_commit: OnceLock::new(),
        }
    }

    /// The project commit statuses are set on
    fn project_with_commit(&self) -> Result<Arc<dyn ForgeProject>, ForgeError> {
        if let Some(resolved) = self.project_with_commit.get() {
            return Ok(resolved.clone());
        }

        let resolved = match self.pr_id {
            Some(pr_id) if self.project.status_from_source_project() => self
                .project
                .get_pull_request(pr_id)?
                .source_project()
                .unwrap_or_else(|| self.project.clone()),
            _ => self.project.clone(),
        };

        let _ = self.project_with_commit.set(resolved.clone());
        Ok(resolved)
    }

    /// Set a commit check status once per check name.
    ///
    /// No-op with a warning when `check_names` is empty.
    pub fn report(
        &self,
        state: CommitState,
        description: &str,
        url: &str,
        check_names: &[&str],
    ) -> Result<(), ForgeError> {
        if check_names.is_empty() {
            tracing::warn!("no checks to set status for");
            return Ok(());
        }

        for check_name in check_names {
            self.set_status(state, description, check_name, url)?;
        }
        Ok(())
    }

    /// Post one structured commit status, degrading to a commit comment
    /// on recoverable forge rejections.
    pub fn set_status(
        &self,
        state: CommitState,
        description: &str,
        check_name: &str,
        url: &str,
    ) -> Result<(), ForgeError> {
        // Some forges reject status updates without a URL.
        let url = if url.is_empty() && self.project.requires_status_url() {
            STATUS_URL_PLACEHOLDER
        } else {
            url
        };

        tracing::debug!(
            state = state.as_str(),
            check_name,
            description,
            "setting commit status"
        );

        let result = self.project_with_commit()?.set_commit_status(
            &self.commit_sha,
            state,
            url,
            description,
            check_name,
        );

        match result {
            Ok(()) => {}
            Err(ForgeError::StatusCreate { code, message }) => {
                // The queued-equivalent code means the forge accepted
                // the status and will apply it later.
                if code != STATUS_CREATE_QUEUED {
                    tracing::debug!(
                        commit = %self.commit_sha,
                        code,
                        %message,
                        "failed to set status, commenting on commit as a fallback"
                    );
                    self.add_commit_comment_with_status(state, description, check_name, url)?;
                }
                if !RECOVERABLE_STATUS_CODES.contains(&code) {
                    return Err(ForgeError::StatusCreate { code, message });
                }
            }
            Err(ForgeError::Api(message)) => {
                // No error code to discriminate on; always degrade.
                tracing::debug!(
                    commit = %self.commit_sha,
                    %message,
                    "forge rejected the status, commenting on commit as a fallback"
                );
                self.add_commit_comment_with_status(state, description, check_name, url)?;
            }
            Err(other) => return Err(other),
        }

        // Forges with a flag API on PRs don't derive the PR status from
        // commit statuses, so mirror it there as well.
        self.set_pull_request_status(check_name, description, url, state);
        Ok(())
    }

    /// Best-effort mirror of the status onto the pull request itself
    fn set_pull_request_status(
        &self,
        check_name: &str,
        description: &str,
        url: &str,
        state: CommitState,
    ) {
        let Some(pr_id) = self.pr_id else {
            return;
        };
        let Ok(pr) = self.project.get_pull_request(pr_id) else {
            return;
        };

        // Guard against stamping a stale PR head after new commits landed.
        if pr.supports_flags() && pr.head_commit() == self.commit_sha {
            tracing::debug!(pr = pr_id, "mirroring the status onto the pull request");
            let _ = pr.set_flag(check_name, description, url, state, &check_uid(check_name));
        }
    }

    /// One aggregate comment with a job/result table; used when
    /// status-setting permission is unavailable.
    pub fn report_status_by_comment(
        &self,
        state: CommitState,
        url: &str,
        check_names: &[&str],
        description: &str,
    ) -> Result<(), ForgeError> {
        let mut rows = vec![
            "| Job | Result |".to_string(),
            "| ------------- | ------------ |".to_string(),
        ];
        rows.extend(
            check_names
                .iter()
                .map(|check| format!("| [{check}]({url}) | {} |", state.as_str().to_uppercase())),
        );

        let table = rows.join("\n");
        self.comment(&format!("{table}\n### Description\n\n{description}"))
    }

    fn add_commit_comment_with_status(
        &self,
        state: CommitState,
        description: &str,
        check_name: &str,
        url: &str,
    ) -> Result<(), ForgeError> {
        let url_line = if url.is_empty() { "not provided" } else { url };
        let body = format!(
            "- name: {check_name}\n- state: {}\n- url: {url_line}\n\n{description}",
            state.as_str()
        );
        self.project.commit_comment(&self.commit_sha, &body)
    }

    /// Read the statuses currently set on the commit
    pub fn get_statuses(&self) -> Result<Vec<CommitFlag>, ForgeError> {
        self.project_with_commit()?
            .get_commit_statuses(&self.commit_sha)
    }

    /// Post a plain comment on the PR, or on the commit when no PR exists
    pub fn comment(&self, body: &str) -> Result<(), ForgeError> {
        match self.pr_id {
            Some(pr_id) => self.project.pr_comment(pr_id, body),
            None => self.project.commit_comment(&self.commit_sha, body),
        }
    }
}

/// Stable flag uid derived from the check name, so repeated reports
/// update the existing flag instead of creating new ones.
fn check_uid(check_name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(check_name.as_bytes());
    let digest = hasher.finalize();
    hex_encode(&digest[..16])
}

// Hex encoding helper
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
#[path = "reporting_tests.rs"]
mod tests;
