// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Blocking REST client for Pagure-style forges
//!
//! Implements the `ForgeProject`/`PullRequest` traits over the flag and
//! comment endpoints of a dist-git forge. Calls are synchronous; the
//! dispatch layer treats forge access as blocking remote I/O.

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tug_core::adapters::{CommitFlag, ForgeError, ForgeProject, PullRequest};
use tug_core::reporting::CommitState;

/// Connection settings for one repository on a REST forge
#[derive(Debug, Clone, Deserialize)]
pub struct RestForgeConfig {
    /// API root, e.g. `https://forge.example.com/api/0`
    pub api_url: String,
    /// Forge hostname as used in `host/namespace` gating
    pub hostname: String,
    pub namespace: String,
    pub repo: String,
    /// API token sent as `Authorization: token <value>`
    pub token: String,
}

#[derive(Clone)]
pub struct RestForge {
    agent: ureq::Agent,
    config: RestForgeConfig,
}

impl RestForge {
    pub fn new(config: RestForgeConfig) -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
            config,
        }
    }

    /// API URL of the repository itself
    fn repo_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.config.api_url, self.config.namespace, self.config.repo
        )
    }

    fn commit_url(&self, commit: &str, resource: &str) -> String {
        format!("{}/c/{commit}/{resource}", self.repo_url())
    }

    fn pr_url(&self, pr_id: u64, resource: &str) -> String {
        let base = format!("{}/pull-request/{pr_id}", self.repo_url());
        if resource.is_empty() {
            base
        } else {
            format!("{base}/{resource}")
        }
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.config.token)
    }

    fn post(&self, url: &str, payload: serde_json::Value) -> Result<(), ureq::Error> {
        self.agent
            .post(url)
            .header("Authorization", &self.auth_header())
            .send_json(payload)?;
        Ok(())
    }

    fn get_json(&self, url: &str) -> Result<serde_json::Value, ureq::Error> {
        let mut response = self
            .agent
            .get(url)
            .header("Authorization", &self.auth_header())
            .call()?;
        let body = response.body_mut().read_to_string()?;
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::Null))
    }
}

impl ForgeProject for RestForge {
    fn hostname(&self) -> String {
        self.config.hostname.clone()
    }

    fn namespace(&self) -> String {
        self.config.namespace.clone()
    }

    fn is_private(&self) -> bool {
        // The forge reports visibility on the repository resource;
        // treat lookup failures as private to stay default-deny.
        match self.get_json(&self.repo_url()) {
            Ok(body) => body["private"].as_bool().unwrap_or(true),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read repository visibility");
                true
            }
        }
    }

    fn set_commit_status(
        &self,
        commit: &str,
        state: CommitState,
        url: &str,
        description: &str,
        check_name: &str,
    ) -> Result<(), ForgeError> {
        let payload = json!({
            "username": check_name,
            "status": state.as_str(),
            "url": url,
            "comment": description,
        });
        self.post(&self.commit_url(commit, "flag"), payload)
            .map_err(status_create_error)
    }

    fn get_commit_statuses(&self, commit: &str) -> Result<Vec<CommitFlag>, ForgeError> {
        let body = self
            .get_json(&self.commit_url(commit, "flag"))
            .map_err(api_error)?;
        parse_flags(&body)
    }

    fn commit_comment(&self, commit: &str, body: &str) -> Result<(), ForgeError> {
        self.post(&self.commit_url(commit, "comment"), json!({ "comment": body }))
            .map_err(api_error)
    }

    fn pr_comment(&self, pr_id: u64, body: &str) -> Result<(), ForgeError> {
        self.post(&self.pr_url(pr_id, "comment"), json!({ "comment": body }))
            .map_err(api_error)
    }

    fn get_pull_request(&self, pr_id: u64) -> Result<Arc<dyn PullRequest>, ForgeError> {
        let body = self.get_json(&self.pr_url(pr_id, "")).map_err(|e| match e {
            ureq::Error::StatusCode(404) => ForgeError::PullRequestNotFound(pr_id),
            other => api_error(other),
        })?;
        let head_commit = body["head_commit"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        Ok(Arc::new(RestPullRequest {
            forge: self.clone(),
            pr_id,
            head_commit,
        }))
    }

    fn requires_status_url(&self) -> bool {
        // The flag endpoint rejects requests without a URL.
        true
    }
}

/// Pull request handle bound to the forge it was fetched from
pub struct RestPullRequest {
    forge: RestForge,
    pr_id: u64,
    head_commit: String,
}

impl PullRequest for RestPullRequest {
    fn head_commit(&self) -> String {
        self.head_commit.clone()
    }

    fn supports_flags(&self) -> bool {
        true
    }

    fn set_flag(
        &self,
        check_name: &str,
        comment: &str,
        url: &str,
        state: CommitState,
        uid: &str,
    ) -> Result<(), ForgeError> {
        let payload = json!({
            "username": check_name,
            "comment": comment,
            "url": url,
            "status": state.as_str(),
            "uid": uid,
        });
        self.forge
            .post(&self.forge.pr_url(self.pr_id, "flag"), payload)
            .map_err(status_create_error)
    }
}

/// Map a failed flag-create call, keeping the HTTP code available for
/// the reporter's recoverability decision
fn status_create_error(e: ureq::Error) -> ForgeError {
    match e {
        ureq::Error::StatusCode(code) => ForgeError::StatusCreate {
            code,
            message: format!("flag endpoint returned {code}"),
        },
        other => ForgeError::Transport(other.to_string()),
    }
}

fn api_error(e: ureq::Error) -> ForgeError {
    match e {
        ureq::Error::StatusCode(code) => ForgeError::Api(format!("http {code}")),
        other => ForgeError::Transport(other.to_string()),
    }
}

fn parse_flags(body: &serde_json::Value) -> Result<Vec<CommitFlag>, ForgeError> {
    let Some(flags) = body["flags"].as_array() else {
        return Ok(Vec::new());
    };
    flags
        .iter()
        .map(|flag| {
            let status = flag["status"].as_str().unwrap_or_default();
            Ok(CommitFlag {
                check_name: flag["username"].as_str().unwrap_or_default().to_string(),
                state: state_from_wire(status)
                    .ok_or_else(|| ForgeError::Api(format!("unknown flag status: {status}")))?,
                url: flag["url"].as_str().unwrap_or_default().to_string(),
            })
        })
        .collect()
}

fn state_from_wire(status: &str) -> Option<CommitState> {
    match status {
        "pending" => Some(CommitState::Pending),
        "success" => Some(CommitState::Success),
        "failure" => Some(CommitState::Failure),
        "error" => Some(CommitState::Error),
        "canceled" => Some(CommitState::Canceled),
        _ => None,
    }
}

#[cfg(test)]
#[path = "forge_tests.rs"]
mod tests;
