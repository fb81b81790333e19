//! Fake collaborator implementations for testing

use super::traits::*;
use crate::config::{JobConfig, ServiceConfig};
use crate::dispatcher::EventParser;
use crate::event::Event;
use crate::reporting::CommitState;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Recorded call to a forge method
#[derive(Debug, Clone, PartialEq)]
pub enum ForgeCall {
    SetCommitStatus {
        commit: String,
        state: CommitState,
        url: String,
        description: String,
        check_name: String,
    },
    GetCommitStatuses {
        commit: String,
    },
    CommitComment {
        commit: String,
        body: String,
    },
    PrComment {
        pr_id: u64,
        body: String,
    },
    GetPullRequest {
        pr_id: u64,
    },
    SetFlag {
        pr_id: u64,
        check_name: String,
        state: CommitState,
        url: String,
        uid: String,
    },
}

/// Shared state for the fake forge
struct FakeForgeState {
    calls: Vec<ForgeCall>,
    hostname: String,
    namespace: String,
    private: bool,
    head_commit: String,
    supports_flags: bool,
    requires_status_url: bool,
    status_from_source_project: bool,
    flags: Vec<CommitFlag>,
    // Configurable failure modes
    set_status_error: Option<ForgeError>,
    get_pull_request_error: Option<ForgeError>,
}

impl Default for FakeForgeState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            hostname: "forge.example.com".to_string(),
            namespace: "acme".to_string(),
            private: false,
            head_commit: String::new(),
            supports_flags: false,
            requires_status_url: false,
            status_from_source_project: false,
            flags: Vec::new(),
            set_status_error: None,
            get_pull_request_error: None,
        }
    }
}

/// Fake forge project with call recording for testing
#[derive(Clone, Default)]
pub struct FakeForge {
    state: Arc<Mutex<FakeForgeState>>,
}

impl FakeForge {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeForgeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn private(self, private: bool) -> Self {
        self.lock().private = private;
        self
    }

    pub fn located(self, hostname: &str, namespace: &str) -> Self {
        {
            let mut state = self.lock();
            state.hostname = hostname.to_string();
            state.namespace = namespace.to_string();
        }
        self
    }

    /// Make PRs report the given head commit and expose a flag API
    pub fn with_flag_api(self, head_commit: &str) -> Self {
        {
            let mut state = self.lock();
            state.head_commit = head_commit.to_string();
            state.supports_flags = true;
        }
        self
    }

    pub fn requiring_status_url(self) -> Self {
        self.lock().requires_status_url = true;
        self
    }

    pub fn with_existing_flags(self, flags: Vec<CommitFlag>) -> Self {
        self.lock().flags = flags;
        self
    }

    /// Report statuses via the PR's source project, GitLab-style
    pub fn reporting_via_source_project(self) -> Self {
        self.lock().status_from_source_project = true;
        self
    }

    /// Make every `set_commit_status` call fail with the given error
    pub fn failing_status_with(self, error: ForgeError) -> Self {
        self.lock().set_status_error = Some(error);
        self
    }

    pub fn failing_pull_request_with(self, error: ForgeError) -> Self {
        self.lock().get_pull_request_error = Some(error);
        self
    }

    /// Snapshot of every recorded call, in call order
    pub fn calls(&self) -> Vec<ForgeCall> {
        self.lock().calls.clone()
    }
}

impl ForgeProject for FakeForge {
    fn hostname(&self) -> String {
        self.lock().hostname.clone()
    }

    fn namespace(&self) -> String {
        self.lock().namespace.clone()
    }

    fn is_private(&self) -> bool {
        self.lock().private
    }

    fn set_commit_status(
        &self,
        commit: &str,
        state: CommitState,
        url: &str,
        description: &str,
        check_name: &str,
    ) -> Result<(), ForgeError> {
        let mut guard = self.lock();
        guard.calls.push(ForgeCall::SetCommitStatus {
            commit: commit.to_string(),
            state,
            url: url.to_string(),
            description: description.to_string(),
            check_name: check_name.to_string(),
        });
        if let Some(error) = guard.set_status_error.clone() {
            return Err(error);
        }
        guard.flags.push(CommitFlag {
            check_name: check_name.to_string(),
            state,
            url: url.to_string(),
        });
        Ok(())
    }

    fn get_commit_statuses(&self, commit: &str) -> Result<Vec<CommitFlag>, ForgeError> {
        let mut guard = self.lock();
        guard.calls.push(ForgeCall::GetCommitStatuses {
            commit: commit.to_string(),
        });
        Ok(guard.flags.clone())
    }

    fn commit_comment(&self, commit: &str, body: &str) -> Result<(), ForgeError> {
        self.lock().calls.push(ForgeCall::CommitComment {
            commit: commit.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    fn pr_comment(&self, pr_id: u64, body: &str) -> Result<(), ForgeError> {
        self.lock().calls.push(ForgeCall::PrComment {
            pr_id,
            body: body.to_string(),
        });
        Ok(())
    }

    fn get_pull_request(&self, pr_id: u64) -> Result<Arc<dyn PullRequest>, ForgeError> {
        let mut guard = self.lock();
        guard.calls.push(ForgeCall::GetPullRequest { pr_id });
        if let Some(error) = guard.get_pull_request_error.clone() {
            return Err(error);
        }
        Ok(Arc::new(FakePullRequest {
            state: self.state.clone(),
            pr_id,
        }))
    }

    fn requires_status_url(&self) -> bool {
        self.lock().requires_status_url
    }

    fn status_from_source_project(&self) -> bool {
        self.lock().status_from_source_project
    }
}

/// Fake pull request sharing the parent forge's call log
pub struct FakePullRequest {
    state: Arc<Mutex<FakeForgeState>>,
    pr_id: u64,
}

impl FakePullRequest {
    fn lock(&self) -> std::sync::MutexGuard<'_, FakeForgeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PullRequest for FakePullRequest {
    fn head_commit(&self) -> String {
        self.lock().head_commit.clone()
    }

    fn supports_flags(&self) -> bool {
        self.lock().supports_flags
    }

    fn set_flag(
        &self,
        check_name: &str,
        _comment: &str,
        url: &str,
        state: CommitState,
        uid: &str,
    ) -> Result<(), ForgeError> {
        self.lock().calls.push(ForgeCall::SetFlag {
            pr_id: self.pr_id,
            check_name: check_name.to_string(),
            state,
            url: url.to_string(),
            uid: uid.to_string(),
        });
        Ok(())
    }
}

/// Allow-list gate with a fixed verdict and call counting
#[derive(Clone)]
pub struct FakeAllowlist {
    approved: bool,
    checks: Arc<Mutex<Vec<usize>>>,
}

impl FakeAllowlist {
    pub fn approving() -> Self {
        Self {
            approved: true,
            checks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn denying() -> Self {
        Self {
            approved: false,
            checks: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of job configs passed to each check, in call order
    pub fn checked_job_counts(&self) -> Vec<usize> {
        self.checks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Allowlist for FakeAllowlist {
    fn check_and_report(
        &self,
        _event: &Event,
        _project: Option<&dyn ForgeProject>,
        _service_config: &ServiceConfig,
        job_configs: &[JobConfig],
    ) -> bool {
        self.checks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(job_configs.len());
        self.approved
    }
}

/// Task queue recording submitted groups for assertions
#[derive(Clone, Default)]
pub struct FakeQueue {
    groups: Arc<Mutex<Vec<Vec<TaskSignature>>>>,
    closed: Arc<Mutex<bool>>,
}

impl FakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every submission fail, as a closed broker would
    pub fn close(&self) {
        *self.closed.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    /// Snapshot of submitted groups, in submission order
    pub fn groups(&self) -> Vec<Vec<TaskSignature>> {
        self.groups
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl TaskQueue for FakeQueue {
    async fn submit_group(&self, group: Vec<TaskSignature>) -> Result<(), QueueError> {
        if *self.closed.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(QueueError::Closed);
        }
        self.groups
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(group);
        Ok(())
    }
}

/// Parser returning a preset event regardless of input
pub struct FakeParser {
    event: Option<Event>,
}

impl FakeParser {
    pub fn returning(event: Event) -> Self {
        Self { event: Some(event) }
    }

    pub fn rejecting() -> Self {
        Self { event: None }
    }
}

impl EventParser for FakeParser {
    fn parse(&self, _raw: &serde_json::Value) -> Option<Event> {
        self.event.clone()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
