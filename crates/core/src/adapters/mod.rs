// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborator contracts for external integrations

pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

// Re-export traits
pub use traits::{
    Allowlist, CommitFlag, ForgeError, ForgeProject, PullRequest, QueueError, TaskQueue,
    TaskSignature,
};

// Re-export fakes
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeAllowlist, FakeForge, FakeParser, FakePullRequest, FakeQueue, ForgeCall};
