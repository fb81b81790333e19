//! End-to-end status reporting specs

use crate::prelude::init_tracing;
use std::sync::Arc;
use tug_core::adapters::fake::{FakeForge, ForgeCall};
use tug_core::adapters::ForgeError;
use tug_core::{CommitState, StatusReporter};

#[test]
fn full_report_is_readable_back_from_the_forge() {
    init_tracing();
    let forge = FakeForge::new();
    let reporter = StatusReporter::new(Arc::new(forge.clone()), "abc123", None);

    reporter
        .report(
            CommitState::Pending,
            "queued",
            "https://ci.example.com/42",
            &["build:rawhide", "build:stable"],
        )
        .unwrap();
    reporter
        .report(
            CommitState::Success,
            "all builds passed",
            "https://ci.example.com/42",
            &["build:rawhide", "build:stable"],
        )
        .unwrap();

    let statuses = reporter.get_statuses().unwrap();
    assert_eq!(statuses.len(), 4);
    assert!(statuses
        .iter()
        .filter(|flag| flag.state == CommitState::Success)
        .count() == 2);
}

#[test]
fn permission_loss_degrades_to_comments_without_failing() {
    init_tracing();
    let forge = FakeForge::new().failing_status_with(ForgeError::StatusCreate {
        code: 403,
        message: "insufficient permissions".to_string(),
    });
    let reporter = StatusReporter::new(Arc::new(forge.clone()), "abc123", Some(7));

    reporter
        .report(CommitState::Failure, "build failed", "https://ci/1", &["build"])
        .unwrap();
    reporter
        .report_status_by_comment(CommitState::Failure, "https://ci/1", &["build"], "see log")
        .unwrap();

    let calls = forge.calls();
    assert!(calls
        .iter()
        .any(|call| matches!(call, ForgeCall::CommitComment { .. })));
    assert!(calls.iter().any(
        |call| matches!(call, ForgeCall::PrComment { body, .. } if body.contains("| Job | Result |"))
    ));
}

#[test]
fn pull_request_flag_mirrors_the_commit_status() {
    init_tracing();
    let forge = FakeForge::new().with_flag_api("abc123");
    let reporter = StatusReporter::new(Arc::new(forge.clone()), "abc123", Some(7));

    reporter
        .report(CommitState::Success, "done", "https://ci/1", &["build"])
        .unwrap();

    assert!(forge.calls().iter().any(|call| matches!(
        call,
        ForgeCall::SetFlag { pr_id: 7, state: CommitState::Success, .. }
    )));
}
