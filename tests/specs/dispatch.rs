//! End-to-end dispatch specs
//!
//! Raw payload in, task groups on the queue and acknowledgments out.

use crate::prelude::*;
use serde_json::json;
use tug_core::registry::HandlerKind;
use tug_core::JobType;

#[tokio::test]
async fn pull_request_webhook_schedules_a_build() {
    let (d, mut rx) = dispatcher();
    let payload = json!({
        "kind": "pull_request",
        "jobs": [{"job": "build", "trigger": "pull_request"}],
    });

    let results = d.dispatch_message(&payload, None, None).await;

    assert!(results.iter().all(|r| r.success));
    let group = rx.try_recv().expect("a task group should be queued");
    assert_eq!(group.len(), 1);
    assert_eq!(group[0].handler, HandlerKind::Build);
    assert_eq!(group[0].job_config.as_ref().map(|j| j.job), Some(JobType::Build));
    assert!(rx.try_recv().is_none());
}

#[tokio::test]
async fn build_command_in_a_comment_schedules_a_build() {
    let (d, mut rx) = dispatcher();
    let payload = json!({
        "kind": "pull_request_comment",
        "comment": "please /tug build",
        "jobs": [{"job": "build", "trigger": "pull_request"}],
    });

    let results = d.dispatch_message(&payload, None, None).await;

    assert!(results.iter().all(|r| r.success));
    let group = rx.try_recv().expect("a task group should be queued");
    assert_eq!(group[0].handler, HandlerKind::Build);
}

#[tokio::test]
async fn plain_comment_is_acknowledged_but_schedules_nothing() {
    let (d, mut rx) = dispatcher();
    let payload = json!({
        "kind": "pull_request_comment",
        "comment": "thanks, looks good!",
        "jobs": [{"job": "build", "trigger": "pull_request"}],
    });

    let results = d.dispatch_message(&payload, None, None).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(results[0].msg, "job created");
    assert!(rx.try_recv().is_none());
}

#[tokio::test]
async fn build_start_message_reaches_the_start_handler() {
    let (d, mut rx) = dispatcher();
    let payload = json!({
        "kind": "build_started",
        "jobs": [{"job": "tests", "trigger": "pull_request"}],
    });

    d.dispatch_message(&payload, Some("ci.build.start"), None).await;

    let group = rx.try_recv().expect("a task group should be queued");
    assert_eq!(group[0].handler, HandlerKind::BuildStart);
    // The start handler acts on behalf of the declared test job.
    assert_eq!(group[0].job_config.as_ref().map(|j| j.job), Some(JobType::Tests));
}

#[tokio::test]
async fn foreign_topic_never_reaches_the_queue() {
    let (d, mut rx) = dispatcher();
    let payload = json!({
        "kind": "build_started",
        "jobs": [{"job": "tests", "trigger": "pull_request"}],
    });

    let results = d
        .dispatch_message(&payload, Some("org.example.wiki.edit"), None)
        .await;

    assert!(results.is_empty());
    assert!(rx.try_recv().is_none());
}

#[tokio::test]
async fn release_runs_build_and_update_proposal() {
    let (d, mut rx) = dispatcher();
    let payload = json!({
        "kind": "release",
        "jobs": [
            {"job": "build", "trigger": "release"},
            {"job": "propose_update", "trigger": "release"},
        ],
    });

    d.dispatch_message(&payload, None, None).await;

    let first = rx.try_recv().expect("build group");
    let second = rx.try_recv().expect("propose-update group");
    assert_eq!(first[0].handler, HandlerKind::Build);
    assert_eq!(second[0].handler, HandlerKind::ProposeUpdate);
    assert!(rx.try_recv().is_none());
}

#[tokio::test]
async fn repository_without_config_is_acknowledged() {
    let (d, mut rx) = dispatcher();
    let payload = json!({"kind": "push"});

    let results = d.dispatch_message(&payload, None, None).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(results[0].msg, "no automation config found in the repository");
    assert!(rx.try_recv().is_none());
}

#[tokio::test]
async fn installation_is_scheduled_without_repository_config() {
    let (d, mut rx) = dispatcher();
    let payload = json!({"kind": "installation"});

    let results = d.dispatch_message(&payload, None, None).await;

    let group = rx.try_recv().expect("installation group");
    assert_eq!(group[0].handler, HandlerKind::Installation);
    assert!(group[0].job_config.is_none());
    assert!(results.iter().all(|r| r.success));
}

#[tokio::test]
async fn garbage_payload_is_ignored() {
    let (d, mut rx) = dispatcher();

    let results = d
        .dispatch_message(&json!({"unexpected": true}), None, None)
        .await;

    assert!(results.is_empty());
    assert!(rx.try_recv().is_none());
}
