use super::*;
use crate::config::JobType;
use crate::event::{EventKind, TriggerType};
use serde_json::json;

fn job(job: JobType, trigger: TriggerType) -> JobConfig {
    JobConfig::new(job, trigger)
}

fn config(jobs: Vec<JobConfig>) -> PackageConfig {
    PackageConfig::new(jobs)
}

#[test]
fn no_jobs_match_a_foreign_trigger() {
    let registry = Registry::new();
    let event = Event::new(EventKind::Push);
    let config = config(vec![job(JobType::Build, TriggerType::PullRequest)]);

    assert!(handlers_for_event(&registry, &event, &config).is_empty());
}

#[test]
fn unsupported_event_kind_matches_nothing_despite_trigger() {
    let registry = Registry::new();
    // ProposeUpdate reacts to releases and issue comments only; a push
    // with a matching trigger type must still not select it.
    let event = Event::new(EventKind::Push);
    let config = config(vec![job(JobType::ProposeUpdate, TriggerType::Commit)]);

    assert!(handlers_for_event(&registry, &event, &config).is_empty());
}

#[test]
fn declared_build_job_selects_the_build_handler() {
    let registry = Registry::new();
    let event = Event::new(EventKind::PullRequest);
    let config = config(vec![job(JobType::Build, TriggerType::PullRequest)]);

    let handlers = handlers_for_event(&registry, &event, &config);
    assert_eq!(handlers, BTreeSet::from([HandlerKind::Build]));
}

#[test]
fn test_job_pulls_in_the_required_build_handler() {
    let registry = Registry::new();
    let event = Event::new(EventKind::PullRequest);
    let config = config(vec![job(JobType::Tests, TriggerType::PullRequest)]);

    // TestResults does not support pull-request events, but the build
    // handler required by the test job does.
    let handlers = handlers_for_event(&registry, &event, &config);
    assert_eq!(handlers, BTreeSet::from([HandlerKind::Build]));
}

#[test]
fn build_system_event_selects_the_start_handler_via_tests() {
    let registry = Registry::new();
    let event = Event::new(EventKind::BuildStarted);
    let config = config(vec![job(JobType::Tests, TriggerType::PullRequest)]);

    let handlers = handlers_for_event(&registry, &event, &config);
    assert_eq!(handlers, BTreeSet::from([HandlerKind::BuildStart]));
}

#[test]
fn comment_command_restricts_to_its_handlers() {
    let registry = Registry::new();
    let event = Event::new(EventKind::PullRequestComment).with_comment("/tug build");
    let config = config(vec![job(JobType::Build, TriggerType::PullRequest)]);

    let handlers = handlers_for_event(&registry, &event, &config);
    assert_eq!(handlers, BTreeSet::from([HandlerKind::Build]));
}

#[test]
fn comment_without_recognized_command_suppresses_all_handlers() {
    let registry = Registry::new();
    let config = config(vec![job(JobType::Build, TriggerType::PullRequest)]);

    let plain = Event::new(EventKind::PullRequestComment).with_comment("looks good to me");
    assert!(handlers_for_event(&registry, &plain, &config).is_empty());

    let unknown = Event::new(EventKind::PullRequestComment).with_comment("/tug frobnicate");
    assert!(handlers_for_event(&registry, &unknown, &config).is_empty());
}

#[test]
fn non_comment_events_are_unaffected_by_comment_parsing() {
    let registry = Registry::new();
    // Same configuration as above, but the event kind is not a comment:
    // matching proceeds without any restriction set.
    let event = Event::new(EventKind::PullRequest);
    let config = config(vec![job(JobType::Build, TriggerType::PullRequest)]);

    assert!(!handlers_for_event(&registry, &event, &config).is_empty());
}

#[test]
fn duplicate_jobs_are_matched_once() {
    let registry = Registry::new();
    let event = Event::new(EventKind::PullRequest);
    let config = config(vec![
        job(JobType::Build, TriggerType::PullRequest),
        job(JobType::Build, TriggerType::PullRequest),
    ]);

    assert_eq!(
        handlers_for_event(&registry, &event, &config),
        BTreeSet::from([HandlerKind::Build])
    );
}

#[test]
fn comment_handlers_come_from_the_first_token() {
    let registry = Registry::new();
    assert_eq!(
        handlers_for_comment(&registry, "/tug build fedora-rawhide"),
        BTreeSet::from([HandlerKind::Build])
    );
    assert!(handlers_for_comment(&registry, "no command here").is_empty());
}

// -- configs_for_handler --------------------------------------------------

#[test]
fn direct_pass_picks_directly_mapped_jobs() {
    let registry = Registry::new();
    let event = Event::new(EventKind::PullRequest);
    let config = config(vec![
        job(JobType::Build, TriggerType::PullRequest),
        job(JobType::Tests, TriggerType::PullRequest),
    ]);

    let configs = configs_for_handler(&registry, HandlerKind::Build, &event, &config);
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].job, JobType::Build);
}

#[test]
fn fallback_pass_picks_jobs_requiring_the_handler() {
    let registry = Registry::new();
    let event = Event::new(EventKind::PullRequest);
    let config = config(vec![job(JobType::Tests, TriggerType::PullRequest)]);

    // No build job is declared, but the test job requires the build
    // handler, so its config is what the handler runs with.
    let configs = configs_for_handler(&registry, HandlerKind::Build, &event, &config);
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].job, JobType::Tests);
}

#[test]
fn direct_pass_suppresses_the_fallback() {
    let registry = Registry::new();
    let event = Event::new(EventKind::PullRequest);
    let config = config(vec![
        job(JobType::Tests, TriggerType::PullRequest),
        job(JobType::Build, TriggerType::PullRequest),
    ]);

    let configs = configs_for_handler(&registry, HandlerKind::Build, &event, &config);
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].job, JobType::Build);
}

#[test]
fn source_order_is_preserved() {
    let registry = Registry::new();
    let event = Event::new(EventKind::PullRequest);

    let mut first = job(JobType::Build, TriggerType::PullRequest);
    first.metadata = json!({"target": "rawhide"});
    let mut second = job(JobType::Build, TriggerType::PullRequest);
    second.metadata = json!({"target": "stable"});

    let config = config(vec![first.clone(), second.clone()]);
    let configs = configs_for_handler(&registry, HandlerKind::Build, &event, &config);
    assert_eq!(configs, vec![first, second]);
}

#[test]
fn empty_resolution_is_not_an_error() {
    let registry = Registry::new();
    let event = Event::new(EventKind::PullRequest);
    let config = config(vec![job(JobType::ProposeUpdate, TriggerType::Release)]);

    assert!(configs_for_handler(&registry, HandlerKind::Build, &event, &config).is_empty());
}

#[test]
fn trigger_filter_applies_to_both_passes() {
    let registry = Registry::new();
    let event = Event::new(EventKind::PullRequest);
    let config = config(vec![
        job(JobType::Build, TriggerType::Commit),
        job(JobType::Tests, TriggerType::Commit),
    ]);

    assert!(configs_for_handler(&registry, HandlerKind::Build, &event, &config).is_empty());
}
