//! Shared helpers for the behavioral specs

use std::sync::Arc;
use tug_adapters::{group_channel, GroupReceiver, MemoryQueue, TracedQueue};
use tug_core::adapters::fake::FakeAllowlist;
use tug_core::{
    Dispatcher, Event, EventKind, EventParser, JobConfig, PackageConfig, ServiceConfig,
};

/// Initialize test logging once; safe to call from every spec
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Parser for the spec payload schema:
///
/// ```json
/// { "kind": "pull_request", "comment": "...", "jobs": [{"job": "...", "trigger": "..."}] }
/// ```
pub struct JsonParser;

impl EventParser for JsonParser {
    fn parse(&self, raw: &serde_json::Value) -> Option<Event> {
        let kind: EventKind = serde_json::from_value(raw.get("kind")?.clone()).ok()?;
        let mut event = Event::new(kind);

        if let Some(comment) = raw.get("comment").and_then(|c| c.as_str()) {
            event = event.with_comment(comment);
        }
        if let Some(jobs) = raw.get("jobs") {
            let jobs: Vec<JobConfig> = serde_json::from_value(jobs.clone()).ok()?;
            event = event.with_package_config(PackageConfig::new(jobs));
        }
        Some(event)
    }
}

/// A dispatcher wired to a traced in-process queue and an approving
/// allow-list, plus the receiving end for assertions
pub fn dispatcher() -> (
    Dispatcher<TracedQueue<MemoryQueue>, FakeAllowlist>,
    GroupReceiver,
) {
    init_tracing();
    let (queue, rx) = group_channel();
    let dispatcher = Dispatcher::new(
        ServiceConfig::default(),
        TracedQueue::new(queue),
        FakeAllowlist::approving(),
        Arc::new(JsonParser),
    );
    (dispatcher, rx)
}
