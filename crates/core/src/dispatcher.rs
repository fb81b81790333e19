// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The dispatcher: raw message in, task groups out
//!
//! Ties the matcher, the config resolver, the allow-list gate, and the
//! execution backend together. Each dispatch operates on its own event
//! and configuration snapshot; the only shared state is the read-only
//! [`Registry`] and [`ServiceConfig`].

use crate::adapters::{Allowlist, TaskQueue, TaskSignature};
use crate::config::{JobConfig, ServiceConfig};
use crate::event::{Event, EventKind};
use crate::matcher::{configs_for_handler, handlers_for_event};
use crate::registry::{HandlerKind, Registry};
use crate::result::TaskResult;
use std::collections::HashMap;
use std::sync::Arc;

/// Turns a raw transport payload into an [`Event`].
///
/// Parsers are pluggable per message source; returning `None` means the
/// payload is not something the bot reacts to.
pub trait EventParser: Send + Sync {
    fn parse(&self, raw: &serde_json::Value) -> Option<Event>;
}

pub struct Dispatcher<Q: TaskQueue, A: Allowlist> {
    registry: Registry,
    service_config: ServiceConfig,
    queue: Q,
    allowlist: A,
    default_parser: Arc<dyn EventParser>,
    source_parsers: HashMap<String, Arc<dyn EventParser>>,
}

impl<Q: TaskQueue, A: Allowlist> Dispatcher<Q, A> {
    pub fn new(
        service_config: ServiceConfig,
        queue: Q,
        allowlist: A,
        default_parser: Arc<dyn EventParser>,
    ) -> Self {
        Self {
            registry: Registry::new(),
            service_config,
            queue,
            allowlist,
            default_parser,
            source_parsers: HashMap::new(),
        }
    }

    /// Register a parser for a specific message source
    pub fn with_source_parser(
        mut self,
        source: impl Into<String>,
        parser: Arc<dyn EventParser>,
    ) -> Self {
        self.source_parsers.insert(source.into(), parser);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Schedule a task group for every matched handler kind.
    ///
    /// Returns synchronous acknowledgments only; submitted tasks run on
    /// the backend without the dispatcher observing them. An allow-list
    /// rejection aborts every remaining handler kind in this call.
    pub async fn dispatch_jobs(&self, event: &Event) -> Vec<TaskResult> {
        let Some(package_config) = event.package_config() else {
            // Repositories without automation config are expected, not errors.
            return vec![TaskResult::success(
                "no automation config found in the repository",
                None,
                event.clone(),
            )];
        };

        let handlers = handlers_for_event(&self.registry, event, package_config);
        if handlers.is_empty() {
            tracing::debug!(kind = ?event.kind(), "no handler suitable for this event and configuration");
            return Vec::new();
        }

        let mut last_job_configs: Vec<JobConfig> = Vec::new();
        for handler in handlers {
            let job_configs = configs_for_handler(&self.registry, handler, event, package_config);

            // Check allow-list approval per handler kind so rejections can
            // be traced back to the jobs they blocked.
            if !self.allowlist.check_and_report(
                event,
                event.project().map(|p| p.as_ref()),
                &self.service_config,
                &job_configs,
            ) {
                return job_configs
                    .into_iter()
                    .map(|job_config| {
                        TaskResult::failure(
                            "account is not allowlisted",
                            Some(job_config),
                            event.clone(),
                        )
                    })
                    .collect();
            }

            let group: Vec<TaskSignature> = job_configs
                .iter()
                .map(|job_config| TaskSignature::new(handler, event, Some(job_config)))
                .collect();
            self.submit(group).await;

            // TODO: acknowledge every handler kind's jobs, not just the
            // last one; kept for now to match the documented behavior
            // pinned in dispatcher_tests.rs.
            last_job_configs = job_configs;
        }

        last_job_configs
            .into_iter()
            .map(|job_config| TaskResult::success("job created", Some(job_config), event.clone()))
            .collect()
    }

    /// Entry point for raw transport messages.
    pub async fn dispatch_message(
        &self,
        raw: &serde_json::Value,
        topic: Option<&str>,
        source: Option<&str>,
    ) -> Vec<TaskResult> {
        // Cheap rejection of transport topics no handler listens on,
        // before any payload parsing happens.
        if let Some(topic) = topic {
            if !self.registry.topics().contains(topic) {
                tracing::debug!(topic, "topic is not handled by any registered handler");
                return Vec::new();
            }
        }

        let parser = source
            .and_then(|s| self.source_parsers.get(s))
            .unwrap_or(&self.default_parser);
        let Some(event) = parser.parse(raw) else {
            return Vec::new();
        };
        if !event.pre_check() {
            return Vec::new();
        }

        match event.project() {
            None => {
                tracing::warn!(
                    "cannot obtain project from this event, skipping private repository check"
                );
            }
            Some(project) => {
                if project.is_private() {
                    let service_with_namespace =
                        format!("{}/{}", project.hostname(), project.namespace());
                    if !self
                        .service_config
                        .namespace_enabled(&service_with_namespace)
                    {
                        tracing::info!(
                            namespace = %service_with_namespace,
                            "private repositories are not enabled by default"
                        );
                        return Vec::new();
                    }
                    tracing::debug!(
                        namespace = %service_with_namespace,
                        "private namespace enabled via configuration"
                    );
                }
            }
        }

        let results = match event.kind() {
            // Installation targets an account, not a repository, so no
            // package config with jobs exists.
            EventKind::Installation => {
                self.submit(vec![TaskSignature::new(
                    HandlerKind::Installation,
                    &event,
                    None,
                )])
                .await;
                Vec::new()
            }
            // Label handling runs even when not declared as a job.
            EventKind::LabelAdded => {
                self.submit(vec![TaskSignature::new(HandlerKind::Label, &event, None)])
                    .await;
                Vec::new()
            }
            _ => self.dispatch_jobs(&event).await,
        };

        if results.is_empty() {
            // Message accepted, nothing further to report.
            return vec![TaskResult::success("job created", None, event)];
        }
        results
    }

    /// Fire-and-forget group submission; a broker failure is logged and
    /// does not fail the dispatch.
    async fn submit(&self, group: Vec<TaskSignature>) {
        if let Err(e) = self.queue.submit_group(group).await {
            tracing::error!(error = %e, "failed to submit task group");
        }
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
