// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job matching and config resolution
//!
//! [`handlers_for_event`] answers "which handler kinds must run for
//! this event", [`configs_for_handler`] answers "which declared jobs is
//! a given handler kind acting on behalf of".

use crate::command::commands_from_comment;
use crate::config::{JobConfig, PackageConfig};
use crate::event::Event;
use crate::registry::{HandlerKind, Registry};
use std::collections::BTreeSet;

/// Handler kinds bound to the command found in a comment, if any.
///
/// An empty set means the comment held no recognized command.
pub fn handlers_for_comment(registry: &Registry, comment: &str) -> BTreeSet<HandlerKind> {
    let commands = commands_from_comment(comment);
    let Some(command) = commands.first() else {
        return BTreeSet::new();
    };

    let handlers = registry.handlers_for_command(command);
    if handlers.is_empty() {
        tracing::debug!(command, "command is not supported by the bot");
    }
    handlers
}

/// All handler kinds that must run for the given event.
///
/// A handler is selected when it supports the event's concrete kind and
/// some job matching the event's trigger type maps to it, directly or
/// through a required-by declaration. For comment events the result is
/// additionally restricted to the handlers bound to the parsed command;
/// a comment without a recognized command therefore matches nothing.
pub fn handlers_for_event(
    registry: &Registry,
    event: &Event,
    package_config: &PackageConfig,
) -> BTreeSet<HandlerKind> {
    let mut jobs_matching_trigger: Vec<&JobConfig> = Vec::new();
    for job in &package_config.jobs {
        if Some(job.trigger) == event.trigger() && !jobs_matching_trigger.contains(&job) {
            jobs_matching_trigger.push(job);
        }
    }

    let comment_restriction: Option<BTreeSet<HandlerKind>> = if event.kind().is_comment() {
        Some(handlers_for_comment(
            registry,
            event.comment().unwrap_or(""),
        ))
    } else {
        None
    };

    let mut matching: BTreeSet<HandlerKind> = BTreeSet::new();
    for job in &jobs_matching_trigger {
        let mut candidates = registry.handlers_for_job_type(job.job);
        candidates.extend(registry.handlers_required_by_job_type(job.job));

        for handler in candidates {
            let allowed_by_comment = match &comment_restriction {
                None => true,
                Some(restriction) => restriction.contains(&handler),
            };
            if allowed_by_comment && registry.supports(handler, event.kind()) {
                matching.insert(handler);
            }
        }
    }

    if matching.is_empty() {
        tracing::debug!(kind = ?event.kind(), "no handler for this event and configuration");
    }
    matching
}

/// The JobConfigs a handler kind is relevant to for the given event.
///
/// First pass picks trigger-matching jobs whose type is directly mapped
/// to the handler. When that pass is empty, a fallback pass picks jobs
/// that require the handler as a prerequisite (e.g. a build handler
/// satisfying a declared test job). Source configuration order is
/// preserved within whichever pass produced results.
pub fn configs_for_handler(
    registry: &Registry,
    handler: HandlerKind,
    event: &Event,
    package_config: &PackageConfig,
) -> Vec<JobConfig> {
    let jobs_matching_trigger: Vec<&JobConfig> = package_config
        .jobs
        .iter()
        .filter(|job| Some(job.trigger) == event.trigger())
        .collect();

    let mut matching: Vec<JobConfig> = jobs_matching_trigger
        .iter()
        .filter(|job| registry.handlers_for_job_type(job.job).contains(&handler))
        .map(|job| (*job).clone())
        .collect();

    if matching.is_empty() {
        tracing::debug!(
            ?handler,
            "no directly configured job, checking jobs that require this handler"
        );
        matching = jobs_matching_trigger
            .iter()
            .filter(|job| {
                registry
                    .handlers_required_by_job_type(job.job)
                    .contains(&handler)
            })
            .map(|job| (*job).clone())
            .collect();
    }

    if matching.is_empty() {
        tracing::warn!(
            ?handler,
            kind = ?event.kind(),
            "no job configuration found for handler"
        );
    }
    matching
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
