// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static handler registry
//!
//! Replaces runtime class-hierarchy dispatch with immutable tables
//! built once at startup: which event kinds each handler supports,
//! which handlers a job type triggers directly, which handlers a job
//! type requires as prerequisites, and which comment commands map to
//! which handlers.

use crate::config::JobType;
use crate::event::EventKind;
use std::collections::{BTreeSet, HashMap, HashSet};

/// A class of automation work the bot can run.
///
/// Ordered so matcher output iterates deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandlerKind {
    /// Submit a build for a changed repository
    Build,
    /// React to the build system announcing a build has started
    BuildStart,
    /// React to the build system announcing a build has finished
    BuildEnd,
    /// Process delivered test results
    TestResults,
    /// Propose an update to the downstream distribution
    ProposeUpdate,
    /// Account-level installation (no per-repository config exists)
    Installation,
    /// React to a label added on a pull request
    Label,
}

impl HandlerKind {
    pub const ALL: [HandlerKind; 7] = [
        HandlerKind::Build,
        HandlerKind::BuildStart,
        HandlerKind::BuildEnd,
        HandlerKind::TestResults,
        HandlerKind::ProposeUpdate,
        HandlerKind::Installation,
        HandlerKind::Label,
    ];

    /// Message-bus topic this handler listens on, if any
    pub fn topic(&self) -> Option<&'static str> {
        match self {
            HandlerKind::BuildStart => Some("ci.build.start"),
            HandlerKind::BuildEnd => Some("ci.build.end"),
            HandlerKind::TestResults => Some("ci.test.results"),
            _ => None,
        }
    }
}

/// Immutable lookup tables tying events, job types, and comment
/// commands to handler kinds. Built once, read-only afterwards.
pub struct Registry {
    supported_events: HashMap<HandlerKind, HashSet<EventKind>>,
    job_type_to_handlers: HashMap<JobType, BTreeSet<HandlerKind>>,
    required_job_type_to_handlers: HashMap<JobType, BTreeSet<HandlerKind>>,
    command_to_handlers: HashMap<&'static str, BTreeSet<HandlerKind>>,
}

impl Registry {
    pub fn new() -> Self {
        let mut supported_events: HashMap<HandlerKind, HashSet<EventKind>> = HashMap::new();
        supported_events.insert(
            HandlerKind::Build,
            HashSet::from([
                EventKind::PullRequest,
                EventKind::Push,
                EventKind::Release,
                EventKind::PullRequestComment,
            ]),
        );
        supported_events.insert(
            HandlerKind::BuildStart,
            HashSet::from([EventKind::BuildStarted]),
        );
        supported_events.insert(
            HandlerKind::BuildEnd,
            HashSet::from([EventKind::BuildFinished]),
        );
        supported_events.insert(
            HandlerKind::TestResults,
            HashSet::from([EventKind::TestResults]),
        );
        supported_events.insert(
            HandlerKind::ProposeUpdate,
            HashSet::from([EventKind::Release, EventKind::IssueComment]),
        );
        supported_events.insert(
            HandlerKind::Installation,
            HashSet::from([EventKind::Installation]),
        );
        supported_events.insert(HandlerKind::Label, HashSet::from([EventKind::LabelAdded]));

        let mut job_type_to_handlers: HashMap<JobType, BTreeSet<HandlerKind>> = HashMap::new();
        job_type_to_handlers.insert(
            JobType::Build,
            BTreeSet::from([
                HandlerKind::Build,
                HandlerKind::BuildStart,
                HandlerKind::BuildEnd,
            ]),
        );
        job_type_to_handlers.insert(JobType::Tests, BTreeSet::from([HandlerKind::TestResults]));
        job_type_to_handlers.insert(
            JobType::ProposeUpdate,
            BTreeSet::from([HandlerKind::ProposeUpdate]),
        );

        // Tests cannot run without a build, so a configured test job
        // pulls the build handlers in even when no build job is declared.
        let mut required_job_type_to_handlers: HashMap<JobType, BTreeSet<HandlerKind>> =
            HashMap::new();
        required_job_type_to_handlers.insert(
            JobType::Tests,
            BTreeSet::from([
                HandlerKind::Build,
                HandlerKind::BuildStart,
                HandlerKind::BuildEnd,
            ]),
        );

        let mut command_to_handlers: HashMap<&'static str, BTreeSet<HandlerKind>> = HashMap::new();
        command_to_handlers.insert("build", BTreeSet::from([HandlerKind::Build]));
        command_to_handlers.insert(
            "propose-update",
            BTreeSet::from([HandlerKind::ProposeUpdate]),
        );

        Self {
            supported_events,
            job_type_to_handlers,
            required_job_type_to_handlers,
            command_to_handlers,
        }
    }

    /// Whether `handler` declares support for the given event kind
    pub fn supports(&self, handler: HandlerKind, kind: EventKind) -> bool {
        self.supported_events
            .get(&handler)
            .map(|kinds| kinds.contains(&kind))
            .unwrap_or(false)
    }

    /// Handlers triggered directly by a declared job type
    pub fn handlers_for_job_type(&self, job: JobType) -> BTreeSet<HandlerKind> {
        self.job_type_to_handlers
            .get(&job)
            .cloned()
            .unwrap_or_default()
    }

    /// Handlers a declared job type requires as prerequisites
    pub fn handlers_required_by_job_type(&self, job: JobType) -> BTreeSet<HandlerKind> {
        self.required_job_type_to_handlers
            .get(&job)
            .cloned()
            .unwrap_or_default()
    }

    /// Handlers bound to a comment command
    pub fn handlers_for_command(&self, command: &str) -> BTreeSet<HandlerKind> {
        self.command_to_handlers
            .get(command)
            .cloned()
            .unwrap_or_default()
    }

    /// Union of message-bus topics across all registered handlers
    pub fn topics(&self) -> HashSet<&'static str> {
        HandlerKind::ALL.iter().filter_map(|h| h.topic()).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
