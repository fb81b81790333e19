// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch acknowledgments
//!
//! A [`TaskResult`] reflects a scheduling decision made synchronously
//! by the dispatcher, not the eventual outcome of the submitted task.

use crate::config::JobConfig;
use crate::event::Event;

#[derive(Debug, Clone)]
pub struct TaskResult {
    pub success: bool,
    pub msg: String,
    pub job_config: Option<JobConfig>,
    pub event: Event,
}

impl TaskResult {
    pub fn success(msg: impl Into<String>, job_config: Option<JobConfig>, event: Event) -> Self {
        Self {
            success: true,
            msg: msg.into(),
            job_config,
            event,
        }
    }

    pub fn failure(msg: impl Into<String>, job_config: Option<JobConfig>, event: Event) -> Self {
        Self {
            success: false,
            msg: msg.into(),
            job_config,
            event,
        }
    }
}
