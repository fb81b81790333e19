// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service and package configuration
//!
//! [`ServiceConfig`] is the bot's own deployment configuration, loaded
//! from TOML. [`PackageConfig`] is the automation a repository declares
//! for itself; it arrives pre-resolved on the [`Event`](crate::Event)
//! and the core treats it as read-only.

use crate::event::TriggerType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading the service configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Deployment-level configuration for the dispatch service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// `host/namespace` pairs of private namespaces the bot may work in.
    /// Private repositories are default-deny.
    pub enabled_private_namespaces: HashSet<String>,
}

impl ServiceConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Whether a private `host/namespace` is enabled via configuration
    pub fn namespace_enabled(&self, service_with_namespace: &str) -> bool {
        self.enabled_private_namespaces
            .contains(service_with_namespace)
    }
}

/// The type of automation work a repository can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    /// Build the package in the build system
    Build,
    /// Run the test suite against a finished build
    Tests,
    /// Propose an update to the downstream distribution
    ProposeUpdate,
}

/// One declared automation job from repository configuration.
///
/// A job has exactly one trigger type. List order within a
/// [`PackageConfig`] is significant and is preserved through every
/// derived list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobConfig {
    pub job: JobType,
    pub trigger: TriggerType,
    /// Job-specific settings, opaque to the dispatch core
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl JobConfig {
    pub fn new(job: JobType, trigger: TriggerType) -> Self {
        Self {
            job,
            trigger,
            metadata: serde_json::Value::Null,
        }
    }
}

/// The ordered list of jobs a repository declares
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageConfig {
    pub jobs: Vec<JobConfig>,
}

impl PackageConfig {
    pub fn new(jobs: Vec<JobConfig>) -> Self {
        Self { jobs }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
