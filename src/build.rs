use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::error::ConfigurationErrors;
use crate::identifier::BuildIdentifier;
use crate::notifier::NotificationResult;
use crate::secret::SecretToken;

/// Outcome reported by the orchestrating build system
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
}

impl BuildResult {
    pub fn is_success(self) -> bool {
        self == BuildResult::Success
    }
}

/// Record attached to a build once ZeroBug has been called for it.
///
/// Serializing it never exposes the token.
#[derive(Debug, Clone, Serialize)]
pub struct ZeroBugAction {
    pub token: SecretToken,
    pub website: String,
    pub identifier: BuildIdentifier,
    pub build_url: String,
    pub notification: NotificationResult,
}

/// A completed build and everything the notifier attached to it
#[derive(Debug, Clone, Serialize)]
pub struct BuildRecord {
    pub id: String,
    pub build_url: String,
    pub result: BuildResult,
    pub failed: bool,
    pub failure_reasons: Vec<String>,
    pub received_at: DateTime<Utc>,
    pub log: Vec<String>,
    pub actions: Vec<ZeroBugAction>,
}

impl BuildRecord {
    pub fn new(build_url: String, result: BuildResult) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            build_url,
            result,
            failed: result == BuildResult::Failure,
            failure_reasons: Vec::new(),
            received_at: Utc::now(),
            log: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Mark the build as failed because the notifier was misconfigured.
    pub fn mark_failed(&mut self, errors: &ConfigurationErrors) {
        self.failed = true;
        for message in errors.messages() {
            self.log.push(message.clone());
            self.failure_reasons.push(message);
        }
    }

    pub fn attach(&mut self, action: ZeroBugAction) {
        self.actions.push(action);
    }
}

/// Bounded in-memory history of recent builds, oldest evicted first
pub struct BuildStore {
    builds: VecDeque<BuildRecord>,
    max_builds: usize,
}

impl BuildStore {
    pub fn new(max_builds: usize) -> Self {
        Self {
            builds: VecDeque::with_capacity(max_builds),
            max_builds,
        }
    }

    pub fn insert(&mut self, build: BuildRecord) {
        if self.max_builds == 0 {
            return;
        }
        while self.builds.len() >= self.max_builds {
            self.builds.pop_front();
        }
        self.builds.push_back(build);
    }

    pub fn get(&self, id: &str) -> Option<&BuildRecord> {
        self.builds.iter().find(|build| build.id == id)
    }

    /// Most recent first.
    pub fn recent(&self, limit: usize) -> Vec<BuildRecord> {
        self.builds.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.builds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builds.is_empty()
    }
}
