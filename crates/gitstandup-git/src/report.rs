// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-repository collection results

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::commit::CommitRecord;

/// Outcome of collecting one repository
///
/// Serialized as either a `commits` or an `error` key, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoOutcome {
    /// Collection succeeded; the list may be empty
    Commits(Vec<CommitRecord>),
    /// Collection failed with a human-readable reason
    Error(String),
}

/// Result of collecting one repository path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoResult {
    /// Basename of the repository path
    pub name: String,
    /// The path exactly as requested
    pub path: String,
    /// Commits or failure reason
    #[serde(flatten)]
    pub outcome: RepoOutcome,
}

impl RepoResult {
    /// Create a successful result
    #[must_use]
    pub fn success(path: impl AsRef<Path>, commits: Vec<CommitRecord>) -> Self {
        Self::with_outcome(path.as_ref(), RepoOutcome::Commits(commits))
    }

    /// Create a failed result
    #[must_use]
    pub fn failure(path: impl AsRef<Path>, error: impl Into<String>) -> Self {
        Self::with_outcome(path.as_ref(), RepoOutcome::Error(error.into()))
    }

    fn with_outcome(path: &Path, outcome: RepoOutcome) -> Self {
        Self {
            name: repo_name(path),
            path: path.display().to_string(),
            outcome,
        }
    }

    /// Collected commits, if collection succeeded
    #[must_use]
    pub fn commits(&self) -> Option<&[CommitRecord]> {
        match &self.outcome {
            RepoOutcome::Commits(commits) => Some(commits),
            RepoOutcome::Error(_) => None,
        }
    }

    /// Failure reason, if collection failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            RepoOutcome::Commits(_) => None,
            RepoOutcome::Error(error) => Some(error),
        }
    }

    /// Number of collected commits (zero on failure)
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits().map_or(0, <[CommitRecord]>::len)
    }
}

/// Basename of a repository path, falling back to the whole path
///
/// Trailing separators are ignored, so `/work/api/` names `api`.
#[must_use]
pub fn repo_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
