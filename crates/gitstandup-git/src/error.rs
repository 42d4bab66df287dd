// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitstandup-git

use thiserror::Error;

/// Errors that can occur while collecting commits
///
/// The display strings of the repository-level variants are surfaced
/// verbatim in [`RepoResult`](crate::RepoResult) errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// The path is not inside a git working tree
    #[error("Not a git repository")]
    NotARepository {
        /// The path that was searched for a repository
        path: String,
    },

    /// No `user.email` is configured for the repository
    #[error("Could not determine git user.email")]
    MissingUserEmail {
        /// The repository whose configuration was read
        path: String,
    },

    /// The repository was not collected within its deadline
    #[error("Timed out after {budget_secs}s")]
    TimedOut {
        /// The repository budget in whole seconds
        budget_secs: u64,
    },

    /// Producing the diff for a commit took longer than its time budget
    #[error("diff for {sha} exceeded {budget_secs}s budget")]
    CommitBudgetExceeded {
        /// The commit whose diff was aborted
        sha: String,
        /// The budget in whole seconds
        budget_secs: u64,
    },
}
