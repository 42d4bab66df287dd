//! Commit record types

use serde::{Deserialize, Serialize};

/// Length of the abbreviated commit hash in a record
pub const SHORT_HASH_LEN: usize = 7;

/// Line counts of a commit's full diffstat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    /// Lines added
    pub additions: usize,
    /// Lines deleted
    pub deletions: usize,
}

/// One commit authored by the local user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Abbreviated commit hash (7 hex characters)
    pub hash: String,
    /// Full commit message
    pub message: String,
    /// Identity the commit was collected for (the repository's user.email)
    pub author: String,
    /// Author date, strict ISO-8601 in the recorded offset
    pub timestamp: String,
    /// Changed paths with lockfiles and minified files removed
    pub files: Vec<String>,
    /// Unified diff against the first parent, possibly truncated
    pub diff: String,
    /// Diffstat over every changed file, independent of truncation
    pub stats: CommitStats,
}

impl CommitRecord {
    /// Abbreviate a full SHA to [`SHORT_HASH_LEN`] characters
    #[must_use]
    pub fn short_hash(sha: &str) -> String {
        sha.chars().take(SHORT_HASH_LEN).collect()
    }

    /// Validate that a hash is a 7-character hex string
    #[must_use]
    pub fn is_valid_short_hash(hash: &str) -> bool {
        hash.len() == SHORT_HASH_LEN && hash.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
