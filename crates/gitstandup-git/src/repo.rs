// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git repository access
//!
//! This module wraps a `git2` repository with the queries the collector
//! needs: identity resolution, the author-scoped log across all refs, and
//! per-commit diffs against the first parent.

use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Utc};
use git2::{DiffFormat, DiffOptions, Oid, Repository, Sort};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::deadline::Deadline;
use crate::error::GitError;

/// Consecutive commits older than the window seen before the walk stops
///
/// Mirrors the slop `git log --since` allows for skewed commit dates. An
/// in-window commit is only reached through out-of-window ones when its
/// descendants carry backdated committer dates; if more than this many
/// older commits are popped first, such a commit is missed, as it is by
/// `git log --since`.
const OLD_COMMIT_SLOP: usize = 5;

/// Diffstat of a commit against its first parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    /// Number of files changed
    pub files_changed: usize,
    /// Total lines added
    pub insertions: usize,
    /// Total lines deleted
    pub deletions: usize,
    /// Changed paths in diff order, unfiltered
    pub files: Vec<String>,
}

impl DiffSummary {
    /// Create an empty diff summary
    #[must_use]
    pub fn empty() -> Self {
        Self {
            files_changed: 0,
            insertions: 0,
            deletions: 0,
            files: Vec::new(),
        }
    }
}

/// Diffstat and full patch text of one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDiff {
    /// Diffstat over every changed file
    pub summary: DiffSummary,
    /// Unified diff text, untruncated
    pub patch: String,
}

/// A git repository wrapper for collecting commits
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Discover the working tree containing the given path
    ///
    /// Subdirectories of a working tree are accepted. Bare repositories and
    /// paths outside any repository are rejected.
    ///
    /// # Errors
    ///
    /// Returns `GitError::NotARepository` if no working tree contains `path`.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let not_a_repo = || GitError::NotARepository {
            path: path.display().to_string(),
        };

        let repo = Repository::discover(path).map_err(|_| not_a_repo())?;
        if repo.is_bare() {
            return Err(not_a_repo());
        }
        Ok(Self { repo })
    }

    /// Get the working directory path
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Resolve the `user.email` identity effective for this repository
    ///
    /// # Errors
    ///
    /// Returns `GitError::MissingUserEmail` if no non-blank email is configured.
    pub fn user_email(&self) -> Result<String, GitError> {
        let missing = || GitError::MissingUserEmail {
            path: self.repo.path().display().to_string(),
        };
        let config = self.repo.config().map_err(|_| missing())?;
        user_email_from(&config).ok_or_else(missing)
    }

    /// Find commits authored by `email` since the given time, across all refs
    ///
    /// Commits are returned newest first, the order `git log` prints them.
    /// The window applies to the committer time. The walk is abandoned once
    /// `deadline` passes.
    ///
    /// # Errors
    ///
    /// Returns `GitError::TimedOut` when the deadline passes, or
    /// `GitError::Git2` if the references cannot be walked.
    pub fn authored_since(
        &self,
        email: &str,
        since: DateTime<Utc>,
        deadline: Option<&Deadline>,
    ) -> Result<Vec<Oid>, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;

        // Every ref that peels to a commit, plus a possibly detached HEAD
        for reference in self.repo.references()? {
            if let Ok(commit) = reference?.peel_to_commit() {
                revwalk.push(commit.id())?;
            }
        }
        if let Ok(head) = self.repo.head().and_then(|h| h.peel_to_commit()) {
            revwalk.push(head.id())?;
        }

        let cutoff = since.timestamp();
        let mut matches = Vec::new();
        let mut old_streak = 0;

        for oid in revwalk {
            if let Some(deadline) = deadline {
                deadline.check()?;
            }
            let commit = self.repo.find_commit(oid?)?;

            if commit.committer().when().seconds() < cutoff {
                old_streak += 1;
                if old_streak >= OLD_COMMIT_SLOP {
                    break;
                }
                continue;
            }
            old_streak = 0;

            let author = commit.author();
            let matches_identity = author
                .email()
                .is_some_and(|e| e.trim().eq_ignore_ascii_case(email));
            if matches_identity {
                matches.push(commit.id());
            }
        }

        debug!(count = matches.len(), %since, "Matched authored commits");
        Ok(matches)
    }

    /// Look up a commit by id
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the object is missing or not a commit.
    pub fn find_commit(&self, oid: Oid) -> Result<git2::Commit<'_>, GitError> {
        Ok(self.repo.find_commit(oid)?)
    }

    /// Diff a commit against its first parent, or the empty tree for a root commit
    ///
    /// The budget clock starts before the trees are diffed. Rename detection
    /// and the diffstat cannot be interrupted, so an overrun there is caught
    /// right after them; patch rendering is aborted as soon as `budget` has
    /// elapsed.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommitBudgetExceeded` when the budget runs out, or
    /// `GitError::Git2` if trees or blobs cannot be read.
    pub fn commit_diff(
        &self,
        git_commit: &git2::Commit<'_>,
        budget: Duration,
    ) -> Result<CommitDiff, GitError> {
        let started = Instant::now();
        let exceeded = || GitError::CommitBudgetExceeded {
            sha: git_commit.id().to_string(),
            budget_secs: budget.as_secs(),
        };
        let tree = git_commit.tree()?;

        let parent_tree = if git_commit.parent_count() > 0 {
            Some(git_commit.parent(0)?.tree()?)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        opts.ignore_whitespace(false);

        let mut diff =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
        diff.find_similar(None)?;

        let stats = diff.stats()?;
        if started.elapsed() > budget {
            return Err(exceeded());
        }
        let files: Vec<String> = diff
            .deltas()
            .map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<unknown>".to_string())
            })
            .collect();

        let mut patch = Vec::new();
        let mut over_budget = false;
        let printed = diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            if started.elapsed() > budget {
                over_budget = true;
                return false;
            }
            if matches!(line.origin(), '+' | '-' | ' ') {
                patch.push(line.origin() as u8);
            }
            patch.extend_from_slice(line.content());
            true
        });

        if over_budget {
            return Err(exceeded());
        }
        printed?;

        Ok(CommitDiff {
            summary: DiffSummary {
                files_changed: stats.files_changed(),
                insertions: stats.insertions(),
                deletions: stats.deletions(),
                files,
            },
            patch: String::from_utf8_lossy(&patch).into_owned(),
        })
    }
}

/// Read a non-blank `user.email` from a git configuration
#[must_use]
pub fn user_email_from(config: &git2::Config) -> Option<String> {
    config
        .get_string("user.email")
        .ok()
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty())
}

/// Render a commit's author date as strict ISO-8601, like `git log --format=%aI`
#[must_use]
pub fn author_timestamp(git_commit: &git2::Commit<'_>) -> String {
    let when = git_commit.author().when();
    let utc = Utc
        .timestamp_opt(when.seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    match FixedOffset::east_opt(when.offset_minutes() * 60) {
        Some(offset) => utc
            .with_timezone(&offset)
            .to_rfc3339_opts(SecondsFormat::Secs, false),
        None => utc.to_rfc3339_opts(SecondsFormat::Secs, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_discover_nonexistent_path() {
        let result = GitRepo::discover("/nonexistent/path/for/gitstandup");
        match result {
            Err(GitError::NotARepository { path }) => {
                assert!(path.contains("nonexistent"));
            }
            _ => panic!("Expected NotARepository error"),
        }
    }

    #[test]
    fn test_discover_bare_repository_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        Repository::init_bare(dir.path()).expect("init bare");
        assert!(matches!(
            GitRepo::discover(dir.path()),
            Err(GitError::NotARepository { .. })
        ));
    }

    #[test]
    fn test_user_email_from_empty_config() {
        let config = git2::Config::new().expect("config");
        assert_eq!(user_email_from(&config), None);
    }

    #[test]
    fn test_user_email_from_file_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gitconfig");
        std::fs::write(&path, "[user]\n\temail = \"  dev@example.com  \"\n").expect("write");
        let config = git2::Config::open(&path).expect("open config");
        assert_eq!(user_email_from(&config), Some("dev@example.com".to_string()));
    }

    #[test]
    fn test_user_email_blank_is_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gitconfig");
        std::fs::write(&path, "[user]\n\temail = \"   \"\n").expect("write");
        let config = git2::Config::open(&path).expect("open config");
        assert_eq!(user_email_from(&config), None);
    }

    #[test]
    fn test_diff_summary_empty() {
        let summary = DiffSummary::empty();
        assert_eq!(summary.files_changed, 0);
        assert!(summary.files.is_empty());
    }
}
