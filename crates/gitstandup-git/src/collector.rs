// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Single-repository commit collection
//!
//! [`collect_repo`] never fails: repository-level problems become
//! [`RepoResult`] errors, and a commit whose diff cannot be produced is
//! skipped on its own while the rest of the repository is still reported.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use git2::Oid;
use tracing::{debug, info, warn};

use crate::commit::{CommitRecord, CommitStats};
use crate::deadline::Deadline;
use crate::error::GitError;
use crate::filter::relevant_files;
use crate::report::RepoResult;
use crate::repo::{GitRepo, author_timestamp};
use crate::truncate::{MAX_DIFF_LINES_PER_COMMIT, truncate_diff};

/// Default lookback window in hours
pub const DEFAULT_LOOKBACK_HOURS: f64 = 24.0;

/// Default time budget for producing one commit's diff
pub const DEFAULT_COMMIT_BUDGET: Duration = Duration::from_secs(30);

/// Configuration for collecting one repository
#[derive(Debug, Clone, PartialEq)]
pub struct CollectOptions {
    /// Lookback window, in hours before now
    pub hours_ago: f64,
    /// Line budget for each commit's diff text
    pub max_diff_lines: usize,
    /// Time budget for producing each commit's diff
    pub commit_budget: Duration,
    /// Time limit for the whole repository
    pub deadline: Option<Deadline>,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            hours_ago: DEFAULT_LOOKBACK_HOURS,
            max_diff_lines: MAX_DIFF_LINES_PER_COMMIT,
            commit_budget: DEFAULT_COMMIT_BUDGET,
            deadline: None,
        }
    }
}

impl CollectOptions {
    /// Create options for a window of the last `hours` hours
    #[must_use]
    pub fn last_hours(hours: f64) -> Self {
        Self {
            hours_ago: hours,
            ..Default::default()
        }
    }

    /// Set the per-commit time budget
    #[must_use]
    pub fn with_commit_budget(mut self, budget: Duration) -> Self {
        self.commit_budget = budget;
        self
    }

    /// Set the per-commit diff line budget
    #[must_use]
    pub fn with_max_diff_lines(mut self, lines: usize) -> Self {
        self.max_diff_lines = lines;
        self
    }

    /// Stop collecting once `deadline` passes
    #[must_use]
    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Budget for the next commit's diff, never past the deadline
    #[must_use]
    pub fn commit_budget_now(&self) -> Duration {
        match &self.deadline {
            Some(deadline) => self.commit_budget.min(deadline.remaining()),
            None => self.commit_budget,
        }
    }

    /// Fail once the repository deadline has passed
    fn check_deadline(&self) -> Result<(), GitError> {
        self.deadline.as_ref().map_or(Ok(()), Deadline::check)
    }

    /// Start of the window relative to `now`
    ///
    /// Windows reaching past the representable range start at the minimum
    /// timestamp instead of overflowing.
    #[must_use]
    pub fn since(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let millis = (self.hours_ago * 3_600_000.0).round() as i64;
        TimeDelta::try_milliseconds(millis)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Collect the local user's recent commits from one repository
pub fn collect_repo(path: impl AsRef<Path>, options: &CollectOptions) -> RepoResult {
    let path = path.as_ref();
    match try_collect(path, options) {
        Ok(commits) => {
            info!(repo = %path.display(), commits = commits.len(), "Collected commits");
            RepoResult::success(path, commits)
        }
        Err(e) => {
            warn!(repo = %path.display(), error = %e, "Repository collection failed");
            RepoResult::failure(path, e.to_string())
        }
    }
}

fn try_collect(path: &Path, options: &CollectOptions) -> Result<Vec<CommitRecord>, GitError> {
    let repo = GitRepo::discover(path)?;
    let email = repo.user_email()?;
    let since = options.since(Utc::now());

    let oids = repo.authored_since(&email, since, options.deadline.as_ref())?;
    debug!(repo = %path.display(), %email, matched = oids.len(), "Log query complete");

    let mut commits = Vec::with_capacity(oids.len());
    for oid in oids {
        options.check_deadline()?;
        match build_record(&repo, oid, &email, options) {
            Ok(record) => commits.push(record),
            Err(e) => warn!(commit = %oid, error = %e, "Skipping commit"),
        }
    }
    Ok(commits)
}

fn build_record(
    repo: &GitRepo,
    oid: Oid,
    email: &str,
    options: &CollectOptions,
) -> Result<CommitRecord, GitError> {
    let git_commit = repo.find_commit(oid)?;
    let diff = repo.commit_diff(&git_commit, options.commit_budget_now())?;

    Ok(CommitRecord {
        hash: CommitRecord::short_hash(&oid.to_string()),
        message: String::from_utf8_lossy(git_commit.message_bytes())
            .trim_end()
            .to_string(),
        author: email.to_string(),
        timestamp: author_timestamp(&git_commit),
        files: relevant_files(diff.summary.files),
        diff: truncate_diff(&diff.patch, options.max_diff_lines),
        stats: CommitStats {
            additions: diff.summary.insertions,
            deletions: diff.summary.deletions,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use similar_asserts::assert_eq;

    #[test]
    fn test_default_options() {
        let options = CollectOptions::default();
        assert_eq!(options.hours_ago, 24.0);
        assert_eq!(options.max_diff_lines, 2000);
        assert_eq!(options.commit_budget, Duration::from_secs(30));
    }

    #[test]
    fn test_options_builder() {
        let options = CollectOptions::last_hours(48.0)
            .with_commit_budget(Duration::from_secs(5))
            .with_max_diff_lines(100);
        assert_eq!(options.hours_ago, 48.0);
        assert_eq!(options.commit_budget, Duration::from_secs(5));
        assert_eq!(options.max_diff_lines, 100);
    }

    #[test]
    fn test_since_is_wall_clock_window() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let since = CollectOptions::last_hours(24.0).since(now);
        assert_eq!(since, Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_since_fractional_hours() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let since = CollectOptions::last_hours(1.5).since(now);
        assert_eq!(since, Utc.with_ymd_and_hms(2026, 3, 2, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_since_saturates_on_huge_window() {
        let now = Utc::now();
        let since = CollectOptions::last_hours(f64::MAX).since(now);
        assert_eq!(since, DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_commit_budget_capped_by_deadline() {
        let options = CollectOptions::default().with_deadline(Deadline::after(Duration::ZERO));
        assert_eq!(options.commit_budget_now(), Duration::ZERO);

        let options =
            CollectOptions::default().with_deadline(Deadline::after(Duration::from_secs(3600)));
        assert_eq!(options.commit_budget_now(), DEFAULT_COMMIT_BUDGET);
        assert!(options.check_deadline().is_ok());
    }

    #[test]
    fn test_collect_non_repository_never_panics() {
        let result = collect_repo("/nonexistent/gitstandup/repo", &CollectOptions::default());
        assert_eq!(result.error(), Some("Not a git repository"));
        assert_eq!(result.name, "repo");
    }
}
