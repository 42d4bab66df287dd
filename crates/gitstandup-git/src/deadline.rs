// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Whole-repository time limit
//!
//! A [`Deadline`] is checked between units of git work so a repository that
//! overruns its budget stops instead of finishing in the background.

use std::time::{Duration, Instant};

use crate::error::GitError;

/// Upper bound used when `now + budget` does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Point in time by which a repository must be collected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    /// A deadline `budget` from now
    #[must_use]
    pub fn after(budget: Duration) -> Self {
        let now = Instant::now();
        let at = now
            .checked_add(budget)
            .unwrap_or_else(|| now + FAR_FUTURE);
        Self { at, budget }
    }

    /// The instant the deadline expires
    #[must_use]
    pub fn at(&self) -> Instant {
        self.at
    }

    /// The budget the deadline was created with
    #[must_use]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time left, zero once expired
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    /// Whether the deadline has passed
    #[must_use]
    pub fn expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Fail with [`GitError::TimedOut`] once the deadline has passed
    ///
    /// # Errors
    ///
    /// Returns `GitError::TimedOut` if the deadline has expired.
    pub fn check(&self) -> Result<(), GitError> {
        if self.expired() {
            Err(GitError::TimedOut {
                budget_secs: self.budget.as_secs(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_zero_budget_is_expired() {
        let deadline = Deadline::after(Duration::ZERO);
        assert!(deadline.expired());
        assert_eq!(deadline.remaining(), Duration::ZERO);
        assert_eq!(
            deadline.check().map_err(|e| e.to_string()),
            Err("Timed out after 0s".to_string())
        );
    }

    #[test]
    fn test_generous_budget_is_open() {
        let deadline = Deadline::after(Duration::from_secs(3600));
        assert!(!deadline.expired());
        assert!(deadline.remaining() > Duration::from_secs(3500));
        assert!(deadline.check().is_ok());
    }

    #[test]
    fn test_huge_budget_does_not_overflow() {
        let deadline = Deadline::after(Duration::MAX);
        assert!(!deadline.expired());
        assert_eq!(deadline.budget(), Duration::MAX);
    }
}
