// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitstandup-git: commit collection engine for gitstandup-mcp
//!
//! This library crate collects the recent commits authored by the local user
//! in a git repository, bounded and filtered for consumption by the
//! gitstandup-mcp server.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use gitstandup_git::{CollectOptions, collect_repo};
//!
//! let result = collect_repo("/path/to/repo", &CollectOptions::last_hours(24.0));
//!
//! for c in result.commits().unwrap_or_default() {
//!     println!("{} - {}", c.hash, c.subject());
//! }
//! ```

pub mod collector;
pub mod commit;
pub mod deadline;
pub mod error;
pub mod filter;
pub mod report;
pub mod repo;
pub mod truncate;

pub use collector::{CollectOptions, collect_repo};
pub use commit::{CommitRecord, CommitStats};
pub use deadline::Deadline;
pub use error::GitError;
pub use filter::is_relevant;
pub use report::{RepoOutcome, RepoResult};
pub use repo::{DiffSummary, GitRepo};
pub use truncate::{MAX_DIFF_LINES_PER_COMMIT, truncate_diff};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::collector::{CollectOptions, collect_repo};
    pub use crate::commit::{CommitRecord, CommitStats};
    pub use crate::error::GitError;
    pub use crate::report::RepoResult;
}
