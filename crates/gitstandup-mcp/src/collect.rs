// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Concurrent collection across repositories
//!
//! Every path gets its own blocking task and its own repository handle.
//! Results come back in input order once every task has settled, and a
//! failure, panic or timeout in one repository only affects that entry.
//! Each task receives the shared [`Deadline`] and stops its git work once it
//! passes, so a timed-out repository does not keep a blocking thread busy.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gitstandup_git::{CollectOptions, Deadline, RepoResult, collect_repo};
use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout_at};
use tracing::{info, warn};

/// Collect every repository concurrently, waiting for all of them
///
/// Each repository must finish within `repo_timeout` of the fan-out;
/// late ones are reported as timed out.
pub async fn collect_all(
    paths: &[String],
    options: &CollectOptions,
    repo_timeout: Duration,
) -> Vec<RepoResult> {
    let options = options.clone();
    settle_all(paths, repo_timeout, move |path, deadline| {
        collect_repo(path, &options.clone().with_deadline(deadline))
    })
    .await
}

/// Run `collect` for every path on the blocking pool and join in input order
///
/// `collect` is handed the deadline it is expected to honour.
pub(crate) async fn settle_all<F>(
    paths: &[String],
    repo_timeout: Duration,
    collect: F,
) -> Vec<RepoResult>
where
    F: Fn(&Path, Deadline) -> RepoResult + Clone + Send + 'static,
{
    let deadline = Deadline::after(repo_timeout);
    let wait_until = Instant::from_std(deadline.at());

    let handles: Vec<(String, JoinHandle<RepoResult>)> = paths
        .iter()
        .map(|path| {
            let collect = collect.clone();
            let owned = PathBuf::from(path);
            (path.clone(), tokio::task::spawn_blocking(move || collect(&owned, deadline)))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (path, handle) in handles {
        let result = match timeout_at(wait_until, handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!(repo = %path, error = %e, "Collection task failed");
                RepoResult::failure(&path, format!("Collection task failed: {e}"))
            }
            Err(_) => {
                // The task stops at its next deadline check; its result is dropped
                warn!(repo = %path, timeout_secs = repo_timeout.as_secs(), "Collection timed out");
                let reason = format!("Timed out after {}s", repo_timeout.as_secs());
                RepoResult::failure(&path, reason)
            }
        };
        results.push(result);
    }

    let commits: usize = results.iter().map(RepoResult::commit_count).sum();
    let failed = results.iter().filter(|r| r.error().is_some()).count();
    info!(repos = results.len(), commits, failed, "Collection complete");

    results
}
