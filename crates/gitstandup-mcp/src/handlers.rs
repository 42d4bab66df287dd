//! Tool handlers for the MCP server
//!
//! This module implements the handlers for each MCP tool, bridging
//! MCP requests to the collector and the repository list.

use std::path::Path;

use gitstandup_git::RepoResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::collect::collect_all;
use crate::config::Config;
use crate::store::{ConfigStore, StoreError};

/// Text returned by `generate_standup` when there is nothing to collect
pub const NO_REPOS_MESSAGE: &str =
    "No repositories configured. Use add_repos tool to add repositories.";

/// Default lookback window for `generate_standup`
pub const DEFAULT_HOURS: f64 = 24.0;

// ============================================================================
// Error Types
// ============================================================================

/// Handler errors
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Invalid input - missing or malformed field
    #[error("Invalid input: {0}. Check the tool's required parameters.")]
    InvalidInput(String),

    /// The repository list could not be saved
    #[error("Could not save repository list: {0}")]
    Store(#[from] StoreError),

    /// JSON serialization error
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Input Types
// ============================================================================

/// Input for the generate_standup tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateStandupInput {
    /// Hours to look back (default 24)
    pub hours: Option<f64>,
    /// Repositories to use instead of the configured list
    pub repos: Option<Vec<String>>,
}

/// Input for the add_repos tool
#[derive(Debug, Clone, Deserialize)]
pub struct AddReposInput {
    /// Absolute repository paths
    pub paths: Vec<String>,
}

/// Input for the remove_repos tool
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveReposInput {
    /// Repository paths to remove
    pub paths: Vec<String>,
}

// ============================================================================
// Output Types
// ============================================================================

/// Aggregate figures for a standup report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandupSummary {
    /// Commits across all repositories
    pub total_commits: usize,
    /// Repositories in the report, failed ones included
    pub total_repos: usize,
    /// Human-readable window, e.g. "last 24 hours"
    pub time_range: String,
    /// Author of the first collected commit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Response from the generate_standup tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandupReport {
    /// One entry per requested repository, in request order
    pub repos: Vec<RepoResult>,
    /// Totals over `repos`
    pub summary: StandupSummary,
}

impl StandupReport {
    /// Build a report and its summary from collection results
    #[must_use]
    pub fn new(repos: Vec<RepoResult>, hours: f64) -> Self {
        let user = repos
            .iter()
            .filter_map(RepoResult::commits)
            .flatten()
            .next()
            .map(|commit| commit.author.clone());

        let summary = StandupSummary {
            total_commits: repos.iter().map(RepoResult::commit_count).sum(),
            total_repos: repos.len(),
            time_range: format!("last {hours} hours"),
            user,
        };

        Self { repos, summary }
    }

    /// Text content for the tool result
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized.
    pub fn text(&self) -> Result<String, serde_json::Error> {
        if self.repos.is_empty() {
            Ok(NO_REPOS_MESSAGE.to_string())
        } else {
            serde_json::to_string_pretty(self)
        }
    }
}

/// Response from the add_repos tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReposResponse {
    /// Paths that were not configured before
    pub added: Vec<String>,
    /// The full list after the change
    pub repos: Vec<String>,
}

impl AddReposResponse {
    /// Human-readable outcome
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Added {} repository(ies). Total: {}",
            self.added.len(),
            self.repos.len()
        )
    }
}

/// Response from the list_repos tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReposResponse {
    /// Configured repository paths
    pub repos: Vec<String>,
    /// Number of configured repositories
    pub count: usize,
}

/// Response from the remove_repos tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveReposResponse {
    /// Paths that were configured and are now gone
    pub removed: Vec<String>,
    /// The full list after the change
    pub repos: Vec<String>,
}

impl RemoveReposResponse {
    /// Human-readable outcome
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Removed {} repository(ies). Remaining: {}",
            self.removed.len(),
            self.repos.len()
        )
    }
}

// ============================================================================
// Handler Functions
// ============================================================================

/// Parse input from MCP arguments into a typed struct
pub fn parse_input<T: for<'de> Deserialize<'de>>(
    args: Option<Map<String, Value>>,
) -> Result<T, HandlerError> {
    let value = args
        .map(Value::Object)
        .unwrap_or(Value::Object(serde_json::Map::new()));
    serde_json::from_value(value).map_err(|e| HandlerError::InvalidInput(e.to_string()))
}

fn validate_hours(hours: f64) -> Result<f64, HandlerError> {
    if hours.is_finite() && hours > 0.0 {
        Ok(hours)
    } else {
        Err(HandlerError::InvalidInput(format!(
            "hours must be a positive number, got {hours}"
        )))
    }
}

fn require_absolute(paths: &[String]) -> Result<(), HandlerError> {
    match paths.iter().find(|p| !Path::new(p.as_str()).is_absolute()) {
        Some(relative) => Err(HandlerError::InvalidInput(format!(
            "repository paths must be absolute, got '{relative}'"
        ))),
        None => Ok(()),
    }
}

/// Handle the generate_standup tool
///
/// Collects recent commits from the requested or configured repositories.
pub async fn handle_generate_standup(
    store: &ConfigStore,
    args: Option<Map<String, Value>>,
    config: &Config,
) -> Result<StandupReport, HandlerError> {
    let input: GenerateStandupInput = parse_input(args)?;
    let hours = validate_hours(input.hours.unwrap_or(DEFAULT_HOURS))?;

    let paths = match input.repos {
        Some(repos) => {
            require_absolute(&repos)?;
            repos
        }
        None => store.load().repos,
    };

    if paths.is_empty() {
        debug!("No repositories to collect");
        return Ok(StandupReport::new(Vec::new(), hours));
    }

    let results = collect_all(&paths, &config.collect_options(hours), config.repo_timeout()).await;
    Ok(StandupReport::new(results, hours))
}

/// Handle the add_repos tool
pub fn handle_add_repos(
    store: &ConfigStore,
    args: Option<Map<String, Value>>,
) -> Result<AddReposResponse, HandlerError> {
    let input: AddReposInput = parse_input(args)?;
    require_absolute(&input.paths)?;

    let mut repos = store.load();
    let added = repos.add(input.paths);
    store.save(&repos)?;

    Ok(AddReposResponse {
        added,
        repos: repos.repos,
    })
}

/// Handle the list_repos tool
#[must_use]
pub fn handle_list_repos(store: &ConfigStore) -> ListReposResponse {
    let repos = store.load().repos;
    ListReposResponse {
        count: repos.len(),
        repos,
    }
}

/// Handle the remove_repos tool
///
/// Paths are matched exactly against the configured list.
pub fn handle_remove_repos(
    store: &ConfigStore,
    args: Option<Map<String, Value>>,
) -> Result<RemoveReposResponse, HandlerError> {
    let input: RemoveReposInput = parse_input(args)?;

    let mut repos = store.load();
    let removed = repos.remove(input.paths);
    store.save(&repos)?;

    Ok(RemoveReposResponse {
        removed,
        repos: repos.repos,
    })
}
