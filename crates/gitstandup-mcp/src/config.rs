//! Configuration for the gitstandup-mcp server
//!
//! This module provides configuration types and utilities for the MCP server,
//! including the repository list location, time budgets, and logging options.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use gitstandup_git::CollectOptions;

/// Default per-repository time budget in seconds
pub const DEFAULT_REPO_TIMEOUT_SECS: u64 = 120;

/// Default per-commit time budget in seconds
pub const DEFAULT_COMMIT_TIMEOUT_SECS: u64 = 30;

/// Gitstandup MCP Server - summarize your recent commits for standups
#[derive(Parser, Debug, Clone)]
#[command(name = "gitstandup-mcp")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to MCP server mode)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the repository list file
    ///
    /// If the file doesn't exist, the list starts empty and the file is
    /// created on the first add. Defaults to ~/.gitstandup/config.json.
    #[arg(short, long, env = "GITSTANDUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seconds allowed for collecting one repository
    #[arg(long, env = "GITSTANDUP_REPO_TIMEOUT", default_value_t = DEFAULT_REPO_TIMEOUT_SECS)]
    pub repo_timeout: u64,

    /// Seconds allowed for producing one commit's diff
    #[arg(long, env = "GITSTANDUP_COMMIT_TIMEOUT", default_value_t = DEFAULT_COMMIT_TIMEOUT_SECS)]
    pub commit_timeout: u64,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr to avoid interfering with MCP stdio
    /// transport.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command: None,
            config: None,
            repo_timeout: DEFAULT_REPO_TIMEOUT_SECS,
            commit_timeout: DEFAULT_COMMIT_TIMEOUT_SECS,
            verbose: false,
            quiet: false,
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Collect recent commits and print the standup report as JSON
    ///
    /// Example:
    ///   gitstandup-mcp standup --hours 48 --repo ~/src/api --repo ~/src/web
    Standup {
        /// Lookback window in hours
        #[arg(long, default_value_t = 24.0)]
        hours: f64,

        /// Repository to collect instead of the configured list (repeatable)
        #[arg(long = "repo", value_name = "PATH")]
        repos: Vec<PathBuf>,
    },

    /// Add repositories to the configured list
    Add {
        /// Repository paths
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Remove repositories from the configured list
    Remove {
        /// Repository paths
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the configured repository list
    List,
}

impl Config {
    /// Get the repository list path, using a default if not specified
    ///
    /// The default is `.gitstandup/config.json` under the home directory,
    /// or under the current directory when no home directory is known.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(crate::store::default_path)
    }

    /// Per-repository time budget
    #[must_use]
    pub fn repo_timeout(&self) -> Duration {
        Duration::from_secs(self.repo_timeout)
    }

    /// Per-commit time budget
    #[must_use]
    pub fn commit_timeout(&self) -> Duration {
        Duration::from_secs(self.commit_timeout)
    }

    /// Collection options for a lookback window of `hours`
    #[must_use]
    pub fn collect_options(&self, hours: f64) -> CollectOptions {
        CollectOptions::last_hours(hours).with_commit_budget(self.commit_timeout())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either time budget is zero
    /// - The repository list path is an existing directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repo_timeout == 0 {
            return Err(ConfigError::ZeroTimeout("repo-timeout"));
        }
        if self.commit_timeout == 0 {
            return Err(ConfigError::ZeroTimeout("commit-timeout"));
        }

        let path = self.config_path();
        if path.is_dir() {
            return Err(ConfigError::ConfigIsDirectory(path));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A time budget was set to zero
    #[error("--{0} must be at least 1 second")]
    ZeroTimeout(&'static str),

    /// The repository list path points at a directory
    #[error("Config path is a directory: {0}")]
    ConfigIsDirectory(PathBuf),
}
