// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Command-line subcommands
//!
//! Each subcommand runs the same handler as the matching MCP tool and
//! returns its JSON response for printing.

use std::path::PathBuf;

use serde_json::{Map, Value, json};

use crate::config::{Command, Config};
use crate::handlers::{self, HandlerError};
use crate::store::ConfigStore;

/// Resolve paths against the current directory
fn absolute_paths(paths: &[PathBuf]) -> Result<Vec<String>, HandlerError> {
    paths
        .iter()
        .map(|path| {
            std::path::absolute(path)
                .map(|abs| abs.display().to_string())
                .map_err(|e| {
                    HandlerError::InvalidInput(format!("cannot resolve '{}': {e}", path.display()))
                })
        })
        .collect()
}

fn paths_args(paths: &[PathBuf]) -> Result<Option<Map<String, Value>>, HandlerError> {
    let mut args = Map::new();
    args.insert("paths".to_string(), json!(absolute_paths(paths)?));
    Ok(Some(args))
}

/// Run a subcommand against the configured repository list
///
/// # Errors
///
/// Returns `HandlerError` for invalid input or when the store cannot be saved.
pub async fn run(config: &Config, command: &Command) -> Result<Value, HandlerError> {
    let store = ConfigStore::new(config.config_path());

    let value = match command {
        Command::Standup { hours, repos } => {
            let mut args = Map::new();
            args.insert("hours".to_string(), json!(hours));
            if !repos.is_empty() {
                args.insert("repos".to_string(), json!(absolute_paths(repos)?));
            }
            let report = handlers::handle_generate_standup(&store, Some(args), config).await?;
            serde_json::to_value(report)?
        }
        Command::Add { paths } => {
            serde_json::to_value(handlers::handle_add_repos(&store, paths_args(paths)?)?)?
        }
        Command::Remove { paths } => {
            serde_json::to_value(handlers::handle_remove_repos(&store, paths_args(paths)?)?)?
        }
        Command::List => serde_json::to_value(handlers::handle_list_repos(&store))?,
    };

    Ok(value)
}
