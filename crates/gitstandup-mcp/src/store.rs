// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Persistent repository list
//!
//! The list lives in a small JSON file (`{"repos": [...]}`). Loading never
//! fails: a missing, unreadable or malformed file yields an empty list.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Directory under the home directory holding the repository list
pub const CONFIG_DIR_NAME: &str = ".gitstandup";

/// File name of the repository list
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Errors from saving the repository list
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error
    #[error("Failed to write {path}: {source}")]
    Io {
        /// File or directory being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Failed to encode repository list: {0}")]
    Json(#[from] serde_json::Error),
}

/// The configured repository list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoConfig {
    /// Repository paths in insertion order, without duplicates
    #[serde(default)]
    pub repos: Vec<String>,
}

impl RepoConfig {
    /// Append paths not already present, returning the ones added
    ///
    /// Duplicates within `paths` are added once.
    pub fn add<I, S>(&mut self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = Vec::new();
        for path in paths {
            let path = path.into();
            if !self.repos.contains(&path) {
                self.repos.push(path.clone());
                added.push(path);
            }
        }
        added
    }

    /// Remove every listed path, returning the ones that were present
    pub fn remove<I, S>(&mut self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut removed = Vec::new();
        for path in paths {
            let path = path.into();
            if let Some(pos) = self.repos.iter().position(|r| *r == path) {
                self.repos.remove(pos);
                removed.push(path);
            }
        }
        removed
    }

    /// Number of configured repositories
    #[must_use]
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    /// Whether no repositories are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

/// Default location of the repository list: `~/.gitstandup/config.json`
#[must_use]
pub fn default_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// File-backed store for the repository list
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Create a store backed by the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the repository list
    ///
    /// Absence or corruption yields an empty list.
    #[must_use]
    pub fn load(&self) -> RepoConfig {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "No repository list, starting empty");
                return RepoConfig::default();
            }
        };

        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed repository list");
                RepoConfig::default()
            }
        }
    }

    /// Save the repository list, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the directory or file cannot be written.
    pub fn save(&self, config: &RepoConfig) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let data = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, data).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), repos = config.len(), "Saved repository list");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn temp_store() -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::new(dir.path().join(".gitstandup").join("config.json"));
        (dir, store)
    }

    #[test]
    fn test_add_skips_existing_and_repeated() {
        let mut config = RepoConfig {
            repos: vec!["/a".to_string()],
        };
        let added = config.add(["/a", "/b", "/b", "/c"]);
        assert_eq!(added, vec!["/b", "/c"]);
        assert_eq!(config.repos, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn test_remove_reports_present_only() {
        let mut config = RepoConfig {
            repos: vec!["/a".to_string(), "/b".to_string()],
        };
        let removed = config.remove(["/b", "/missing"]);
        assert_eq!(removed, vec!["/b"]);
        assert_eq!(config.repos, vec!["/a"]);
    }

    #[test]
    fn test_default_path_location() {
        assert!(default_path().ends_with(".gitstandup/config.json"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        fs::write(store.path(), "{ not json").expect("write");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_missing_repos_key_is_empty() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        fs::write(store.path(), "{}").expect("write");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let (_dir, store) = temp_store();
        let mut config = RepoConfig::default();
        config.add(["/work/api", "/work/web"]);

        store.save(&config).expect("save");
        assert_eq!(store.load(), config);

        let raw = fs::read_to_string(store.path()).expect("read");
        assert!(raw.contains("\n  \"repos\": ["));
    }
}
