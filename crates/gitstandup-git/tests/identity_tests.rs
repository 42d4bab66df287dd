// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Identity resolution against an empty git configuration
//!
//! libgit2's config search path is process-wide, so these tests live in their
//! own binary and point every level at an empty directory.

use std::fs;

use git2::{ConfigLevel, Repository, Signature};
use gitstandup_git::{CollectOptions, collect_repo};
use similar_asserts::assert_eq;
use tempfile::TempDir;

fn isolate_config(empty: &TempDir) {
    for level in [
        ConfigLevel::ProgramData,
        ConfigLevel::System,
        ConfigLevel::XDG,
        ConfigLevel::Global,
    ] {
        // SAFETY: every test in this binary sets the same empty directory,
        // and no other thread reads the search path while it changes.
        unsafe {
            git2::opts::set_search_path(level, empty.path()).expect("set config search path");
        }
    }
}

#[test]
fn test_missing_user_email_fails_repository() {
    let empty = TempDir::new().expect("empty config dir");
    isolate_config(&empty);

    let dir = TempDir::new().expect("repo dir");
    let repo = Repository::init(dir.path()).expect("init repo");
    assert!(
        repo.config()
            .and_then(|c| c.get_string("user.email"))
            .is_err(),
        "fixture must have no user.email"
    );

    // Commit with an explicit signature; the identity is never written to config
    fs::write(dir.path().join("a.txt"), "a\n").expect("write file");
    let mut index = repo.index().expect("index");
    index.add_path(std::path::Path::new("a.txt")).expect("add");
    index.write().expect("write index");
    let tree = repo
        .find_tree(index.write_tree().expect("write tree"))
        .expect("find tree");
    let sig = Signature::now("Someone", "someone@example.com").expect("signature");
    repo.commit(Some("HEAD"), &sig, &sig, "First", &tree, &[])
        .expect("commit");

    let result = collect_repo(dir.path(), &CollectOptions::last_hours(24.0));

    assert_eq!(result.error(), Some("Could not determine git user.email"));
    assert!(result.commits().is_none());
}
