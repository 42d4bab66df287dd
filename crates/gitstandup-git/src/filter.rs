//! File relevance filtering
//!
//! Lockfiles and minified bundles are noise in a standup summary, so they are
//! dropped from the file list of a commit. The filter never touches diff text
//! or stats.

/// Substrings that mark a path as generated, matched case-insensitively
const NOISE_MARKERS: &[&str] = &["package-lock.json", "yarn.lock", ".min."];

/// Suffix shared by lockfiles of most package managers
const LOCK_SUFFIX: &str = ".lock";

/// Check whether a changed file belongs in a commit's file list
#[must_use]
pub fn is_relevant(path: &str) -> bool {
    let lower = path.to_lowercase();
    !(NOISE_MARKERS.iter().any(|marker| lower.contains(marker)) || lower.ends_with(LOCK_SUFFIX))
}

/// Keep only the relevant paths, preserving order
pub fn relevant_files<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    paths
        .into_iter()
        .map(Into::into)
        .filter(|p| is_relevant(p))
        .collect()
}
