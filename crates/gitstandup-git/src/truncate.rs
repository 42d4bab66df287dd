// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line-based diff truncation
//!
//! Large diffs are cut down to a fixed line budget, keeping the head and the
//! tail of the change so both the first and last touched files stay visible.

/// Line budget applied to the diff text of a single commit
pub const MAX_DIFF_LINES_PER_COMMIT: usize = 2000;

/// Truncate a diff to at most `max_lines` lines plus one marker line
///
/// Lines are the `\n`-separated pieces of `diff`. Text within budget is
/// returned unchanged. Otherwise the first and last `max_lines / 2` lines are
/// kept around a marker reporting `total - max_lines` omitted lines.
#[must_use]
pub fn truncate_diff(diff: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = diff.split('\n').collect();
    if lines.len() <= max_lines {
        return diff.to_string();
    }

    let half = max_lines / 2;
    let marker = omitted_marker(lines.len() - max_lines);

    let mut out = Vec::with_capacity(half * 2 + 1);
    out.extend_from_slice(&lines[..half]);
    out.push(marker.as_str());
    out.extend_from_slice(&lines[lines.len() - half..]);
    out.join("\n")
}

fn omitted_marker(count: usize) -> String {
    format!("... ({count} lines omitted) ...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn numbered(n: usize) -> String {
        (1..=n)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_within_budget_is_unchanged() {
        let diff = numbered(10);
        assert_eq!(truncate_diff(&diff, 10), diff);
        assert_eq!(truncate_diff(&diff, 2000), diff);
    }

    #[test]
    fn test_empty_diff() {
        assert_eq!(truncate_diff("", 4), "");
    }

    #[test]
    fn test_keeps_head_and_tail() {
        let diff = numbered(10);
        let out = truncate_diff(&diff, 4);
        assert_eq!(
            out,
            "line 1\nline 2\n... (6 lines omitted) ...\nline 9\nline 10"
        );
    }

    #[test]
    fn test_odd_budget_rounds_halves_down() {
        let diff = numbered(10);
        let out = truncate_diff(&diff, 5);
        assert_eq!(out.split('\n').count(), 5);
        assert!(out.contains("... (5 lines omitted) ..."));
        assert!(out.starts_with("line 1\nline 2\n"));
        assert!(out.ends_with("line 9\nline 10"));
    }

    #[test]
    fn test_zero_budget_leaves_only_marker() {
        let out = truncate_diff("a\nb\nc", 0);
        assert_eq!(out, "... (3 lines omitted) ...");
    }

    #[test]
    fn test_trailing_newline_counts_as_line() {
        // "a\nb\nc\n" splits into four pieces, the last one empty
        let out = truncate_diff("a\nb\nc\n", 2);
        assert_eq!(out, "a\n... (2 lines omitted) ...\n");
    }

    #[test]
    fn test_diff_headers_are_plain_lines() {
        let diff = "diff --git a/x b/x\n--- a/x\n+++ b/x\n@@ -1 +1 @@\n-old\n+new";
        let out = truncate_diff(diff, 2);
        assert_eq!(out, "diff --git a/x b/x\n... (4 lines omitted) ...\n+new");
    }
}
