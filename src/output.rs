//! CLI output formatting for every command.
//!
//! Progress while a stage runs goes through `log`; once a stage is done, the
//! functions here print an inventory of what it produced. Entities are shown
//! by positional index and name first, with paths as indented context lines,
//! relative to the workspace root.
//!
//! # Output Format
//!
//! ## Get
//!
//! ```text
//! Fetched
//! 001 solid-state
//!     Source: https://html5up.net/solid-state/download
//!     Staged: temp/download/solid-state (57 entries, 1.4 MB)
//!     SHA-256: 5f0c...
//! ```
//!
//! ## Build
//!
//! ```text
//! Themes
//! 001 Solid-State → build/solid-state
//!     Layouts: 12 files
//!     Assets: css 4, fonts 10, js 5
//!
//! Preview
//! 001 Solid-State → http://localhost:1313/theme/solid-state/
//!     Image: post-1.jpg
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::error::ThemeFailure;
use crate::naming;
use crate::types::{AssembledTheme, FetchedTheme, PreviewedTheme};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Display a path relative to the workspace root when possible.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Human-readable byte count.
fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{bytes} B")
    }
}

pub fn format_fetch_output(fetched: &[FetchedTheme], root: &Path) -> Vec<String> {
    let mut lines = vec!["Fetched".to_string()];
    for (i, theme) in fetched.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), theme.name));
        lines.push(format!("{}Source: {}", indent(1), theme.url));
        lines.push(format!(
            "{}Staged: {} ({} entries, {})",
            indent(1),
            display_path(&theme.destination, root),
            theme.entries,
            format_size(theme.size)
        ));
        lines.push(format!("{}SHA-256: {}", indent(1), theme.sha256));
    }
    lines
}

pub fn print_fetch_output(fetched: &[FetchedTheme], root: &Path) {
    for line in format_fetch_output(fetched, root) {
        println!("{}", line);
    }
}

pub fn format_build_output(assembled: &[AssembledTheme], root: &Path) -> Vec<String> {
    let mut lines = vec!["Themes".to_string()];
    for (i, theme) in assembled.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            naming::title_case(&theme.name),
            display_path(&theme.destination, root)
        ));
        lines.push(format!("{}Layouts: {} files", indent(1), theme.layouts));
        let assets: Vec<String> = theme
            .assets
            .iter()
            .map(|(category, count)| format!("{category} {count}"))
            .collect();
        lines.push(format!("{}Assets: {}", indent(1), assets.join(", ")));
    }
    lines
}

pub fn print_build_output(assembled: &[AssembledTheme], root: &Path) {
    for line in format_build_output(assembled, root) {
        println!("{}", line);
    }
}

pub fn format_preview_output(previewed: &[PreviewedTheme]) -> Vec<String> {
    let mut lines = vec!["Preview".to_string()];
    for theme in previewed {
        lines.push(format!(
            "{} {} → {}",
            format_index(theme.weight),
            theme.title,
            theme.base_url
        ));
        lines.push(format!("{}Image: {}", indent(1), theme.image));
    }
    lines
}

pub fn print_preview_output(previewed: &[PreviewedTheme]) {
    println!();
    for line in format_preview_output(previewed) {
        println!("{}", line);
    }
}

/// List each failed theme with its error, for `--keep-going` runs.
pub fn format_failures(failures: &[ThemeFailure]) -> Vec<String> {
    let mut lines = vec![format!("Failed ({})", failures.len())];
    for failure in failures {
        lines.push(format!("{}{}: {}", indent(1), failure.theme, failure.error));
    }
    lines
}

pub fn print_failures(failures: &[ThemeFailure]) {
    if failures.is_empty() {
        return;
    }
    println!();
    for line in format_failures(failures) {
        println!("{}", line);
    }
}
