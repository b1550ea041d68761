//! Naming rules shared by every stage.
//!
//! A theme name does three jobs at once: it is a path component under
//! `temp/download/`, `build/` and `preview/`, it is substituted into the
//! download URL, and it is the Hugo `--theme` argument. This module holds the
//! small pure functions that derive everything else from it.
//!
//! ## Display Titles
//!
//! Titles capitalize the first letter of every word. A word starts at the
//! beginning of the name or after any character that is neither alphanumeric
//! nor `_`, so dashes are kept and underscores join words:
//! - `solid-state` → "Solid-State"
//! - `hyperspace` → "Hyperspace"
//! - `story 2` → "Story 2"
//! - `my_theme` → "My_theme"

/// Placeholder replaced by the theme name in URL templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Capitalize the first letter of every word, leaving everything else as-is.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

/// Substitute a theme name into a URL template.
pub fn download_url(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

/// Check that a theme name is usable as a single path component.
///
/// Returns a human-readable reason on rejection.
pub fn check_theme_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("theme name must not be empty".into());
    }
    if name.contains(['/', '\\']) {
        return Err(format!("theme name {name:?} must not contain path separators"));
    }
    if name.chars().any(char::is_control) {
        return Err(format!("theme name {name:?} must not contain control characters"));
    }
    if name == "." || name == ".." {
        return Err(format!("theme name {name:?} is not a directory name"));
    }
    Ok(())
}
