//! Types shared across the fetch, assemble and preview stages.

use crate::naming;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One configured theme.
///
/// Records keep the order they were declared in `config.toml`; every stage
/// walks them in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeRecord {
    /// html5up.net slug, e.g. `solid-state`. Used as directory and Hugo theme name.
    pub name: String,
    /// Free-form description copied into `theme.toml` and the preview page.
    #[serde(default)]
    pub description: String,
}

impl ThemeRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Display title derived from the name (`solid-state` → `Solid-State`).
    pub fn title(&self) -> String {
        naming::title_case(&self.name)
    }
}

/// Report for one downloaded and extracted theme archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedTheme {
    pub name: String,
    pub url: String,
    /// Staging directory the archive was extracted into.
    pub destination: PathBuf,
    /// Archive size in bytes.
    pub size: u64,
    /// Lowercase hex SHA-256 of the archive body.
    pub sha256: String,
    /// Number of entries (files and directories) in the archive.
    pub entries: usize,
}

/// Report for one assembled Hugo theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledTheme {
    pub name: String,
    pub destination: PathBuf,
    /// Distinct layout files in the output after the overlay.
    pub layouts: usize,
    /// Files copied per asset category, in category order.
    pub assets: Vec<(String, usize)>,
}

/// Report for one theme entry of the preview site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewedTheme {
    pub name: String,
    pub title: String,
    /// 1-based position in the config, used as page weight.
    pub weight: usize,
    pub base_url: String,
    /// File name of the placeholder image used as `featured.jpg`.
    pub image: String,
}
