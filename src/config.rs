//! Tool configuration module.
//!
//! Loads and validates `config.toml` from the workspace root. The file lists
//! the themes to convert and, optionally, overrides the fetch and preview
//! settings.
//!
//! ## Configuration Options
//!
//! ```toml
//! [[themes]]
//! name = "solid-state"
//! description = "A nice theme"
//!
//! [[themes]]
//! name = "massively"
//! description = "Text-heavy blog theme"
//!
//! # Everything below is optional - defaults shown
//!
//! [fetch]
//! url_template = "https://html5up.net/{name}/download"
//! timeout_secs = 120        # Per-request timeout
//! jobs = 1                  # Parallel downloads (1 = sequential)
//!
//! [preview]
//! port = 1313               # Port used in preview base URLs
//! hugo = "hugo"             # Site generator executable
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming;
use crate::types::ThemeRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Themes to convert, in processing order.
    pub themes: Vec<ThemeRecord>,
    /// Download settings.
    pub fetch: FetchConfig,
    /// Preview site settings.
    pub preview: PreviewConfig,
}

/// Download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    /// Download URL with a `{name}` placeholder for the theme name.
    pub url_template: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum concurrent downloads. Values above the core count are clamped down.
    pub jobs: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url_template: "https://html5up.net/{name}/download".to_string(),
            timeout_secs: 120,
            jobs: 1,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Preview site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Port used when deriving `http://localhost:<port>/theme/<name>/`.
    pub port: u16,
    /// Site generator executable, looked up on `PATH` when not absolute.
    pub hugo: PathBuf,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            port: 1313,
            hugo: PathBuf::from("hugo"),
        }
    }
}

impl ToolConfig {
    /// Validate theme names and settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for theme in &self.themes {
            naming::check_theme_name(&theme.name).map_err(ConfigError::Validation)?;
        }
        if !self.fetch.url_template.contains(naming::NAME_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "fetch.url_template must contain {}",
                naming::NAME_PLACEHOLDER
            )));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "fetch.timeout_secs must be non-zero".into(),
            ));
        }
        if self.fetch.jobs == 0 {
            return Err(ConfigError::Validation("fetch.jobs must be non-zero".into()));
        }
        Ok(())
    }

    /// Theme names that appear more than once, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for theme in &self.themes {
            if !seen.insert(theme.name.as_str()) && !dups.contains(&theme.name.as_str()) {
                dups.push(theme.name.as_str());
            }
        }
        dups
    }
}

/// Parse and validate a config from TOML text.
pub fn parse_config(content: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `config.toml` from the given path.
///
/// Unlike optional per-directory configs, the theme list is mandatory: a
/// missing file is an error.
pub fn load_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound(path.to_path_buf())
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    let config = parse_config(&content)?;
    for name in config.duplicate_names() {
        log::warn!("theme {name:?} is listed more than once; later entries overwrite earlier ones");
    }
    Ok(config)
}
