//! Preview site composition.
//!
//! The second half of the `build` command. Produces a Hugo site under
//! `preview/` that showcases every converted theme:
//!
//! - each theme's rendering of `exampleSite/` is built by the site generator
//!   into `preview/static/theme/<name>/`, served at
//!   `http://localhost:<port>/theme/<name>/`;
//! - one content bundle per theme (`preview/content/sect/<name>/`) carries the
//!   title, description and a placeholder image, weighted by config order.
//!
//! ## Output Structure
//!
//! ```text
//! preview/
//! ├── config.toml                 # copied from template/preview/
//! ├── content/
//! │   ├── _index.md               # landing page
//! │   ├── featured.jpg
//! │   └── sect/
//! │       └── solid-state/
//! │           ├── index.md        # title, description, weight
//! │           └── featured.jpg    # post-N.jpg from the placeholder pool
//! └── static/theme/
//!     └── solid-state/            # generator output
//! ```
//!
//! ## Site Generator
//!
//! The generator sits behind [`SiteGenerator`]. [`HugoCommand`] runs the
//! `hugo` executable once per theme; nothing is shared between invocations.

use crate::assemble::remove_tree;
use crate::types::{PreviewedTheme, ThemeRecord};
use crate::workspace::Workspace;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Number of `post-N.jpg` placeholder images cycled through by weight.
pub const PLACEHOLDER_POOL: usize = 6;

const LANDING_PAGE: &str = r#"---
title: "Theme Previews"
description: "Hugo ports of the html5up.net themes"
---

This is a work in progress. The goal is to create a unified set of Hugo themes from https://html5up.net/

"#;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("could not run {}: {source}", .program.display())]
    Spawn { program: PathBuf, source: io::Error },
    #[error("{} failed ({status}): {stderr}", .program.display())]
    Failed {
        program: PathBuf,
        status: String,
        stderr: String,
    },
}

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("IO error at {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("generating preview for {theme}: {source}")]
    Generator {
        theme: String,
        source: GeneratorError,
    },
    #[error("writing front matter for {theme}: {source}")]
    FrontMatter {
        theme: String,
        source: serde_yaml_ng::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PreviewError + '_ {
    move |source| PreviewError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Renders one theme's example site.
pub trait SiteGenerator {
    fn render(
        &self,
        source: &Path,
        destination: &Path,
        base_url: &str,
        theme: &str,
    ) -> Result<(), GeneratorError>;
}

/// Runs the `hugo` executable.
#[derive(Debug, Clone)]
pub struct HugoCommand {
    program: PathBuf,
}

impl HugoCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// Command-line flags for one generator run.
pub fn hugo_args(source: &Path, destination: &Path, base_url: &str, theme: &str) -> Vec<String> {
    vec![
        "--quiet".to_string(),
        "--gc".to_string(),
        format!("--baseURL={base_url}"),
        format!("--source={}", source.display()),
        format!("--destination={}", destination.display()),
        format!("--theme={theme}"),
    ]
}

impl SiteGenerator for HugoCommand {
    fn render(
        &self,
        source: &Path,
        destination: &Path,
        base_url: &str,
        theme: &str,
    ) -> Result<(), GeneratorError> {
        let output = Command::new(&self.program)
            .args(hugo_args(source, destination, base_url, theme))
            .output()
            .map_err(|source| GeneratorError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(GeneratorError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Base URL a theme's preview is served under.
pub fn base_url(port: u16, theme: &str) -> String {
    format!("http://localhost:{port}/theme/{theme}/")
}

/// Placeholder image number for a 1-based weight, cycling through the pool.
pub fn placeholder_index(weight: usize) -> usize {
    (weight.max(1) - 1) % PLACEHOLDER_POOL + 1
}

/// Front matter of a theme's preview page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    pub weight: usize,
}

/// A theme's preview page: YAML front matter between `---` fences.
pub fn render_theme_page(
    theme: &ThemeRecord,
    weight: usize,
) -> Result<String, serde_yaml_ng::Error> {
    let front = FrontMatter {
        title: theme.title(),
        description: theme.description.clone(),
        weight,
    };
    Ok(format!("---\n{}---\n\n", serde_yaml_ng::to_string(&front)?))
}

/// Composes the preview site under `preview/`.
pub struct Composer<G: SiteGenerator> {
    workspace: Workspace,
    generator: G,
    port: u16,
}

impl<G: SiteGenerator> Composer<G> {
    pub fn new(workspace: Workspace, generator: G, port: u16) -> Self {
        Self {
            workspace,
            generator,
            port,
        }
    }

    fn static_dir(&self) -> PathBuf {
        self.workspace.preview_root().join("static")
    }

    fn content_dir(&self) -> PathBuf {
        self.workspace.preview_root().join("content")
    }

    /// Compose the whole preview site, stopping at the first failure.
    pub fn compose(
        &self,
        themes: &[ThemeRecord],
        clean: bool,
    ) -> Result<Vec<PreviewedTheme>, PreviewError> {
        self.prepare(clean)?;
        themes
            .iter()
            .enumerate()
            .map(|(i, theme)| self.preview_theme(i + 1, theme))
            .collect()
    }

    /// Create the site skeleton: directories, site config and landing page.
    pub fn prepare(&self, clean: bool) -> Result<(), PreviewError> {
        let root = self.workspace.preview_root();
        if clean {
            remove_tree(&root).map_err(io_error(&root))?;
        }
        let static_dir = self.static_dir();
        let content_dir = self.content_dir();
        for dir in [&static_dir, &content_dir] {
            fs::create_dir_all(dir).map_err(io_error(dir))?;
        }

        let site_config = self.workspace.preview_template_dir().join("config.toml");
        fs::copy(&site_config, root.join("config.toml")).map_err(io_error(&site_config))?;

        let landing = content_dir.join("_index.md");
        fs::write(&landing, LANDING_PAGE).map_err(io_error(&landing))?;
        let image = self.workspace.placeholder_image(1);
        fs::copy(&image, content_dir.join("featured.jpg")).map_err(io_error(&image))?;
        Ok(())
    }

    /// Build one theme's preview and write its content bundle.
    ///
    /// `weight` is the theme's 1-based position in the config.
    pub fn preview_theme(
        &self,
        weight: usize,
        theme: &ThemeRecord,
    ) -> Result<PreviewedTheme, PreviewError> {
        let url = base_url(self.port, &theme.name);
        let destination = self.static_dir().join("theme").join(&theme.name);
        log::info!("Rendering preview for {} at {}", theme.name, url);
        self.generator
            .render(&self.workspace.example_site(), &destination, &url, &theme.name)
            .map_err(|source| PreviewError::Generator {
                theme: theme.name.clone(),
                source,
            })?;

        let bundle = self.content_dir().join("sect").join(&theme.name);
        fs::create_dir_all(&bundle).map_err(io_error(&bundle))?;
        let page = bundle.join("index.md");
        let text = render_theme_page(theme, weight).map_err(|source| PreviewError::FrontMatter {
            theme: theme.name.clone(),
            source,
        })?;
        fs::write(&page, text).map_err(io_error(&page))?;

        let index = placeholder_index(weight);
        let image = self.workspace.placeholder_image(index);
        fs::copy(&image, bundle.join("featured.jpg")).map_err(io_error(&image))?;

        Ok(PreviewedTheme {
            name: theme.name.clone(),
            title: theme.title(),
            weight,
            base_url: url,
            image: format!("post-{index}.jpg"),
        })
    }
}
