//! Hugo theme assembly.
//!
//! The first half of the `build` command. Turns the staged archives from
//! `get` plus the shared templates into one Hugo theme per configured entry.
//!
//! ## Steps Per Theme
//!
//! 1. Create `build/<name>/`, `layouts/` and `static/assets/`
//! 2. Render `template/theme.toml` (Tera) with `name`, `description`, `title`.
//!    Values placed in TOML strings go through the `toml` filter, which
//!    emits a complete quoted TOML string: `description = {{ description | toml }}`
//! 3. Copy `template/layouts/` into the theme's `layouts/`
//! 4. Overlay `template/themes/<name>/layouts/` if it exists: files at the
//!    same relative path replace the shared ones
//! 5. Copy `css`, `fonts` and `js` from `temp/download/<name>/assets/`
//!
//! A missing asset category is an error, not an empty directory: it almost
//! always means `get` was not run or the archive layout changed upstream.
//!
//! ## Output Structure
//!
//! ```text
//! build/
//! └── solid-state/
//!     ├── theme.toml
//!     ├── layouts/
//!     │   ├── _default/baseof.html     # shared
//!     │   └── partials/header.html     # overlaid by themes/solid-state/
//!     └── static/assets/
//!         ├── css/
//!         ├── fonts/
//!         └── js/
//! ```

use crate::types::{AssembledTheme, ThemeRecord};
use crate::workspace::{ASSET_CATEGORIES, Workspace};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("IO error at {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("rendering theme.toml for {theme}: {}", render_chain(.source))]
    Template { theme: String, source: tera::Error },
    #[error("{theme}: asset directory {category} is missing ({})", .path.display())]
    AssetMissing {
        theme: String,
        category: String,
        path: PathBuf,
    },
}

/// Tera hides the useful part of a render error in its source chain.
fn render_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> AssembleError + '_ {
    move |source| AssembleError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Render the metadata template for one theme.
///
/// Available variables: `name`, `description`, `title`. Available filter:
/// `toml`, which quotes a string as a TOML value.
pub fn render_metadata(template: &str, theme: &ThemeRecord) -> Result<String, tera::Error> {
    let mut ctx = tera::Context::new();
    ctx.insert("name", &theme.name);
    ctx.insert("description", &theme.description);
    ctx.insert("title", &theme.title());

    let mut tera = tera::Tera::default();
    tera.autoescape_on(vec![]);
    tera.register_filter("toml", toml_filter);
    tera.render_str(template, &ctx)
}

/// `{{ value | toml }}`: a string as a quoted TOML string, escapes included.
fn toml_filter(
    value: &tera::Value,
    _: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("toml filter expects a string, got {value}")))?;
    let quoted = toml::Value::String(text.to_string()).to_string();
    Ok(tera::Value::String(quoted))
}

/// Recursively copy `src` into `dst`, replacing files that already exist.
///
/// Directories are created as needed. Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, AssembleError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| AssembleError::Io {
            path: e.path().unwrap_or(src).to_path_buf(),
            source: e.into(),
        })?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_error(&target))?;
        } else {
            fs::copy(entry.path(), &target).map_err(io_error(entry.path()))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Count regular files below `dir`.
fn count_files(dir: &Path) -> Result<usize, AssembleError> {
    let mut files = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| AssembleError::Io {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_dir() {
            files += 1;
        }
    }
    Ok(files)
}

/// Remove a directory tree; a missing directory is not an error.
pub fn remove_tree(path: &Path) -> Result<(), io::Error> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Builds Hugo themes under `build/`.
pub struct Assembler {
    workspace: Workspace,
}

impl Assembler {
    pub fn new(workspace: Workspace) -> Self {
        Self { workspace }
    }

    /// Delete the whole build root.
    pub fn clean(&self) -> Result<(), AssembleError> {
        let root = self.workspace.build_root();
        remove_tree(&root).map_err(io_error(&root))
    }

    /// Assemble every theme in order, stopping at the first failure.
    pub fn assemble(
        &self,
        themes: &[ThemeRecord],
        clean: bool,
    ) -> Result<Vec<AssembledTheme>, AssembleError> {
        if clean {
            self.clean()?;
        }
        themes.iter().map(|t| self.assemble_theme(t)).collect()
    }

    pub fn assemble_theme(&self, theme: &ThemeRecord) -> Result<AssembledTheme, AssembleError> {
        let ws = &self.workspace;
        let destination = ws.theme_build_dir(&theme.name);
        let layouts_dir = destination.join("layouts");
        let assets_dir = destination.join("static").join("assets");
        log::info!("Assembling {} → {}", theme.name, destination.display());

        for dir in [&destination, &layouts_dir, &assets_dir] {
            fs::create_dir_all(dir).map_err(io_error(dir))?;
        }

        let template_path = ws.metadata_template();
        let template = fs::read_to_string(&template_path).map_err(io_error(&template_path))?;
        let metadata = render_metadata(&template, theme).map_err(|source| {
            AssembleError::Template {
                theme: theme.name.clone(),
                source,
            }
        })?;
        let metadata_path = destination.join("theme.toml");
        fs::write(&metadata_path, metadata).map_err(io_error(&metadata_path))?;

        // Shared layouts first, then the theme's own on top.
        let shared = ws.shared_layouts();
        copy_tree(&shared, &layouts_dir)?;
        let overlay = ws.theme_layouts(&theme.name);
        if overlay.is_dir() {
            let replaced = copy_tree(&overlay, &layouts_dir)?;
            log::debug!("{}: {} theme-specific layout files", theme.name, replaced);
        }
        let layouts = count_files(&layouts_dir)?;

        let mut assets = Vec::with_capacity(ASSET_CATEGORIES.len());
        for category in ASSET_CATEGORIES {
            let src = ws.staged_assets(&theme.name, category);
            if !src.is_dir() {
                return Err(AssembleError::AssetMissing {
                    theme: theme.name.clone(),
                    category: category.to_string(),
                    path: src,
                });
            }
            let copied = copy_tree(&src, &assets_dir.join(category))?;
            assets.push((category.to_string(), copied));
        }

        Ok(AssembledTheme {
            name: theme.name.clone(),
            destination,
            layouts,
            assets,
        })
    }
}
