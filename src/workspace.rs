//! Filesystem layout of a conversion workspace.
//!
//! Every path the tool reads or writes is derived from a single root
//! directory (the current directory by default):
//!
//! ```text
//! <root>/
//! ├── config.toml                        # Theme list and tool settings
//! ├── template/
//! │   ├── theme.toml                     # Metadata template (Tera)
//! │   ├── layouts/                       # Shared layouts, copied first
//! │   ├── themes/<name>/layouts/         # Per-theme overrides, copied second
//! │   └── preview/
//! │       ├── config.toml                # Preview site config
//! │       └── images/post-N.jpg          # Placeholder pool
//! ├── exampleSite/                       # Hugo source for preview builds
//! ├── temp/download/<name>/              # Extracted archives (get)
//! ├── build/<name>/                      # Assembled themes (build)
//! └── preview/                           # Preview site (build)
//! ```

use std::path::{Path, PathBuf};

/// Asset categories copied from each archive, in copy order.
pub const ASSET_CATEGORIES: [&str; 3] = ["css", "fonts", "js"];

#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// A relative root is made absolute against the current directory: hugo
    /// resolves a relative `--destination` against `--source`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn template_dir(&self) -> PathBuf {
        self.root.join("template")
    }

    pub fn metadata_template(&self) -> PathBuf {
        self.template_dir().join("theme.toml")
    }

    pub fn shared_layouts(&self) -> PathBuf {
        self.template_dir().join("layouts")
    }

    pub fn theme_layouts(&self, name: &str) -> PathBuf {
        self.template_dir().join("themes").join(name).join("layouts")
    }

    pub fn preview_template_dir(&self) -> PathBuf {
        self.template_dir().join("preview")
    }

    pub fn placeholder_image(&self, index: usize) -> PathBuf {
        self.preview_template_dir()
            .join("images")
            .join(format!("post-{index}.jpg"))
    }

    pub fn example_site(&self) -> PathBuf {
        self.root.join("exampleSite")
    }

    pub fn staging_root(&self) -> PathBuf {
        self.root.join("temp").join("download")
    }

    pub fn staging_dir(&self, name: &str) -> PathBuf {
        self.staging_root().join(name)
    }

    /// Extracted asset directory for one category, e.g. `temp/download/<name>/assets/css`.
    pub fn staged_assets(&self, name: &str, category: &str) -> PathBuf {
        self.staging_dir(name).join("assets").join(category)
    }

    pub fn build_root(&self) -> PathBuf {
        self.root.join("build")
    }

    pub fn theme_build_dir(&self, name: &str) -> PathBuf {
        self.build_root().join(name)
    }

    pub fn preview_root(&self) -> PathBuf {
        self.root.join("preview")
    }
}
