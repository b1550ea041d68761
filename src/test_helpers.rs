//! Shared test utilities for the unit test suite.
//!
//! Provides a throwaway copy of `fixtures/workspace/`, in-memory zip
//! archives, and doubles for the two external collaborators: the HTTP
//! downloader and the site generator.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_workspace();
//! let ws = Workspace::new(tmp.path());
//! stage_assets(&ws, "solid-state");
//!
//! let built = Assembler::new(ws).assemble_theme(&theme).unwrap();
//! ```

use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use crate::assemble::copy_tree;
use crate::fetch::{DownloadError, Downloader};
use crate::preview::{GeneratorError, SiteGenerator};
use crate::workspace::Workspace;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/workspace/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/workspace");
    copy_tree(&fixtures, tmp.path()).unwrap();
    tmp
}

/// Write a file, creating parent directories.
pub fn write_file(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Populate `temp/download/<name>/assets/{css,fonts,js}` as `get` would.
pub fn stage_assets(ws: &Workspace, name: &str) {
    write_file(&ws.staged_assets(name, "css").join("main.css"), "body {}");
    write_file(&ws.staged_assets(name, "fonts").join("icons.woff"), "font");
    write_file(&ws.staged_assets(name, "js").join("main.js"), "// js");
}

/// Build a zip archive in memory from `(path, content)` pairs.
pub fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

// =========================================================================
// Collaborator doubles
// =========================================================================

/// Serves canned archive bodies by URL. Unknown URLs answer 404.
#[derive(Default)]
pub struct MockDownloader {
    responses: HashMap<String, Option<Vec<u8>>>,
}

impl MockDownloader {
    pub fn serve(mut self, url: &str, body: Vec<u8>) -> Self {
        self.responses.insert(url.to_string(), Some(body));
        self
    }

    /// Simulate a transport failure (connection reset) for `url`.
    pub fn fail(mut self, url: &str) -> Self {
        self.responses.insert(url.to_string(), None);
        self
    }
}

impl Downloader for MockDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        match self.responses.get(url) {
            Some(Some(body)) => Ok(body.clone()),
            Some(None) => Err(DownloadError::Transport(
                std::io::Error::other("connection reset").into(),
            )),
            None => Err(DownloadError::Status(404)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorCall {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub base_url: String,
    pub theme: String,
}

/// Records generator invocations and writes a stub `index.html` per theme.
/// Uses Mutex (not RefCell) to mirror the downloader double.
#[derive(Default)]
pub struct RecordingGenerator {
    calls: Mutex<Vec<GeneratorCall>>,
    fail_on: Option<String>,
}

impl RecordingGenerator {
    pub fn failing_on(theme: &str) -> Self {
        Self {
            fail_on: Some(theme.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl SiteGenerator for RecordingGenerator {
    fn render(
        &self,
        source: &Path,
        destination: &Path,
        base_url: &str,
        theme: &str,
    ) -> Result<(), GeneratorError> {
        self.calls.lock().unwrap().push(GeneratorCall {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            base_url: base_url.to_string(),
            theme: theme.to_string(),
        });
        if self.fail_on.as_deref() == Some(theme) {
            return Err(GeneratorError::Failed {
                program: PathBuf::from("hugo"),
                status: "exit status: 255".to_string(),
                stderr: format!("Error: module {theme:?} not found"),
            });
        }
        write_file(
            &destination.join("index.html"),
            &format!("<base href=\"{base_url}\">"),
        );
        Ok(())
    }
}
