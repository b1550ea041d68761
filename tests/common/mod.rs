//! Helpers shared by the integration tests.
//!
//! Integration tests only see the public API, so the doubles here are small
//! re-implementations of the unit-test ones.

#![allow(dead_code)]

use html5up_hugo::assemble::copy_tree;
use html5up_hugo::fetch::{DownloadError, Downloader};
use html5up_hugo::preview::{GeneratorError, SiteGenerator};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Copy `fixtures/workspace/` into a fresh temp directory.
pub fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/workspace");
    copy_tree(&fixtures, tmp.path()).unwrap();
    tmp
}

/// A zip laid out like an html5up download.
pub fn theme_archive(name: &str) -> Vec<u8> {
    let files = [
        ("index.html".to_string(), format!("<title>{name}</title>")),
        ("assets/css/main.css".to_string(), format!("/* {name} */ body {{}}")),
        ("assets/css/noscript.css".to_string(), "noscript {}".to_string()),
        ("assets/fonts/fa-solid-900.woff2".to_string(), "woff2".to_string()),
        ("assets/js/main.js".to_string(), "(function(){})();".to_string()),
        ("images/pic01.jpg".to_string(), "jpg".to_string()),
    ];
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (path, content) in files {
        writer.start_file(path, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Serves [`theme_archive`] for every `https://html5up.net/<name>/download`.
pub struct ArchiveServer;

impl Downloader for ArchiveServer {
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let name = url
            .strip_prefix("https://html5up.net/")
            .and_then(|rest| rest.strip_suffix("/download"))
            .ok_or(DownloadError::Status(404))?;
        Ok(theme_archive(name))
    }
}

/// Writes one page per theme instead of running hugo.
pub struct StubGenerator;

impl SiteGenerator for StubGenerator {
    fn render(
        &self,
        _source: &Path,
        destination: &Path,
        base_url: &str,
        theme: &str,
    ) -> Result<(), GeneratorError> {
        std::fs::create_dir_all(destination).unwrap();
        std::fs::write(
            destination.join("index.html"),
            format!("<a href=\"{base_url}\">{theme}</a>"),
        )
        .unwrap();
        Ok(())
    }
}

/// Relative path → SHA-256 for every file under `root`.
pub fn tree_digest(root: &Path) -> BTreeMap<String, String> {
    let mut digests = BTreeMap::new();
    for entry in WalkDir::new(root) {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(root).unwrap();
            let bytes = std::fs::read(entry.path()).unwrap();
            digests.insert(
                rel.display().to_string(),
                format!("{:x}", Sha256::digest(&bytes)),
            );
        }
    }
    digests
}
