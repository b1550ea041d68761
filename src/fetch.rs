//! Theme archive download and extraction.
//!
//! The `get` command. For each configured theme the download URL is derived
//! from the URL template, the archive is fetched with a blocking HTTP GET and
//! extracted into `temp/download/<name>/`.
//!
//! ## Output Structure
//!
//! ```text
//! temp/download/
//! ├── solid-state/
//! │   ├── index.html
//! │   ├── assets/
//! │   │   ├── css/
//! │   │   ├── fonts/
//! │   │   └── js/
//! │   └── images/
//! └── massively/
//!     └── ...
//! ```
//!
//! ## Failure Model
//!
//! No retries. A transport failure, a non-2xx status or an unreadable archive
//! aborts the run; themes fetched before the failure stay on disk.
//!
//! ## Parallel Downloads
//!
//! With `jobs > 1` themes are fetched on a dedicated [rayon](https://docs.rs/rayon)
//! pool. Every theme owns its own staging subtree so downloads never touch the
//! same files. Reports are still returned in config order.

use crate::assemble::remove_tree;
use crate::naming;
use crate::types::{FetchedTheme, ThemeRecord};
use crate::workspace::Workspace;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use zip::ZipArchive;
use zip::result::ZipError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Transport(#[source] BoxError),
    #[error("server responded with HTTP {0}")]
    Status(u16),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("downloading {theme} from {url}: {source}")]
    Network {
        theme: String,
        url: String,
        source: BoxError,
    },
    #[error("downloading {theme} from {url}: server responded with HTTP {status}")]
    Status {
        theme: String,
        url: String,
        status: u16,
    },
    #[error("extracting {theme} archive: {source}")]
    Extract { theme: String, source: ZipError },
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("HTTP client setup failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error("thread pool setup failed: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Anything that can turn a URL into an archive body.
///
/// The production implementation is [`HttpDownloader`]; tests serve archives
/// from memory.
pub trait Downloader: Sync {
    /// Fetch the full response body. Non-2xx responses are errors.
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// Blocking `reqwest` client with a per-request timeout.
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
}

impl HttpDownloader {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DownloadError::Transport(Box::new(e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }
        let body = response
            .bytes()
            .map_err(|e| DownloadError::Transport(Box::new(e)))?;
        Ok(body.to_vec())
    }
}

/// Downloads and stages theme archives.
pub struct Fetcher<D: Downloader> {
    workspace: Workspace,
    downloader: D,
    url_template: String,
    jobs: usize,
}

impl<D: Downloader> Fetcher<D> {
    pub fn new(workspace: Workspace, downloader: D, url_template: impl Into<String>) -> Self {
        Self {
            workspace,
            downloader,
            url_template: url_template.into(),
            jobs: 1,
        }
    }

    /// Allow up to `jobs` concurrent downloads.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Fetch every theme, stopping at the first failure.
    pub fn fetch(&self, themes: &[ThemeRecord]) -> Result<Vec<FetchedTheme>, FetchError> {
        log::info!(
            "Download themes to {}",
            self.workspace.staging_root().display()
        );
        let threads = batch_threads(self.jobs, themes);
        if threads <= 1 {
            return themes.iter().map(|t| self.fetch_theme(t)).collect();
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        pool.install(|| themes.par_iter().map(|t| self.fetch_theme(t)).collect())
    }

    /// Fetch every theme without stopping at failures.
    ///
    /// One result per theme, in config order. Only pool setup can fail as a whole.
    pub fn fetch_all(
        &self,
        themes: &[ThemeRecord],
    ) -> Result<Vec<Result<FetchedTheme, FetchError>>, FetchError> {
        log::info!(
            "Download themes to {}",
            self.workspace.staging_root().display()
        );
        let threads = batch_threads(self.jobs, themes);
        if threads <= 1 {
            return Ok(themes.iter().map(|t| self.fetch_theme(t)).collect());
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        Ok(pool.install(|| themes.par_iter().map(|t| self.fetch_theme(t)).collect()))
    }

    /// Delete every staged archive.
    pub fn clean(&self) -> Result<(), FetchError> {
        let root = self.workspace.staging_root();
        remove_tree(&root).map_err(|source| FetchError::Io { path: root, source })
    }

    /// Fetch and extract a single theme.
    pub fn fetch_theme(&self, theme: &ThemeRecord) -> Result<FetchedTheme, FetchError> {
        let url = naming::download_url(&self.url_template, &theme.name);
        let destination = self.workspace.staging_dir(&theme.name);
        std::fs::create_dir_all(&destination).map_err(|source| FetchError::Io {
            path: destination.clone(),
            source,
        })?;

        log::info!("Downloading {} → {}", url, destination.display());
        let body = self.downloader.download(&url).map_err(|e| match e {
            DownloadError::Transport(source) => FetchError::Network {
                theme: theme.name.clone(),
                url: url.clone(),
                source,
            },
            DownloadError::Status(status) => FetchError::Status {
                theme: theme.name.clone(),
                url: url.clone(),
                status,
            },
        })?;

        let entries = extract_archive(&body, &destination).map_err(|source| {
            FetchError::Extract {
                theme: theme.name.clone(),
                source,
            }
        })?;
        log::debug!("{}: extracted {} entries", theme.name, entries);

        Ok(FetchedTheme {
            name: theme.name.clone(),
            url,
            destination,
            size: body.len() as u64,
            sha256: format!("{:x}", Sha256::digest(&body)),
            entries,
        })
    }
}

/// Extract a zip archive held in memory under `dest`.
///
/// Entries whose paths would escape `dest` are rejected by the zip reader.
/// Returns the number of archive entries.
pub fn extract_archive(bytes: &[u8], dest: &Path) -> Result<usize, ZipError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let entries = archive.len();
    archive.extract(dest)?;
    Ok(entries)
}

/// Resolve the effective download concurrency.
///
/// Caps at the number of available CPU cores: the user can constrain down, not up.
pub fn effective_jobs(jobs: usize) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    jobs.clamp(1, cores)
}

/// Worker count for one batch of themes.
///
/// Sequential when there is at most one theme, or when a name repeats: two
/// entries sharing a staging directory must extract one after the other so
/// the later entry wins.
fn batch_threads(jobs: usize, themes: &[ThemeRecord]) -> usize {
    let mut seen = HashSet::new();
    let unique = themes.iter().all(|t| seen.insert(t.name.as_str()));
    if themes.len() <= 1 || !unique {
        return 1;
    }
    effective_jobs(jobs)
}
