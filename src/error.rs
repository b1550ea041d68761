//! Crate-level error type returned by the command entry points.

use crate::assemble::AssembleError;
use crate::config::ConfigError;
use crate::fetch::FetchError;
use crate::preview::PreviewError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Assemble(#[from] AssembleError),
    #[error(transparent)]
    Preview(#[from] PreviewError),
    #[error("{} of the configured themes failed: {}", .0.len(), failed_names(.0))]
    Themes(Vec<ThemeFailure>),
}

/// One theme that failed while the run continued with the others.
#[derive(Debug)]
pub struct ThemeFailure {
    pub theme: String,
    pub error: Error,
}

fn failed_names(failures: &[ThemeFailure]) -> String {
    failures
        .iter()
        .map(|f| f.theme.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
