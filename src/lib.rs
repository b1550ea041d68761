//! # html5up-hugo
//!
//! Converts the html5up.net HTML/CSS theme packages into Hugo themes. A
//! short `config.toml` lists the themes (name and description); everything
//! else is derived from the name.
//!
//! # Architecture: Two Commands, Three Stages
//!
//! ```text
//! get     html5up.net  →  temp/download/<name>/   (download + unzip)
//! build   staging      →  build/<name>/           (assemble Hugo theme)
//!         build        →  preview/                (preview site via hugo)
//! ```
//!
//! The stages only communicate through the filesystem. `get` can run once
//! and `build` many times while layouts are being written; a failed `build`
//! leaves partial output behind and is simply re-run (at-least-once, not
//! atomic).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading and validation |
//! | [`workspace`] | Every input and output path, derived from one root |
//! | [`fetch`] | `get`: download archives and extract them into staging |
//! | [`assemble`] | `build`: metadata, layout overlay, asset copy |
//! | [`preview`] | `build`: per-theme generator runs and preview content |
//! | [`batch`] | Fail-fast or keep-going iteration over themes |
//! | [`naming`] | Title case, URL templating, name checks |
//! | [`types`] | Theme records and per-stage reports |
//! | [`error`] | Crate-level error wrapping the per-stage errors |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## Explicit Context Over Globals
//!
//! Paths, URL templates and ports live in [`workspace::Workspace`] and
//! [`config::ToolConfig`] and are handed to each stage when it is built.
//! Nothing is process-wide except the logger.
//!
//! ## Collaborators Behind Traits
//!
//! The two things this tool does not own, the network and Hugo, sit behind
//! [`fetch::Downloader`] and [`preview::SiteGenerator`]. Production code uses
//! `reqwest` and the `hugo` executable; tests substitute in-memory doubles.
//!
//! ## Missing Assets Are Errors
//!
//! Every html5up archive ships `assets/css`, `assets/fonts` and `assets/js`.
//! A missing one means `get` did not run or upstream changed, so `build`
//! fails with [`assemble::AssembleError::AssetMissing`] instead of
//! producing a theme without styles.

pub mod assemble;
pub mod batch;
pub mod config;
pub mod error;
pub mod fetch;
pub mod naming;
pub mod output;
pub mod preview;
pub mod types;
pub mod workspace;

pub use error::Error;

#[cfg(test)]
pub(crate) mod test_helpers;
