//! `[build]` section configuration.
//!
//! Where notebooks are found, where posts are written, and how failures are treated.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What to do with a notebook whose first cell lacks a title/date header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPolicy {
    /// Log the notebook and leave it out of the output (default).
    #[default]
    Skip,
    /// Abort the whole run.
    Error,
}

/// `[build]` section in nbpost.toml.
///
/// # Example
/// ```toml
/// [build]
/// notebooks = "notebooks/*.ipynb"   # Glob relative to the project root
/// output = "_posts"                 # Where the site generator reads posts
/// minify = true
/// on_missing_header = "error"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Glob pattern selecting the notebooks to convert.
    #[serde(default = "defaults::build::notebooks")]
    #[educe(Default = defaults::build::notebooks())]
    pub notebooks: String,

    /// Post output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// File extension of generated posts, without the dot.
    #[serde(default = "defaults::build::extension")]
    #[educe(Default = defaults::build::extension())]
    pub extension: String,

    /// Minify HTML output.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Clear output directory before each build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Handling of notebooks without a title/date header.
    #[serde(default = "defaults::build::on_missing_header")]
    #[educe(Default = defaults::build::on_missing_header())]
    pub on_missing_header: HeaderPolicy,

    /// Notebook format major version to read.
    #[serde(default = "defaults::build::nbformat")]
    #[educe(Default = defaults::build::nbformat())]
    pub nbformat: u32,
}
