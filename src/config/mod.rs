//! Project configuration management for `nbpost.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `[build]`  | Notebook pattern, output directory, minify, etc. |
//! | `[post]`   | Front matter, slugs and cell filtering           |
//!
//! The file is optional: without it every field takes its default, which
//! converts `notebooks/*.ipynb` into `_posts/`.
//!
//! # Example
//!
//! ```toml
//! [build]
//! notebooks = "notebooks/*.ipynb"
//! output = "_posts"
//! minify = true
//!
//! [post]
//! layout = "post"
//!
//! [post.extra]
//! comments = true
//! ```

mod build;
pub mod defaults;
mod error;
mod post;

pub use build::{BuildConfig, HeaderPolicy};
pub use error::ConfigError;
pub use post::{PostConfig, SlugMode};

use crate::cli::{Cli, Commands};
use crate::notebook::NBFORMAT_VERSION;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing nbpost.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Post rendering settings
    #[serde(default)]
    pub post: PostConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config for a CLI invocation, apply its overrides and validate.
    ///
    /// The config file is optional; defaults apply when it does not exist.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.notebooks, cli.input().notebooks.as_ref());

        if let Commands::Build { build_args } = &cli.command {
            Self::update_option(&mut self.build.output, build_args.output.as_ref());
            Self::update_option(&mut self.build.minify, build_args.minify.as_ref());
            self.build.clean |= build_args.clean;
            if build_args.strict {
                self.build.on_missing_header = HeaderPolicy::Error;
            }
        }

        self.update_path_with_root(&root, &cli.config);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(&Self::expand_tilde(root));
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config_name));

        let output = Self::expand_tilde(&self.build.output);
        self.build.output = Self::normalize_path(&root.join(output));
    }

    /// Expand a leading `~` to the home directory
    fn expand_tilde(path: &Path) -> PathBuf {
        match path.to_str() {
            Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
            None => path.to_path_buf(),
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Directory part of the notebooks pattern that contains no glob syntax
    fn notebook_dir(&self) -> PathBuf {
        self.get_root()
            .join(&self.build.notebooks)
            .components()
            .take_while(|part| {
                !part
                    .as_os_str()
                    .to_string_lossy()
                    .contains(['*', '?', '['])
            })
            .collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.build.notebooks.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[build.notebooks] must not be empty".into()
            ));
        }

        if self.build.extension.is_empty() {
            bail!(ConfigError::Validation(
                "[build.extension] must not be empty".into()
            ));
        }

        if self.build.extension.contains('.') {
            bail!(ConfigError::Validation(
                "[build.extension] must be given without a dot, e.g. \"html\"".into()
            ));
        }

        if self.build.clean {
            let output = &self.build.output;
            if self.get_root().starts_with(output) || self.notebook_dir().starts_with(output) {
                bail!(ConfigError::Validation(format!(
                    "[build.clean] would delete {}, which holds the project or its notebooks",
                    output.display()
                )));
            }
        }

        if self.build.nbformat != NBFORMAT_VERSION {
            bail!(ConfigError::Validation(format!(
                "[build.nbformat] = {} is not supported, only {NBFORMAT_VERSION} is",
                self.build.nbformat
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_empty_uses_defaults() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.build.notebooks, "notebooks/*.ipynb");
        assert_eq!(config.build.output, PathBuf::from("_posts"));
        assert!(config.post.front_matter);
    }

    #[test]
    fn test_from_str_rejects_unknown_section() {
        let result = SiteConfig::from_str("[serve]\nport = 8080\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_str_rejects_unknown_field() {
        let result = SiteConfig::from_str("[build]\ncontent = \"content\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SiteConfig::from_path(&dir.path().join("nbpost.toml")).unwrap_err();
        assert!(format!("{err}").contains("IO error"));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nbpost.toml");
        fs::write(&path, "[build]\nminify = true\n").unwrap();

        let config = SiteConfig::from_path(&path).unwrap();
        assert!(config.build.minify);
    }

    #[test]
    fn test_update_with_cli_build_overrides() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::parse_from([
            "nbpost", "-r", root, "build", "-n", "drafts/*.ipynb", "-o", "out", "-m", "--strict",
        ]);

        let mut config = SiteConfig::default();
        config.update_with_cli(&cli);

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root.as_path());
        assert_eq!(config.build.notebooks, "drafts/*.ipynb");
        assert_eq!(config.build.output, root.join("out"));
        assert_eq!(config.config_path, root.join("nbpost.toml"));
        assert!(config.build.minify);
        assert_eq!(config.build.on_missing_header, HeaderPolicy::Error);
    }

    #[test]
    fn test_update_with_cli_check_keeps_build_settings() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::parse_from(["nbpost", "-r", root, "check"]);

        let mut config = SiteConfig::from_str("[build]\nminify = true\n").unwrap();
        config.update_with_cli(&cli);

        assert!(config.build.minify);
        assert_eq!(config.build.notebooks, "notebooks/*.ipynb");
        assert_eq!(config.build.on_missing_header, HeaderPolicy::Skip);
    }

    #[test]
    fn test_load_without_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::parse_from(["nbpost", "-r", root, "build"]);

        let config = SiteConfig::load(&cli).unwrap();

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.get_root(), root.as_path());
        assert_eq!(config.build.notebooks, "notebooks/*.ipynb");
        assert_eq!(config.build.output, root.join("_posts"));
        assert_eq!(config.build.extension, "html");
        assert!(!config.build.minify);
        assert_eq!(config.post.layout, "post");
    }

    #[test]
    fn test_load_reads_config_file_under_root() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("site.toml"),
            "[build]\noutput = \"blog/_posts\"\nminify = true\n\n[post]\nlayout = \"article\"\n",
        )
        .unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::parse_from(["nbpost", "-r", root, "-C", "site.toml", "check"]);

        let config = SiteConfig::load(&cli).unwrap();

        let root = dir.path().canonicalize().unwrap();
        assert_eq!(config.config_path, root.join("site.toml"));
        assert_eq!(config.build.output, root.join("blog/_posts"));
        assert!(config.build.minify);
        assert_eq!(config.post.layout, "article");
    }

    #[test]
    fn test_load_rejects_invalid_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("nbpost.toml"), "[build]\nextension = \"\"\n").unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::parse_from(["nbpost", "-r", root, "build"]);

        assert!(SiteConfig::load(&cli).is_err());
    }

    #[test]
    fn test_load_clean_refuses_to_wipe_project() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();

        for output in [".", "..", "notebooks"] {
            let cli = Cli::parse_from(["nbpost", "-r", root, "build", "--clean", "-o", output]);
            let err = SiteConfig::load(&cli).unwrap_err();
            assert!(format!("{err}").contains("[build.clean]"), "output = {output}");
        }

        // Without --clean the same output is only written into
        let cli = Cli::parse_from(["nbpost", "-r", root, "build", "-o", "."]);
        assert!(SiteConfig::load(&cli).is_ok());

        let cli = Cli::parse_from(["nbpost", "-r", root, "build", "--clean"]);
        assert!(SiteConfig::load(&cli).is_ok());
    }

    #[test]
    fn test_validate_clean_with_absolute_notebook_pattern() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.set_root(&dir.path().join("site"));
        config.build.clean = true;
        config.build.output = dir.path().join("shared");
        config.build.notebooks = format!("{}/shared/*.ipynb", dir.path().display());

        assert!(config.validate().is_err());

        config.build.output = dir.path().join("site/_posts");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SiteConfig::default();
        config.build.notebooks = "  ".into();
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.build.extension = ".html".into();
        let err = config.validate().unwrap_err();
        assert!(format!("{err}").contains("without a dot"));

        let mut config = SiteConfig::default();
        config.build.nbformat = 3;
        assert!(config.validate().is_err());
    }
}
