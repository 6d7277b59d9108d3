//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Notebook to HTML post converter
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: nbpost.toml)
    #[arg(short = 'C', long, default_value = "nbpost.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Notebook selection shared by every command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Glob pattern selecting notebooks (relative to project root)
    #[arg(short = 'n', long)]
    pub notebooks: Option<String>,
}

/// Arguments of the `build` command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Fail instead of skipping notebooks without a title/date header
    #[arg(long)]
    pub strict: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Convert every matching notebook into an html post
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Parse notebooks and verify their headers without writing anything
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[allow(unused)]
impl Cli {
    /// Notebook selection of the current command
    pub const fn input(&self) -> &InputArgs {
        match &self.command {
            Commands::Build { build_args } => &build_args.input,
            Commands::Check { input } => input,
        }
    }

    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build { .. })
    }

    pub const fn is_check(&self) -> bool {
        matches!(self.command, Commands::Check { .. })
    }
}
