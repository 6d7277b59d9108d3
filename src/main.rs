//! nbpost - convert Jupyter notebooks into HTML posts for a static site.

mod build;
mod cli;
mod config;
mod discover;
mod header;
mod logger;
mod notebook;
mod post;
mod render;
mod utils;

use anyhow::Result;
use build::{build_posts, check_posts};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_posts(&config).map(|_| ()),
        Commands::Check { .. } => check_posts(&config).map(|_| ()),
    }
}

