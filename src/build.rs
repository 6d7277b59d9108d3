//! Post building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_posts()
//!     │
//!     ├── collect_notebooks()   glob → sorted file list
//!     │
//!     └── for each notebook (sequential)
//!             ├── notebook::read()       parse failure → abort
//!             ├── extract_header()       missing header → skip or abort
//!             ├── render_notebook()      HTML fragment
//!             └── Post::document()       front matter + body → output dir
//! ```

use crate::{
    config::{HeaderPolicy, SiteConfig},
    discover::collect_notebooks,
    header::{HeaderError, PostHeader, extract_header},
    log,
    logger::ProgressBar,
    notebook::{self, Notebook},
    post::Post,
    render::{RenderOptions, render_notebook},
};
use anyhow::{Context, Result, bail};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Outcome of a run over all matching notebooks.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Files written (or, for `check`, notebooks with a valid header)
    pub converted: Vec<PathBuf>,
    /// Notebooks left out, with the reason
    pub skipped: Vec<(PathBuf, HeaderError)>,
}

/// Convert every matching notebook into a post.
///
/// A notebook that cannot be parsed aborts the run. Notebooks without a
/// title/date header are skipped or abort the run, per
/// `config.build.on_missing_header`.
pub fn build_posts(config: &SiteConfig) -> Result<BuildReport> {
    let notebooks = collect_notebooks(config.get_root(), &config.build.notebooks)?;
    let mut report = BuildReport::default();

    if notebooks.is_empty() {
        log!("warn"; "no notebooks match `{}`", config.build.notebooks);
        return Ok(report);
    }

    let output = &config.build.output;
    prepare_output_dir(output, config.build.clean)?;

    log!("build"; "converting {} notebooks", notebooks.len());
    let progress = ProgressBar::new_filtered("convert", notebooks.len());
    let tick = || {
        if let Some(progress) = &progress {
            progress.inc();
        }
    };

    // output path -> notebook that produced it
    let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();

    for path in &notebooks {
        let nb = read_notebook(path, config)?;
        let header = match header_or_policy(path, &nb, config.build.on_missing_header)? {
            Ok(header) => header,
            Err(err) => {
                report.skipped.push((path.clone(), err));
                tick();
                continue;
            }
        };

        let body = render_notebook(&nb, &RenderOptions::from_config(&config.post));
        let post = Post::new(header, body, path.clone());
        let target = post.output_path(output, config.post.slug, &config.build.extension);
        if let Some(previous) = written.get(&target) {
            bail!(
                "{} and {} both map to post {}",
                previous.display(),
                path.display(),
                target.display()
            );
        }

        let content = post.document(&config.post, config.build.minify)?;
        fs::write(&target, content)
            .with_context(|| format!("Failed to write post {}", target.display()))?;

        log!("build"; "{} -> {}", display_name(path), display_name(&target));
        written.insert(target.clone(), path.clone());
        report.converted.push(target);
        tick();
    }

    if let Some(progress) = &progress {
        progress.finish();
    }
    log_build_result(&report);

    Ok(report)
}

/// Parse every matching notebook and verify its header without writing.
///
/// Every offending notebook is reported before failing.
pub fn check_posts(config: &SiteConfig) -> Result<BuildReport> {
    let notebooks = collect_notebooks(config.get_root(), &config.build.notebooks)?;
    let mut report = BuildReport::default();

    if notebooks.is_empty() {
        log!("warn"; "no notebooks match `{}`", config.build.notebooks);
        return Ok(report);
    }

    for path in &notebooks {
        let nb = read_notebook(path, config)?;
        match extract_header(&nb) {
            Ok(header) => {
                log!("check"; "{}: \"{}\" ({})", display_name(path), header.title, header.date);
                report.converted.push(path.clone());
            }
            Err(err) => {
                log!("error"; "{}: {}", display_name(path), err);
                report.skipped.push((path.clone(), err));
            }
        }
    }

    if !report.skipped.is_empty() {
        bail!(
            "{} of {} notebooks have no valid title/date header",
            report.skipped.len(),
            notebooks.len()
        );
    }

    log!("check"; "{} notebooks ok", report.converted.len());
    Ok(report)
}

/// Read a notebook; failure is fatal and names the file.
fn read_notebook(path: &Path, config: &SiteConfig) -> Result<Notebook> {
    notebook::read(path, config.build.nbformat)
        .with_context(|| format!("Failed to read notebook {}", path.display()))
}

/// Extract the header, applying the missing-header policy.
///
/// The outer `Result` aborts the run; the inner one marks a skipped notebook.
fn header_or_policy(
    path: &Path,
    nb: &Notebook,
    policy: HeaderPolicy,
) -> Result<Result<PostHeader, HeaderError>> {
    match (extract_header(nb), policy) {
        (Ok(header), _) => Ok(Ok(header)),
        (Err(err), HeaderPolicy::Skip) => {
            log!("skip"; "{}: {}", display_name(path), err);
            Ok(Err(err))
        }
        (Err(err), HeaderPolicy::Error) => {
            Err(err).with_context(|| format!("Invalid post header in {}", path.display()))
        }
    }
}

/// Ensure the output directory exists, clearing it first when `clean` is set.
fn prepare_output_dir(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Log build result
fn log_build_result(report: &BuildReport) {
    match (report.converted.len(), report.skipped.len()) {
        (0, skipped) => log!("warn"; "no posts written, {skipped} notebooks skipped"),
        (converted, 0) => log!("build"; "done, {converted} posts"),
        (converted, skipped) => {
            log!("build"; "done, {converted} posts, {skipped} notebooks skipped")
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
