//! Post assembly: file naming and front matter.
//!
//! A post file is a YAML front matter block followed by the rendered HTML:
//!
//! ```text
//! ---
//! layout: "post"
//! title: "My Title"
//! date: "2021-01-01"
//! ---
//! <div class="cell markdown">...
//! ```
//!
//! and is named `YYYY-MM-DD-slug.html`, the convention the site generator
//! uses to find posts. Scalar values are written as JSON strings, which YAML
//! reads unchanged.

use crate::config::{PostConfig, SlugMode};
use crate::header::PostHeader;
use crate::utils::minify::minify_html;
use crate::utils::slug::slugify_stem;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Front matter keys written by nbpost itself.
const RESERVED_KEYS: &[&str] = &["layout", "title", "date"];

/// A converted notebook, ready to be written.
#[derive(Debug, Clone)]
pub struct Post {
    pub header: PostHeader,
    /// Rendered HTML fragment
    pub body: String,
    /// Notebook the post was built from
    pub source: PathBuf,
}

impl Post {
    pub const fn new(header: PostHeader, body: String, source: PathBuf) -> Self {
        Self {
            header,
            body,
            source,
        }
    }

    /// Slug from the notebook file name, falling back to the title.
    pub fn slug(&self, mode: SlugMode) -> String {
        let stem = self
            .source
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();

        [&*stem, self.header.title.as_str()]
            .into_iter()
            .map(|text| slugify_stem(text, mode))
            .find(|slug| !slug.is_empty())
            .unwrap_or_else(|| "post".into())
    }

    /// Output file name, e.g. `2021-01-01-post1.html`
    pub fn file_name(&self, mode: SlugMode, extension: &str) -> String {
        format!(
            "{}-{}.{extension}",
            self.header.day.format("%Y-%m-%d"),
            self.slug(mode)
        )
    }

    /// Output path inside `output_dir`
    pub fn output_path(&self, output_dir: &Path, mode: SlugMode, extension: &str) -> PathBuf {
        output_dir.join(self.file_name(mode, extension))
    }

    /// Full file content: front matter (if enabled) and body.
    pub fn document(&self, config: &PostConfig, minify: bool) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.body.len() + 128);
        if config.front_matter {
            out.extend_from_slice(self.front_matter(config)?.as_bytes());
        }
        out.extend_from_slice(&minify_html(self.body.as_bytes(), minify));
        Ok(out)
    }

    /// The `---` delimited front matter block.
    pub fn front_matter(&self, config: &PostConfig) -> Result<String> {
        let mut lines = vec!["---".to_owned()];

        if !config.layout.is_empty() {
            lines.push(format!("layout: {}", serde_json::to_string(&config.layout)?));
        }
        lines.push(format!("title: {}", serde_json::to_string(&self.header.title)?));
        lines.push(format!("date: {}", serde_json::to_string(&self.header.date)?));

        for (key, value) in &config.extra {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            lines.push(format!("{}: {}", yaml_key(key)?, yaml_value(value)?));
        }

        lines.push("---".to_owned());
        let mut block = lines.join("\n");
        block.push('\n');
        Ok(block)
    }
}

/// Plain keys stay bare, anything else is quoted.
fn yaml_key(key: &str) -> Result<String> {
    let plain = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if plain {
        Ok(key.to_owned())
    } else {
        Ok(serde_json::to_string(key)?)
    }
}

/// TOML value in JSON flow syntax, which is also valid YAML.
fn yaml_value(value: &toml::Value) -> Result<String> {
    match value {
        toml::Value::Datetime(datetime) => Ok(serde_json::to_string(&datetime.to_string())?),
        toml::Value::Array(items) => {
            let items = items.iter().map(yaml_value).collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", items.join(", ")))
        }
        toml::Value::Table(table) => {
            let entries = table
                .iter()
                .map(|(k, v)| -> Result<String> {
                    Ok(format!("{}: {}", serde_json::to_string(k)?, yaml_value(v)?))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("{{{}}}", entries.join(", ")))
        }
        other => Ok(serde_json::to_string(other)?),
    }
}
