//! Notebook document model and reader.
//!
//! A notebook is an nbformat JSON file: an ordered list of cells, each with
//! a type tag and text source, plus notebook-level metadata.
//!
//! Only the parts used for post generation are modelled. Outputs,
//! attachments and execution counts are ignored while deserializing.

mod error;

pub use error::NotebookError;

use serde::{Deserialize, Deserializer};
use std::{fs, path::Path};

/// Notebook format major version understood by the reader.
pub const NBFORMAT_VERSION: u32 = 4;

// ============================================================================
// Types
// ============================================================================

/// A parsed notebook document.
#[derive(Debug, Clone, Deserialize)]
pub struct Notebook {
    /// Format major version
    pub nbformat: u32,

    /// Format minor version
    #[serde(default)]
    pub nbformat_minor: u32,

    /// Notebook-level metadata
    #[serde(default)]
    pub metadata: NotebookMetadata,

    /// Cells in document order
    pub cells: Vec<Cell>,
}

/// Notebook-level metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotebookMetadata {
    #[serde(default)]
    pub kernelspec: Option<KernelSpec>,

    #[serde(default)]
    pub language_info: Option<LanguageInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KernelSpec {
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageInfo {
    #[serde(default)]
    pub name: Option<String>,
}

/// Cell type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Markdown,
    Code,
    Raw,
}

/// A single notebook cell.
#[derive(Debug, Clone, Deserialize)]
pub struct Cell {
    pub cell_type: CellType,

    /// Cell text, joined when stored as a list of lines
    #[serde(deserialize_with = "multiline_text")]
    pub source: String,

    #[serde(default)]
    pub metadata: CellMetadata,
}

/// Cell-level metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CellMetadata {
    #[serde(default)]
    pub tags: Vec<String>,

    /// Target format of a raw cell (older notebooks)
    #[serde(default)]
    pub format: Option<String>,

    /// Target format of a raw cell
    #[serde(default)]
    pub raw_mimetype: Option<String>,
}

/// Only the version fields, checked before the full schema.
#[derive(Deserialize)]
struct VersionProbe {
    nbformat: u32,
}

/// nbformat stores multiline strings either as one string or a list of lines.
#[derive(Deserialize)]
#[serde(untagged)]
enum MultilineText {
    One(String),
    Lines(Vec<String>),
}

fn multiline_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match MultilineText::deserialize(deserializer)? {
        MultilineText::One(text) => text,
        MultilineText::Lines(lines) => lines.concat(),
    })
}

// ============================================================================
// Reading
// ============================================================================

/// Read a notebook file, requiring format major version `as_version`.
pub fn read(path: &Path, as_version: u32) -> Result<Notebook, NotebookError> {
    let content =
        fs::read_to_string(path).map_err(|err| NotebookError::Io(path.to_path_buf(), err))?;
    Notebook::from_str(&content, as_version)
}

impl Notebook {
    /// Parse notebook JSON, requiring format major version `as_version`.
    pub fn from_str(content: &str, as_version: u32) -> Result<Self, NotebookError> {
        let probe: VersionProbe = serde_json::from_str(content)?;
        if probe.nbformat != as_version {
            return Err(NotebookError::UnsupportedVersion {
                found: probe.nbformat,
                expected: as_version,
            });
        }
        Ok(serde_json::from_str(content)?)
    }

    /// First cell of the document, if any
    pub fn first_cell(&self) -> Option<&Cell> {
        self.cells.first()
    }

    /// Kernel language, e.g. `python`
    pub fn language(&self) -> Option<&str> {
        let from_info = self
            .metadata
            .language_info
            .as_ref()
            .and_then(|info| info.name.as_deref());
        let from_kernel = self
            .metadata
            .kernelspec
            .as_ref()
            .and_then(|spec| spec.language.as_deref());
        from_info.or(from_kernel).filter(|lang| !lang.is_empty())
    }
}

impl Cell {
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.metadata.tags.iter().any(|tag| tags.contains(tag))
    }

    /// Whether a raw cell targets HTML output
    pub fn targets_html(&self) -> bool {
        let format = self
            .metadata
            .raw_mimetype
            .as_deref()
            .or(self.metadata.format.as_deref());
        matches!(format, Some("text/html" | "html"))
    }

    pub fn is_blank(&self) -> bool {
        self.source.trim().is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
