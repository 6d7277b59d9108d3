//! Post header extraction.
//!
//! The first cell of every post notebook holds the post title on its first
//! line and the post date on its second line:
//!
//! ```text
//! # My Title
//! 2021-01-01
//! ```
//!
//! A leading Markdown heading marker on the title line is dropped.

use crate::notebook::Notebook;
use chrono::NaiveDate;
use thiserror::Error;

/// Why a notebook has no usable header
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("notebook has no cells")]
    NoCells,

    #[error("first cell has no title on its first line")]
    MissingTitle,

    #[error("first cell has no date on its second line")]
    MissingDate,

    #[error("`{0}` is not a date, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Title and date of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostHeader {
    pub title: String,
    /// Date line as written, e.g. `2021-01-01` or `2021-01-01 10:30`
    pub date: String,
    /// Calendar day parsed from the date line
    pub day: NaiveDate,
}

/// Extract title and date from the first cell.
pub fn extract_header(notebook: &Notebook) -> Result<PostHeader, HeaderError> {
    let cell = notebook.first_cell().ok_or(HeaderError::NoCells)?;
    parse_header(&cell.source)
}

/// Parse the two header lines of a cell's text.
pub fn parse_header(text: &str) -> Result<PostHeader, HeaderError> {
    let mut lines = text.lines();

    let title = lines
        .next()
        .map(|line| strip_heading_marker(line.trim()))
        .filter(|title| !title.is_empty())
        .ok_or(HeaderError::MissingTitle)?;

    let date = lines
        .next()
        .map(str::trim)
        .filter(|date| !date.is_empty())
        .ok_or(HeaderError::MissingDate)?;

    let day = parse_day(date).ok_or_else(|| HeaderError::InvalidDate(date.to_owned()))?;

    Ok(PostHeader {
        title: title.to_owned(),
        date: date.to_owned(),
        day,
    })
}

/// Remove a markdown ATX heading marker (`#` .. `######` followed by
/// whitespace or nothing). Text like `#1 reason` is not a heading.
fn strip_heading_marker(line: &str) -> &str {
    let rest = line.trim_start_matches('#');
    let level = line.len() - rest.len();
    if (1..=6).contains(&level) && (rest.is_empty() || rest.starts_with([' ', '\t'])) {
        rest.trim()
    } else {
        line
    }
}

/// Parse `YYYY-MM-DD`, optionally followed by a time part.
fn parse_day(date: &str) -> Option<NaiveDate> {
    let (day, rest) = NaiveDate::parse_and_remainder(date, "%Y-%m-%d").ok()?;
    match rest.chars().next() {
        None | Some(' ' | 'T') => Some(day),
        _ => None,
    }
}
