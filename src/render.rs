//! Notebook to HTML conversion.
//!
//! Produces an HTML fragment, one `<div class="cell ...">` per rendered
//! cell. Page layout is left to the site generator.
//!
//! | Cell type  | Output                                              |
//! |------------|-----------------------------------------------------|
//! | `markdown` | CommonMark HTML                                     |
//! | `code`     | `<pre><code class="language-xx">` with escaped text |
//! | `raw`      | Verbatim when targeting HTML, dropped otherwise     |
//!
//! Cell outputs are never rendered.

use crate::config::PostConfig;
use crate::notebook::{Cell, CellType, Notebook};
use pulldown_cmark::{Options, Parser, html};
use std::fmt::Write;

/// Which cells to render and how.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Leave out the first (title/date) cell
    pub skip_header_cell: bool,
    /// Cells tagged with any of these are dropped
    pub remove_tags: &'a [String],
    /// Code language class, overriding the notebook kernel
    pub code_language: Option<&'a str>,
}

impl<'a> RenderOptions<'a> {
    pub fn from_config(config: &'a PostConfig) -> Self {
        Self {
            skip_header_cell: config.skip_header_cell,
            remove_tags: &config.remove_tags,
            code_language: config.code_language.as_deref(),
        }
    }
}

/// Render the notebook body as an HTML fragment.
pub fn render_notebook(notebook: &Notebook, options: &RenderOptions<'_>) -> String {
    let language = options.code_language.or(notebook.language());
    let skip = usize::from(options.skip_header_cell);

    let mut out = String::new();
    for cell in notebook.cells.iter().skip(skip) {
        if cell.is_blank() || cell.has_any_tag(options.remove_tags) {
            continue;
        }
        render_cell(&mut out, cell, language);
    }
    out
}

fn render_cell(out: &mut String, cell: &Cell, language: Option<&str>) {
    match cell.cell_type {
        CellType::Markdown => {
            out.push_str("<div class=\"cell markdown\">\n");
            out.push_str(&markdown_to_html(&cell.source));
            out.push_str("</div>\n");
        }
        CellType::Code => {
            out.push_str("<div class=\"cell code\"><pre><code");
            if let Some(lang) = language {
                let _ = write!(out, " class=\"language-{}\"", escape_html(lang));
            }
            out.push('>');
            out.push_str(&escape_html(cell.source.trim_end()));
            out.push_str("</code></pre></div>\n");
        }
        CellType::Raw if cell.targets_html() => {
            out.push_str("<div class=\"cell raw\">\n");
            out.push_str(&cell.source);
            if !cell.source.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("</div>\n");
        }
        CellType::Raw => {}
    }
}

/// Convert Markdown text to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Escape special HTML characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notebook(cells: serde_json::Value) -> Notebook {
        let content = serde_json::json!({
            "nbformat": 4,
            "nbformat_minor": 5,
            "metadata": {"language_info": {"name": "python"}},
            "cells": cells,
        });
        Notebook::from_str(&content.to_string(), 4).unwrap()
    }

    fn render_default(nb: &Notebook) -> String {
        let config = PostConfig::default();
        render_notebook(nb, &RenderOptions::from_config(&config))
    }

    #[test]
    fn test_header_cell_skipped_by_default() {
        let nb = notebook(serde_json::json!([
            {"cell_type": "markdown", "source": "# Title\n2021-01-01"},
            {"cell_type": "markdown", "source": "Body *text*"},
        ]));

        let html = render_default(&nb);
        assert!(!html.contains("Title"));
        assert!(html.contains("<p>Body <em>text</em></p>"));
    }

    #[test]
    fn test_header_cell_kept_when_configured() {
        let nb = notebook(serde_json::json!([
            {"cell_type": "markdown", "source": "# Title\n2021-01-01"},
        ]));

        let options = RenderOptions {
            skip_header_cell: false,
            remove_tags: &[],
            code_language: None,
        };
        let html = render_notebook(&nb, &options);
        assert!(html.contains("<h1>Title</h1>"));
    }

    #[test]
    fn test_code_cell_escaped_with_language() {
        let nb = notebook(serde_json::json!([
            {"cell_type": "markdown", "source": "T\n2021-01-01"},
            {"cell_type": "code", "source": ["if a < b && c:\n", "    print(\"x\")\n"], "outputs": []},
        ]));

        let html = render_default(&nb);
        assert!(html.contains("<code class=\"language-python\">"));
        assert!(html.contains("if a &lt; b &amp;&amp; c:\n    print(&quot;x&quot;)</code>"));
    }

    #[test]
    fn test_code_language_override() {
        let nb = notebook(serde_json::json!([
            {"cell_type": "markdown", "source": "T\n2021-01-01"},
            {"cell_type": "code", "source": "x = 1", "outputs": []},
        ]));

        let options = RenderOptions {
            skip_header_cell: true,
            remove_tags: &[],
            code_language: Some("py"),
        };
        let html = render_notebook(&nb, &options);
        assert!(html.contains("class=\"language-py\""));
    }

    #[test]
    fn test_outputs_not_rendered() {
        let nb = notebook(serde_json::json!([
            {"cell_type": "markdown", "source": "T\n2021-01-01"},
            {"cell_type": "code", "source": "print(42)",
             "outputs": [{"output_type": "stream", "name": "stdout", "text": "4242-output\n"}]},
        ]));

        let html = render_default(&nb);
        assert!(html.contains("print(42)"));
        assert!(!html.contains("4242-output"));
    }

    #[test]
    fn test_removed_tags_and_blank_cells() {
        let nb = notebook(serde_json::json!([
            {"cell_type": "markdown", "source": "T\n2021-01-01"},
            {"cell_type": "code", "source": "secret()", "metadata": {"tags": ["remove_cell"]}},
            {"cell_type": "markdown", "source": "   \n"},
            {"cell_type": "markdown", "source": "kept"},
        ]));

        let html = render_default(&nb);
        assert!(!html.contains("secret"));
        assert_eq!(html.matches("<div class=\"cell").count(), 1);
        assert!(html.contains("kept"));
    }

    #[test]
    fn test_raw_cells() {
        let nb = notebook(serde_json::json!([
            {"cell_type": "markdown", "source": "T\n2021-01-01"},
            {"cell_type": "raw", "source": "<iframe src=\"x\"></iframe>", "metadata": {"raw_mimetype": "text/html"}},
            {"cell_type": "raw", "source": "\\LaTeX only", "metadata": {"format": "text/latex"}},
        ]));

        let html = render_default(&nb);
        assert!(html.contains("<iframe src=\"x\"></iframe>\n</div>"));
        assert!(!html.contains("LaTeX"));
    }

    #[test]
    fn test_markdown_extensions() {
        let html = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }
}
