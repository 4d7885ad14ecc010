//! Markup conversion.
//!
//! Turns flattened LaTeX-subset markup into a [`ConvertedDocument`] and then
//! into a standalone HTML payload.
//!
//! # Pipeline
//!
//! ```text
//! markup ─► region ─► protected regions ─► images ─► headings ─► inline runs
//!        ─► lists ─► declarations ─► strip ─► paragraphs ─► HTML
//! ```
//!
//! Verbatim and display-math environments are lifted out first, so nothing
//! after that step can rewrite their contents.
//!
//! # Example
//!
//! ```
//! use latex_preview::convert::convert;
//!
//! let html = convert("\\section{Intro}\nHello \\textbf{world}.", None);
//! assert!(html.contains("<h2>Intro</h2>"));
//! assert!(html.contains("<p>Hello <strong>world</strong>.</p>"));
//! ```

mod commands;
mod document;
mod image;
mod metadata;
mod passes;
mod render;

use chrono::{Local, NaiveDate};

pub use commands::{is_math_command, strip_commands, MATH_COMMANDS};
pub use document::{Block, ConvertedDocument, InlineStyle, ListKind, Metadata};
pub use image::mime_for;
pub use metadata::format_today;

use crate::diagnostic::Diagnostics;
use crate::project::Project;

/// Markup-to-document converter.
#[derive(Debug, Clone)]
pub struct Converter {
    today: NaiveDate,
    mathjax_url: Option<String>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Create a converter that renders `\today` as the current local date.
    pub fn new() -> Self {
        Self {
            today: Local::now().date_naive(),
            mathjax_url: None,
        }
    }

    /// Render `\today` as `date`.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.today = date;
        self
    }

    /// Load MathJax from `url` instead of the configured URL.
    pub fn with_mathjax_url(mut self, url: impl Into<String>) -> Self {
        self.mathjax_url = Some(url.into());
        self
    }

    /// Parse `markup` into a document.
    ///
    /// `project` supplies `\includegraphics` targets; without it every image
    /// becomes a placeholder. Malformed markup never fails, it just degrades.
    pub fn parse(&self, markup: &str, project: Option<&Project>) -> ConvertedDocument {
        let mut diagnostics = Diagnostics::new();
        let metadata = metadata::extract(markup, self.today);

        let blocks = passes::segment_protected(passes::document_region(markup));
        let blocks = image::embed_images(blocks, project, &mut diagnostics);
        let blocks = passes::headings(blocks);
        let blocks = passes::inline_runs(blocks);
        let blocks = passes::lists(blocks);
        let blocks = passes::drop_declarations(blocks);
        let blocks = passes::strip(blocks);
        let blocks = passes::paragraphs(blocks);

        ConvertedDocument {
            metadata,
            blocks,
            diagnostics,
        }
    }

    /// Serialize a parsed document to HTML.
    pub fn render(&self, doc: &ConvertedDocument) -> String {
        let url = self
            .mathjax_url
            .as_deref()
            .unwrap_or(crate::config::get().mathjax_url.as_str());
        render::render(doc, url)
    }
}

impl ConvertedDocument {
    /// Serialize to HTML using the configured MathJax URL.
    pub fn to_html(&self) -> String {
        render::render(self, &crate::config::get().mathjax_url)
    }
}

/// Convert `markup` straight to an HTML payload.
pub fn convert(markup: &str, project: Option<&Project>) -> String {
    Converter::new().parse(markup, project).to_html()
}
