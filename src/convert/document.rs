//! Converted document model.

use crate::diagnostic::Diagnostics;

/// Inline formatting applied to a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStyle {
    /// `\textbf`
    Bold,
    /// `\textit`
    Italic,
    /// `\texttt`
    Monospace,
    /// `\emph`
    Emphasis,
}

impl InlineStyle {
    /// Style for a formatting command name.
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "textbf" => Some(Self::Bold),
            "textit" => Some(Self::Italic),
            "texttt" => Some(Self::Monospace),
            "emph" => Some(Self::Emphasis),
            _ => None,
        }
    }
}

/// `itemize` or `enumerate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Bulleted list.
    Itemize,
    /// Numbered list.
    Enumerate,
}

impl ListKind {
    /// List kind for an environment name.
    pub fn from_environment(name: &str) -> Option<Self> {
        match name {
            "itemize" => Some(Self::Itemize),
            "enumerate" => Some(Self::Enumerate),
            _ => None,
        }
    }
}

/// One structural piece of a converted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Plain text, possibly containing inline math.
    Text(String),
    /// Sectioning heading; level 2 for `\section` down to 4.
    Heading {
        /// HTML heading level.
        level: u8,
        /// Heading text.
        text: String,
    },
    /// Formatted inline run.
    Inline {
        /// Formatting.
        style: InlineStyle,
        /// Run text.
        text: String,
    },
    /// Start of a list.
    ListOpen(ListKind),
    /// Start of a list item, with its optional `[label]`.
    ListItem(Option<String>),
    /// End of a list.
    ListClose(ListKind),
    /// Preformatted text, kept byte-for-byte.
    Verbatim(String),
    /// Display math.
    Math {
        /// Math source, untouched by any rewriting.
        body: String,
        /// Whether the body came from an `align` environment.
        aligned: bool,
    },
    /// Embedded binary asset.
    Image {
        /// Name as written in the document.
        name: String,
        /// MIME type of the payload.
        mime: &'static str,
        /// Base64 payload.
        payload: String,
    },
    /// Placeholder for an image that could not be found.
    MissingImage(String),
    /// Paragraph boundary.
    ParagraphBreak,
}

impl Block {
    /// Check if this block flows inside a paragraph.
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Inline { .. })
    }
}

/// Title, author and date declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// `\title{...}`
    pub title: Option<String>,
    /// `\author{...}`
    pub author: Option<String>,
    /// `\date{...}`, with `\today` substituted.
    pub date: Option<String>,
}

/// A parsed document, ready to serialize.
///
/// Built fresh for every compile and dropped after [`to_html`](Self::to_html).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertedDocument {
    pub(crate) metadata: Metadata,
    pub(crate) blocks: Vec<Block>,
    pub(crate) diagnostics: Diagnostics,
}

impl ConvertedDocument {
    /// Document metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Body blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Non-fatal problems found while converting.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Take the diagnostics out, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }
}
