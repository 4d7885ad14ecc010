//! HTML serialization.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};

use super::document::{Block, ConvertedDocument, InlineStyle, ListKind};

const STYLESHEET: &str = r"
body {
  font-family: 'Source Serif 4', Georgia, serif;
  font-size: 12pt;
  line-height: 1.6;
  max-width: 8.5in;
  margin: 1in auto;
  padding: 0 0.5in;
  color: #2A2724;
  background: white;
}
h1, h2, h3, h4 {
  font-family: 'Merriweather', Georgia, serif;
  font-weight: 700;
  margin-top: 1.5em;
  margin-bottom: 0.5em;
  line-height: 1.3;
}
h1 { font-size: 24pt; text-align: center; margin-bottom: 0.25em; }
h2 { font-size: 18pt; border-bottom: 1px solid #D4CEC0; padding-bottom: 0.25em; }
h3 { font-size: 14pt; }
h4 { font-size: 12pt; }
.author, .date {
  text-align: center;
  font-size: 11pt;
  margin-bottom: 0.25em;
  color: #3A3632;
}
ul, ol { margin: 1em 0; padding-left: 2em; }
li { margin: 0.5em 0; }
.equation { text-align: center; margin: 1.5em 0; padding: 1em; overflow-x: auto; }
pre, code {
  font-family: 'JetBrains Mono', 'Courier New', monospace;
  font-size: 10pt;
  background: #F5F2EB;
}
pre { padding: 1em; border-radius: 4px; overflow-x: auto; line-height: 1.5; }
code { padding: 0.125em 0.375em; border-radius: 2px; }
strong { font-weight: 600; }
em { font-style: italic; }
img.figure { max-width: 100%; height: auto; }
.missing-image {
  padding: 1em;
  background: #f0f0f0;
  border: 1px dashed #ccc;
  text-align: center;
  color: #666;
}
mjx-container { margin: 1em 0; }
";

const MATHJAX_CONFIG: &str = r"
MathJax = {
  tex: {
    inlineMath: [['$', '$'], ['\\(', '\\)']],
    displayMath: [['$$', '$$'], ['\\[', '\\]']],
    processEscapes: true,
    processEnvironments: true
  },
  options: {
    skipHtmlTags: ['script', 'noscript', 'style', 'textarea', 'pre']
  }
};
";

/// Serialize `doc` into a standalone HTML page.
pub(crate) fn render(doc: &ConvertedDocument, mathjax_url: &str) -> String {
    let mut html = String::with_capacity(STYLESHEET.len() + MATHJAX_CONFIG.len() + 1024);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    if let Some(title) = &doc.metadata.title {
        html.push_str("<title>");
        encode_text_to_string(title, &mut html);
        html.push_str("</title>\n");
    }
    _ = writeln!(html, "<style>{STYLESHEET}</style>");
    _ = writeln!(html, "<script>{MATHJAX_CONFIG}</script>");
    html.push_str("<script src=\"");
    encode_double_quoted_attribute_to_string(mathjax_url, &mut html);
    html.push_str("\"></script>\n</head>\n<body>\n");

    let meta = &doc.metadata;
    for (tag, class, value) in [
        ("h1", None, &meta.title),
        ("div", Some("author"), &meta.author),
        ("div", Some("date"), &meta.date),
    ] {
        let Some(value) = value else { continue };
        _ = match class {
            Some(class) => write!(html, "<{tag} class=\"{class}\">"),
            None => write!(html, "<{tag}>"),
        };
        encode_text_to_string(value, &mut html);
        _ = writeln!(html, "</{tag}>");
    }

    let mut body = BodyWriter::new(html);
    for block in &doc.blocks {
        body.block(block);
    }
    let mut html = body.finish();
    html.push_str("</body>\n</html>\n");
    html
}

/// Tracks open paragraphs and lists while writing the body.
struct BodyWriter {
    out: String,
    paragraph: bool,
    /// Open lists, innermost last, with whether an item is open.
    lists: Vec<(ListKind, bool)>,
    /// Nothing written since the current container opened.
    fresh: bool,
}

impl BodyWriter {
    fn new(out: String) -> Self {
        Self {
            out,
            paragraph: false,
            lists: Vec::new(),
            fresh: false,
        }
    }

    fn block(&mut self, block: &Block) {
        if block.is_inline() {
            if self.lists.is_empty() && !self.paragraph {
                if matches!(block, Block::Text(t) if t.trim().is_empty()) {
                    return;
                }
                self.out.push_str("<p>");
                self.paragraph = true;
                self.fresh = true;
            }
        } else {
            self.close_paragraph();
        }

        match block {
            Block::Text(text) => self.text(text),
            Block::Inline { style, text } => {
                let tag = match style {
                    InlineStyle::Bold => "strong",
                    InlineStyle::Italic | InlineStyle::Emphasis => "em",
                    InlineStyle::Monospace => "code",
                };
                _ = write!(self.out, "<{tag}>");
                encode_text_to_string(text, &mut self.out);
                _ = write!(self.out, "</{tag}>");
                self.fresh = false;
            }
            Block::Heading { level, text } => {
                _ = write!(self.out, "<h{level}>");
                encode_text_to_string(text.trim(), &mut self.out);
                _ = writeln!(self.out, "</h{level}>");
            }
            Block::ListOpen(kind) => {
                self.out.push_str(list_tag(*kind).0);
                self.out.push('\n');
                self.lists.push((*kind, false));
                self.fresh = true;
            }
            Block::ListItem(label) => self.item(label.as_deref()),
            Block::ListClose(_) => self.close_list(),
            Block::Verbatim(text) => {
                self.out.push_str("<pre>");
                encode_text_to_string(text, &mut self.out);
                self.out.push_str("</pre>\n");
            }
            Block::Math { body, aligned } => {
                self.out.push_str("<div class=\"equation\">\\[");
                if *aligned {
                    self.out.push_str("\\begin{aligned}");
                }
                encode_text_to_string(body, &mut self.out);
                if *aligned {
                    self.out.push_str("\\end{aligned}");
                }
                self.out.push_str("\\]</div>\n");
            }
            Block::Image {
                name,
                mime,
                payload,
            } => self.image(name, mime, payload),
            Block::MissingImage(name) => {
                self.out.push_str("<div class=\"missing-image\">[Image: ");
                encode_text_to_string(name, &mut self.out);
                self.out.push_str("]</div>\n");
            }
            Block::ParagraphBreak => {}
        }
    }

    fn text(&mut self, text: &str) {
        let text = if self.fresh { text.trim_start() } else { text };
        if text.is_empty() {
            return;
        }
        encode_text_to_string(text, &mut self.out);
        self.fresh = false;
    }

    fn item(&mut self, label: Option<&str>) {
        let was_open = match self.lists.last_mut() {
            Some((_, item_open)) => std::mem::replace(item_open, true),
            None => {
                // stray `\item` outside any list
                if let Some(label) = label {
                    self.text(label);
                }
                return;
            }
        };
        if was_open {
            self.trim_trailing();
            self.out.push_str("</li>\n");
        }
        self.out.push_str("<li>");
        self.fresh = true;
        if let Some(label) = label {
            self.out.push_str("<strong>");
            encode_text_to_string(label, &mut self.out);
            self.out.push_str("</strong> ");
            self.fresh = false;
        }
    }

    fn image(&mut self, name: &str, mime: &str, payload: &str) {
        let src = format!("data:{mime};base64,{payload}");
        if mime == "application/pdf" {
            _ = write!(self.out, "<embed class=\"figure\" type=\"{mime}\" src=\"");
            encode_double_quoted_attribute_to_string(&src, &mut self.out);
            self.out.push_str("\" width=\"100%\" height=\"600\" title=\"");
        } else {
            self.out.push_str("<img class=\"figure\" src=\"");
            encode_double_quoted_attribute_to_string(&src, &mut self.out);
            self.out.push_str("\" alt=\"");
        }
        encode_double_quoted_attribute_to_string(name, &mut self.out);
        self.out.push_str("\">\n");
    }

    fn close_paragraph(&mut self) {
        if self.paragraph {
            self.trim_trailing();
            self.out.push_str("</p>\n");
            self.paragraph = false;
        }
    }

    fn close_list(&mut self) {
        let Some((kind, item_open)) = self.lists.pop() else {
            return;
        };
        if item_open {
            self.trim_trailing();
            self.out.push_str("</li>\n");
        }
        self.out.push_str(list_tag(kind).1);
        self.out.push('\n');
        self.fresh = true;
    }

    fn trim_trailing(&mut self) {
        let len = self.out.trim_end().len();
        self.out.truncate(len);
    }

    fn finish(mut self) -> String {
        self.close_paragraph();
        while !self.lists.is_empty() {
            self.close_list();
        }
        self.out
    }
}

fn list_tag(kind: ListKind) -> (&'static str, &'static str) {
    match kind {
        ListKind::Itemize => ("<ul>", "</ul>"),
        ListKind::Enumerate => ("<ol>", "</ol>"),
    }
}
