//! Structural rewriting passes.
//!
//! Each pass maps a block list to a new block list. Only [`Block::Text`] is
//! ever split, so content already lifted into a structural block (verbatim,
//! math, headings) is out of reach of later patterns.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::commands::{closing_brace, strip_commands};
use super::document::{Block, InlineStyle, ListKind};

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect(concat!("valid ", stringify!($name), " regex")));
    };
}

pattern!(DOCUMENT_BODY, r"(?s)\\begin\{document\}(.*?)\\end\{document\}");
pattern!(
    PROTECTED,
    r"(?s)\\begin\{verbatim\}(?P<verbatim>.*?)\\end\{verbatim\}|\\begin\{equation\*?\}(?P<equation>.*?)\\end\{equation\*?\}|\\begin\{align\*?\}(?P<align>.*?)\\end\{align\*?\}"
);
// Commands taking an argument stop at the opening brace; the argument is
// scanned with `closing_brace` so nested groups stay intact.
pattern!(HEADING, r"\\(section|subsection|subsubsection)\*?\{");
pattern!(INLINE, r"\\(textbf|textit|texttt|emph)\{");
pattern!(
    LIST,
    r"\\begin\{(?P<open>itemize|enumerate)\}|\\end\{(?P<close>itemize|enumerate)\}|\\item(?:\[(?P<label>[^\]]*)\])?(?:\s+|\b)"
);
pattern!(MAKETITLE, r"\\maketitle");
pattern!(DECLARATION, r"\\(?:title|author|date)\{");
pattern!(BLANK_LINES, r"\n(?:[ \t\r]*\n)+");

/// Text between `\begin{document}` and `\end{document}`, or all of `markup`.
pub(crate) fn document_region(markup: &str) -> &str {
    DOCUMENT_BODY
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map_or(markup, |body| body.as_str())
}

/// Lift verbatim and display-math environments out of the text.
pub(crate) fn segment_protected(region: &str) -> Vec<Block> {
    split_text(vec![Block::Text(region.to_string())], &PROTECTED, |caps| {
        let block = if let Some(body) = caps.name("verbatim") {
            Block::Verbatim(body.as_str().to_string())
        } else if let Some(body) = caps.name("equation") {
            Block::Math {
                body: body.as_str().to_string(),
                aligned: false,
            }
        } else {
            Block::Math {
                body: caps.name("align").map_or("", |m| m.as_str()).to_string(),
                aligned: true,
            }
        };
        vec![block]
    })
}

/// `\section`, `\subsection` and `\subsubsection` → headings of level 2, 3, 4.
pub(crate) fn headings(blocks: Vec<Block>) -> Vec<Block> {
    split_braced(blocks, &HEADING, |caps, arg| {
        let level = match &caps[1] {
            "section" => 2,
            "subsection" => 3,
            _ => 4,
        };
        vec![Block::Heading {
            level,
            text: arg.to_string(),
        }]
    })
}

/// `\textbf`, `\textit`, `\texttt` and `\emph` → inline runs.
pub(crate) fn inline_runs(blocks: Vec<Block>) -> Vec<Block> {
    split_braced(blocks, &INLINE, |caps, arg| {
        InlineStyle::from_command(&caps[1])
            .map(|style| Block::Inline {
                style,
                text: arg.to_string(),
            })
            .into_iter()
            .collect()
    })
}

/// List environments and `\item` boundaries.
pub(crate) fn lists(blocks: Vec<Block>) -> Vec<Block> {
    split_text(blocks, &LIST, |caps| {
        let block = if let Some(name) = caps.name("open") {
            ListKind::from_environment(name.as_str()).map(Block::ListOpen)
        } else if let Some(name) = caps.name("close") {
            ListKind::from_environment(name.as_str()).map(Block::ListClose)
        } else {
            Some(Block::ListItem(
                caps.name("label").map(|label| label.as_str().to_string()),
            ))
        };
        block.into_iter().collect()
    })
}

/// Remove `\maketitle` and in-body title/author/date declarations.
pub(crate) fn drop_declarations(blocks: Vec<Block>) -> Vec<Block> {
    let blocks = split_text(blocks, &MAKETITLE, |_| Vec::new());
    split_braced(blocks, &DECLARATION, |_, _| Vec::new())
}

/// Strip remaining commands from text, heading and inline-run contents.
pub(crate) fn strip(blocks: Vec<Block>) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|block| match block {
            Block::Text(text) => Block::Text(strip_commands(&text)),
            Block::Heading { level, text } => Block::Heading {
                level,
                text: strip_commands(&text),
            },
            Block::Inline { style, text } => Block::Inline {
                style,
                text: strip_commands(&text),
            },
            Block::ListItem(label) => Block::ListItem(label.map(|l| strip_commands(&l))),
            other => other,
        })
        .collect()
}

/// Runs of blank lines → paragraph breaks.
pub(crate) fn paragraphs(blocks: Vec<Block>) -> Vec<Block> {
    split_text(blocks, &BLANK_LINES, |_| vec![Block::ParagraphBreak])
}

/// Split every text block around `pattern`, replacing each match with the
/// blocks `f` returns. Empty fragments are dropped and adjacent text merged,
/// so removing a match can join the lines around it.
pub(crate) fn split_text<F>(blocks: Vec<Block>, pattern: &Regex, mut f: F) -> Vec<Block>
where
    F: FnMut(&Captures<'_>) -> Vec<Block>,
{
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        let Block::Text(text) = block else {
            out.push(block);
            continue;
        };

        let mut last = 0;
        for caps in pattern.captures_iter(&text) {
            let Some(whole) = caps.get(0) else { continue };
            push_text(&mut out, &text[last..whole.start()]);
            out.extend(f(&caps));
            last = whole.end();
        }
        push_text(&mut out, &text[last..]);
    }
    out
}

/// Like [`split_text`] for patterns ending in an opening brace: each match
/// extends through the balanced closing brace and `f` also receives the
/// argument. A match whose group never closes is left as text.
pub(crate) fn split_braced<F>(blocks: Vec<Block>, head: &Regex, mut f: F) -> Vec<Block>
where
    F: FnMut(&Captures<'_>, &str) -> Vec<Block>,
{
    let mut out = Vec::with_capacity(blocks.len());
    for block in blocks {
        let Block::Text(text) = block else {
            out.push(block);
            continue;
        };

        let mut last = 0;
        let mut from = 0;
        while let Some(caps) = head.captures_at(&text, from) {
            let Some(open) = caps.get(0) else { break };
            let Some(close) = closing_brace(&text[open.end()..]) else {
                from = open.end();
                continue;
            };
            let arg_end = open.end() + close;
            push_text(&mut out, &text[last..open.start()]);
            out.extend(f(&caps, &text[open.end()..arg_end]));
            last = arg_end + 1;
            from = last;
        }
        push_text(&mut out, &text[last..]);
    }
    out
}

fn push_text(out: &mut Vec<Block>, text: &str) {
    if text.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(Block::Text(last)) => last.push_str(text),
        _ => out.push(Block::Text(text.to_string())),
    }
}
