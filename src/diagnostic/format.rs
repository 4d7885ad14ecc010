//! Diagnostic formatting utilities.

use std::fmt::Write;

use super::info::{DiagnosticInfo, Severity};

// ============================================================================
// Options
// ============================================================================

/// Display style for diagnostic output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayStyle {
    /// Header line followed by file location and hints.
    #[default]
    Rich,
    /// One line per diagnostic: `file: warning: message`.
    Short,
}

/// Options for controlling diagnostic formatting.
///
/// # Example
///
/// ```ignore
/// use latex_preview::diagnostic::{DiagnosticOptions, DisplayStyle};
///
/// // Plain text (no ANSI colors) for a status bar
/// let opts = DiagnosticOptions::plain();
///
/// // Short format for logs
/// let opts = DiagnosticOptions::short();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticOptions {
    /// Whether to use ANSI colors in output.
    pub colored: bool,
    /// Display style.
    pub style: DisplayStyle,
    /// Whether to include hints.
    pub hints: bool,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            colored: true,
            style: DisplayStyle::Rich,
            hints: true,
        }
    }
}

impl DiagnosticOptions {
    /// Create options for colored terminal output.
    pub fn colored() -> Self {
        Self::default()
    }

    /// Create options for plain text output (no ANSI colors).
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::default()
        }
    }

    /// Create options for short format.
    pub fn short() -> Self {
        Self {
            colored: false,
            style: DisplayStyle::Short,
            hints: false,
        }
    }

    /// Set whether to use colors.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set display style.
    pub fn with_style(mut self, style: DisplayStyle) -> Self {
        self.style = style;
        self
    }

    /// Set whether to include hints.
    pub fn with_hints(mut self, hints: bool) -> Self {
        self.hints = hints;
        self
    }
}

// ============================================================================
// Coloring
// ============================================================================

#[cfg(feature = "colored-diagnostics")]
fn colorize(text: &str, severity: Severity) -> String {
    use owo_colors::OwoColorize;
    match severity {
        Severity::Error => text.red().to_string(),
        Severity::Warning => text.yellow().to_string(),
    }
}

#[cfg(feature = "colored-diagnostics")]
fn colorize_help(text: &str) -> String {
    use owo_colors::OwoColorize;
    text.cyan().to_string()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize(text: &str, _severity: Severity) -> String {
    text.to_owned()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize_help(text: &str) -> String {
    text.to_owned()
}

fn paint(options: &DiagnosticOptions, severity: Severity, text: &str) -> String {
    if options.colored {
        colorize(text, severity)
    } else {
        text.to_owned()
    }
}

fn paint_help(options: &DiagnosticOptions, text: &str) -> String {
    if options.colored {
        colorize_help(text)
    } else {
        text.to_owned()
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Format a single diagnostic into the output string.
pub fn format_info(output: &mut String, info: &DiagnosticInfo, options: DiagnosticOptions) {
    let label = paint(&options, info.severity, info.severity_str());

    match options.style {
        DisplayStyle::Short => {
            if let Some(path) = &info.path {
                _ = writeln!(output, "{path}: {label}: {}", info.message);
            } else {
                _ = writeln!(output, "{label}: {}", info.message);
            }
        }
        DisplayStyle::Rich => {
            _ = writeln!(output, "{label}[{}]: {}", info.kind.as_str(), info.message);
            if let Some(path) = &info.path {
                _ = writeln!(output, "  ┌─ {path}");
            }
            if options.hints {
                for hint in &info.hints {
                    _ = writeln!(output, "  {} hint: {hint}", paint_help(&options, "="));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    fn sample() -> DiagnosticInfo {
        DiagnosticInfo::warning(DiagnosticKind::MissingInclude, "include not found: intro.tex")
            .in_file("main.tex")
            .with_hint("tried intro, intro.tex")
    }

    #[test]
    fn test_format_short() {
        let mut out = String::new();
        format_info(&mut out, &sample(), DiagnosticOptions::short());
        assert_eq!(out, "main.tex: warning: include not found: intro.tex\n");
    }

    #[test]
    fn test_format_rich_plain() {
        let mut out = String::new();
        format_info(&mut out, &sample(), DiagnosticOptions::plain());
        assert!(out.starts_with("warning[missing-include]: include not found: intro.tex\n"));
        assert!(out.contains("┌─ main.tex"));
        assert!(out.contains("= hint: tried intro, intro.tex"));
    }

    #[test]
    fn test_format_without_hints() {
        let mut out = String::new();
        format_info(&mut out, &sample(), DiagnosticOptions::plain().with_hints(false));
        assert!(!out.contains("hint"));
    }
}
