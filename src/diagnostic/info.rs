//! Structured diagnostic information.

use std::fmt;

use super::format::{format_info, DiagnosticOptions};

// ============================================================================
// Severity & Kind
// ============================================================================

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The preview is incomplete.
    Error,
    /// The preview was produced with a placeholder.
    Warning,
}

/// What went wrong.
///
/// Only [`DiagnosticKind::CompileFailed`] marks a compile that produced no
/// preview; the others degrade to inline placeholder text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A file includes itself, directly or transitively.
    CircularInclude,
    /// An `\input`/`\include` target does not exist.
    MissingInclude,
    /// An `\includegraphics` target does not exist.
    MissingImage,
    /// No preview was produced (no main file, unreadable main, surface failure).
    CompileFailed,
}

impl DiagnosticKind {
    /// Short machine-friendly name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CircularInclude => "circular-include",
            Self::MissingInclude => "missing-include",
            Self::MissingImage => "missing-image",
            Self::CompileFailed => "compile-failed",
        }
    }
}

// ============================================================================
// DiagnosticInfo
// ============================================================================

/// A single compile diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiagnosticInfo {
    /// Severity level.
    pub severity: Severity,
    /// Diagnostic kind.
    pub kind: DiagnosticKind,
    /// File the diagnostic was raised in (project-relative), if known.
    pub path: Option<String>,
    /// Human-readable message.
    pub message: String,
    /// Hints.
    pub hints: Vec<String>,
}

impl DiagnosticInfo {
    /// Create a warning.
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            path: None,
            message: message.into(),
            hints: Vec::new(),
        }
    }

    /// Create an error.
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            ..Self::warning(kind, message)
        }
    }

    /// Attach the file the diagnostic was raised in.
    pub fn in_file(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach a hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Severity as a lowercase label.
    pub fn severity_str(&self) -> &'static str {
        match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

// ============================================================================
// DiagnosticSummary
// ============================================================================

/// Summary of diagnostic counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticSummary {
    /// Number of errors.
    pub errors: usize,
    /// Number of warnings.
    pub warnings: usize,
}

impl DiagnosticSummary {
    /// Total number of diagnostics.
    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }

    /// Whether there are any errors.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Whether there are any diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for DiagnosticSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.errors, self.warnings) {
            (0, 0) => write!(f, "no diagnostics"),
            (e, 0) => write!(f, "{e} error{}", if e == 1 { "" } else { "s" }),
            (0, w) => write!(f, "{w} warning{}", if w == 1 { "" } else { "s" }),
            (e, w) => write!(
                f,
                "{e} error{}, {w} warning{}",
                if e == 1 { "" } else { "s" },
                if w == 1 { "" } else { "s" }
            ),
        }
    }
}

// ============================================================================
// Diagnostics (Collection)
// ============================================================================

/// A collection of compile diagnostics.
///
/// Duplicate diagnostics (same kind, file and message) are kept once, so a
/// directive repeated in several places reports a single problem.
///
/// # Example
///
/// ```ignore
/// let result = compiler.compile(&mut project, &text, &surface).await?;
/// if !result.diagnostics().is_empty() {
///     eprintln!("{}", result.diagnostics());
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<DiagnosticInfo>,
}

impl Diagnostics {
    /// Create an empty diagnostics collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a diagnostic, ignoring exact duplicates.
    pub fn push(&mut self, info: DiagnosticInfo) {
        if !self.items.contains(&info) {
            self.items.push(info);
        }
    }

    /// Merge another collection into this one.
    pub fn extend(&mut self, other: Diagnostics) {
        for info in other.items {
            self.push(info);
        }
    }

    /// Check if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticInfo> {
        self.items.iter()
    }

    /// Diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &DiagnosticInfo> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    /// Count errors and warnings.
    pub fn summary(&self) -> DiagnosticSummary {
        self.items.iter().fold(DiagnosticSummary::default(), |mut acc, d| {
            match d.severity {
                Severity::Error => acc.errors += 1,
                Severity::Warning => acc.warnings += 1,
            }
            acc
        })
    }

    /// Format all diagnostics with the given options.
    pub fn format(&self, options: DiagnosticOptions) -> String {
        let mut output = String::new();
        for info in &self.items {
            format_info(&mut output, info, options);
        }
        output
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DiagnosticOptions::plain()))
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a DiagnosticInfo;
    type IntoIter = std::slice::Iter<'a, DiagnosticInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
