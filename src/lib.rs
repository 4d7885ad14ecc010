//! # latex-preview
//!
//! The core of a browser-style LaTeX editor: a virtual multi-file project,
//! `\input`/`\include` resolution, a regex-driven conversion of a practical
//! LaTeX subset into a standalone HTML page (math handed to MathJax), session
//! persistence, archive import/export and a single-flight compile pipeline.
//!
//! The crate never touches a UI or a real archive format. The host supplies
//! a [`RenderSurface`] to show payloads, a [`KeyValueStore`] to keep
//! sessions, and an [`ArchiveCodec`] to (un)pack bundles.
//!
//! ## Quick Start
//!
//! ```
//! use latex_preview::{convert, Compiler, FileEntry, MemorySurface, Project};
//!
//! // One-shot conversion of a single document
//! let html = convert("\\section{Intro}\nHello \\textbf{world}.", None);
//! assert!(html.contains("<h2>Intro</h2>"));
//!
//! // Multi-file project with includes
//! let mut project = Project::from_files([
//!     ("main.tex", FileEntry::text("\\input{chapters/one}")),
//!     ("chapters/one.tex", FileEntry::text("$x^2$")),
//! ]);
//! let compiler = Compiler::new();
//! let surface = MemorySurface::new();
//! let text = project.text("main.tex").unwrap().to_string();
//! let result = pollster::block_on(compiler.compile(&mut project, &text, &surface)).unwrap();
//! assert_eq!(result.accessed_files(), ["chapters/one.tex"]);
//! ```
//!
//! ## Modules
//!
//! - [`project`]: virtual file system, path rules, junk filter, main-file detection
//! - [`include`]: recursive include expansion with cycle detection
//! - [`convert`]: markup → document → HTML
//! - [`process`]: the compile orchestrator and rendering surfaces
//! - [`persist`]: project codec and session storage
//! - [`archive`]: bundle import and export
//! - [`diagnostic`]: errors and compile warnings
//! - [`config`]: runtime configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod convert;
pub mod diagnostic;
pub mod include;
pub mod persist;
pub mod process;
pub mod project;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use latex_preview::prelude::*;
///
/// let project = Project::starter("notes");
/// assert_eq!(project.mode(), ProjectMode::MultiFile);
/// ```
pub mod prelude {
    // Compilation
    pub use crate::{CompileResult, CompileState, Compiler, Outcome, RenderSurface};

    // Project
    pub use crate::{FileEntry, Project, ProjectMode};

    // Conversion
    pub use crate::{convert, Converter};

    // Diagnostics
    pub use crate::{CompileError, DiagnosticOptions, Diagnostics, ProjectError};

    // Persistence and archives
    pub use crate::{load_session, save_project, ArchiveCodec, KeyValueStore};
}

// =============================================================================
// High-Level API
// =============================================================================

pub use convert::{convert, ConvertedDocument, Converter};
pub use include::{resolve_includes, IncludeResolver};
pub use process::{
    CompileResult, CompileState, Compiler, FileSurface, MemorySurface, Outcome, RenderSurface,
};

// =============================================================================
// Project model
// =============================================================================

pub use project::{detect_main, is_foreign, FileEntry, Project, ProjectMode, TreeEntry, TreeKind};

// =============================================================================
// Diagnostics
// =============================================================================

pub use diagnostic::{
    // Error types
    ArchiveError, CompileError, DecodeError, ImportError, PersistError, ProjectError, RenderError,
    StoreError,
    // Structured warnings
    DiagnosticInfo, DiagnosticKind, DiagnosticSummary, Diagnostics,
    // Formatting
    DiagnosticOptions, DisplayStyle,
};

// =============================================================================
// Infrastructure
// =============================================================================

pub use archive::{export_archive, export_source, import_archive, ArchiveCodec, Artifact};
pub use config::{Config, ConfigBuilder};
pub use persist::{
    clear_project, decode, encode, load_session, save_document, save_project, save_zoom,
    KeyValueStore, MemoryStore, Restored,
};
