//! Errors and compile diagnostics.

mod error;
mod format;
mod info;

pub use error::{
    ArchiveError, CompileError, DecodeError, EncodeError, ImportError, PersistError, ProjectError,
    RenderError, StoreError,
};
pub use format::{format_info, DiagnosticOptions, DisplayStyle};
pub use info::{DiagnosticInfo, DiagnosticKind, DiagnosticSummary, Diagnostics, Severity};
