//! Error types.

use thiserror::Error;

/// Error type for project filesystem mutations.
///
/// A failed mutation leaves the project untouched, so callers can report the
/// error and carry on with the same [`Project`](crate::project::Project).
///
/// # Example
///
/// ```ignore
/// match project.delete("main.tex") {
///     Ok(_) => {}
///     Err(ProjectError::ProtectedPath { path }) => {
///         eprintln!("cannot delete {path}: it is the main file");
///     }
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    /// The referenced path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The missing path.
        path: String,
    },

    /// The rename or create target is already occupied.
    #[error("already exists: {path}")]
    Conflict {
        /// The occupied path.
        path: String,
    },

    /// The operation would delete the main file or its containing folder.
    #[error("protected: {path} is or contains the main file")]
    ProtectedPath {
        /// The protected path.
        path: String,
    },

    /// The file cannot serve as the main file.
    #[error("invalid type: {path} is not a {extension} file")]
    InvalidType {
        /// The rejected path.
        path: String,
        /// The required extension.
        extension: String,
    },

    /// The file holds binary content and cannot be edited as text.
    #[error("read-only: {path} is a binary file")]
    ReadOnly {
        /// The binary path.
        path: String,
    },
}

impl ProjectError {
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub(crate) fn conflict(path: impl Into<String>) -> Self {
        Self::Conflict { path: path.into() }
    }

    pub(crate) fn protected(path: impl Into<String>) -> Self {
        Self::ProtectedPath { path: path.into() }
    }

    pub(crate) fn invalid_type(path: impl Into<String>) -> Self {
        Self::InvalidType {
            path: path.into(),
            extension: crate::config::get().markup_extension.clone(),
        }
    }
}

/// Error returned by a [`RenderSurface`](crate::process::RenderSurface).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("render failed: {message}")]
pub struct RenderError {
    /// Message from the surface.
    pub message: String,
}

impl RenderError {
    /// Create a render error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Error type for compilation requests.
///
/// Only [`CompileError::AlreadyRunning`] is returned as `Err` from
/// [`Compiler::compile`](crate::process::Compiler::compile); the other
/// variants are carried inside a failed [`CompileResult`](crate::process::CompileResult).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Another compilation is in flight.
    #[error("compilation already running")]
    AlreadyRunning,

    /// A multi-file project has no main file to compile.
    #[error("project has no main file")]
    NoMainFile,

    /// The main file is binary or missing.
    #[error("main file is not readable text: {path}")]
    UnreadableMain {
        /// The main path.
        path: String,
    },

    /// The rendering surface rejected the payload.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Error decoding a persisted project blob.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The outer base64 layer is malformed.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not UTF-8.
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The percent-encoded layer is malformed.
    #[error("invalid percent-encoding: {0}")]
    Percent(std::string::FromUtf8Error),

    /// The structured form is malformed.
    #[error("invalid project data: {0}")]
    Json(#[from] serde_json::Error),

    /// A binary entry's payload is not valid base64.
    #[error("corrupt binary entry {path}: {source}")]
    CorruptBinary {
        /// Entry path.
        path: String,
        /// Decode failure.
        source: base64::DecodeError,
    },

    /// The blob holds no files.
    #[error("project contains no files")]
    Empty,
}

/// Error encoding a project blob.
#[derive(Debug, Error)]
#[error("failed to encode project: {0}")]
pub struct EncodeError(#[from] pub serde_json::Error);

/// Error returned by a [`KeyValueStore`](crate::persist::KeyValueStore) write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The write would exceed the store's quota.
    #[error("storage quota exceeded writing {key} ({needed} bytes, {available} available)")]
    QuotaExceeded {
        /// The key being written.
        key: String,
        /// Bytes required by the write.
        needed: usize,
        /// Bytes still available.
        available: usize,
    },

    /// Any other backend failure.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Error saving session state.
///
/// Saving never touches in-memory state; on error, changes are kept in memory
/// only.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The store rejected the write.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The project could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl PersistError {
    /// Whether the failure was a quota rejection.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::Store(StoreError::QuotaExceeded { .. }))
    }
}

/// Error reported by an [`ArchiveCodec`](crate::archive::ArchiveCodec).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("archive error: {message}")]
pub struct ArchiveError {
    /// Message from the codec.
    pub message: String,
}

impl ArchiveError {
    /// Create an archive error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error importing or exporting a project archive.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The codec failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Nothing survived filtering.
    #[error("archive is empty or contains only system files")]
    Empty,

    /// No markup file found.
    #[error("no {0} files found in archive")]
    NoMarkupFile(String),

    /// A binary entry holds invalid base64.
    #[error("corrupt binary entry {path}: {source}")]
    CorruptBinary {
        /// Entry path.
        path: String,
        /// Decode failure.
        source: base64::DecodeError,
    },
}
