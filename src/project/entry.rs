//! File entries stored in a project.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::path::extension;

/// Extensions whose content is kept as base64 rather than text.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "pdf", "ttf", "otf", "woff", "woff2", "eot", "eps", "bmp",
    "tif", "tiff", "ico",
];

/// Check whether a path should be stored as a binary entry.
pub fn is_binary_path(path: &str) -> bool {
    extension(path).is_some_and(|ext| {
        BINARY_EXTENSIONS
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    })
}

/// Content of one project file.
///
/// Binary entries are read-only for the editor and opaque to conversion,
/// except as `\includegraphics` targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEntry {
    /// Editable text.
    Text(String),
    /// Base64 payload with the original extension (lowercase, no dot).
    Binary {
        /// Base64-encoded bytes.
        payload: String,
        /// Original file extension.
        extension: String,
    },
}

impl FileEntry {
    /// Create a text entry.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Create a binary entry from raw bytes.
    pub fn binary(bytes: &[u8], extension: impl Into<String>) -> Self {
        Self::Binary {
            payload: STANDARD.encode(bytes),
            extension: extension.into().to_ascii_lowercase(),
        }
    }

    /// Create an entry from raw bytes, classifying by the path's extension.
    ///
    /// Non-binary content is decoded as UTF-8, replacing invalid sequences.
    pub fn from_bytes(path: &str, bytes: &[u8]) -> Self {
        if is_binary_path(path) {
            Self::binary(bytes, extension(path).unwrap_or_default())
        } else {
            Self::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }

    /// Get the text content, if this is a text entry.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary { .. } => None,
        }
    }

    /// Check if this is a binary entry.
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary { .. })
    }

    /// Binary entries cannot be edited.
    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.is_binary()
    }

    /// Raw bytes of the entry.
    pub fn to_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        match self {
            Self::Text(text) => Ok(text.as_bytes().to_vec()),
            Self::Binary { payload, .. } => STANDARD.decode(payload),
        }
    }

    /// Size of the stored representation in bytes.
    pub fn stored_len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary { payload, .. } => payload.len(),
        }
    }
}

impl From<String> for FileEntry {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for FileEntry {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_classification() {
        assert!(is_binary_path("img/logo.PNG"));
        assert!(is_binary_path("fonts/body.woff2"));
        assert!(!is_binary_path("main.tex"));
        assert!(!is_binary_path("Makefile"));
    }

    #[test]
    fn test_from_bytes() {
        let entry = FileEntry::from_bytes("fig.png", &[0x89, 0x50, 0x4e, 0x47]);
        assert!(entry.is_read_only());
        assert_eq!(entry.to_bytes().unwrap(), vec![0x89, 0x50, 0x4e, 0x47]);
        match &entry {
            FileEntry::Binary { extension, .. } => assert_eq!(extension, "png"),
            FileEntry::Text(_) => panic!("expected binary entry"),
        }

        let entry = FileEntry::from_bytes("main.tex", b"\\section{A}");
        assert_eq!(entry.as_text(), Some("\\section{A}"));
    }
}
