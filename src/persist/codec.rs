//! Project blob codec.
//!
//! A project is serialized to JSON, percent-encoded, then base64-encoded so
//! the blob is plain ASCII and survives string-only storage.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::diagnostic::{DecodeError, EncodeError};
use crate::project::path::extension;
use crate::project::{FileEntry, Project};

/// One file in the structured form.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Text(String),
    Binary {
        #[serde(rename = "isBinary")]
        is_binary: bool,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        extension: Option<String>,
    },
}

/// Structured form of a project.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProject {
    files: BTreeMap<String, StoredEntry>,
    #[serde(default)]
    main_file: Option<String>,
    #[serde(default)]
    current_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
}

/// Encode a project into an opaque ASCII blob.
///
/// # Example
///
/// ```
/// use latex_preview::persist::{decode, encode};
/// use latex_preview::project::{FileEntry, Project};
///
/// let project = Project::from_files([("main.tex", FileEntry::text("héllo"))]);
/// let blob = encode(&project).unwrap();
/// assert!(blob.is_ascii());
/// assert_eq!(decode(&blob).unwrap(), project);
/// ```
pub fn encode(project: &Project) -> Result<String, EncodeError> {
    let files = project
        .iter()
        .map(|(path, entry)| {
            let stored = match entry {
                FileEntry::Text(text) => StoredEntry::Text(text.clone()),
                FileEntry::Binary { payload, extension } => StoredEntry::Binary {
                    is_binary: true,
                    content: payload.clone(),
                    extension: Some(extension.clone()),
                },
            };
            (path.to_string(), stored)
        })
        .collect();

    let stored = StoredProject {
        files,
        main_file: project.main_path().map(str::to_string),
        current_file: project.active_path().map(str::to_string),
        saved_at: Some(chrono::Utc::now().to_rfc3339()),
    };

    let json = serde_json::to_string(&stored)?;
    Ok(STANDARD.encode(urlencoding::encode(&json).as_bytes()))
}

/// Decode a blob produced by [`encode`].
///
/// A stale main file is replaced by the detected one; a missing current
/// file falls back to the main file.
pub fn decode(blob: &str) -> Result<Project, DecodeError> {
    let bytes = STANDARD.decode(blob.trim())?;
    let escaped = String::from_utf8(bytes)?;
    let json = urlencoding::decode(&escaped).map_err(DecodeError::Percent)?;
    let stored: StoredProject = serde_json::from_str(&json)?;

    if stored.files.is_empty() {
        return Err(DecodeError::Empty);
    }

    let files = stored
        .files
        .into_iter()
        .map(|(path, entry)| {
            let entry = match entry {
                StoredEntry::Text(text) => FileEntry::Text(text),
                StoredEntry::Binary {
                    is_binary: false,
                    content,
                    ..
                } => FileEntry::Text(content),
                StoredEntry::Binary {
                    content, extension: ext, ..
                } => {
                    // payloads are embedded verbatim into data URIs
                    if let Err(source) = STANDARD.decode(&content) {
                        return Err(DecodeError::CorruptBinary { path, source });
                    }
                    FileEntry::Binary {
                        extension: ext
                            .or_else(|| extension(&path).map(str::to_ascii_lowercase))
                            .unwrap_or_default(),
                        payload: content,
                    }
                }
            };
            Ok((crate::project::path::normalize(&path), entry))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    Ok(Project::from_parts(files, stored.main_file, stored.current_file))
}
