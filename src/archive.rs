//! Archive import and export.
//!
//! The archive format itself is the host's business: an [`ArchiveCodec`]
//! turns a bundle into `(path, bytes)` pairs and back. This module handles
//! everything between those pairs and a [`Project`].

use crate::diagnostic::{ArchiveError, ImportError};
use crate::project::path::{is_markup, normalize};
use crate::project::{is_foreign, FileEntry, Project};

/// Compression backend for project bundles.
pub trait ArchiveCodec {
    /// Unpack a bundle into `(path, bytes)` pairs.
    ///
    /// Directory entries may be included with a trailing `/`; they are skipped.
    fn extract(&self, bundle: &[u8]) -> Result<Vec<(String, Vec<u8>)>, ArchiveError>;

    /// Pack `(path, bytes)` pairs into a bundle.
    fn package(&self, files: &[(String, Vec<u8>)]) -> Result<Vec<u8>, ArchiveError>;
}

/// A downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Suggested file name.
    pub file_name: String,
    /// MIME type.
    pub mime: &'static str,
    /// Content.
    pub bytes: Vec<u8>,
}

/// Build a project from an uploaded bundle.
///
/// Directory entries and foreign paths (see [`is_foreign`]) are dropped.
/// Files with a binary extension are kept as read-only base64 entries, the
/// rest as text. The main file is chosen with
/// [`detect_main`](crate::project::detect_main).
pub fn import_archive(codec: &impl ArchiveCodec, bundle: &[u8]) -> Result<Project, ImportError> {
    let entries = codec.extract(bundle)?;
    let total = entries.len();

    let mut skipped = 0usize;
    let mut files: Vec<(String, FileEntry)> = Vec::with_capacity(total);
    for (raw_path, bytes) in entries {
        if raw_path.ends_with('/') {
            continue;
        }
        let path = normalize(&raw_path);
        if is_foreign(&path) {
            log::debug!("skipping foreign archive entry: {raw_path}");
            skipped += 1;
            continue;
        }
        let entry = FileEntry::from_bytes(&path, &bytes);
        files.push((path, entry));
    }

    if skipped > 0 {
        log::info!("filtered {skipped} of {total} archive entries as system files");
    }
    if files.is_empty() {
        return Err(ImportError::Empty);
    }
    if !files.iter().any(|(path, _)| is_markup(path)) {
        return Err(ImportError::NoMarkupFile(
            crate::config::get().markup_extension.clone(),
        ));
    }

    let project = Project::from_files(files);
    log::info!(
        "imported {} files, main file {}",
        project.len(),
        project.main_path().unwrap_or("<none>")
    );
    Ok(project)
}

/// Package every project file into a bundle.
pub fn export_archive(codec: &impl ArchiveCodec, project: &Project) -> Result<Artifact, ImportError> {
    let files = project
        .iter()
        .map(|(path, entry)| {
            entry
                .to_bytes()
                .map(|bytes| (path.to_string(), bytes))
                .map_err(|source| ImportError::CorruptBinary {
                    path: path.to_string(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Artifact {
        file_name: crate::config::get().archive_file_name.clone(),
        mime: "application/zip",
        bytes: codec.package(&files)?,
    })
}

/// Offer the editor text as a downloadable source file.
pub fn export_source(text: &str) -> Artifact {
    Artifact {
        file_name: crate::config::get().source_file_name.clone(),
        mime: "text/plain;charset=utf-8",
        bytes: text.as_bytes().to_vec(),
    }
}
