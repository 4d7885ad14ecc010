//! Session save and restore.

use super::codec::{decode, encode};
use super::store::KeyValueStore;
use crate::diagnostic::PersistError;
use crate::project::{Project, DEFAULT_TEMPLATE};

/// Smallest preview zoom factor.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest preview zoom factor.
pub const MAX_ZOOM: f64 = 2.0;
/// Zoom used when none is stored.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Clamp a zoom factor into `[MIN_ZOOM, MAX_ZOOM]`.
///
/// Non-finite values fall back to [`DEFAULT_ZOOM`].
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        DEFAULT_ZOOM
    }
}

/// State recovered by [`load_session`].
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    /// The stored project, if project mode was active and the blob decoded.
    pub project: Option<Project>,
    /// The stored single document, unless it is the unedited template.
    pub document: Option<String>,
    /// Preview zoom, clamped.
    pub zoom: f64,
}

/// Store the single-document text.
pub fn save_document(store: &mut impl KeyValueStore, text: &str) -> Result<(), PersistError> {
    let key = &crate::config::get().keys.content;
    store.set(key, text).map_err(log_failure)
}

/// Store the preview zoom.
pub fn save_zoom(store: &mut impl KeyValueStore, zoom: f64) -> Result<(), PersistError> {
    let key = &crate::config::get().keys.zoom;
    store
        .set(key, &clamp_zoom(zoom).to_string())
        .map_err(log_failure)
}

/// Store the project blob and mark project mode.
///
/// On failure nothing about `project` changes; the caller keeps working in
/// memory and may offer an archive download instead.
pub fn save_project(store: &mut impl KeyValueStore, project: &Project) -> Result<(), PersistError> {
    let keys = &crate::config::get().keys;
    let blob = encode(project)?;
    store.set(&keys.project, &blob).map_err(log_failure)?;
    store.set(&keys.project_mode, "true").map_err(log_failure)?;
    log::debug!("saved project ({} files, {} bytes)", project.len(), blob.len());
    Ok(())
}

/// Forget the stored project.
pub fn clear_project(store: &mut impl KeyValueStore) {
    let keys = &crate::config::get().keys;
    store.remove(&keys.project);
    store.remove(&keys.project_mode);
}

/// Restore zoom, project and document from `store`.
///
/// Never fails: unreadable entries are logged and skipped.
pub fn load_session(store: &impl KeyValueStore) -> Restored {
    let keys = &crate::config::get().keys;

    let zoom = store
        .get(&keys.zoom)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .map_or(DEFAULT_ZOOM, clamp_zoom);

    let project = if store.get(&keys.project_mode).as_deref() == Some("true") {
        store.get(&keys.project).and_then(|blob| match decode(&blob) {
            Ok(project) => Some(project),
            Err(err) => {
                log::warn!("discarding stored project: {err}");
                None
            }
        })
    } else {
        None
    };

    let document = store
        .get(&keys.content)
        .filter(|text| !text.is_empty() && text != DEFAULT_TEMPLATE);

    Restored {
        project,
        document,
        zoom,
    }
}

fn log_failure(err: crate::diagnostic::StoreError) -> PersistError {
    log::warn!("failed to save session: {err}");
    PersistError::Store(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;
    use crate::project::FileEntry;

    fn project() -> Project {
        Project::from_files([
            ("main.tex", FileEntry::text("\\input{intro}")),
            ("intro.tex", FileEntry::text("Hi")),
        ])
    }

    #[test]
    fn test_clamp_zoom() {
        assert_eq!(clamp_zoom(0.1), MIN_ZOOM);
        assert_eq!(clamp_zoom(3.0), MAX_ZOOM);
        assert_eq!(clamp_zoom(1.3), 1.3);
        assert_eq!(clamp_zoom(f64::NAN), DEFAULT_ZOOM);
    }

    #[test]
    fn test_empty_store() {
        let restored = load_session(&MemoryStore::new());
        assert_eq!(
            restored,
            Restored {
                project: None,
                document: None,
                zoom: DEFAULT_ZOOM
            }
        );
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        save_document(&mut store, "draft").unwrap();
        save_zoom(&mut store, 5.0).unwrap();
        save_project(&mut store, &project()).unwrap();

        let restored = load_session(&store);
        assert_eq!(restored.document.as_deref(), Some("draft"));
        assert_eq!(restored.zoom, MAX_ZOOM);
        assert_eq!(restored.project, Some(project()));
    }

    #[test]
    fn test_template_is_not_restored() {
        let mut store = MemoryStore::new();
        save_document(&mut store, DEFAULT_TEMPLATE).unwrap();
        assert_eq!(load_session(&store).document, None);
    }

    #[test]
    fn test_clear_project() {
        let mut store = MemoryStore::new();
        save_project(&mut store, &project()).unwrap();
        clear_project(&mut store);
        assert!(store.is_empty());
        assert_eq!(load_session(&store).project, None);
    }

    #[test]
    fn test_corrupt_blob_is_skipped() {
        let mut store = MemoryStore::new();
        let keys = &crate::config::get().keys;
        store.set(&keys.project, "%%%").unwrap();
        store.set(&keys.project_mode, "true").unwrap();
        assert_eq!(load_session(&store).project, None);
    }

    #[test]
    fn test_quota_exceeded() {
        let mut store = MemoryStore::with_quota(64);
        let project = project();
        let err = save_project(&mut store, &project).unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(project.len(), 2);
        assert_eq!(load_session(&store).project, None);
    }
}
