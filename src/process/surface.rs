//! Rendering surfaces.

use std::future::Future;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::diagnostic::RenderError;

/// Destination for a compiled HTML payload.
///
/// The payload is self-contained; a surface only displays or stores it.
/// Implementations can be async when presenting involves I/O or a UI
/// round-trip.
pub trait RenderSurface {
    /// Present `payload`.
    fn present(&self, payload: &str) -> impl Future<Output = Result<(), RenderError>>;
}

/// Keeps every presented payload in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    presented: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl MemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface that rejects every payload with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            presented: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// The most recently presented payload.
    pub fn last(&self) -> Option<String> {
        self.presented.lock().last().cloned()
    }

    /// Number of payloads presented.
    pub fn count(&self) -> usize {
        self.presented.lock().len()
    }
}

impl RenderSurface for MemorySurface {
    async fn present(&self, payload: &str) -> Result<(), RenderError> {
        if let Some(message) = &self.failure {
            return Err(RenderError::new(message.clone()));
        }
        self.presented.lock().push(payload.to_string());
        Ok(())
    }
}

/// Writes each payload to a file, replacing the previous one.
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    /// Create a surface writing to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderSurface for FileSurface {
    async fn present(&self, payload: &str) -> Result<(), RenderError> {
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_surface() {
        let surface = MemorySurface::new();
        pollster::block_on(surface.present("<p>a</p>")).unwrap();
        pollster::block_on(surface.present("<p>b</p>")).unwrap();
        assert_eq!(surface.count(), 2);
        assert_eq!(surface.last().as_deref(), Some("<p>b</p>"));
    }

    #[test]
    fn test_failing_surface() {
        let surface = MemorySurface::failing("closed");
        let err = pollster::block_on(surface.present("x")).unwrap_err();
        assert_eq!(err, RenderError::new("closed"));
        assert_eq!(surface.count(), 0);
    }

    #[test]
    fn test_file_surface() {
        let dir = TempDir::new().unwrap();
        let surface = FileSurface::new(dir.path().join("preview.html"));
        pollster::block_on(surface.present("<html></html>")).unwrap();
        assert_eq!(
            std::fs::read_to_string(surface.path()).unwrap(),
            "<html></html>"
        );
    }

    #[test]
    fn test_file_surface_missing_dir() {
        let dir = TempDir::new().unwrap();
        let surface = FileSurface::new(dir.path().join("missing/preview.html"));
        assert!(pollster::block_on(surface.present("x")).is_err());
    }
}
