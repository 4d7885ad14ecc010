//! Configuration for latex-preview.
//!
//! Use [`ConfigBuilder`] at application startup to override defaults such as
//! the MathJax script URL or the storage key names.

use std::sync::OnceLock;

/// Global configuration, initialized via [`ConfigBuilder::init`].
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Default MathJax bundle embedded in every preview.
pub const DEFAULT_MATHJAX_URL: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js";

/// Key names used with a [`KeyValueStore`](crate::persist::KeyValueStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Raw text of the single document.
    pub content: String,
    /// Zoom preference.
    pub zoom: String,
    /// Encoded project blob.
    pub project: String,
    /// Project-mode flag (`"true"` when a project is stored).
    pub project_mode: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            content: "latexEditor_content".into(),
            zoom: "latexEditor_zoom".into(),
            project: "latexEditor_project".into(),
            project_mode: "latexEditor_projectMode".into(),
        }
    }
}

/// Runtime configuration for latex-preview.
#[derive(Debug, Clone)]
pub struct Config {
    /// MathJax script loaded by the preview payload.
    pub mathjax_url: String,
    /// Extension identifying markup files, including the dot.
    pub markup_extension: String,
    /// File name for raw source export.
    pub source_file_name: String,
    /// File name for packaged project export.
    pub archive_file_name: String,
    /// Storage key names.
    pub keys: StorageKeys,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mathjax_url: DEFAULT_MATHJAX_URL.to_string(),
            markup_extension: ".tex".to_string(),
            source_file_name: "document.tex".to_string(),
            archive_file_name: "latex-project.zip".to_string(),
            keys: StorageKeys::default(),
        }
    }
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    mathjax_url: Option<String>,
    source_file_name: Option<String>,
    archive_file_name: Option<String>,
    keys: Option<StorageKeys>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the MathJax script URL.
    ///
    /// # Example
    ///
    /// ```
    /// use latex_preview::config::ConfigBuilder;
    ///
    /// ConfigBuilder::new()
    ///     .mathjax_url("/static/mathjax/tex-mml-chtml.js")
    ///     .init();
    /// ```
    pub fn mathjax_url(mut self, url: impl Into<String>) -> Self {
        self.mathjax_url = Some(url.into());
        self
    }

    /// Set the file name used for raw source export.
    pub fn source_file_name(mut self, name: impl Into<String>) -> Self {
        self.source_file_name = Some(name.into());
        self
    }

    /// Set the file name used for packaged project export.
    pub fn archive_file_name(mut self, name: impl Into<String>) -> Self {
        self.archive_file_name = Some(name.into());
        self
    }

    /// Set the storage key names.
    pub fn keys(mut self, keys: StorageKeys) -> Self {
        self.keys = Some(keys);
        self
    }

    /// Build the configuration without installing it.
    pub fn build(self) -> Config {
        let defaults = Config::default();
        Config {
            mathjax_url: self.mathjax_url.unwrap_or(defaults.mathjax_url),
            markup_extension: defaults.markup_extension,
            source_file_name: self.source_file_name.unwrap_or(defaults.source_file_name),
            archive_file_name: self.archive_file_name.unwrap_or(defaults.archive_file_name),
            keys: self.keys.unwrap_or(defaults.keys),
        }
    }

    /// Build and initialize the global configuration.
    ///
    /// This can only be called once. Subsequent calls are ignored.
    /// Returns `true` if configuration was set, `false` if already initialized.
    pub fn init(self) -> bool {
        CONFIG.set(self.build()).is_ok()
    }
}

/// Initialize latex-preview with default configuration.
///
/// This is equivalent to `ConfigBuilder::new().init()`.
pub fn init_default() -> bool {
    ConfigBuilder::new().init()
}

/// Get the current configuration, or default if not initialized.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.markup_extension, ".tex");
        assert_eq!(config.mathjax_url, DEFAULT_MATHJAX_URL);
        assert_eq!(config.keys.project, "latexEditor_project");
    }

    #[test]
    fn test_builder() {
        let config = ConfigBuilder::new()
            .mathjax_url("/mj.js")
            .archive_file_name("bundle.zip")
            .build();
        assert_eq!(config.mathjax_url, "/mj.js");
        assert_eq!(config.archive_file_name, "bundle.zip");
        assert_eq!(config.source_file_name, "document.tex");
    }
}
