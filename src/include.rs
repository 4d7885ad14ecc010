//! Include resolution.
//!
//! Expands `\input{...}` and `\include{...}` directives recursively into one
//! flattened markup stream. `\includegraphics` is left for the converter.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::diagnostic::{DiagnosticInfo, DiagnosticKind, Diagnostics};
use crate::project::path::{candidates, parent_dir};
use crate::project::Project;

/// `\input` or `\include`, an optional `[...]` group, then `{target}`.
static INCLUDE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(input|include)(?:\[[^\]]*\])?\{([^}]+)\}").expect("valid include regex")
});

/// Recursive include expander over a borrowed project.
///
/// Collects diagnostics and the list of files read, in first-read order.
///
/// # Example
///
/// ```
/// use latex_preview::include::IncludeResolver;
/// use latex_preview::project::{FileEntry, Project};
///
/// let project = Project::from_files([
///     ("main.tex", FileEntry::text(r"\input{parts/intro}")),
///     ("parts/intro.tex", FileEntry::text(r"\section{A}")),
/// ]);
/// let mut resolver = IncludeResolver::new(&project);
/// let flat = resolver.resolve(r"\input{parts/intro}", "main.tex", &Default::default());
/// assert_eq!(flat, r"\section{A}");
/// assert_eq!(resolver.accessed(), ["parts/intro.tex"]);
/// ```
#[derive(Debug)]
pub struct IncludeResolver<'a> {
    project: &'a Project,
    diagnostics: Diagnostics,
    accessed: Vec<String>,
}

impl<'a> IncludeResolver<'a> {
    /// Create a resolver over `project`.
    pub fn new(project: &'a Project) -> Self {
        Self {
            project,
            diagnostics: Diagnostics::new(),
            accessed: Vec::new(),
        }
    }

    /// Expand every include directive in `content`.
    ///
    /// `current_path` is the file `content` came from; relative targets
    /// resolve against its directory. `visited` holds the files on the path
    /// from the root to here. If `current_path` is already among them the
    /// content is returned unexpanded.
    ///
    /// Identical directive text is resolved once and substituted at every
    /// occurrence. Unresolvable targets become a comment placeholder.
    pub fn resolve(
        &mut self,
        content: &str,
        current_path: &str,
        visited: &FxHashSet<String>,
    ) -> String {
        if visited.contains(current_path) {
            log::warn!("circular include detected: {current_path}");
            self.diagnostics.push(
                DiagnosticInfo::warning(
                    DiagnosticKind::CircularInclude,
                    format!("circular include of {current_path} left unexpanded"),
                )
                .in_file(current_path),
            );
            return content.to_string();
        }

        let mut visited = visited.clone();
        visited.insert(current_path.to_string());
        let dir = parent_dir(current_path);

        let mut replacements: FxHashMap<String, String> = FxHashMap::default();
        for caps in INCLUDE_DIRECTIVE.captures_iter(content) {
            let directive = &caps[0];
            if replacements.contains_key(directive) {
                continue;
            }
            let target = caps[2].trim();
            let expanded = self.expand_target(dir, target, current_path, &visited);
            replacements.insert(directive.to_string(), expanded);
        }

        if replacements.is_empty() {
            return content.to_string();
        }
        INCLUDE_DIRECTIVE
            .replace_all(content, |caps: &Captures<'_>| {
                replacements.get(&caps[0]).cloned().unwrap_or_default()
            })
            .into_owned()
    }

    fn expand_target(
        &mut self,
        dir: &str,
        target: &str,
        current_path: &str,
        visited: &FxHashSet<String>,
    ) -> String {
        let extension = crate::config::get().markup_extension.as_str();
        let found = candidates(dir, target, Some(extension))
            .into_iter()
            .find_map(|path| self.project.text(&path).map(|text| (path, text)));

        match found {
            Some((path, text)) => {
                if !self.accessed.contains(&path) {
                    self.accessed.push(path.clone());
                }
                self.resolve(text, &path, visited)
            }
            None => {
                let name = if target.ends_with(extension) {
                    target.to_string()
                } else {
                    format!("{target}{extension}")
                };
                log::warn!("include not found: {name} (from {current_path})");
                self.diagnostics.push(
                    DiagnosticInfo::warning(
                        DiagnosticKind::MissingInclude,
                        format!("include not found: {name}"),
                    )
                    .in_file(current_path)
                    .with_hint(format!("looked relative to `{}`", display_dir(dir))),
                );
                format!("% [Include not found: {name}]")
            }
        }
    }

    /// Files read so far, in first-read order.
    pub fn accessed(&self) -> &[String] {
        &self.accessed
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Consume the resolver, returning its diagnostics and accessed files.
    pub fn finish(self) -> (Diagnostics, Vec<String>) {
        (self.diagnostics, self.accessed)
    }
}

fn display_dir(dir: &str) -> &str {
    if dir.is_empty() { "/" } else { dir }
}

/// Expand every include directive in `content`, starting from `current_path`.
///
/// Convenience wrapper that discards diagnostics.
pub fn resolve_includes(project: &Project, content: &str, current_path: &str) -> String {
    IncludeResolver::new(project).resolve(content, current_path, &FxHashSet::default())
}
