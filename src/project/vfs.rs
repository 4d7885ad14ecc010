//! In-memory project filesystem.

use std::collections::BTreeMap;

use super::entry::FileEntry;
use super::junk::is_foreign;
use super::main_file::detect_main;
use super::path::{is_markup, join, normalize};
use super::template::{starter_main, title_from_name, STARTER_INTRODUCTION};
use super::tree::TreeIter;
use crate::diagnostic::ProjectError;

/// Whether the editor works on one document or on a multi-file project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectMode {
    /// One document; compile the editor text directly.
    #[default]
    SingleDocument,
    /// Many files; compile the main file with includes resolved.
    MultiFile,
}

/// An in-memory project: path → content, plus the main and active paths.
///
/// Paths are normalized on the way in (see [`normalize`]) and kept in
/// lexicographic order, so every listing and detection heuristic is
/// deterministic.
///
/// Invariants maintained by every operation:
///
/// - `main_path`, if set, is a key of `files` and carries the markup extension
/// - `main_path` is only unset when no markup file exists
/// - `active_path`, if set, is a key of `files`
///
/// # Example
///
/// ```
/// use latex_preview::project::{FileEntry, Project};
///
/// let mut project = Project::from_files([
///     ("main.tex", FileEntry::text(r"\input{intro}")),
///     ("intro.tex", FileEntry::text(r"\section{Intro}")),
/// ]);
/// assert_eq!(project.main_path(), Some("main.tex"));
/// assert!(project.delete("main.tex").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    files: BTreeMap<String, FileEntry>,
    main_path: Option<String>,
    active_path: Option<String>,
    mode: ProjectMode,
}

// =============================================================================
// Construction
// =============================================================================

impl Project {
    /// Create an empty project in the given mode.
    pub fn new(mode: ProjectMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Create a single-document project holding `text`.
    pub fn single(text: impl Into<String>) -> Self {
        let path = crate::config::get().source_file_name.clone();
        let mut project = Self::new(ProjectMode::SingleDocument);
        project.files.insert(path.clone(), FileEntry::Text(text.into()));
        project.main_path = Some(path.clone());
        project.active_path = Some(path);
        project
    }

    /// Create a multi-file project from `(path, entry)` pairs.
    ///
    /// The main file is detected with [`detect_main`]; the active file is the
    /// main file.
    pub fn from_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, FileEntry)>,
        P: AsRef<str>,
    {
        let files: BTreeMap<String, FileEntry> = files
            .into_iter()
            .map(|(path, entry)| (normalize(path.as_ref()), entry))
            .collect();
        let mut project = Self {
            files,
            main_path: None,
            active_path: None,
            mode: ProjectMode::MultiFile,
        };
        project.main_path = project.detect_main();
        project.active_path = project.main_path.clone();
        project
    }

    /// Create a new two-file project named `name`.
    ///
    /// `main.tex` carries the title derived from `name` (`my-thesis` →
    /// `My Thesis`) and includes `sections/introduction.tex`.
    pub fn starter(name: &str) -> Self {
        Self::from_files([
            ("main.tex", FileEntry::Text(starter_main(&title_from_name(name)))),
            (
                "sections/introduction.tex",
                FileEntry::text(STARTER_INTRODUCTION),
            ),
        ])
    }

    /// Assemble a project from decoded parts, repairing stale references.
    pub(crate) fn from_parts(
        files: BTreeMap<String, FileEntry>,
        main_path: Option<String>,
        active_path: Option<String>,
    ) -> Self {
        let mut project = Self {
            files,
            main_path: None,
            active_path: None,
            mode: ProjectMode::MultiFile,
        };
        project.main_path = main_path
            .map(|p| normalize(&p))
            .filter(|p| project.files.contains_key(p) && is_markup(p))
            .or_else(|| project.detect_main());
        project.active_path = active_path
            .map(|p| normalize(&p))
            .filter(|p| project.files.contains_key(p))
            .or_else(|| project.main_path.clone());
        project
    }
}

// =============================================================================
// Accessors
// =============================================================================

impl Project {
    /// Editing mode.
    pub fn mode(&self) -> ProjectMode {
        self.mode
    }

    /// Switch editing mode.
    pub fn set_mode(&mut self, mode: ProjectMode) {
        self.mode = mode;
    }

    /// Path of the compilation root.
    pub fn main_path(&self) -> Option<&str> {
        self.main_path.as_deref()
    }

    /// Path currently being edited.
    pub fn active_path(&self) -> Option<&str> {
        self.active_path.as_deref()
    }

    /// Get an entry.
    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.files.get(&normalize(path))
    }

    /// Get a text entry's content.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(FileEntry::as_text)
    }

    /// Check if a path exists.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(&normalize(path))
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all paths in lexicographic order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Iterate over all entries in lexicographic path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileEntry)> {
        self.files.iter().map(|(p, e)| (p.as_str(), e))
    }

    /// Lazy pre-order traversal of the folder/file tree.
    pub fn list_tree(&self) -> TreeIter<'_> {
        TreeIter::new(self.files.keys())
    }

    /// Most likely main file among the current files.
    pub fn detect_main(&self) -> Option<String> {
        detect_main(self.paths()).map(str::to_string)
    }
}

// =============================================================================
// Mutation
// =============================================================================

impl Project {
    /// Insert or replace an entry.
    ///
    /// A project without a main file adopts the first markup file put into it.
    pub fn put(&mut self, path: &str, entry: FileEntry) {
        let path = normalize(path);
        if self.main_path.is_none() && is_markup(&path) {
            self.main_path = Some(path.clone());
        }
        if self.active_path.is_none() {
            self.active_path = self.main_path.clone();
        }
        self.files.insert(path, entry);
    }

    /// Insert a new entry, failing if the path is occupied.
    pub fn create(&mut self, path: &str, entry: FileEntry) -> Result<(), ProjectError> {
        let path = normalize(path);
        if self.is_occupied(&path) {
            return Err(ProjectError::conflict(path));
        }
        self.put(&path, entry);
        Ok(())
    }

    /// Create an empty folder, materialized as `folder/.gitkeep`.
    pub fn create_folder(&mut self, folder: &str) -> Result<(), ProjectError> {
        let folder = normalize(folder);
        if self.is_occupied(&folder) {
            return Err(ProjectError::conflict(folder));
        }
        self.files
            .insert(join(&folder, ".gitkeep"), FileEntry::Text(String::new()));
        Ok(())
    }

    /// Replace a text file's content with editor text.
    pub fn write_text(&mut self, path: &str, text: impl Into<String>) -> Result<(), ProjectError> {
        let path = normalize(path);
        match self.files.get_mut(&path) {
            None => Err(ProjectError::not_found(path)),
            Some(entry) if entry.is_read_only() => Err(ProjectError::ReadOnly { path }),
            Some(entry) => {
                *entry = FileEntry::Text(text.into());
                Ok(())
            }
        }
    }

    /// Delete one file.
    ///
    /// The main file cannot be deleted. If the active file is deleted, the
    /// main file becomes active.
    pub fn delete(&mut self, path: &str) -> Result<FileEntry, ProjectError> {
        let path = normalize(path);
        if self.main_path.as_deref() == Some(path.as_str()) {
            return Err(ProjectError::protected(path));
        }
        let entry = self
            .files
            .remove(&path)
            .ok_or_else(|| ProjectError::not_found(path.as_str()))?;
        self.repair_active();
        Ok(entry)
    }

    /// Delete a folder and everything under it.
    ///
    /// Returns the removed paths. Fails without removing anything if the
    /// folder contains the main file.
    pub fn delete_folder(&mut self, folder: &str) -> Result<Vec<String>, ProjectError> {
        let folder = normalize(folder);
        let prefix = format!("{folder}/");
        if self
            .main_path
            .as_deref()
            .is_some_and(|main| main.starts_with(&prefix))
        {
            return Err(ProjectError::protected(folder));
        }

        let doomed: Vec<String> = self
            .files
            .keys()
            .filter(|p| p.starts_with(&prefix))
            .cloned()
            .collect();
        if doomed.is_empty() {
            return Err(ProjectError::not_found(folder));
        }
        for path in &doomed {
            self.files.remove(path);
        }
        self.repair_active();
        Ok(doomed)
    }

    /// Rename a file, or a folder by bulk prefix replacement.
    ///
    /// If `old` names a file, only that file moves. Otherwise every path
    /// starting with `old/` moves under `new/`. Main and active paths follow
    /// the move. All checks happen before anything moves, so a failed rename
    /// leaves the project untouched.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), ProjectError> {
        let old = normalize(old);
        let new = normalize(new);
        if old == new {
            return Ok(());
        }

        let moves: Vec<(String, String)> = if self.files.contains_key(&old) {
            vec![(old.clone(), new.clone())]
        } else {
            let prefix = format!("{old}/");
            self.files
                .keys()
                .filter_map(|p| {
                    p.strip_prefix(&prefix)
                        .map(|rest| (p.clone(), join(&new, rest)))
                })
                .collect()
        };
        if moves.is_empty() {
            return Err(ProjectError::not_found(old));
        }

        if self.is_occupied(&new) || new.starts_with(&format!("{old}/")) {
            return Err(ProjectError::conflict(new));
        }
        if let Some((_, target)) = moves.iter().find(|(_, to)| self.files.contains_key(to)) {
            return Err(ProjectError::conflict(target.as_str()));
        }
        if let Some(main) = self.main_path.as_deref()
            && let Some((_, target)) = moves.iter().find(|(from, _)| from == main)
            && !is_markup(target)
        {
            return Err(ProjectError::invalid_type(target.as_str()));
        }

        let moved: Vec<(String, FileEntry)> = moves
            .iter()
            .filter_map(|(from, to)| self.files.remove(from).map(|entry| (to.clone(), entry)))
            .collect();
        self.files.extend(moved);

        let retarget = |slot: &mut Option<String>| {
            if let Some(current) = slot.as_deref()
                && let Some((_, to)) = moves.iter().find(|(from, _)| from == current)
            {
                *slot = Some(to.clone());
            }
        };
        retarget(&mut self.main_path);
        retarget(&mut self.active_path);
        Ok(())
    }

    /// Designate the compilation root.
    pub fn set_main(&mut self, path: &str) -> Result<(), ProjectError> {
        let path = normalize(path);
        if !self.files.contains_key(&path) {
            return Err(ProjectError::not_found(path));
        }
        if !is_markup(&path) {
            return Err(ProjectError::invalid_type(path));
        }
        self.main_path = Some(path);
        Ok(())
    }

    /// Switch the file being edited.
    pub fn set_active(&mut self, path: &str) -> Result<(), ProjectError> {
        let path = normalize(path);
        if !self.files.contains_key(&path) {
            return Err(ProjectError::not_found(path));
        }
        self.active_path = Some(path);
        Ok(())
    }

    /// Remove every foreign entry (see [`is_foreign`]).
    ///
    /// Returns the removed paths. If the main file was removed, a new one is
    /// detected; if the active file was removed, the main file becomes active.
    /// Cleaning an already clean project removes nothing.
    pub fn clean(&mut self) -> Vec<String> {
        let removed: Vec<String> = self
            .files
            .keys()
            .filter(|p| is_foreign(p))
            .cloned()
            .collect();
        for path in &removed {
            log::debug!("removing foreign file: {path}");
            self.files.remove(path);
        }

        let main_gone = self
            .main_path
            .as_deref()
            .is_some_and(|main| !self.files.contains_key(main));
        if main_gone || self.main_path.is_none() {
            self.main_path = self.detect_main();
        }
        self.repair_active();
        removed
    }

    /// A path is occupied by a file or by a folder containing files. The
    /// root (empty path) always is.
    fn is_occupied(&self, path: &str) -> bool {
        if path.is_empty() || self.files.contains_key(path) {
            return true;
        }
        let prefix = format!("{path}/");
        self.files
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(p, _)| p.starts_with(&prefix))
    }

    fn repair_active(&mut self) {
        let stale = self
            .active_path
            .as_deref()
            .is_none_or(|active| !self.files.contains_key(active));
        if stale {
            self.active_path = self.main_path.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        Project::from_files([
            ("main.tex", FileEntry::text(r"\input{chapters/one}")),
            ("chapters/one.tex", FileEntry::text(r"\section{One}")),
            ("chapters/two.tex", FileEntry::text(r"\section{Two}")),
            ("images/fig.png", FileEntry::binary(&[0, 1, 2], "png")),
        ])
    }

    #[test]
    fn test_from_files_detects_main() {
        let project = sample();
        assert_eq!(project.main_path(), Some("main.tex"));
        assert_eq!(project.active_path(), Some("main.tex"));
        assert_eq!(project.mode(), ProjectMode::MultiFile);
    }

    #[test]
    fn test_single() {
        let project = Project::single("hello");
        assert_eq!(project.mode(), ProjectMode::SingleDocument);
        assert_eq!(project.main_path(), Some("document.tex"));
        assert_eq!(project.text("document.tex"), Some("hello"));
    }

    #[test]
    fn test_starter() {
        let project = Project::starter("my-thesis");
        assert_eq!(project.len(), 2);
        assert_eq!(project.main_path(), Some("main.tex"));
        assert!(project.text("main.tex").unwrap().contains(r"\title{My Thesis}"));
        assert!(project.contains("sections/introduction.tex"));
    }

    #[test]
    fn test_put_normalizes() {
        let mut project = Project::new(ProjectMode::MultiFile);
        project.put("./a\\b.tex", FileEntry::text("x"));
        assert!(project.contains("a/b.tex"));
        assert_eq!(project.main_path(), Some("a/b.tex"));
    }

    #[test]
    fn test_create_conflict() {
        let mut project = sample();
        let err = project.create("main.tex", FileEntry::text("")).unwrap_err();
        assert_eq!(err, ProjectError::conflict("main.tex"));

        let err = project.create("chapters", FileEntry::text("")).unwrap_err();
        assert_eq!(err, ProjectError::conflict("chapters"));

        project.create("chapters/three.tex", FileEntry::text("")).unwrap();
        assert!(project.contains("chapters/three.tex"));
    }

    #[test]
    fn test_create_folder() {
        let mut project = sample();
        project.create_folder("appendix").unwrap();
        assert!(project.contains("appendix/.gitkeep"));
        assert!(project.create_folder("appendix").is_err());
    }

    #[test]
    fn test_write_text() {
        let mut project = sample();
        project.write_text("chapters/one.tex", "changed").unwrap();
        assert_eq!(project.text("chapters/one.tex"), Some("changed"));

        let err = project.write_text("images/fig.png", "x").unwrap_err();
        assert!(matches!(err, ProjectError::ReadOnly { .. }));
        assert!(project.write_text("nope.tex", "x").is_err());
    }

    #[test]
    fn test_delete_main_is_protected() {
        let mut project = sample();
        let before = project.clone();
        let err = project.delete("main.tex").unwrap_err();
        assert_eq!(err, ProjectError::protected("main.tex"));
        assert_eq!(project, before);
    }

    #[test]
    fn test_delete_active_falls_back_to_main() {
        let mut project = sample();
        project.set_active("chapters/two.tex").unwrap();
        project.delete("chapters/two.tex").unwrap();
        assert_eq!(project.active_path(), Some("main.tex"));
        assert!(project.delete("chapters/two.tex").is_err());
    }

    #[test]
    fn test_delete_folder() {
        let mut project = sample();
        let removed = project.delete_folder("chapters").unwrap();
        assert_eq!(removed, ["chapters/one.tex", "chapters/two.tex"]);
        assert_eq!(project.len(), 2);
        assert!(project.delete_folder("chapters").is_err());
    }

    #[test]
    fn test_delete_folder_containing_main() {
        let mut project = sample();
        project.set_main("chapters/one.tex").unwrap();
        let before = project.clone();
        let err = project.delete_folder("chapters").unwrap_err();
        assert_eq!(err, ProjectError::protected("chapters"));
        assert_eq!(project, before);
    }

    #[test]
    fn test_rename_file_updates_references() {
        let mut project = sample();
        project.rename("main.tex", "root.tex").unwrap();
        assert_eq!(project.main_path(), Some("root.tex"));
        assert_eq!(project.active_path(), Some("root.tex"));
        assert!(!project.contains("main.tex"));
    }

    #[test]
    fn test_rename_conflict_leaves_project_untouched() {
        let mut project = sample();
        let before = project.clone();
        let err = project.rename("chapters/one.tex", "chapters/two.tex").unwrap_err();
        assert_eq!(err, ProjectError::conflict("chapters/two.tex"));
        assert_eq!(project, before);
    }

    #[test]
    fn test_rename_main_to_non_markup() {
        let mut project = sample();
        let err = project.rename("main.tex", "main.txt").unwrap_err();
        assert!(matches!(err, ProjectError::InvalidType { .. }));
        assert!(project.contains("main.tex"));
    }

    #[test]
    fn test_rename_folder_is_prefix_replace() {
        let mut project = sample();
        project.set_main("chapters/one.tex").unwrap();
        project.set_active("chapters/two.tex").unwrap();
        project.put("chapters-old/keep.tex", FileEntry::text(""));

        project.rename("chapters", "parts").unwrap();

        assert!(project.contains("parts/one.tex"));
        assert!(project.contains("parts/two.tex"));
        assert!(project.contains("chapters-old/keep.tex"));
        assert_eq!(project.main_path(), Some("parts/one.tex"));
        assert_eq!(project.active_path(), Some("parts/two.tex"));
    }

    #[test]
    fn test_rename_folder_into_itself() {
        let mut project = sample();
        let err = project.rename("chapters", "chapters/nested").unwrap_err();
        assert!(matches!(err, ProjectError::Conflict { .. }));
    }

    #[test]
    fn test_rename_to_root_rejected() {
        let mut project = Project::from_files([
            ("main.tex", FileEntry::text("")),
            ("one.tex", FileEntry::text("ROOT ONE")),
            ("chapters/one.tex", FileEntry::text("CHAPTER ONE")),
        ]);
        let before = project.clone();

        for target in ["", "chapters/..", "/", "./"] {
            let err = project.rename("chapters", target).unwrap_err();
            assert!(matches!(err, ProjectError::Conflict { .. }), "{target:?}");
        }
        assert!(matches!(
            project.rename("one.tex", "").unwrap_err(),
            ProjectError::Conflict { .. }
        ));
        assert_eq!(project, before);
        assert_eq!(project.text("one.tex"), Some("ROOT ONE"));
    }

    #[test]
    fn test_create_at_root_rejected() {
        let mut project = sample();
        let before = project.clone();
        assert!(matches!(
            project.create("", FileEntry::text("")).unwrap_err(),
            ProjectError::Conflict { .. }
        ));
        assert!(project.create("./", FileEntry::text("")).is_err());
        assert!(project.create_folder("a/..").is_err());
        assert_eq!(project, before);
        assert!(!project.contains(""));
    }

    #[test]
    fn test_rename_missing() {
        let mut project = sample();
        assert!(matches!(
            project.rename("ghost", "spirit").unwrap_err(),
            ProjectError::NotFound { .. }
        ));
    }

    #[test]
    fn test_set_main() {
        let mut project = sample();
        assert!(matches!(
            project.set_main("missing.tex").unwrap_err(),
            ProjectError::NotFound { .. }
        ));
        assert!(matches!(
            project.set_main("images/fig.png").unwrap_err(),
            ProjectError::InvalidType { .. }
        ));
        project.set_main("chapters/two.tex").unwrap();
        assert_eq!(project.main_path(), Some("chapters/two.tex"));
    }

    #[test]
    fn test_clean_is_idempotent() {
        let mut project = Project::from_files([
            ("main.tex", FileEntry::text("")),
            ("__MACOSX/._main.tex", FileEntry::text("")),
            ("figs/.DS_Store", FileEntry::text("")),
            ("figs/plot.png", FileEntry::binary(&[1], "png")),
            (".gitignore", FileEntry::text("*.aux")),
        ]);
        let removed = project.clean();
        assert_eq!(removed.len(), 2);
        assert_eq!(project.len(), 3);

        let snapshot = project.clone();
        assert!(project.clean().is_empty());
        assert_eq!(project, snapshot);
    }

    #[test]
    fn test_clean_repairs_main() {
        let mut project = Project::new(ProjectMode::MultiFile);
        project.put(".hidden/main.tex", FileEntry::text(""));
        project.put("paper.tex", FileEntry::text(""));
        assert_eq!(project.main_path(), Some(".hidden/main.tex"));

        project.clean();
        assert_eq!(project.main_path(), Some("paper.tex"));
        assert_eq!(project.active_path(), Some("paper.tex"));
    }
}
