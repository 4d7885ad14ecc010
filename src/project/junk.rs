//! Detection of foreign files introduced by archive tools and operating systems.

/// Segment names (case-insensitive) that mark a path as foreign.
const DENYLIST: &[&str] = &[
    "__macosx",
    ".ds_store",
    "._.ds_store",
    ".spotlight-v100",
    ".trashes",
    ".fseventsd",
    ".temporaryitems",
    ".appledouble",
    ".appledesktop",
    ".volumeicon.icns",
    "thumbs.db",
    "desktop.ini",
    ".git",
];

/// Hidden segments that are still project content.
const ALLOWED_HIDDEN: &[&str] = &[".gitignore", ".github", ".gitkeep"];

/// Resource-fork prefix written by macOS archivers.
const RESOURCE_FORK_PREFIX: &str = "._";

/// Check whether a path is platform or tooling metadata rather than project content.
///
/// Empty paths are foreign. A path is foreign when it contains `__MACOSX`
/// anywhere, or any segment is a denylisted name, starts with `._`, or is a
/// hidden (dot) name outside the allow-list. Both `/` and `\` separate
/// segments; `.` and `..` are navigation, not hidden names.
///
/// # Example
///
/// ```
/// use latex_preview::project::is_foreign;
///
/// assert!(is_foreign("__MACOSX/._main.tex"));
/// assert!(is_foreign("figures/.DS_Store"));
/// assert!(!is_foreign("figures/plot.png"));
/// assert!(!is_foreign(".gitignore"));
/// ```
pub fn is_foreign(path: &str) -> bool {
    let path = path.trim();
    if path.is_empty() {
        return true;
    }

    if path.to_ascii_lowercase().contains("__macosx") {
        return true;
    }

    path.split(['/', '\\'])
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .any(is_foreign_segment)
}

fn is_foreign_segment(segment: &str) -> bool {
    let lower = segment.to_ascii_lowercase();
    if DENYLIST.contains(&lower.as_str()) {
        return true;
    }
    if segment.starts_with(RESOURCE_FORK_PREFIX) {
        return true;
    }
    segment.starts_with('.') && !ALLOWED_HIDDEN.contains(&segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslash_and_dot_segments() {
        assert!(is_foreign(r"figs\.DS_Store"));
        assert!(is_foreign(r"proj\__MACOSX\x.tex"));
        assert!(!is_foreign("./main.tex"));
        assert!(!is_foreign("chapters/../fig.png"));
        assert!(is_foreign("./.hidden/notes.tex"));
    }

    #[test]
    fn test_empty_is_foreign() {
        assert!(is_foreign(""));
        assert!(is_foreign("   "));
    }

    #[test]
    fn test_denylist_case_insensitive() {
        assert!(is_foreign("__macosx/main.tex"));
        assert!(is_foreign("project/THUMBS.DB"));
        assert!(is_foreign("Desktop.ini"));
        assert!(is_foreign(".git/config"));
        assert!(is_foreign("a/.Spotlight-V100/store"));
    }

    #[test]
    fn test_resource_fork() {
        assert!(is_foreign("chapters/._intro.tex"));
    }

    #[test]
    fn test_hidden_files() {
        assert!(is_foreign(".env"));
        assert!(is_foreign("build/.cache/x.aux"));
        assert!(!is_foreign(".gitignore"));
        assert!(!is_foreign(".github/workflows/build.yml"));
        assert!(!is_foreign("sections/.gitkeep"));
    }

    #[test]
    fn test_content_paths() {
        assert!(!is_foreign("main.tex"));
        assert!(!is_foreign("sections/intro.tex"));
        assert!(!is_foreign("images/figure.1.png"));
    }
}
