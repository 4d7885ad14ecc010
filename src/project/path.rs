//! Path utilities.
//!
//! Project paths are forward-slash separated and relative to the project
//! root, with no leading slash and no `.`/`..` segments.

/// Normalize a project path.
///
/// Backslashes become `/`, empty and `.` segments are dropped, `..` pops the
/// previous segment (never escaping the root), and the leading `/` is removed.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.trim().split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Directory part of a path (`""` for root-level files).
#[inline]
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// Last segment of a path.
#[inline]
pub fn file_name(path: &str) -> &str {
    path.rfind('/').map_or(path, |i| &path[i + 1..])
}

/// Extension of the last segment, without the dot.
pub fn extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(i) => Some(&name[i + 1..]),
    }
}

/// Join a directory and a relative name.
#[inline]
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Check whether a path carries the markup extension.
#[inline]
pub fn is_markup(path: &str) -> bool {
    path.ends_with(crate::config::get().markup_extension.as_str())
}

/// Candidate project paths for an include target, in probing order.
///
/// 1. `raw_target` as written
/// 2. `raw_target` with `required_extension` appended (if missing)
/// 3. `base_dir/raw_target`, extension rule applied
/// 4. as 3, with a leading `./` stripped from `raw_target` first
///
/// Candidates are normalized and deduplicated, keeping first position. The
/// caller probes its filesystem in order and takes the first hit.
///
/// # Example
///
/// ```
/// use latex_preview::project::path::candidates;
///
/// let paths = candidates("chapters", "intro", Some(".tex"));
/// assert_eq!(paths, ["intro", "intro.tex", "chapters/intro.tex"]);
/// ```
pub fn candidates(base_dir: &str, raw_target: &str, required_extension: Option<&str>) -> Vec<String> {
    let raw = raw_target.trim();
    let with_extension = |path: &str| match required_extension {
        Some(ext) if !path.ends_with(ext) => format!("{path}{ext}"),
        _ => path.to_string(),
    };
    let stripped = raw.strip_prefix("./").unwrap_or(raw);

    let ordered = [
        raw.to_string(),
        with_extension(raw),
        with_extension(&join(base_dir, raw)),
        with_extension(&join(base_dir, stripped)),
    ];

    let mut out: Vec<String> = Vec::with_capacity(ordered.len());
    for candidate in ordered {
        let candidate = normalize(&candidate);
        if !candidate.is_empty() && !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("./parts//intro.tex"), "parts/intro.tex");
        assert_eq!(normalize("/abs/path"), "abs/path");
        assert_eq!(normalize("a\\b\\c.tex"), "a/b/c.tex");
        assert_eq!(normalize("chapters/../intro.tex"), "intro.tex");
        assert_eq!(normalize("../../x"), "x");
    }

    #[test]
    fn test_parts() {
        assert_eq!(parent_dir("a/b/c.tex"), "a/b");
        assert_eq!(parent_dir("c.tex"), "");
        assert_eq!(file_name("a/b/c.tex"), "c.tex");
        assert_eq!(extension("a/b/c.TEX"), Some("TEX"));
        assert_eq!(extension("a/.gitignore"), None);
        assert_eq!(extension("a/b/README"), None);
    }

    #[test]
    fn test_candidates_root() {
        let paths = candidates("", "parts/intro", Some(".tex"));
        assert_eq!(paths, ["parts/intro", "parts/intro.tex"]);
    }

    #[test]
    fn test_candidates_relative() {
        let paths = candidates("chapters", "./sec/a.tex", Some(".tex"));
        assert_eq!(paths, ["sec/a.tex", "chapters/sec/a.tex"]);
    }

    #[test]
    fn test_candidates_without_extension_rule() {
        let paths = candidates("img", "logo", None);
        assert_eq!(paths, ["logo", "img/logo"]);
    }

    #[test]
    fn test_candidates_parent_reference() {
        let paths = candidates("chapters/one", "../shared/defs", Some(".tex"));
        assert_eq!(paths, ["shared/defs", "shared/defs.tex", "chapters/shared/defs.tex"]);
    }
}
