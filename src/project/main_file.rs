//! Main-file detection.

use super::path::{file_name, is_markup};

/// Base names (without extension) that usually mark the compilation root.
const PREFERRED_STEMS: &[&str] = &["main", "document", "thesis", "paper", "article"];

/// Pick the most likely main file among `paths`.
///
/// Only markup files qualify. Preference order:
///
/// 1. a file whose stem is `main`, `document`, `thesis`, `paper` or
///    `article` (case-insensitive), shallowest first
/// 2. the first root-level markup file
/// 3. the first markup file
///
/// Ties are broken by lexicographic path order, so the result does not
/// depend on the order `paths` is given in.
pub fn detect_main<'a, I>(paths: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let extension = crate::config::get().markup_extension.as_str();
    let mut markup: Vec<&'a str> = paths.into_iter().filter(|p| is_markup(p)).collect();
    markup.sort_unstable();

    let preferred = markup
        .iter()
        .copied()
        .filter(|path| {
            file_name(path)
                .strip_suffix(extension)
                .is_some_and(|stem| PREFERRED_STEMS.iter().any(|p| p.eq_ignore_ascii_case(stem)))
        })
        .min_by_key(|path| (path.matches('/').count(), *path));

    preferred
        .or_else(|| markup.iter().copied().find(|path| !path.contains('/')))
        .or_else(|| markup.first().copied())
}
