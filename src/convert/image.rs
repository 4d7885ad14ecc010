//! `\includegraphics` embedding.

use std::sync::LazyLock;

use regex::Regex;

use super::document::Block;
use super::passes::split_text;
use crate::diagnostic::{DiagnosticInfo, DiagnosticKind, Diagnostics};
use crate::project::path::extension;
use crate::project::{FileEntry, Project};

static INCLUDE_GRAPHICS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\includegraphics(?:\[[^\]]*\])?\{([^}]+)\}").expect("valid includegraphics regex")
});

/// Suffixes probed, in order, when looking an image up by name.
const PROBE_SUFFIXES: &[&str] = &["", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".pdf"];

/// MIME type for an image extension.
pub fn mime_for(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Replace image references with embedded images or placeholders.
///
/// Only binary entries match. Without a project every reference is missing.
pub(crate) fn embed_images(
    blocks: Vec<Block>,
    project: Option<&Project>,
    diagnostics: &mut Diagnostics,
) -> Vec<Block> {
    split_text(blocks, &INCLUDE_GRAPHICS, |caps| {
        let name = caps[1].trim();
        let block = lookup(project, name).unwrap_or_else(|| {
            log::warn!("image not found: {name}");
            diagnostics.push(DiagnosticInfo::warning(
                DiagnosticKind::MissingImage,
                format!("image not found: {name}"),
            ));
            Block::MissingImage(name.to_string())
        });
        vec![block]
    })
}

fn lookup(project: Option<&Project>, name: &str) -> Option<Block> {
    let project = project?;
    PROBE_SUFFIXES.iter().find_map(|suffix| {
        let path = format!("{name}{suffix}");
        match project.get(&path)? {
            FileEntry::Binary { payload, .. } => Some(Block::Image {
                name: name.to_string(),
                mime: mime_for(extension(&path).unwrap_or_default()),
                payload: payload.clone(),
            }),
            FileEntry::Text(_) => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> Project {
        Project::from_files([
            ("main.tex", FileEntry::text("")),
            ("figs/plot.png", FileEntry::binary(&[1, 2, 3], "png")),
            ("figs/scan.pdf", FileEntry::binary(&[4], "pdf")),
            ("figs/notes.tex", FileEntry::text("not an image")),
        ])
    }

    fn embed(src: &str, project: Option<&Project>) -> (Vec<Block>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let blocks = embed_images(vec![Block::Text(src.into())], project, &mut diagnostics);
        (blocks, diagnostics)
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("PNG"), "image/png");
        assert_eq!(mime_for("jpeg"), "image/jpeg");
        assert_eq!(mime_for("pdf"), "application/pdf");
        assert_eq!(mime_for("tiff"), "application/octet-stream");
    }

    #[test]
    fn test_probes_extensions() {
        let project = project();
        let (blocks, diagnostics) = embed(r"\includegraphics[width=5cm]{figs/plot}", Some(&project));
        assert!(diagnostics.is_empty());
        assert_eq!(
            blocks,
            vec![Block::Image {
                name: "figs/plot".into(),
                mime: "image/png",
                payload: "AQID".into(),
            }]
        );
    }

    #[test]
    fn test_exact_name() {
        let project = project();
        let (blocks, _) = embed(r"\includegraphics{figs/scan.pdf}", Some(&project));
        assert!(matches!(&blocks[0], Block::Image { mime: "application/pdf", .. }));
    }

    #[test]
    fn test_missing_and_text_targets() {
        let project = project();
        let (blocks, diagnostics) = embed(
            r"a \includegraphics{figs/notes} b \includegraphics{ghost}",
            Some(&project),
        );
        assert_eq!(
            blocks,
            vec![
                Block::Text("a ".into()),
                Block::MissingImage("figs/notes".into()),
                Block::Text(" b ".into()),
                Block::MissingImage("ghost".into()),
            ]
        );
        assert_eq!(diagnostics.of_kind(DiagnosticKind::MissingImage).count(), 2);
    }

    #[test]
    fn test_without_project() {
        let (blocks, _) = embed(r"\includegraphics{figs/plot}", None);
        assert_eq!(blocks, vec![Block::MissingImage("figs/plot".into())]);
    }
}
