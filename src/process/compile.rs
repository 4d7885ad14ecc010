//! Compilation orchestration.
//!
//! # Example
//!
//! ```
//! use latex_preview::process::{Compiler, MemorySurface};
//! use latex_preview::project::{FileEntry, Project};
//!
//! let compiler = Compiler::new();
//! let surface = MemorySurface::new();
//! let mut project = Project::from_files([
//!     ("main.tex", FileEntry::text("\\input{parts/intro}")),
//!     ("parts/intro.tex", FileEntry::text("\\section{A}")),
//! ]);
//!
//! let editor_text = project.text("main.tex").unwrap().to_string();
//! let result = pollster::block_on(compiler.compile(&mut project, &editor_text, &surface)).unwrap();
//! assert!(result.is_rendered());
//! assert!(surface.last().unwrap().contains("<h2>A</h2>"));
//! ```

use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::convert::Converter;
use crate::diagnostic::{CompileError, DiagnosticInfo, DiagnosticKind, Diagnostics};
use crate::include::IncludeResolver;
use crate::project::{Project, ProjectMode};

use super::session::{CompileSession, CompileState};
use super::surface::RenderSurface;

/// How a compilation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The surface accepted the payload.
    Rendered,
    /// Nothing usable was produced, or the surface rejected it.
    Failed(CompileError),
}

/// Result of one compile request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    payload: String,
    duration: Duration,
    outcome: Outcome,
    diagnostics: Diagnostics,
    accessed: Vec<String>,
}

impl CompileResult {
    /// The HTML payload (empty when no source could be gathered).
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Wall-clock time from request to outcome.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// How the compilation ended.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Check if the payload reached the surface.
    pub fn is_rendered(&self) -> bool {
        self.outcome == Outcome::Rendered
    }

    /// Get compilation diagnostics; a failed outcome adds one error.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Project files read while resolving includes, in first-read order.
    pub fn accessed_files(&self) -> &[String] {
        &self.accessed
    }

    /// Destructure into components.
    pub fn into_parts(self) -> (String, Outcome, Diagnostics, Vec<String>) {
        (self.payload, self.outcome, self.diagnostics, self.accessed)
    }
}

/// Single-flight compiler.
///
/// Only one compilation runs at a time; a request made while another is in
/// flight is rejected with [`CompileError::AlreadyRunning`] rather than
/// queued. The most recent result is kept for [`last_result`](Self::last_result).
#[derive(Debug, Default)]
pub struct Compiler {
    state: Mutex<CompileState>,
    last: Mutex<Option<CompileResult>>,
    converter: Converter,
}

/// Source text plus what was learned gathering it.
struct Gathered {
    source: String,
    diagnostics: Diagnostics,
    accessed: Vec<String>,
}

impl Compiler {
    /// Create an idle compiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom converter (for a fixed `\today` or MathJax URL).
    pub fn with_converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    /// Current state.
    pub fn state(&self) -> CompileState {
        *self.state.lock()
    }

    /// The most recent result, if any.
    pub fn last_result(&self) -> Option<CompileResult> {
        self.last.lock().clone()
    }

    /// Compile the project and hand the payload to `surface`.
    ///
    /// In multi-file mode `editor_text` is first written to the active file
    /// (unless it is binary), then the main file is compiled with includes
    /// resolved. In single-document mode `editor_text` is compiled as is.
    ///
    /// Returns `Err` only for [`CompileError::AlreadyRunning`]; every other
    /// failure is reported through [`CompileResult::outcome`].
    pub async fn compile<S: RenderSurface>(
        &self,
        project: &mut Project,
        editor_text: &str,
        surface: &S,
    ) -> Result<CompileResult, CompileError> {
        let session = CompileSession::begin(&self.state).inspect_err(|_| {
            log::warn!("compile request rejected: already running");
        })?;

        let (payload, outcome, mut diagnostics, accessed) = match gather(project, editor_text) {
            Ok(gathered) => {
                let images = (project.mode() == ProjectMode::MultiFile).then_some(&*project);
                let mut doc = self.converter.parse(&gathered.source, images);
                let mut diagnostics = gathered.diagnostics;
                diagnostics.extend(doc.take_diagnostics());
                let payload = self.converter.render(&doc);

                let outcome = match surface.present(&payload).await {
                    Ok(()) => Outcome::Rendered,
                    Err(err) => {
                        log::warn!("{err}");
                        Outcome::Failed(err.into())
                    }
                };
                (payload, outcome, diagnostics, gathered.accessed)
            }
            Err(err) => {
                log::warn!("compile failed: {err}");
                (String::new(), Outcome::Failed(err), Diagnostics::new(), Vec::new())
            }
        };

        if let Outcome::Failed(err) = &outcome {
            diagnostics.push(DiagnosticInfo::error(DiagnosticKind::CompileFailed, err.to_string()));
        }

        let result = CompileResult {
            payload,
            duration: session.elapsed(),
            outcome,
            diagnostics,
            accessed,
        };
        if result.is_rendered() {
            log::info!(
                "compiled in {}ms ({})",
                result.duration.as_millis(),
                result.diagnostics.summary()
            );
        }
        *self.last.lock() = Some(result.clone());
        drop(session);
        Ok(result)
    }
}

/// Pick the source to compile.
fn gather(project: &mut Project, editor_text: &str) -> Result<Gathered, CompileError> {
    if project.mode() == ProjectMode::SingleDocument {
        return Ok(Gathered {
            source: editor_text.to_string(),
            diagnostics: Diagnostics::new(),
            accessed: Vec::new(),
        });
    }

    if let Some(active) = project.active_path().map(str::to_string)
        && project.text(&active).is_some()
    {
        // Only text entries can be written; the check above rules out the errors.
        let _ = project.write_text(&active, editor_text);
    }

    let main = project.main_path().ok_or(CompileError::NoMainFile)?.to_string();
    let content = project
        .text(&main)
        .ok_or_else(|| CompileError::UnreadableMain { path: main.clone() })?;

    let mut resolver = IncludeResolver::new(project);
    let source = resolver.resolve(content, &main, &FxHashSet::default());
    let (diagnostics, accessed) = resolver.finish();
    Ok(Gathered {
        source,
        diagnostics,
        accessed,
    })
}

#[cfg(test)]
mod tests {
    use std::future::pending;
    use std::pin::pin;
    use std::task::{Context, Poll, Waker};

    use super::*;
    use crate::diagnostic::{DiagnosticKind, RenderError};
    use crate::process::MemorySurface;
    use crate::project::FileEntry;

    /// Never finishes presenting.
    struct StuckSurface;

    impl RenderSurface for StuckSurface {
        async fn present(&self, _payload: &str) -> Result<(), RenderError> {
            pending().await
        }
    }

    fn project() -> Project {
        Project::from_files([
            ("main.tex", FileEntry::text("\\input{parts/intro}\n\\input{missing}")),
            ("parts/intro.tex", FileEntry::text("\\section{A}")),
        ])
    }

    #[test]
    fn test_single_document_uses_editor_text() {
        let compiler = Compiler::new();
        let surface = MemorySurface::new();
        let mut project = Project::single("stale");

        let result = pollster::block_on(compiler.compile(
            &mut project,
            "\\section{Intro}\nHello \\textbf{world}.",
            &surface,
        ))
        .unwrap();

        assert!(result.is_rendered());
        assert!(!result.diagnostics().summary().has_errors());
        assert!(result.payload().contains("<h2>Intro</h2>"));
        assert!(result.payload().contains("<strong>world</strong>"));
        assert_eq!(surface.last().as_deref(), Some(result.payload()));
        assert_eq!(compiler.state(), CompileState::Idle);
    }

    #[test]
    fn test_multi_file_resolves_includes() {
        let compiler = Compiler::new();
        let surface = MemorySurface::new();
        let mut project = project();
        let editor_text = project.text("main.tex").unwrap().to_string();

        let result =
            pollster::block_on(compiler.compile(&mut project, &editor_text, &surface)).unwrap();

        assert!(result.is_rendered());
        assert!(result.payload().contains("<h2>A</h2>"));
        assert_eq!(result.accessed_files(), ["parts/intro.tex"]);
        assert_eq!(
            result
                .diagnostics()
                .of_kind(DiagnosticKind::MissingInclude)
                .count(),
            1
        );
        assert_eq!(compiler.last_result(), Some(result));
    }

    #[test]
    fn test_editor_text_snapshots_into_active_file() {
        let compiler = Compiler::new();
        let surface = MemorySurface::new();
        let mut project = project();
        project.set_active("parts/intro.tex").unwrap();

        let result =
            pollster::block_on(compiler.compile(&mut project, "\\section{B}", &surface)).unwrap();

        assert_eq!(project.text("parts/intro.tex"), Some("\\section{B}"));
        assert!(result.payload().contains("<h2>B</h2>"));
    }

    #[test]
    fn test_binary_active_file_not_overwritten() {
        let compiler = Compiler::new();
        let surface = MemorySurface::new();
        let mut project = project();
        project.put("logo.png", FileEntry::binary(&[1, 2, 3], "png"));
        project.set_active("logo.png").unwrap();

        pollster::block_on(compiler.compile(&mut project, "[Binary file]", &surface)).unwrap();
        assert!(project.get("logo.png").unwrap().is_read_only());
    }

    #[test]
    fn test_no_main_file() {
        let compiler = Compiler::new();
        let surface = MemorySurface::new();
        let mut project = Project::from_files([("notes.md", FileEntry::text("x"))]);

        let result = pollster::block_on(compiler.compile(&mut project, "", &surface)).unwrap();
        assert_eq!(result.outcome(), &Outcome::Failed(CompileError::NoMainFile));
        assert!(result.diagnostics().summary().has_errors());
        assert_eq!(surface.count(), 0);
        assert_eq!(compiler.state(), CompileState::Idle);
    }

    #[test]
    fn test_render_failure() {
        let compiler = Compiler::new();
        let surface = MemorySurface::failing("surface gone");
        let mut project = Project::single("");

        let result = pollster::block_on(compiler.compile(&mut project, "x", &surface)).unwrap();
        assert_eq!(
            result.outcome(),
            &Outcome::Failed(CompileError::Render(RenderError::new("surface gone")))
        );
        assert!(!result.payload().is_empty());
        assert_eq!(compiler.state(), CompileState::Idle);
    }

    #[test]
    fn test_rejects_while_in_flight() {
        let compiler = Compiler::new();
        let mut first = Project::single("");
        let mut second = Project::single("");

        {
            let mut in_flight = pin!(compiler.compile(&mut first, "x", &StuckSurface));
            let mut cx = Context::from_waker(Waker::noop());
            assert!(matches!(in_flight.as_mut().poll(&mut cx), Poll::Pending));
            assert_eq!(compiler.state(), CompileState::Compiling);

            let surface = MemorySurface::new();
            let rejected = pollster::block_on(compiler.compile(&mut second, "y", &surface));
            assert_eq!(rejected, Err(CompileError::AlreadyRunning));
            assert_eq!(surface.count(), 0);
        }

        // dropping the stuck future releases the flag
        assert_eq!(compiler.state(), CompileState::Idle);
        assert!(compiler.last_result().is_none());
    }
}
