//! Compile pipeline.
//!
//! - [`Compiler`] - single-flight orchestration from project to surface
//! - [`RenderSurface`] - where payloads go ([`MemorySurface`], [`FileSurface`])

mod compile;
mod session;
mod surface;

pub use compile::{CompileResult, Compiler, Outcome};
pub use session::CompileState;
pub use surface::{FileSurface, MemorySurface, RenderSurface};
