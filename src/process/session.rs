//! Compile session for single-flight tracking.
//!
//! Encapsulates the `Idle` → `Compiling` → `Idle` transition and the
//! compile clock.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::diagnostic::CompileError;

/// Whether a compilation is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompileState {
    /// Ready to accept a request.
    #[default]
    Idle,
    /// A request is being processed.
    Compiling,
}

/// Holds the compiler in [`CompileState::Compiling`] until dropped.
///
/// Create a session before gathering sources; dropping it (on completion,
/// on failure, or when the compile future itself is dropped) returns the
/// state to [`CompileState::Idle`].
///
/// # Example
///
/// ```ignore
/// let session = CompileSession::begin(&self.state)?;
/// let payload = convert(&source, Some(project));
/// surface.present(&payload).await?;
/// let duration = session.elapsed();
/// ```
pub(crate) struct CompileSession<'a> {
    state: &'a Mutex<CompileState>,
    started: Instant,
}

impl<'a> CompileSession<'a> {
    /// Enter `Compiling`, or fail if a compile is already in flight.
    pub(crate) fn begin(state: &'a Mutex<CompileState>) -> Result<Self, CompileError> {
        {
            let mut current = state.lock();
            if *current == CompileState::Compiling {
                return Err(CompileError::AlreadyRunning);
            }
            *current = CompileState::Compiling;
        }
        Ok(Self {
            state,
            started: Instant::now(),
        })
    }

    /// Time since the session began.
    #[inline]
    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for CompileSession<'_> {
    fn drop(&mut self) {
        *self.state.lock() = CompileState::Idle;
    }
}
