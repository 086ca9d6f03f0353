//! The operations a computer-algebra engine provides to a session.
//!
//! An [`Engine`] stores expressions on its side and hands out [`RawHandle`]s to them. The raw
//! handle `0` means "no expression", and is what [`Engine::parse`] returns for input it cannot
//! parse. Every other handle owns engine memory until it is passed to [`Engine::release`].
//!
//! Sessions never call an [`Engine`] directly; they go through the typed
//! [`Adapter`](crate::adapter::Adapter), which makes the sentinel and double releases
//! unrepresentable.

pub mod oasis;

use thiserror::Error;

pub use oasis::{EngineConfig, OasisEngine};

/// An engine-issued identifier for an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawHandle(pub u32);

impl RawHandle {
    /// The sentinel handle, which refers to no expression.
    pub const NONE: RawHandle = RawHandle(0);

    /// Returns true if this is the sentinel handle.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// An error reported by [`Engine::simplify`]. The message is shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ComputationError {
    pub message: String,
}

impl ComputationError {
    /// Creates an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// A computer-algebra engine.
///
/// Every operation is synchronous. Passing the sentinel handle, or a handle that was already
/// released, to [`render`](Engine::render), [`simplify`](Engine::simplify) or
/// [`release`](Engine::release) is a caller error; implementations may do anything reasonable
/// except corrupt other handles.
pub trait Engine {
    /// Rewrites raw input into the canonical form accepted by [`Engine::parse`]. Never fails, and
    /// is idempotent on its own output.
    fn normalize(&self, raw: &str) -> String;

    /// Parses normalized input. Returns [`RawHandle::NONE`] if the input is not a valid
    /// expression.
    fn parse(&mut self, normalized: &str) -> RawHandle;

    /// Renders the expression as display markup.
    fn render(&self, handle: RawHandle) -> String;

    /// Simplifies the expression, returning a handle to a new expression. The original handle
    /// stays valid.
    fn simplify(&mut self, handle: RawHandle) -> Result<RawHandle, ComputationError>;

    /// Frees the expression. The handle must not be used again.
    fn release(&mut self, handle: RawHandle);

    /// Returns the number of handles that have been issued and not yet released, if the engine
    /// keeps track.
    fn live_handles(&self) -> Option<usize> {
        None
    }
}
