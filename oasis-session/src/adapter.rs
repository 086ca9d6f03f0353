//! A typed gateway over an [`Engine`].
//!
//! The [`Adapter`] turns the raw handles returned by an engine into owning [`Handle`]s. A
//! [`Handle`] always refers to a live expression: it cannot be the sentinel, cannot be cloned, and
//! releases its expression when dropped. This makes the two ways of misusing the raw contract,
//! rendering the sentinel and releasing twice, impossible to express.
//!
//! The engine is shared through an `Rc<RefCell<_>>`, so handles are neither [`Send`] nor
//! [`Sync`]. The engine is only borrowed for the duration of a single call; no borrow is held while
//! a handle is dropped.

use crate::engine::{ComputationError, Engine, RawHandle};
use std::{
    cell::{Ref, RefCell},
    fmt,
    num::NonZeroU32,
    rc::Rc,
};

/// An owned reference to a live expression inside an engine.
///
/// The expression is released when the handle is dropped.
pub struct Handle<E: Engine> {
    id: NonZeroU32,
    engine: Rc<RefCell<E>>,
}

impl<E: Engine> Handle<E> {
    /// Wraps a raw handle, returning [`None`] for the sentinel.
    fn new(raw: RawHandle, engine: &Rc<RefCell<E>>) -> Option<Self> {
        NonZeroU32::new(raw.0).map(|id| Self { id, engine: Rc::clone(engine) })
    }

    /// Returns the raw handle, for logging and diagnostics.
    pub fn raw(&self) -> RawHandle {
        RawHandle(self.id.get())
    }
}

impl<E: Engine> fmt::Debug for Handle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.id).finish()
    }
}

impl<E: Engine> Drop for Handle<E> {
    fn drop(&mut self) {
        tracing::trace!(handle = self.id.get(), "release");
        self.engine.borrow_mut().release(self.raw());
    }
}

/// A typed gateway over an [`Engine`].
///
/// Cloning an adapter is cheap and shares the engine.
pub struct Adapter<E: Engine> {
    engine: Rc<RefCell<E>>,
}

impl<E: Engine> Clone for Adapter<E> {
    fn clone(&self) -> Self {
        Self { engine: Rc::clone(&self.engine) }
    }
}

impl<E: Engine + fmt::Debug> fmt::Debug for Adapter<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter").field("engine", &self.engine).finish()
    }
}

impl<E: Engine> Adapter<E> {
    /// Creates an adapter that owns the engine.
    pub fn new(engine: E) -> Self {
        Self::from_shared(Rc::new(RefCell::new(engine)))
    }

    /// Creates an adapter over an engine that is shared with the caller.
    pub fn from_shared(engine: Rc<RefCell<E>>) -> Self {
        Self { engine }
    }

    /// Borrows the engine.
    ///
    /// The borrow must end before any [`Handle`] from this adapter is dropped.
    pub fn engine(&self) -> Ref<'_, E> {
        self.engine.borrow()
    }

    /// Returns true if the handle was issued by this adapter's engine.
    fn owns(&self, handle: &Handle<E>) -> bool {
        Rc::ptr_eq(&self.engine, &handle.engine)
    }

    /// Rewrites raw input into the canonical form the engine parses.
    pub fn normalize(&self, raw: &str) -> String {
        tracing::trace!(raw, "normalize");
        self.engine.borrow().normalize(raw)
    }

    /// Parses normalized input, returning [`None`] if it is not a valid expression.
    pub fn parse(&self, normalized: &str) -> Option<Handle<E>> {
        tracing::trace!(normalized, "parse");
        let raw = self.engine.borrow_mut().parse(normalized);
        Handle::new(raw, &self.engine)
    }

    /// Renders the expression as display markup.
    pub fn render(&self, handle: &Handle<E>) -> String {
        debug_assert!(self.owns(handle), "handle belongs to another engine");
        tracing::trace!(handle = handle.id.get(), "render");
        self.engine.borrow().render(handle.raw())
    }

    /// Simplifies the expression into a new one. The given handle stays valid.
    pub fn simplify(&self, handle: &Handle<E>) -> Result<Handle<E>, ComputationError> {
        debug_assert!(self.owns(handle), "handle belongs to another engine");
        tracing::trace!(handle = handle.id.get(), "simplify");
        let raw = self.engine.borrow_mut().simplify(handle.raw())?;
        Handle::new(raw, &self.engine)
            .ok_or_else(|| ComputationError::new("the engine returned no expression"))
    }

    /// Returns the number of live handles in the engine, if it keeps track.
    pub fn live_handles(&self) -> Option<usize> {
        self.engine.borrow().live_handles()
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{audited, Calls};
    use pretty_assertions::assert_eq;

    #[test]
    fn sentinel_is_none() {
        let adapter = audited();
        assert!(adapter.parse("2*x+").is_none());
        assert_eq!(adapter.live_handles(), Some(0));
    }

    #[test]
    fn drop_releases_once() {
        let adapter = audited();
        let handle = adapter.parse("x").unwrap();
        assert_eq!(adapter.live_handles(), Some(1));

        drop(handle);
        assert_eq!(adapter.live_handles(), Some(0));
        assert_eq!(adapter.engine().calls(), Calls { parse: 1, release: 1, ..Default::default() });
    }

    #[test]
    fn simplify_keeps_original() {
        let adapter = audited();
        let handle = adapter.parse("2*x+3*x").unwrap();
        let simplified = adapter.simplify(&handle).unwrap();

        assert_eq!(adapter.render(&handle), "2x+3x");
        assert_eq!(adapter.render(&simplified), "5x");
        assert_eq!(adapter.live_handles(), Some(2));
    }

    #[test]
    fn computation_error() {
        let adapter = audited();
        let handle = adapter.parse("0^0").unwrap();
        let err = adapter.simplify(&handle).unwrap_err();
        assert_eq!(err.message, "`0^0` is undefined");
        assert_eq!(adapter.live_handles(), Some(1));
    }
}
