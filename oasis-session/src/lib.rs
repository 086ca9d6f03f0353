//! Expression sessions for Oasis clients.
//!
//! This crate implements the state behind an interactive symbolic-math client: the user types an
//! expression, sees a live preview of it, submits it, and the simplified result is appended to a
//! conversation-style history. Guided [function builders](builder) compose calls like
//! `dd(x^2,x)` without the user having to know the syntax.
//!
//! The computer-algebra work is done by an [`Engine`], which the session only reaches through a
//! typed [`Adapter`]. Any engine implementing the five operations of the [`Engine`] trait can be
//! used; [`OasisEngine`] is the one bundled with Oasis.
//!
//! ```
//! use oasis_session::{
//!     Adapter, ArgField, BuilderSpec, EngineConfig, Event, MarkupFormat, OasisEngine, Session,
//! };
//!
//! let engine = OasisEngine::new(EngineConfig { format: MarkupFormat::Text, ..Default::default() });
//! let mut session = Session::new(Adapter::new(engine));
//!
//! session.apply(Event::OpenBuilder(BuilderSpec::DERIVATIVE));
//! session.apply(Event::BuilderArgChanged(ArgField::First, "x^3".to_string()));
//! session.apply(Event::BuilderArgChanged(ArgField::Second, "x".to_string()));
//! session.apply(Event::AcceptBuilder);
//! session.apply(Event::Submit);
//!
//! let entry = &session.history().entries()[0];
//! assert_eq!(entry.query, "dd(x^3,x)");
//! assert_eq!(entry.response_text(), "3x^2");
//! ```

pub mod adapter;
pub mod builder;
pub mod engine;
pub mod session;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod testing;

pub use adapter::{Adapter, Handle};
pub use builder::{ArgField, BuilderSpec, FunctionBuilder, PARSE_FAILURE_PLACEHOLDER};
pub use engine::{ComputationError, Engine, EngineConfig, OasisEngine, RawHandle};
pub use oasis_compute::MarkupFormat;
pub use session::{
    event::{Event, Transition},
    history::{History, HistoryEntry, Response},
    view::{BuilderView, SessionView},
    Session,
};
