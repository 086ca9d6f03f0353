//! The expression session state machine.
//!
//! A [`Session`] holds the text the user is typing, a handle to the expression it parses to, and
//! the history of submissions. It changes only through [`Session::apply`], which takes an
//! [`Event`] and reports the resulting [`Transition`]; [`Session::view`] projects the state for a
//! presentation layer.
//!
//! ```
//! use oasis_session::{Adapter, Event, OasisEngine, Session, Transition};
//!
//! let mut session = Session::new(Adapter::new(OasisEngine::default()));
//! session.apply(Event::InputChanged("2x+3x".to_string()));
//! assert!(session.view().submit_enabled);
//!
//! let transition = session.apply(Event::Submit);
//! assert_eq!(transition, Transition::Submitted { index: 0, is_error: false });
//! assert_eq!(session.input(), "");
//! ```

pub mod event;
pub mod history;
pub mod view;

use crate::adapter::{Adapter, Handle};
use crate::builder::{ArgField, BuilderSpec, FunctionBuilder};
use crate::engine::Engine;
use event::{Event, Transition};
use history::{History, HistoryEntry, Response};
use view::SessionView;

/// An interactive expression session.
pub struct Session<E: Engine> {
    adapter: Adapter<E>,

    /// The raw text of the main input.
    input: String,

    /// The expression parsed from the current input, if it parsed.
    current: Option<Handle<E>>,

    /// Markup of `current`, rendered when it was parsed.
    preview: Option<String>,

    history: History,

    /// The open function builder, if any.
    builder: Option<FunctionBuilder<E>>,
}

impl<E: Engine> std::fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("input", &self.input)
            .field("current", &self.current)
            .field("history", &self.history)
            .field("builder", &self.builder)
            .finish()
    }
}

impl<E: Engine> Session<E> {
    /// Creates an empty session.
    pub fn new(adapter: Adapter<E>) -> Self {
        Self {
            adapter,
            input: String::new(),
            current: None,
            preview: None,
            history: History::default(),
            builder: None,
        }
    }

    /// The adapter wrapping the engine.
    pub fn adapter(&self) -> &Adapter<E> {
        &self.adapter
    }

    /// The raw text of the main input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The queries submitted so far, with their responses.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns true if the current input parsed to an expression.
    pub fn has_expression(&self) -> bool {
        self.current.is_some()
    }

    /// The open function builder, if any.
    pub fn builder(&self) -> Option<&FunctionBuilder<E>> {
        self.builder.as_ref()
    }

    /// Applies an event to the session.
    pub fn apply(&mut self, event: Event) -> Transition {
        let transition = match event {
            Event::InputChanged(text) => {
                self.set_input(text);
                Transition::InputUpdated
            },
            Event::Submit => self.submit(),
            Event::OpenBuilder(spec) => self.open_builder(spec),
            Event::BuilderArgChanged(field, text) => self.set_builder_arg(field, text),
            Event::AcceptBuilder => self.accept_builder(),
            Event::CancelBuilder => match self.builder.take() {
                Some(builder) => {
                    builder.cancel();
                    Transition::BuilderClosed
                },
                None => Transition::Ignored,
            },
        };

        tracing::debug!(?transition, history = self.history.len(), "session transition");
        transition
    }

    /// Replaces the input and reparses it.
    ///
    /// The superseded expression is released before the new input is parsed. Input that is empty,
    /// or only whitespace once normalized, is not parsed at all.
    fn set_input(&mut self, text: String) {
        self.input = text;
        self.preview = None;
        self.current = None;

        if self.input.trim().is_empty() {
            return;
        }

        let normalized = self.adapter.normalize(&self.input);
        if normalized.trim().is_empty() {
            return;
        }

        self.current = self.adapter.parse(&normalized);
        self.preview = self.current.as_ref().map(|handle| self.adapter.render(handle));
        if self.current.is_none() {
            tracing::debug!(input = %self.input, "input did not parse");
        }
    }

    /// Simplifies the current expression and records the result.
    ///
    /// Does nothing, without calling the engine, if there is no current expression.
    fn submit(&mut self) -> Transition {
        let Some(handle) = self.current.take() else {
            return Transition::Ignored;
        };

        let query = match self.preview.take() {
            Some(markup) => markup,
            None => self.adapter.render(&handle),
        };
        self.input.clear();

        let response = match self.adapter.simplify(&handle) {
            Ok(result) => Response::Markup(self.adapter.render(&result)),
            Err(err) => {
                tracing::debug!(error = %err, "simplification failed");
                Response::Error(err.message)
            },
        };
        drop(handle);

        let is_error = matches!(response, Response::Error(_));
        let index = self.history.push(HistoryEntry { query, response });
        Transition::Submitted { index, is_error }
    }

    /// Opens a builder, cancelling the one that was open.
    fn open_builder(&mut self, spec: BuilderSpec) -> Transition {
        if let Some(old) = self.builder.take() {
            old.cancel();
        }
        self.builder = Some(FunctionBuilder::open(spec, self.adapter.clone()));
        Transition::BuilderOpened
    }

    fn set_builder_arg(&mut self, field: ArgField, text: String) -> Transition {
        match self.builder.as_mut() {
            Some(builder) => {
                builder.set_arg(field, text);
                Transition::BuilderUpdated
            },
            None => Transition::Ignored,
        }
    }

    /// Closes the builder and splices its text into the input.
    fn accept_builder(&mut self) -> Transition {
        let Some(builder) = self.builder.take() else {
            return Transition::Ignored;
        };

        let text = builder.accept();
        let mut input = std::mem::take(&mut self.input);
        if !input.is_empty() {
            input.push(' ');
        }
        input.push_str(&text);
        self.set_input(input);

        Transition::BuilderAccepted { text }
    }

    /// Projects the session for the presentation layer.
    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            input: &self.input,
            preview: self.preview.as_deref(),
            history: self.history.entries(),
            submit_enabled: self.current.is_some(),
            submit_invalid: self.current.is_none() && !self.input.trim().is_empty(),
            builder: self.builder.as_ref().map(FunctionBuilder::view),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{shared_engine, TestEngine};
    use pretty_assertions::assert_eq;
    use std::{cell::RefCell, rc::Rc};
    use super::*;

    fn session() -> (Session<TestEngine>, Rc<RefCell<TestEngine>>) {
        let engine = shared_engine();
        (Session::new(Adapter::from_shared(engine.clone())), engine)
    }

    fn input(session: &mut Session<TestEngine>, text: &str) -> Transition {
        session.apply(Event::InputChanged(text.to_string()))
    }

    #[test]
    fn empty_input_has_no_expression() {
        let (mut session, engine) = session();
        for text in ["", "   ", "\t\n"] {
            input(&mut session, text);
            let view = session.view();
            assert!(!view.submit_enabled);
            assert!(!view.submit_invalid);
            assert_eq!(view.preview, None);
        }
        assert_eq!(engine.borrow().calls().parse, 0);
    }

    #[test]
    fn successful_submission() {
        let (mut session, engine) = session();
        input(&mut session, "2x+3x");
        assert_eq!(session.view().preview, Some("2x+3x"));

        let transition = session.apply(Event::Submit);
        assert_eq!(transition, Transition::Submitted { index: 0, is_error: false });
        assert_eq!(session.history().entries(), &[HistoryEntry {
            query: "2x+3x".to_string(),
            response: Response::Markup("5x".to_string()),
        }]);
        assert_eq!(session.input(), "");
        assert!(!session.has_expression());
        assert_eq!(engine.borrow().live_count(), 0);
    }

    #[test]
    fn incomplete_input() {
        let (mut session, engine) = session();
        input(&mut session, "2x+");

        let view = session.view();
        assert!(!view.submit_enabled);
        assert!(view.submit_invalid);

        let before = engine.borrow().calls();
        assert_eq!(session.apply(Event::Submit), Transition::Ignored);
        assert_eq!(engine.borrow().calls(), before);
        assert!(session.history().is_empty());
        assert_eq!(session.input(), "2x+");
    }

    #[test]
    fn failed_simplification() {
        let (mut session, engine) = session();
        input(&mut session, "1/0");

        let transition = session.apply(Event::Submit);
        assert_eq!(transition, Transition::Submitted { index: 0, is_error: true });

        let entry = &session.history().entries()[0];
        assert_eq!(entry.query, "1/0");
        assert_eq!(entry.response, Response::Error("division by zero".to_string()));
        assert!(entry.is_error());
        assert_eq!(session.input(), "");
        assert!(!session.has_expression());
        assert_eq!(engine.borrow().live_count(), 0);
    }

    #[test]
    fn oversized_expansion() {
        let (mut session, engine) = session();
        input(&mut session, "(a+b+c+d+e+f+g+h)^8");

        let transition = session.apply(Event::Submit);
        assert_eq!(transition, Transition::Submitted { index: 0, is_error: true });

        let entry = &session.history().entries()[0];
        assert_eq!(
            entry.response,
            Response::Error("expanding this expression would produce more than 1024 terms".to_string()),
        );
        assert_eq!(session.input(), "");
        assert_eq!(engine.borrow().live_count(), 0);
    }

    #[test]
    fn editing_releases_previous_expression() {
        let (mut session, engine) = session();
        input(&mut session, "x");
        input(&mut session, "x+");
        input(&mut session, "x+1");
        input(&mut session, "");

        let calls = engine.borrow().calls();
        assert_eq!(calls.parse, 3);
        assert_eq!(calls.release, 2);
        assert_eq!(engine.borrow().live_count(), 0);
    }

    #[test]
    fn history_is_chronological() {
        let (mut session, _) = session();
        for text in ["x+x", "0^0", "dd(x^2,x)"] {
            input(&mut session, text);
            session.apply(Event::Submit);
        }

        let responses = session.history()
            .iter()
            .map(HistoryEntry::response_text)
            .collect::<Vec<_>>();
        assert_eq!(responses, ["2x", "`0^0` is undefined", "2x"]);
    }

    #[test]
    fn builder_splice_into_empty_input() {
        let (mut session, _) = session();
        assert_eq!(session.apply(Event::OpenBuilder(BuilderSpec::DERIVATIVE)), Transition::BuilderOpened);
        session.apply(Event::BuilderArgChanged(ArgField::First, "x^2".to_string()));
        session.apply(Event::BuilderArgChanged(ArgField::Second, "x".to_string()));

        let builder = session.view().builder.unwrap();
        assert_eq!(builder.title, "Derivative");
        assert_eq!(builder.preview, "dd(x^2,x)");

        let transition = session.apply(Event::AcceptBuilder);
        assert_eq!(transition, Transition::BuilderAccepted { text: "dd(x^2,x)".to_string() });
        assert_eq!(session.input(), "dd(x^2,x)");
        assert!(session.view().builder.is_none());
        assert!(session.has_expression());

        session.apply(Event::Submit);
        assert_eq!(session.history().entries()[0].response, Response::Markup("2x".to_string()));
    }

    #[test]
    fn builder_splice_after_text() {
        let (mut session, _) = session();
        input(&mut session, "3+");
        session.apply(Event::OpenBuilder(BuilderSpec::DERIVATIVE));
        session.apply(Event::BuilderArgChanged(ArgField::First, "x^2".to_string()));
        session.apply(Event::BuilderArgChanged(ArgField::Second, "x".to_string()));
        session.apply(Event::AcceptBuilder);

        assert_eq!(session.input(), "3+ dd(x^2,x)");
        session.apply(Event::Submit);
        assert_eq!(session.history().entries()[0].response, Response::Markup("2x+3".to_string()));
    }

    #[test]
    fn builder_events_without_builder() {
        let (mut session, engine) = session();
        assert_eq!(session.apply(Event::AcceptBuilder), Transition::Ignored);
        assert_eq!(session.apply(Event::CancelBuilder), Transition::Ignored);
        assert_eq!(
            session.apply(Event::BuilderArgChanged(ArgField::First, "x".to_string())),
            Transition::Ignored,
        );
        assert_eq!(engine.borrow().calls().total(), 0);
    }

    #[test]
    fn opening_builder_cancels_previous() {
        let (mut session, engine) = session();
        session.apply(Event::OpenBuilder(BuilderSpec::LOGARITHM));
        session.apply(Event::BuilderArgChanged(ArgField::First, "2".to_string()));
        session.apply(Event::BuilderArgChanged(ArgField::Second, "8".to_string()));
        assert_eq!(engine.borrow().live_count(), 1);

        session.apply(Event::OpenBuilder(BuilderSpec::INTEGRAL));
        assert_eq!(engine.borrow().live_count(), 0);
        assert_eq!(session.view().builder.unwrap().title, "Integral");
        assert_eq!(session.input(), "");
    }

    #[test]
    fn cancel_leaves_input() {
        let (mut session, engine) = session();
        input(&mut session, "x");
        session.apply(Event::OpenBuilder(BuilderSpec::INTEGRAL));
        session.apply(Event::BuilderArgChanged(ArgField::First, "x".to_string()));
        assert_eq!(session.apply(Event::CancelBuilder), Transition::BuilderClosed);

        assert_eq!(session.input(), "x");
        assert_eq!(engine.borrow().live_count(), 1);
    }

    #[test]
    fn drop_releases_everything() {
        let (mut session, engine) = session();
        input(&mut session, "x^2");
        session.apply(Event::OpenBuilder(BuilderSpec::DERIVATIVE));
        session.apply(Event::BuilderArgChanged(ArgField::First, "x".to_string()));
        session.apply(Event::BuilderArgChanged(ArgField::Second, "x".to_string()));
        assert_eq!(engine.borrow().live_count(), 2);

        drop(session);
        assert_eq!(engine.borrow().live_count(), 0);
    }
}
