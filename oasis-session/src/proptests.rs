//! Property-based tests for the session state machine.
//!
//! These tests drive a session with arbitrary sequences of events and check that the invariants
//! hold after every step.

use crate::adapter::Adapter;
use crate::builder::{ArgField, BuilderSpec};
use crate::session::{event::{Event, Transition}, history::HistoryEntry, Session};
use crate::testing::shared_engine;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        Just("2x+3x".to_string()),
        Just("2x+".to_string()),
        Just("1/0".to_string()),
        Just("0^0".to_string()),
        Just("foo(x)".to_string()),
        "[0-9xy+*/^() -]{1,10}",
    ]
}

fn arb_field() -> impl Strategy<Value = ArgField> {
    prop_oneof![Just(ArgField::First), Just(ArgField::Second)]
}

fn arb_spec() -> impl Strategy<Value = BuilderSpec> {
    prop_oneof![
        Just(BuilderSpec::DERIVATIVE),
        Just(BuilderSpec::INTEGRAL),
        Just(BuilderSpec::LOGARITHM),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => arb_text().prop_map(Event::InputChanged),
        2 => Just(Event::Submit),
        1 => arb_spec().prop_map(Event::OpenBuilder),
        2 => (arb_field(), arb_text()).prop_map(|(field, text)| Event::BuilderArgChanged(field, text)),
        1 => Just(Event::AcceptBuilder),
        1 => Just(Event::CancelBuilder),
    ]
}

fn arb_events() -> impl Strategy<Value = Vec<Event>> {
    proptest::collection::vec(arb_event(), 0..30)
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    /// The engine holds exactly the handles the session and its builder own.
    #[test]
    fn live_handles_match_owners(events in arb_events()) {
        let engine = shared_engine();
        let mut session = Session::new(Adapter::from_shared(engine.clone()));

        for event in events {
            session.apply(event);
            let owned = usize::from(session.has_expression())
                + usize::from(session.builder().is_some_and(|builder| builder.has_preview()));
            prop_assert_eq!(engine.borrow().live_count(), owned);
        }

        drop(session);
        prop_assert_eq!(engine.borrow().live_count(), 0);
    }

    /// Entries are only ever appended, and earlier entries never change.
    #[test]
    fn history_is_append_only(events in arb_events()) {
        let mut session = Session::new(Adapter::from_shared(shared_engine()));
        let mut seen: Vec<HistoryEntry> = Vec::new();

        for event in events {
            let transition = session.apply(event);
            let entries = session.history().entries();

            prop_assert_eq!(&entries[..seen.len()], &seen[..]);
            match transition {
                Transition::Submitted { index, is_error } => {
                    prop_assert_eq!(index, seen.len());
                    prop_assert_eq!(entries.len(), seen.len() + 1);
                    prop_assert_eq!(entries[index].is_error(), is_error);
                },
                _ => prop_assert_eq!(entries.len(), seen.len()),
            }
            seen = entries.to_vec();
        }
    }

    /// Submitting either records an entry and resets the input, or does nothing at all.
    #[test]
    fn submit_resets_or_is_noop(events in arb_events()) {
        let engine = shared_engine();
        let mut session = Session::new(Adapter::from_shared(engine.clone()));

        for event in events {
            session.apply(event);

            let enabled = session.view().submit_enabled;
            let input = session.input().to_string();
            let calls = engine.borrow().calls();

            match session.apply(Event::Submit) {
                Transition::Submitted { .. } => {
                    prop_assert!(enabled);
                    prop_assert_eq!(session.input(), "");
                    prop_assert!(!session.has_expression());
                },
                transition => {
                    prop_assert_eq!(transition, Transition::Ignored);
                    prop_assert!(!enabled);
                    prop_assert_eq!(session.input(), input);
                    prop_assert_eq!(engine.borrow().calls(), calls);
                },
            }
        }
    }

    /// The view flags agree with the state they summarize.
    #[test]
    fn view_flags(events in arb_events()) {
        let mut session = Session::new(Adapter::from_shared(shared_engine()));

        for event in events {
            session.apply(event);
            let view = session.view();
            prop_assert_eq!(view.submit_enabled, session.has_expression());
            prop_assert_eq!(view.preview.is_some(), session.has_expression());
            prop_assert!(!(view.submit_enabled && view.submit_invalid));
            if view.input.trim().is_empty() {
                prop_assert!(!view.submit_enabled && !view.submit_invalid);
            }
        }
    }

    /// Accepting a builder emits its arguments verbatim and splices them into the input.
    #[test]
    fn accept_is_verbatim(prior in arb_text(), first in arb_text(), second in arb_text(), spec in arb_spec()) {
        let mut session = Session::new(Adapter::from_shared(shared_engine()));
        session.apply(Event::InputChanged(prior.clone()));
        session.apply(Event::OpenBuilder(spec));
        session.apply(Event::BuilderArgChanged(ArgField::First, first.clone()));
        session.apply(Event::BuilderArgChanged(ArgField::Second, second.clone()));

        let expected = format!("{}({},{})", spec.func, first, second);
        prop_assert_eq!(
            session.apply(Event::AcceptBuilder),
            Transition::BuilderAccepted { text: expected.clone() },
        );

        let spliced = if prior.is_empty() { expected } else { format!("{} {}", prior, expected) };
        prop_assert_eq!(session.input(), spliced);
    }
}
