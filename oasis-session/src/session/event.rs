//! Events that drive a [`Session`](super::Session), and the transitions they cause.

use crate::builder::{ArgField, BuilderSpec};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The main input was replaced with the given text.
    InputChanged(String),

    /// The user asked to submit the current expression.
    Submit,

    /// The user opened a function builder.
    OpenBuilder(BuilderSpec),

    /// One of the open builder's arguments was replaced with the given text.
    BuilderArgChanged(ArgField, String),

    /// The user accepted the open builder.
    AcceptBuilder,

    /// The user closed the open builder without accepting it.
    CancelBuilder,
}

/// What an [`Event`] did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The input and its preview were updated.
    InputUpdated,

    /// A history entry was appended at `index`.
    Submitted {
        index: usize,
        is_error: bool,
    },

    /// A builder was opened, replacing any builder that was already open.
    BuilderOpened,

    /// The builder's arguments and preview were updated.
    BuilderUpdated,

    /// The builder was accepted, and `text` was spliced into the input.
    BuilderAccepted {
        text: String,
    },

    /// The builder was closed without changing the input.
    BuilderClosed,

    /// The event did not apply in the current state, and nothing changed.
    Ignored,
}
