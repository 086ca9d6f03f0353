//! Read-only projections of a session for the presentation layer.

use crate::session::history::HistoryEntry;
#[cfg(feature = "serde")]
use serde::Serialize;

/// Everything a presentation layer needs to draw a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SessionView<'a> {
    /// The raw text in the main input.
    pub input: &'a str,

    /// Markup of the current expression, if the input parsed.
    pub preview: Option<&'a str>,

    /// Submitted entries, oldest first.
    pub history: &'a [HistoryEntry],

    /// Whether [`Event::Submit`](super::Event::Submit) would do anything.
    pub submit_enabled: bool,

    /// Whether the input contains something that failed to parse.
    pub submit_invalid: bool,

    /// The open function builder, if any.
    pub builder: Option<BuilderView<'a>>,
}

/// A projection of an open function builder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BuilderView<'a> {
    pub title: &'static str,
    pub first_label: &'static str,
    pub second_label: &'static str,
    pub first: &'a str,
    pub second: &'a str,

    /// Markup of the composed call, or
    /// [`PARSE_FAILURE_PLACEHOLDER`](crate::builder::PARSE_FAILURE_PLACEHOLDER).
    pub preview: &'a str,

    /// Whether the composed call parsed. Accepting is allowed either way.
    pub accept_enabled: bool,
}
