//! The record of submitted expressions.

#[cfg(feature = "serde")]
use serde::Serialize;

/// The outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "value", rename_all = "snake_case"))]
pub enum Response {
    /// Markup of the simplified expression.
    Markup(String),

    /// The message of the error that stopped simplification.
    Error(String),
}

/// One submitted query and its response.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct HistoryEntry {
    /// Markup of the expression as it was submitted.
    pub query: String,

    /// The simplified expression, or the error message.
    pub response: Response,
}

impl HistoryEntry {
    /// Returns true if simplification failed.
    pub fn is_error(&self) -> bool {
        matches!(self.response, Response::Error(_))
    }

    /// Returns the response markup or error message.
    pub fn response_text(&self) -> &str {
        match &self.response {
            Response::Markup(text) | Response::Error(text) => text,
        }
    }
}

/// The chronological, append-only list of submissions in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Appends an entry, returning its index.
    pub(crate) fn push(&mut self, entry: HistoryEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Returns the entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
