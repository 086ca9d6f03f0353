//! Guided dialogs that compose a two-argument function call.
//!
//! A [`FunctionBuilder`] is a small session of its own: it holds the text of both arguments and a
//! live preview of `func(first,second)`, parsed after every edit. The preview handle belongs to
//! the builder alone and is released whenever it is replaced and when the builder closes.

use crate::adapter::{Adapter, Handle};
use crate::engine::Engine;
use crate::session::view::BuilderView;
#[cfg(feature = "serde")]
use serde::Serialize;

/// Shown in place of the preview when the composed call does not parse.
pub const PARSE_FAILURE_PLACEHOLDER: &str = "Failed to parse expression";

/// Which argument of a builder is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum ArgField {
    First,
    Second,
}

/// Describes a function builder: the function it calls, and how the dialog is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuilderSpec {
    /// The name of the function, such as `dd`.
    pub func: &'static str,
    pub title: &'static str,
    pub first_label: &'static str,
    pub second_label: &'static str,
}

impl BuilderSpec {
    /// `dd(expression, variable)`
    pub const DERIVATIVE: Self = Self {
        func: "dd",
        title: "Derivative",
        first_label: "Expression",
        second_label: "Variable",
    };

    /// `in(expression, variable)`
    pub const INTEGRAL: Self = Self {
        func: "in",
        title: "Integral",
        first_label: "Expression",
        second_label: "Variable",
    };

    /// `log(base, argument)`
    pub const LOGARITHM: Self = Self {
        func: "log",
        title: "Logarithm",
        first_label: "Base",
        second_label: "Argument",
    };

    /// Every preset builder.
    pub const PRESETS: [Self; 3] = [Self::DERIVATIVE, Self::INTEGRAL, Self::LOGARITHM];

    /// Returns the preset builder for the given function name.
    pub fn preset(func: &str) -> Option<Self> {
        Self::PRESETS.into_iter().find(|spec| spec.func == func)
    }

    /// Returns the label of the given argument.
    pub fn label(&self, field: ArgField) -> &'static str {
        match field {
            ArgField::First => self.first_label,
            ArgField::Second => self.second_label,
        }
    }

    /// Composes the call `func(first,second)`.
    pub fn compose(&self, first: &str, second: &str) -> String {
        format!("{}({},{})", self.func, first, second)
    }
}

/// An open function builder dialog.
pub struct FunctionBuilder<E: Engine> {
    spec: BuilderSpec,
    adapter: Adapter<E>,
    first: String,
    second: String,
    preview: Option<Handle<E>>,
    preview_markup: Option<String>,
}

impl<E: Engine> std::fmt::Debug for FunctionBuilder<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionBuilder")
            .field("spec", &self.spec)
            .field("first", &self.first)
            .field("second", &self.second)
            .field("preview", &self.preview)
            .finish()
    }
}

impl<E: Engine> FunctionBuilder<E> {
    /// Opens a builder with empty arguments and no preview.
    pub fn open(spec: BuilderSpec, adapter: Adapter<E>) -> Self {
        tracing::debug!(func = spec.func, "open builder");
        Self {
            spec,
            adapter,
            first: String::new(),
            second: String::new(),
            preview: None,
            preview_markup: None,
        }
    }

    pub fn spec(&self) -> BuilderSpec {
        self.spec
    }

    /// Returns the text of the given argument.
    pub fn arg(&self, field: ArgField) -> &str {
        match field {
            ArgField::First => &self.first,
            ArgField::Second => &self.second,
        }
    }

    /// Returns true if the composed call currently parses.
    pub fn has_preview(&self) -> bool {
        self.preview.is_some()
    }

    /// Replaces one argument and reparses the composed call.
    ///
    /// The previous preview is released before parsing, whether or not the new call parses.
    pub fn set_arg(&mut self, field: ArgField, text: String) {
        match field {
            ArgField::First => self.first = text,
            ArgField::Second => self.second = text,
        }

        self.preview_markup = None;
        self.preview = None;

        let normalized = self.adapter.normalize(&self.composed());
        self.preview = self.adapter.parse(&normalized);
        self.preview_markup = self.preview.as_ref().map(|handle| self.adapter.render(handle));
        tracing::debug!(
            func = self.spec.func,
            parsed = self.preview.is_some(),
            "builder argument changed",
        );
    }

    /// The call `func(first,second)` with the arguments exactly as entered.
    pub fn composed(&self) -> String {
        self.spec.compose(&self.first, &self.second)
    }

    /// Closes the builder, returning the composed call. The text is returned whether or not it
    /// parses.
    pub fn accept(self) -> String {
        let text = self.composed();
        tracing::debug!(func = self.spec.func, text = %text, "accept builder");
        text
    }

    /// Closes the builder without producing any text.
    pub fn cancel(self) {
        tracing::debug!(func = self.spec.func, "cancel builder");
    }

    /// Projects the builder for the presentation layer.
    pub fn view(&self) -> BuilderView<'_> {
        BuilderView {
            title: self.spec.title,
            first_label: self.spec.first_label,
            second_label: self.spec.second_label,
            first: &self.first,
            second: &self.second,
            preview: self.preview_markup.as_deref().unwrap_or(PARSE_FAILURE_PLACEHOLDER),
            accept_enabled: self.preview.is_some(),
        }
    }
}
