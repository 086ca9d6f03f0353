mod error_kind;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `oasis_error::ErrorKind`.
///
/// The report is described by an `error` attribute:
///
/// ```ignore
/// use oasis_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("unknown function `{}`", self.name),
///     labels = ["called here"],
///     help = "see `:help` for the list of functions",
/// )]
/// pub struct UnknownFunction {
///     name: String,
/// }
/// ```
///
/// - `message` (required) is the one-line summary, also returned by `ErrorKind::message`.
/// - `labels` is an array of label texts, matched in order with the spans of the error. An empty
///   text gives a label with no message.
/// - `help` is an optional hint shown under the report.
///
/// Each tag is an expression evaluated with `&self` in scope. Tuple structs and enums are
/// rejected.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error_kind::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
