use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, Result};

/// The tags of an `#[error(...)]` attribute.
#[derive(Default)]
struct Tags {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Tags {
    /// Reads the tags from the first `#[error(...)]` attribute of the item.
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let attr = input.attrs.iter()
            .find(|attr| attr.path().is_ident("error"))
            .ok_or_else(|| syn::Error::new(input.ident.span(), "missing `#[error(...)]` attribute"))?;

        let mut tags = Tags::default();
        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("message") {
                &mut tags.message
            } else if meta.path.is_ident("labels") {
                &mut tags.labels
            } else if meta.path.is_ident("help") {
                &mut tags.help
            } else {
                return Err(meta.error("expected `message`, `labels` or `help`"));
            };
            *slot = Some(meta.value()?.parse()?);
            Ok(())
        })?;

        if tags.message.is_none() {
            return Err(syn::Error::new_spanned(attr, "the `error` attribute requires a `message` tag"));
        }
        Ok(tags)
    }
}

/// Generates the `ErrorKind` implementation for a struct with named fields or no fields.
pub fn expand(input: DeriveInput) -> Result<TokenStream2> {
    match &input.data {
        Data::Struct(data) if !matches!(data.fields, Fields::Unnamed(_)) => (),
        _ => return Err(syn::Error::new(
            input.ident.span(),
            "`ErrorKind` can only be derived for structs with named fields or unit structs",
        )),
    }

    let Tags { message, labels, help } = Tags::from_input(&input)?;
    let labels = labels.map_or_else(|| quote! { [""] }, |labels| quote! { #labels });
    let help = help.map(|help| quote! { report.set_help(#help); });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::oasis_error::ErrorKind for #name #ty_generics #where_clause {
            fn message(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(&#message)
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[::std::ops::Range<usize>],
            ) -> ::ariadne::Report<(&'a str, ::std::ops::Range<usize>)> {
                let offset = spans.first().map_or(0, |span| span.start);
                let labels = (#labels)
                    .into_iter()
                    .map(|text| ::std::string::ToString::to_string(&text))
                    .zip(spans)
                    .map(|(text, span)| {
                        let label = ::ariadne::Label::new((src_id, span.clone()))
                            .with_color(::oasis_error::EXPR);
                        if text.is_empty() { label } else { label.with_message(text) }
                    });

                #[allow(unused_mut)]
                let mut report = ::ariadne::Report::build(::ariadne::ReportKind::Error, src_id, offset)
                    .with_message(::oasis_error::ErrorKind::message(self))
                    .with_labels(labels);
                #help
                report.finish()
            }
        }
    })
}
