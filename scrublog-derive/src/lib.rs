//! Derive macro for `scrublog`'s `Redact` trait.
//!
//! The macro generates the field traversal behind `#[derive(Redact)]`: every
//! field is cloned through the filter chain under its own name and declared
//! sensitivity tag. Masking policy itself lives in `scrublog`; this crate
//! only emits the walk.
//!
//! # Field attributes
//!
//! - No annotation: the field recurses under its own name with an empty tag.
//! - `#[redact(tag = "...")]`: the field recurses with the given sensitivity
//!   tag, which tag-based filters can match on.
//! - `#[redact(skip)]`: the field is copied verbatim, without recursion or
//!   masking. The field type must implement `Clone` and `Default`.
//!
//! Enums and unions are rejected at compile time.

extern crate proc_macro;

use proc_macro2::{Span, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote, quote_spanned};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Fields, LitStr, Result};

#[proc_macro_derive(Redact, attributes(redact))]
pub fn derive_redact(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream referencing the scrublog crate root.
///
/// Handles crate renaming and use from inside scrublog itself (unit tests),
/// where the path is `crate` rather than `::scrublog`.
fn crate_root() -> TokenStream {
    match crate_name("scrublog") {
        Ok(FoundCrate::Itself) => quote! { ::scrublog },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::scrublog },
    }
}

struct FieldOptions {
    tag: Option<String>,
    skip: bool,
}

fn parse_field_options(attrs: &[syn::Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions {
        tag: None,
        skip: false,
    };
    for attr in attrs {
        if !attr.path().is_ident("redact") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
                return Ok(());
            }
            if meta.path.is_ident("tag") {
                let value: LitStr = meta.value()?.parse()?;
                options.tag = Some(value.value());
                return Ok(());
            }
            Err(meta.error("expected `skip` or `tag = \"...\"`"))
        })?;
    }
    if options.skip && options.tag.is_some() {
        return Err(syn::Error::new(
            Span::call_site(),
            "`skip` cannot be combined with `tag`",
        ));
    }
    Ok(options)
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        mut generics,
        data,
        ..
    } = input;
    let root = crate_root();

    let data = match data {
        Data::Struct(data) => data,
        Data::Enum(e) => {
            return Err(syn::Error::new(
                e.enum_token.span(),
                "`Redact` cannot be derived for enums; wrap the payload in a struct",
            ));
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Redact` cannot be derived for unions",
            ));
        }
    };

    let (masked_body, redact_body) = match data.fields {
        Fields::Named(fields) => named_struct_bodies(&root, fields)?,
        Fields::Unnamed(fields) => tuple_struct_bodies(&root, fields)?,
        Fields::Unit => (quote! { Self }, quote! { Self }),
    };

    for param in generics.type_params_mut() {
        param
            .bounds
            .push(syn::parse_quote!(#root::redact::Redact));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #root::redact::Redact for #ident #ty_generics #where_clause {
            fn masked() -> Self {
                #masked_body
            }

            fn redact(
                &self,
                filters: &#root::redact::FilterChain,
                field: &str,
                tag: &str,
            ) -> Self {
                if filters.should_mask(field, self, tag) {
                    return <Self as #root::redact::Redact>::masked();
                }
                #redact_body
            }
        }
    })
}

/// Named fields recurse under their own name and declared tag; skipped
/// fields are cloned verbatim.
fn named_struct_bodies(
    root: &TokenStream,
    fields: syn::FieldsNamed,
) -> Result<(TokenStream, TokenStream)> {
    let mut masked_fields = Vec::new();
    let mut redact_fields = Vec::new();

    for field in fields.named {
        let span = field.span();
        let options = parse_field_options(&field.attrs)?;
        let ident = field.ident.expect("named field should have an identifier");
        let ty = &field.ty;

        if options.skip {
            masked_fields.push(quote_spanned! { span =>
                #ident: ::core::default::Default::default()
            });
            redact_fields.push(quote_spanned! { span =>
                #ident: ::core::clone::Clone::clone(&self.#ident)
            });
        } else {
            let name = ident.to_string();
            let tag = options.tag.unwrap_or_default();
            masked_fields.push(quote_spanned! { span =>
                #ident: <#ty as #root::redact::Redact>::masked()
            });
            redact_fields.push(quote_spanned! { span =>
                #ident: #root::redact::Redact::redact(&self.#ident, filters, #name, #tag)
            });
        }
    }

    Ok((
        quote! { Self { #(#masked_fields),* } },
        quote! { Self { #(#redact_fields),* } },
    ))
}

/// Tuple fields have no name of their own: they recurse under the parent's
/// field name, like sequence elements.
fn tuple_struct_bodies(
    root: &TokenStream,
    fields: syn::FieldsUnnamed,
) -> Result<(TokenStream, TokenStream)> {
    let mut masked_fields = Vec::new();
    let mut redact_fields = Vec::new();

    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let span = field.span();
        let options = parse_field_options(&field.attrs)?;
        let idx = syn::Index::from(index);
        let ty = &field.ty;

        if options.skip {
            masked_fields.push(quote_spanned! { span =>
                ::core::default::Default::default()
            });
            redact_fields.push(quote_spanned! { span =>
                ::core::clone::Clone::clone(&self.#idx)
            });
        } else {
            let tag = options.tag.unwrap_or_default();
            masked_fields.push(quote_spanned! { span =>
                <#ty as #root::redact::Redact>::masked()
            });
            redact_fields.push(quote_spanned! { span =>
                #root::redact::Redact::redact(&self.#idx, filters, field, #tag)
            });
        }
    }

    Ok((
        quote! { Self( #(#masked_fields),* ) },
        quote! { Self( #(#redact_fields),* ) },
    ))
}
