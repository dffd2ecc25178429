//! Procedural macros for the `wiring_registry` crate.
//!
//! This crate provides `#[derive(Inject)]`, which lists a struct's fields for
//! `Registry::apply`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wiring_registry::Inject;
//!
//! #[derive(Default, Inject)]
//! struct Handler {
//!     #[inject("db")]
//!     db: Option<Arc<dyn Database>>,
//!     #[inject]
//!     clock: Option<Arc<Clock>>,
//!     requests: u64,
//! }
//! ```

mod crate_path;

use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Meta, parse_macro_input};

/// Derives `Inject` for a struct with named fields.
///
/// # Attributes
///
/// - `#[inject("name")]` or `#[inject(name = "name")]` binds the field to the
///   registry entry `name`.
/// - `#[inject]` binds the field to the entry named after the field.
/// - Fields without `#[inject]` are never written by the registry.
///
/// Bound fields must be slots such as `Option<Arc<T>>` or
/// `OnceLock<Arc<dyn Trait>>`.
///
/// # Generated Code
///
/// ```ignore
/// impl Inject for Handler {
///     fn manifest(&mut self) -> Manifest<'_> {
///         Manifest::record(
///             "Handler",
///             vec![
///                 Field::bound("db", "db", &mut self.db),
///                 Field::bound("clock", "clock", &mut self.clock),
///                 Field::unbound("requests"),
///             ],
///         )
///     }
/// }
/// ```
#[proc_macro_derive(Inject, attributes(inject))]
pub fn derive_inject(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Ok(impl_block(input, &[]));
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Inject requires named fields; tuple structs have no field names to bind",
                ));
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "Inject can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Inject can only be derived for structs",
            ));
        }
    };

    let krate = crate_path::registry_path();
    let mut entries = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.unraw().to_string();

        let entry = match binding(&field.attrs, &field_name)? {
            Some(binding) => quote_spanned! {field.ty.span()=>
                #krate::resolve::Field::bound(#field_name, #binding, &mut self.#ident)
            },
            None => quote! {
                #krate::resolve::Field::unbound(#field_name)
            },
        };
        entries.push(entry);
    }

    Ok(impl_block(input, &entries))
}

fn impl_block(input: &DeriveInput, entries: &[proc_macro2::TokenStream]) -> proc_macro2::TokenStream {
    let krate = crate_path::registry_path();
    let name = &input.ident;
    let type_name = name.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics #krate::resolve::Inject for #name #ty_generics #where_clause {
            fn manifest(&mut self) -> #krate::resolve::Manifest<'_> {
                #krate::resolve::Manifest::record(
                    #type_name,
                    ::std::vec![#(#entries),*],
                )
            }
        }
    }
}

/// Reads the binding name from a field's `#[inject]` attribute.
fn binding(attrs: &[Attribute], field_name: &str) -> syn::Result<Option<LitStr>> {
    let mut found: Option<LitStr> = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[inject] attribute"));
        }

        let name = match &attr.meta {
            Meta::Path(path) => LitStr::new(field_name, path.span()),
            Meta::List(list) => match list.parse_args::<LitStr>() {
                Ok(name) => name,
                Err(_) => named_binding(attr)?,
            },
            Meta::NameValue(meta) => {
                return Err(syn::Error::new_spanned(
                    meta,
                    "expected #[inject], #[inject(\"name\")] or #[inject(name = \"name\")]",
                ));
            }
        };

        if name.value().is_empty() {
            return Err(syn::Error::new_spanned(&name, "binding name must not be empty"));
        }
        found = Some(name);
    }

    Ok(found)
}

/// Parses `#[inject(name = "...")]`.
fn named_binding(attr: &Attribute) -> syn::Result<LitStr> {
    let mut name = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse::<LitStr>()?);
            Ok(())
        } else {
            Err(meta.error("unknown inject option; expected `name`"))
        }
    })?;

    name.ok_or_else(|| syn::Error::new_spanned(attr, "missing `name = \"...\"`"))
}
