//! Locating the registry crate from inside generated code.
//!
//! `#[derive(Inject)]` names `Inject`, `Manifest` and `Field` by absolute
//! path. Applications reach those items either through `wiring_registry`
//! (possibly renamed in their manifest) or through the `wiring` umbrella,
//! which re-exports the registry as `wiring::wiring_registry`. The registry's
//! own tests and doctests see the crate as itself, which works because of its
//! `extern crate self as wiring_registry`.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

const REGISTRY: &str = "wiring_registry";
const UMBRELLA: &str = "wiring";

/// Returns the path under which the deriving crate sees `wiring_registry`.
///
/// Falls back to the bare crate name when neither package is a dependency,
/// so the resulting error names the crate that is missing.
pub(crate) fn registry_path() -> TokenStream {
    let registry = format_ident!("{}", REGISTRY);

    if let Ok(found) = crate_name(REGISTRY) {
        return match found {
            FoundCrate::Itself => quote!(#registry),
            FoundCrate::Name(renamed) => {
                let renamed = format_ident!("{}", renamed);
                quote!(#renamed)
            }
        };
    }

    match crate_name(UMBRELLA) {
        Ok(FoundCrate::Name(umbrella)) => {
            let umbrella = format_ident!("{}", umbrella);
            quote!(#umbrella::#registry)
        }
        _ => quote!(#registry),
    }
}
