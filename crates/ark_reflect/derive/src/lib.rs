//! See [`Record`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static RECORD_ATTRIBUTE_NAME: &str = "record";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod path;
mod record;

// -----------------------------------------------------------------------------
// Macros

/// Implements `Typed` for a struct with named fields.
///
/// Every field is listed in declaration order and becomes reachable from
/// member paths. Field types must implement `Typed` themselves.
///
/// ```rust, ignore
/// #[derive(Record, Default, Clone)]
/// #[record(default, clone)]
/// struct Packet {
///     id: u32,
///     header: Option<Header>,
///     #[record(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// ## Type attributes
///
/// The macro cannot see which standard traits a type implements, so they are
/// declared:
///
/// - `default`: the type implements `Default`. It becomes constructible,
///   which is required to build it while deserializing or to create it when
///   it is absent in the middle of a path.
/// - `clone`: the type implements `Clone`, so its values can be copied out
///   through the type-erased copier.
///
/// ## Field attributes
///
/// - `skip`: the field is not described and cannot appear in a path.
///
/// ## Generics
///
/// Type parameters are supported and gain `Typed` bounds. Lifetime
/// parameters are not.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    record::impl_record(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
