//! Paths into `ark_reflect` used by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Returns how the deriving crate names `ark_reflect`.
///
/// Reading the caller's manifest is not free, so the result is computed once
/// per derive and passed around.
pub(crate) fn ark_reflect() -> syn::Path {
    ark_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("ark_reflect"))
}

#[inline(always)]
pub(crate) fn typed_(ark_reflect_path: &syn::Path) -> TokenStream {
    quote! { #ark_reflect_path::info::Typed }
}

#[inline(always)]
pub(crate) fn type_info_(ark_reflect_path: &syn::Path) -> TokenStream {
    quote! { #ark_reflect_path::info::TypeInfo }
}

#[inline(always)]
pub(crate) fn type_kind_(ark_reflect_path: &syn::Path) -> TokenStream {
    quote! { #ark_reflect_path::info::TypeKind }
}

#[inline(always)]
pub(crate) fn struct_info_(ark_reflect_path: &syn::Path) -> TokenStream {
    quote! { #ark_reflect_path::info::StructInfo }
}

#[inline(always)]
pub(crate) fn named_field_(ark_reflect_path: &syn::Path) -> TokenStream {
    quote! { #ark_reflect_path::info::NamedField }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(ark_reflect_path: &syn::Path) -> TokenStream {
    quote! { #ark_reflect_path::impls::NonGenericTypeInfoCell }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(ark_reflect_path: &syn::Path) -> TokenStream {
    quote! { #ark_reflect_path::impls::GenericTypeInfoCell }
}
