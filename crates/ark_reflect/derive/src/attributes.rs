//! Parsing of `#[record(...)]`.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, Field};

use crate::RECORD_ATTRIBUTE_NAME;

/// Standard traits a record declares to implement.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub clone: Option<Span>,
}

impl TypeAttributes {
    pub(crate) fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if !attr.path().is_ident(RECORD_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("default") {
                    &mut this.default
                } else if meta.path.is_ident("clone") {
                    &mut this.clone
                } else {
                    return Err(meta.error("expected `default` or `clone`"));
                };
                if slot.is_some() {
                    return Err(meta.error("duplicate record attribute"));
                }
                *slot = Some(meta.path.span());
                Ok(())
            })?;
        }
        Ok(this)
    }
}

/// Per-field options.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
}

impl FieldAttributes {
    pub(crate) fn parse(field: &Field) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in &field.attrs {
            if !attr.path().is_ident(RECORD_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `skip`"))
                }
            })?;
        }
        Ok(this)
    }
}
