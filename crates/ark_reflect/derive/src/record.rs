//! Code generation of `Typed` for records.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, GenericParam, LitStr, Type, parse_quote};

use crate::attributes::{FieldAttributes, TypeAttributes};

struct RecordField<'a> {
    ident: &'a syn::Ident,
    ty: &'a Type,
}

fn collect_fields(ast: &DeriveInput) -> syn::Result<Vec<RecordField<'_>>> {
    let Data::Struct(data) = &ast.data else {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`Record` can only be derived for structs",
        ));
    };

    let named = match &data.fields {
        Fields::Named(fields) => &fields.named,
        Fields::Unit => return Ok(Vec::new()),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "`Record` requires named fields, paths address fields by name",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        if FieldAttributes::parse(field)?.skip {
            continue;
        }
        // Named fields always carry an identifier.
        if let Some(ident) = &field.ident {
            fields.push(RecordField {
                ident,
                ty: &field.ty,
            });
        }
    }
    Ok(fields)
}

pub(crate) fn impl_record(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let attrs = TypeAttributes::parse(&ast.attrs)?;
    let fields = collect_fields(ast)?;

    if let Some(param) = ast.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            param,
            "`Record` does not support lifetime parameters",
        ));
    }

    let ark_reflect_path = crate::path::ark_reflect();
    let typed_ = crate::path::typed_(&ark_reflect_path);
    let type_info_ = crate::path::type_info_(&ark_reflect_path);
    let type_kind_ = crate::path::type_kind_(&ark_reflect_path);
    let struct_info_ = crate::path::struct_info_(&ark_reflect_path);
    let named_field_ = crate::path::named_field_(&ark_reflect_path);

    let field_tokens = fields.iter().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        let name = LitStr::new(&ident.unraw().to_string(), ident.span());
        quote! {
            #named_field_::new::<#ty>(
                #name,
                |v| v.downcast_ref::<Self>().map(|v| &v.#ident as &dyn ::core::any::Any),
                |v| v.downcast_mut::<Self>().map(|v| &mut v.#ident as &mut dyn ::core::any::Any),
            )
        }
    });

    let with_default = attrs.default.map(|span| {
        quote_spanned! { span => .with_default::<Self>() }
    });
    let with_clone = attrs.clone.map(|span| {
        quote_spanned! { span => .with_clone::<Self>() }
    });

    let type_info_tokens = quote! {
        #type_info_::new::<Self>(#type_kind_::Struct(#struct_info_::new(&[
            #(#field_tokens,)*
        ])))
        #with_default
        #with_clone
    };

    let is_generic = ast
        .generics
        .params
        .iter()
        .any(|param| matches!(param, GenericParam::Type(_)));

    let cell_tokens = if is_generic {
        let info_cell = crate::path::generic_type_info_cell_(&ark_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(&ark_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let mut generics = ast.generics.clone();
    if is_generic {
        let where_clause = generics.make_where_clause();
        for param in ast.generics.type_params() {
            let ident = &param.ident;
            where_clause
                .predicates
                .push(parse_quote! { #ident: ::core::any::Any });
        }
        for field in &fields {
            let ty = field.ty;
            where_clause.predicates.push(parse_quote! { #ty: #typed_ });
        }
        let ident = &ast.ident;
        let (_, ty_generics, _) = ast.generics.split_for_impl();
        if attrs.default.is_some() {
            where_clause
                .predicates
                .push(parse_quote! { #ident #ty_generics: ::core::default::Default });
        }
        if attrs.clone.is_some() {
            where_clause
                .predicates
                .push(parse_quote! { #ident #ty_generics: ::core::clone::Clone });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let ident = &ast.ident;

    Ok(quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #cell_tokens
            }
        }
    })
}
