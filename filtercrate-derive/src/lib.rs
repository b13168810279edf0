//! Derive macro for `filtercrate`.
//!
//! `#[derive(FilterModel)]` describes the named fields of a struct, usually a
//! Sea-ORM `Model`, so the query builder can map URL parameters onto columns.
//!
//! Field attributes:
//!
//! | Attribute | Meaning |
//! |-----------|---------|
//! | *(none)* | not filterable |
//! | `#[filter]` | filterable under its own name with the `default` type |
//! | `#[filter(param = "name", kind = "string")]` | override parameter name and/or type |
//! | `#[filter(column = "col")]` | override the backend column |
//! | `#[filter(skip)]` | explicitly disabled |
//! | `#[filter = "param:name;type:string"]` | raw declaration, parsed at runtime |
//!
//! `#[sea_orm(column_name = "...")]` is honoured as the column when no
//! `column` override is given, and `#[sea_orm(table_name = "...")]` names the
//! model in logs and errors.

mod attribute_parser;

use attribute_parser::{FieldFilter, FieldSpec};
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

#[proc_macro_derive(FilterModel, attributes(filter))]
pub fn filter_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_filter_model(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_filter_model(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let model_name = attribute_parser::extract_table_name(&input.attrs).unwrap_or_else(|| name.to_string());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "FilterModel only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "FilterModel can only be derived for structs",
            ));
        }
    };

    let mut field_exprs = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident_to_string(ident);
        let spec = attribute_parser::parse_field(field)?;
        field_exprs.push(structural_field(&field_name, &spec));
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::filtercrate::FilterModel for #name #ty_generics #where_clause {
            fn model_descriptor() -> ::filtercrate::ModelDescriptor {
                ::filtercrate::ModelDescriptor::new(#model_name)
                    #(.field(#field_exprs))*
            }
        }
    })
}

fn structural_field(field_name: &str, spec: &FieldSpec) -> proc_macro2::TokenStream {
    let base = match &spec.filter {
        FieldFilter::Untagged => quote! {
            ::filtercrate::StructuralField::untagged(#field_name)
        },
        FieldFilter::Disabled => quote! {
            ::filtercrate::StructuralField::disabled(#field_name)
        },
        FieldFilter::Tag(tag) => quote! {
            ::filtercrate::StructuralField::tagged(#field_name, #tag)
        },
        FieldFilter::Declared { param, kind } => {
            let param = param.as_ref().map(|param| quote! { .param(#param) });
            let kind = kind.as_ref().map(|variant| {
                let variant = format_ident!("{}", variant);
                quote! { .logical_type(::filtercrate::LogicalType::#variant) }
            });
            quote! {
                ::filtercrate::StructuralField::declared(
                    #field_name,
                    ::filtercrate::FieldDeclaration::new() #param #kind,
                )
            }
        }
    };

    match &spec.column {
        Some(column) => quote! { #base.with_column(#column) },
        None => base,
    }
}

/// Field name as written, without a raw identifier prefix.
fn ident_to_string(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").unwrap_or(&name).to_string()
}
