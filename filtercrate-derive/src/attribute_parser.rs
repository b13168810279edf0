use syn::parse::Parser;
use syn::{Lit, LitStr, Meta, punctuated::Punctuated, token::Comma};

/// Names accepted by `#[filter(kind = "...")]`, paired with their
/// `LogicalType` variant.
pub(crate) const KNOWN_KINDS: &[(&str, &str)] = &[
    ("default", "Default"),
    ("string", "String"),
    ("text", "Text"),
    ("blob", "Blob"),
    ("bool", "Bool"),
    ("number", "Number"),
    ("json", "Json"),
    ("date", "Date"),
    ("time", "Time"),
    ("dateOnly", "DateOnly"),
];

/// How a single struct field takes part in filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldFilter {
    /// No `#[filter]` attribute at all
    Untagged,
    /// `#[filter(skip)]` or `#[filter = "-"]`
    Disabled,
    /// `#[filter = "param:x;type:y"]`, parsed at runtime
    Tag(String),
    /// `#[filter]` or `#[filter(param = "..", kind = "..")]`
    Declared {
        param: Option<String>,
        /// `LogicalType` variant name
        kind: Option<String>,
    },
}

/// Everything the derive needs to know about one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldSpec {
    pub filter: FieldFilter,
    pub column: Option<String>,
}

/// Parses the `#[filter]` attributes of a field.
///
/// Only the first `#[filter]` attribute is honoured. The column comes from
/// `#[filter(column = "..")]`, falling back to `#[sea_orm(column_name = "..")]`.
pub(crate) fn parse_field(field: &syn::Field) -> syn::Result<FieldSpec> {
    let mut spec = FieldSpec {
        filter: FieldFilter::Untagged,
        column: None,
    };

    if let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("filter")) {
        match &attr.meta {
            Meta::Path(_) => {
                spec.filter = FieldFilter::Declared {
                    param: None,
                    kind: None,
                };
            }
            Meta::NameValue(nv) => {
                let tag = match &nv.value {
                    syn::Expr::Lit(expr_lit) => match &expr_lit.lit {
                        Lit::Str(s) => s.value(),
                        other => {
                            return Err(syn::Error::new_spanned(
                                other,
                                "expected a string such as `#[filter = \"param:name;type:string\"]`",
                            ));
                        }
                    },
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            "expected a string such as `#[filter = \"param:name;type:string\"]`",
                        ));
                    }
                };
                spec.filter = if tag.trim() == "-" {
                    FieldFilter::Disabled
                } else {
                    FieldFilter::Tag(tag)
                };
            }
            Meta::List(_) => {
                let mut skip = false;
                let mut param = None;
                let mut kind = None;
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        skip = true;
                        Ok(())
                    } else if meta.path.is_ident("param") {
                        let value: LitStr = meta.value()?.parse()?;
                        if value.value().is_empty() {
                            return Err(syn::Error::new_spanned(value, "param name must not be empty"));
                        }
                        param = Some(value.value());
                        Ok(())
                    } else if meta.path.is_ident("kind") {
                        let value: LitStr = meta.value()?.parse()?;
                        kind = Some(resolve_kind(&value)?);
                        Ok(())
                    } else if meta.path.is_ident("column") {
                        let value: LitStr = meta.value()?.parse()?;
                        spec.column = Some(value.value());
                        Ok(())
                    } else {
                        Err(meta.error("expected one of `skip`, `param`, `kind`, `column`"))
                    }
                })?;

                spec.filter = if skip {
                    FieldFilter::Disabled
                } else {
                    FieldFilter::Declared { param, kind }
                };
            }
        }
    }

    if spec.column.is_none() {
        spec.column = extract_column_name(&field.attrs);
    }

    Ok(spec)
}

fn resolve_kind(value: &LitStr) -> syn::Result<String> {
    let name = value.value();
    KNOWN_KINDS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, variant)| (*variant).to_string())
        .ok_or_else(|| {
            let expected: Vec<&str> = KNOWN_KINDS.iter().map(|(known, _)| *known).collect();
            syn::Error::new_spanned(
                value,
                format!("unknown filter kind `{name}`, expected one of: {}", expected.join(", ")),
            )
        })
}

/// Reads `column_name` out of `#[sea_orm(...)]`.
pub(crate) fn extract_column_name(attrs: &[syn::Attribute]) -> Option<String> {
    extract_sea_orm_string(attrs, "column_name")
}

/// Reads `table_name` out of `#[sea_orm(...)]`.
pub(crate) fn extract_table_name(attrs: &[syn::Attribute]) -> Option<String> {
    extract_sea_orm_string(attrs, "table_name")
}

fn extract_sea_orm_string(attrs: &[syn::Attribute], key: &str) -> Option<String> {
    for attr in attrs {
        if attr.path().is_ident("sea_orm")
            && let Meta::List(meta_list) = &attr.meta
            && let Ok(metas) =
                Punctuated::<Meta, Comma>::parse_terminated.parse2(meta_list.tokens.clone())
        {
            for meta in metas {
                if let Meta::NameValue(nv) = meta
                    && nv.path.is_ident(key)
                    && let syn::Expr::Lit(expr_lit) = &nv.value
                    && let Lit::Str(s) = &expr_lit.lit
                {
                    return Some(s.value());
                }
            }
        }
    }
    None
}
