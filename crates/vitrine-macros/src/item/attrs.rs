//! Attribute parsing for the Item derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// How a field is exposed to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `#[item(String)]`: any `AsRef<str>` field.
    String,
    /// `#[item(Number)]`: a primitive numeric field.
    Number,
    /// `#[item(Bool)]`
    Bool,
    /// `#[item(Json)]`: a `serde_json::Value` field.
    Json,
}

impl FieldKind {
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        match ident.to_string().as_str() {
            "String" | "string" => Ok(FieldKind::String),
            "Number" | "number" => Ok(FieldKind::Number),
            "Bool" | "boolean" => Ok(FieldKind::Bool),
            "Json" | "json" => Ok(FieldKind::Json),
            other => Err(Error::new(
                ident.span(),
                format!(
                    "unknown item field kind: '{}'. Expected one of: String, Number, Bool, Json",
                    other
                ),
            )),
        }
    }
}

/// Field-level attributes from `#[item(...)]`.
#[derive(Debug, Clone)]
pub struct ItemAttr {
    pub kind: Option<FieldKind>,
    /// This field is the item's identity.
    pub id: bool,
    /// The field is an `Option<_>`; `None` exposes as null.
    pub optional: bool,
    pub skip: bool,
    /// Key the field is looked up by (default: field name).
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for ItemAttr {
    fn default() -> Self {
        ItemAttr {
            kind: None,
            id: false,
            optional: false,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for ItemAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ItemAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("id") {
                        attr.id = true;
                    } else if p.is_ident("optional") {
                        attr.optional = true;
                    } else if let Some(ident) = p.get_ident() {
                        attr.kind = Some(FieldKind::from_ident(ident)?);
                        attr.span = ident.span();
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "expected a field kind (String, Number, Bool, Json), id, optional, or skip",
                        ));
                    }
                }

                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    {
                        attr.rename = Some(s.value());
                    } else {
                        return Err(Error::new(
                            nv.value.span(),
                            "rename must be a string literal",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown item attribute. Expected: String, Number, Bool, Json, id, optional, skip, or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.skip && (attr.kind.is_some() || attr.id) {
            return Err(Error::new(
                attr.span,
                "skip cannot be combined with a field kind or id",
            ));
        }

        Ok(attr)
    }
}

/// Extracts the `#[item(...)]` attribute of a field.
pub fn parse_item_attrs(attrs: &[Attribute]) -> Result<ItemAttr> {
    for attr in attrs {
        if attr.path().is_ident("item") {
            return attr.parse_args::<ItemAttr>();
        }
    }
    Ok(ItemAttr::default())
}
