//! Implementation of the `#[derive(Item)]` macro.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_item_attrs, FieldKind};

/// Main implementation of the Item derive macro.
pub fn item_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Item can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Item can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut id_expr: Option<TokenStream> = None;
    let mut fallback_id: Option<&syn::Ident> = None;

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_item_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        if attrs.id {
            if id_expr.is_some() {
                return Err(Error::new(field.span(), "only one field can be marked #[item(id)]"));
            }
            id_expr = Some(match (attrs.kind, attrs.optional) {
                (Some(FieldKind::String), false) => quote! {
                    ::std::borrow::Cow::Borrowed(::core::convert::AsRef::<str>::as_ref(&self.#field_name))
                },
                (_, true) => {
                    return Err(Error::new(field.span(), "the id field cannot be optional"));
                }
                _ => quote! {
                    ::std::borrow::Cow::Owned(::std::string::ToString::to_string(&self.#field_name))
                },
            });
        } else if field_name == "id" {
            fallback_id = Some(field_name);
        }

        let kind = match attrs.kind {
            Some(kind) => kind,
            None => continue,
        };

        let key = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&key));

        field_constants.push(quote! {
            /// Field key constant for sort and filter specs.
            pub const #const_name: &'static str = #key;
        });

        let value_expr = if attrs.optional {
            let inner = value_tokens(kind, quote! { v });
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(v) => #inner,
                    ::core::option::Option::None => ::vitrine_core::Value::Null,
                }
            }
        } else {
            value_tokens(kind, quote! { &self.#field_name })
        };

        field_matches.push(quote! {
            #key => #value_expr,
        });
    }

    let id_expr = match (id_expr, fallback_id) {
        (Some(expr), _) => expr,
        (None, Some(field_name)) => quote! {
            ::std::borrow::Cow::Owned(::std::string::ToString::to_string(&self.#field_name))
        },
        (None, None) => {
            return Err(Error::new(
                input.span(),
                "Item needs an identity: mark a field with #[item(id)] or name it `id`",
            ))
        }
    };

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::vitrine_core::Item for #struct_name #ty_generics #where_clause {
            fn item_id(&self) -> ::std::borrow::Cow<'_, str> {
                #id_expr
            }

            fn field(&self, key: &str) -> ::vitrine_core::Value<'_> {
                match key {
                    #(#field_matches)*
                    _ => ::vitrine_core::Value::Undefined,
                }
            }
        }
    };

    Ok(expanded)
}

/// Converts a reference expression to a field into a `Value`.
fn value_tokens(kind: FieldKind, field_ref: TokenStream) -> TokenStream {
    match kind {
        FieldKind::String => quote! {
            ::vitrine_core::Value::String(::core::convert::AsRef::<str>::as_ref(#field_ref))
        },
        FieldKind::Number => quote! {
            ::vitrine_core::Value::Number(::vitrine_core::Number::from(*#field_ref))
        },
        FieldKind::Bool => quote! {
            ::vitrine_core::Value::Bool(*#field_ref)
        },
        FieldKind::Json => quote! {
            ::vitrine_core::Value::from_json(#field_ref)
        },
    }
}

/// Converts a key to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}
