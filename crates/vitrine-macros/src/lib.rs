//! Proc macros for Vitrine.
//!
//! - [`Item`] - Expose struct fields to the view pipeline by key

mod item;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `vitrine_core::Item` for a struct with named fields.
///
/// Only annotated fields are visible to sorts, filters and cells; every other
/// key reads as `Value::Undefined`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `id` | The item's identity (row key). Defaults to a field named `id` |
/// | `String` | Any `AsRef<str>` field |
/// | `Number` | A primitive numeric field |
/// | `Bool` | A `bool` field |
/// | `Json` | A `serde_json::Value` field |
/// | `optional` | The field is an `Option<_>`; `None` reads as `Value::Null` |
/// | `skip` | Never expose this field |
/// | `rename = "..."` | Look the field up by a different key |
///
/// # Generated Code
///
/// 1. Key constants (e.g., `Product::PRICE`)
/// 2. `Item::item_id()` and `Item::field()`
///
/// # Example
///
/// ```ignore
/// use vitrine::{sort, Item, SortSpec};
///
/// #[derive(Item)]
/// struct Product {
///     #[item(id)]
///     sku: String,
///
///     #[item(String)]
///     name: String,
///
///     #[item(Number)]
///     price: f64,
///
///     #[item(String, optional)]
///     category: Option<String>,
/// }
///
/// let spec = SortSpec::by_field("Price", Product::PRICE);
/// ```
#[proc_macro_derive(Item, attributes(item))]
pub fn item_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    item::item_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
