//! Integration tests for the Item derive macro.

#![allow(dead_code)] // Some fields are intentionally skipped for testing

use serde_json::json;
use vitrine::{sort, Direction, Item, Number, SortSpec, Value};

// =============================================================================
// Basic derive tests
// =============================================================================

#[derive(Item)]
struct Product {
    #[item(id)]
    sku: String,

    #[item(String)]
    name: String,

    #[item(Number)]
    price: f64,

    #[item(Bool)]
    in_stock: bool,

    #[item(String, optional)]
    category: Option<String>,

    #[item(skip)]
    internal_notes: String,

    warehouse: String,
}

fn product(sku: &str, name: &str, price: f64) -> Product {
    Product {
        sku: sku.to_string(),
        name: name.to_string(),
        price,
        in_stock: true,
        category: None,
        internal_notes: "secret".to_string(),
        warehouse: "north".to_string(),
    }
}

#[test]
fn test_field_values() {
    let p = product("p-1", "Kettle", 29.5);
    assert_eq!(p.item_id(), "p-1");
    assert!(matches!(p.field("name"), Value::String("Kettle")));
    assert_eq!(p.field("price"), Value::Number(Number::F64(29.5)));
    assert_eq!(p.field("in_stock"), Value::Bool(true));
}

#[test]
fn test_optional_field_is_null_when_none() {
    let mut p = product("p-1", "Kettle", 29.5);
    assert_eq!(p.field("category"), Value::Null);
    p.category = Some("Kitchen".to_string());
    assert_eq!(p.field("category"), Value::String("Kitchen"));
}

#[test]
fn test_unannotated_and_skipped_fields_are_undefined() {
    let p = product("p-1", "Kettle", 29.5);
    assert_eq!(p.field("internal_notes"), Value::Undefined);
    assert_eq!(p.field("warehouse"), Value::Undefined);
    assert_eq!(p.field("sku"), Value::Undefined);
}

#[test]
fn test_field_constants_generated() {
    assert_eq!(Product::NAME, "name");
    assert_eq!(Product::PRICE, "price");
    assert_eq!(Product::IN_STOCK, "in_stock");
    assert_eq!(Product::CATEGORY, "category");
}

#[test]
fn test_derived_items_sort() {
    let items = vec![
        product("a", "Teapot", 40.0),
        product("b", "Mug", 8.0),
        product("c", "Kettle", 29.5),
    ];
    let spec = SortSpec::by_field("Price", Product::PRICE).with_direction(Direction::Desc);
    let sorted = sort(items.iter().collect(), Some(&spec)).unwrap();
    let ids: Vec<_> = sorted.iter().map(|p| p.item_id().into_owned()).collect();
    assert_eq!(ids, ["a", "c", "b"]);
}

// =============================================================================
// Identity, rename, json
// =============================================================================

#[derive(Item)]
struct Event {
    #[item(Number)]
    id: u64,

    #[item(String, rename = "title")]
    headline: String,

    #[item(Json)]
    tags: serde_json::Value,

    #[item(Number, optional)]
    attendees: Option<u32>,
}

#[test]
fn test_field_named_id_is_identity() {
    let e = Event {
        id: 42,
        headline: "Launch".to_string(),
        tags: json!(["a", "b"]),
        attendees: Some(12),
    };
    assert_eq!(e.item_id(), "42");
    assert_eq!(e.field("id"), Value::Number(Number::U64(42)));
}

#[test]
fn test_rename_and_json() {
    let e = Event {
        id: 1,
        headline: "Launch".to_string(),
        tags: json!(["a", "b"]),
        attendees: None,
    };
    assert_eq!(Event::TITLE, "title");
    assert_eq!(e.field("title"), Value::String("Launch"));
    assert_eq!(e.field("headline"), Value::Undefined);
    assert_eq!(e.field("tags").to_display_string(), "a,b");
    assert_eq!(e.field("attendees"), Value::Null);
}

// =============================================================================
// Generics
// =============================================================================

#[derive(Item)]
struct Tagged<M: Clone> {
    #[item(id, Number)]
    key: i32,

    meta: M,
}

#[test]
fn test_generic_struct() {
    let t = Tagged { key: 7, meta: () };
    assert_eq!(t.item_id(), "7");
    assert_eq!(t.field(Tagged::<()>::KEY), Value::Number(Number::I64(7)));
}
