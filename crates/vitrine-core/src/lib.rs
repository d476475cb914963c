//! Vitrine core - the collection view pipeline.
//!
//! Vitrine turns an in-memory collection into what a table or card grid
//! should show. The pipeline is pure and UI-agnostic:
//!
//! - **Filter**: keep items matching the active [`FilterSpec`]
//! - **Sort**: stable ordering by a field or a custom comparator ([`SortSpec`])
//! - **Paginate**: clamped page navigation ([`Pagination`])
//! - **Window**: which rows a scrolled viewport should materialize ([`WindowConfig`])
//!
//! Higher-level table and grid pipelines live in the `vitrine` crate.
//!
//! # Quick Start
//!
//! ```rust
//! use vitrine_core::{filter, paginate, page_size, sort, FilterSpec, Item, Record, SortSpec, Value};
//!
//! let items = vec![
//!     Record::new(1).with("name", "Lamp").with("price", 30).with("in_stock", true),
//!     Record::new(2).with("name", "Desk").with("price", 120).with("in_stock", true),
//!     Record::new(3).with("name", "Chair").with("price", 45).with("in_stock", false),
//!     Record::new(4).with("name", "Rug").with("price", 80).with("in_stock", true),
//! ];
//!
//! let in_stock = FilterSpec::new("In stock", |r: &Record| r.field("in_stock") == Value::Bool(true));
//! let by_price = SortSpec::by_field("Price", "price").descending();
//!
//! let filtered = filter(&items, Some(&in_stock)).unwrap();
//! let sorted = sort(filtered, Some(&by_price)).unwrap();
//! let page = paginate(&sorted, 0, page_size(2).unwrap());
//!
//! let names: Vec<_> = page.iter().map(|r| r.field("name").to_display_string()).collect();
//! assert_eq!(names, ["Desk", "Rug"]);
//! ```
//!
//! # Comparison
//!
//! Field sorts compare values in three tiers: two strings by
//! [`locale_compare`], two numbers numerically, anything else by the
//! display strings of both sides. Equal items keep their input order.

mod compare;
mod error;
mod events;
mod filter;
mod item;
mod paginate;
mod sort;
mod state;
mod value;
mod window;

pub use compare::{compare_field_values, locale_compare};
pub use error::{CollaboratorError, PipelineError, Result};
pub use events::{EventBus, PipelineEvent, SubscriptionId};
pub use filter::{filter, FilterSpec, PredicateFn};
pub use item::{Item, Record, RecordId};
pub use paginate::{
    page_range, page_size, paginate, total_pages, PageChange, Pagination, DEFAULT_PAGE_SIZE,
};
pub use sort::{sort, CompareFn, Direction, SortKey, SortSpec};
pub use state::{ActiveSort, PipelineState, Selection, SortSelection};
pub use value::{Number, Value};
pub use window::{
    VirtualRow, Window, WindowConfig, DEFAULT_OVERSCAN, DEFAULT_ROW_HEIGHT, DEFAULT_VIEWPORT_HEIGHT,
};
