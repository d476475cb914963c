//! # Vitrine - Table and Card Grid Pipelines
//!
//! Vitrine computes what a data table or a card grid should show for an
//! in-memory collection. It owns the state (page, sort, filter, scroll) and
//! leaves drawing to a renderer of your choice.
//!
//! ## Core Concepts
//!
//! - [`TablePipeline`]: filter, sort, paginate and virtualize rows under [`Column`]s
//! - [`GridPipeline`]: filter and sort cards through labelled options
//! - [`Item`]: field access for your records, derivable with `#[derive(Item)]`
//! - [`TableOptions`]: page size and viewport geometry, loadable from JSON or YAML
//! - [`TextRenderer`]: a plain-text view of table and grid frames
//!
//! ## Quick Start
//!
//! ```rust
//! use vitrine::prelude::*;
//!
//! #[derive(Item)]
//! struct Book {
//!     #[item(id)]
//!     isbn: String,
//!     #[item(String)]
//!     title: String,
//!     #[item(Number)]
//!     year: u16,
//! }
//!
//! let books = vec![
//!     Book { isbn: "b1".into(), title: "Emma".into(), year: 1815 },
//!     Book { isbn: "b2".into(), title: "Dracula".into(), year: 1897 },
//!     Book { isbn: "b3".into(), title: "Ulysses".into(), year: 1922 },
//! ];
//!
//! let mut table = TablePipeline::builder(vec![
//!     Column::new(Book::TITLE, "Title"),
//!     Column::new(Book::YEAR, "Year"),
//! ])
//! .data(books)
//! .build()
//! .unwrap();
//!
//! table.toggle_sort(Book::YEAR).unwrap();
//! table.toggle_sort(Book::YEAR).unwrap();
//!
//! let frame = table.render().unwrap();
//! let keys: Vec<_> = frame.visible_rows().iter().map(|r| r.row_key.as_str()).collect();
//! assert_eq!(keys, ["b3", "b2", "b1"]);
//! ```
//!
//! ## Logging
//!
//! State transitions log through the [`log`] facade at `debug`, renders at
//! `trace`. Install any logger to see them.

pub mod column;
pub mod grid;
pub mod options;
pub mod prelude;
pub mod render;
pub mod table;
pub mod text;

pub use column::Column;
pub use grid::{GridBuilder, GridFrame, GridPipeline};
pub use options::TableOptions;
pub use render::{CardRenderer, CellRenderer, GridView, RenderedCard, TableView};
pub use table::{
    ColumnHeader, ColumnSort, TableBody, TableBuilder, TableFrame, TablePipeline, VisibleRow,
};
pub use text::TextRenderer;

pub use vitrine_core::*;
pub use vitrine_macros::Item;
