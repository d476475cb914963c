//! Commonly used types in one import.
//!
//! ```rust
//! use vitrine::prelude::*;
//! ```

pub use crate::column::Column;
pub use crate::grid::GridPipeline;
pub use crate::options::TableOptions;
pub use crate::render::{CardRenderer, GridView, TableView};
pub use crate::table::TablePipeline;
pub use crate::text::TextRenderer;
pub use vitrine_core::{Direction, FilterSpec, Item, PipelineError, Record, SortSpec, Value};
pub use vitrine_macros::Item;
