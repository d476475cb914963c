//! Table columns.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use vitrine_core::{
    CollaboratorError, CompareFn, Direction, Item, PipelineError, Result, SortKey, SortSpec, Value,
};

use crate::render::CellRenderer;

/// One table column.
///
/// A column reads the item field named by its key. Cell text comes from the
/// column's [`CellRenderer`] when one is set, otherwise from the field's
/// display string (missing and null fields render empty).
///
/// ```
/// use vitrine::{Column, Item, Record};
///
/// let price = Column::<Record>::new("price", "Price")
///     .with_width(8)
///     .with_cell(|r: &Record| format!("${}", r.field("price")));
///
/// let item = Record::new(1).with("price", 12);
/// assert_eq!(price.cell_text(&item), "$12");
/// ```
pub struct Column<T> {
    key: String,
    title: String,
    width: Option<usize>,
    sortable: bool,
    cell: Option<Arc<dyn CellRenderer<T>>>,
    comparator: Option<Arc<CompareFn<T>>>,
}

impl<T> Column<T> {
    /// Creates a sortable column with no fixed width.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Column {
            key: key.into(),
            title: title.into(),
            width: None,
            sortable: true,
            cell: None,
            comparator: None,
        }
    }

    /// Fixes the column width (in display columns for text output).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets a custom cell renderer.
    pub fn with_cell<R>(mut self, renderer: R) -> Self
    where
        R: CellRenderer<T> + 'static,
    {
        self.cell = Some(Arc::new(renderer));
        self
    }

    /// Sorts this column with a comparator instead of the field policy.
    pub fn with_comparator<F>(self, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.try_with_comparator(move |a, b| Ok(compare(a, b)))
    }

    /// Sorts this column with a comparator that may fail.
    pub fn try_with_comparator<F>(mut self, compare: F) -> Self
    where
        F: Fn(&T, &T) -> std::result::Result<Ordering, CollaboratorError> + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(compare));
        self
    }

    /// Disables header sorting for this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// The sort a header click on this column commits, labelled by key.
    pub fn sort_spec(&self, direction: Direction) -> SortSpec<T> {
        let key = match &self.comparator {
            Some(compare) => SortKey::ByComparator(Arc::clone(compare)),
            None => SortKey::ByField(self.key.clone()),
        };
        SortSpec::new(self.key.clone(), key, direction)
    }
}

impl<T: Item> Column<T> {
    /// Text of this column's cell for `item`.
    pub fn cell_text(&self, item: &T) -> String {
        if let Some(cell) = &self.cell {
            return cell.render_cell(item);
        }
        match item.field(&self.key) {
            Value::Null | Value::Undefined => String::new(),
            value => value.to_display_string().into_owned(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Column {
            key: self.key.clone(),
            title: self.title.clone(),
            width: self.width,
            sortable: self.sortable,
            cell: self.cell.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("custom_cell", &self.cell.is_some())
            .field("custom_sort", &self.comparator.is_some())
            .finish()
    }
}

/// Rejects an empty column set and duplicate keys.
pub fn validate_columns<T>(columns: &[Column<T>]) -> Result<()> {
    if columns.is_empty() {
        return Err(PipelineError::InvalidConfiguration(
            "a table needs at least one column".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.key()) {
            return Err(PipelineError::InvalidConfiguration(format!(
                "duplicate column key '{}'",
                column.key()
            )));
        }
    }
    Ok(())
}
