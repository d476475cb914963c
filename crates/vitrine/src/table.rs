//! Paginated, sortable, virtualized table pipeline.
//!
//! [`TablePipeline`] owns the data, the columns and the pipeline state. Each
//! [`render`](TablePipeline::render) runs filter, sort (over the whole data
//! set), paginate and window, in that order, and returns a [`TableFrame`]
//! borrowing from the pipeline.
//!
//! Transitions that change the sort or the filter return to the first page,
//! and a data replacement re-clamps the current page.
//!
//! ```rust
//! use vitrine::{Column, Direction, Record, TablePipeline};
//!
//! let data: Vec<Record> = (1..=25).map(|i| Record::new(i).with("n", i)).collect();
//! let mut table = TablePipeline::builder(vec![Column::new("n", "N")])
//!     .data(data)
//!     .build()
//!     .unwrap();
//!
//! table.set_sort("n", Direction::Desc).unwrap();
//! table.next_page().unwrap();
//!
//! let frame = table.render().unwrap();
//! assert_eq!(frame.page_label, "Page 2 of 3");
//! assert_eq!(frame.visible_rows()[0].row_key, "15");
//! ```

use serde::Serialize;
use vitrine_core::{
    Direction, EventBus, FilterSpec, Item, PageChange, PipelineError, PipelineEvent,
    PipelineState, Result, SubscriptionId, WindowConfig,
};

use crate::column::{validate_columns, Column};
use crate::options::TableOptions;

type RowClickFn<T> = Box<dyn FnMut(&T, usize) + Send>;
type SortFn = Box<dyn FnMut(&str, Direction) + Send>;

/// The active column sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSort {
    pub key: String,
    pub direction: Direction,
}

/// Header state of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnHeader<'a> {
    pub key: &'a str,
    pub title: &'a str,
    pub width: Option<usize>,
    pub sortable: bool,
    /// Direction of this column's sort, when it is the active one.
    pub sorted: Option<Direction>,
}

impl ColumnHeader<'_> {
    /// Describes what a header click does, e.g. "Sort by price descending".
    pub fn sort_action_label(&self) -> Option<String> {
        if !self.sortable {
            return None;
        }
        let next = match self.sorted {
            Some(Direction::Asc) => "descending",
            Some(Direction::Desc) | None => "ascending",
        };
        Some(format!("Sort by {} {}", self.key, next))
    }

    /// Arrow shown next to a sorted header.
    pub fn indicator(&self) -> &'static str {
        match self.sorted {
            Some(Direction::Asc) => "▲",
            Some(Direction::Desc) => "▼",
            None => "",
        }
    }
}

/// A materialized row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleRow<'a, T> {
    #[serde(skip)]
    pub item: &'a T,
    /// The item's id.
    pub row_key: String,
    /// Index of the row within the current page.
    pub index: usize,
    /// Distance from the top of the scrollable body.
    pub offset_top: u64,
}

/// Table body: rows, or the "no items" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case", bound(serialize = ""))]
pub enum TableBody<'a, T> {
    Empty,
    Rows(Vec<VisibleRow<'a, T>>),
}

/// Everything a table view needs for one render.
///
/// Serializes without the items themselves, whatever `T` is.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = ""))]
pub struct TableFrame<'a, T> {
    #[serde(skip)]
    pub columns: &'a [Column<T>],
    pub headers: Vec<ColumnHeader<'a>>,
    pub body: TableBody<'a, T>,
    pub padding_top: u64,
    pub padding_bottom: u64,
    pub total_size: u64,
    /// Zero-based current page.
    pub current_page: usize,
    /// Page count, at least one.
    pub total_pages: usize,
    /// Items after filtering.
    pub total_items: usize,
    /// Rows on the current page, materialized or not.
    pub page_len: usize,
    pub page_label: String,
    pub can_previous: bool,
    pub can_next: bool,
    /// Whether pagination controls should be shown.
    pub shows_controls: bool,
    pub active_sort: Option<ColumnSort>,
}

impl<'a, T> TableFrame<'a, T> {
    pub fn is_empty(&self) -> bool {
        matches!(self.body, TableBody::Empty)
    }

    pub fn visible_rows(&self) -> &[VisibleRow<'a, T>] {
        match &self.body {
            TableBody::Empty => &[],
            TableBody::Rows(rows) => rows,
        }
    }
}

/// Builder for [`TablePipeline`].
pub struct TableBuilder<T> {
    columns: Vec<Column<T>>,
    data: Vec<T>,
    options: TableOptions,
    page_size: Option<usize>,
    sort: Option<(String, Direction)>,
    filter: Option<FilterSpec<T>>,
    on_row_click: Option<RowClickFn<T>>,
    on_sort: Option<SortFn>,
    events: EventBus,
}

impl<T: Item> TableBuilder<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        TableBuilder {
            columns,
            data: Vec::new(),
            options: TableOptions::default(),
            page_size: None,
            sort: None,
            filter: None,
            on_row_click: None,
            on_sort: None,
            events: EventBus::new(),
        }
    }

    pub fn data(mut self, data: impl IntoIterator<Item = T>) -> Self {
        self.data = data.into_iter().collect();
        self
    }

    pub fn options(mut self, options: TableOptions) -> Self {
        self.options = options;
        self
    }

    /// Overrides the page size of the options; zero fails at build.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Overrides the viewport height of the options.
    pub fn height(mut self, height: u64) -> Self {
        self.options.height = height;
        self
    }

    /// Initial sort, by column key. Does not fire `on_sort`.
    pub fn sort(mut self, key: impl Into<String>, direction: Direction) -> Self {
        self.sort = Some((key.into(), direction));
        self
    }

    pub fn filter(mut self, spec: FilterSpec<T>) -> Self {
        self.filter = Some(spec);
        self
    }

    /// Called with the clicked item and its index within the page.
    pub fn on_row_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&T, usize) + Send + 'static,
    {
        self.on_row_click = Some(Box::new(callback));
        self
    }

    /// Called with the column key and direction of every committed sort.
    pub fn on_sort<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str, Direction) + Send + 'static,
    {
        self.on_sort = Some(Box::new(callback));
        self
    }

    pub fn subscribe<F>(mut self, subscriber: F) -> Self
    where
        F: FnMut(&PipelineEvent) + Send + 'static,
    {
        self.events.subscribe(subscriber);
        self
    }

    pub fn build(self) -> Result<TablePipeline<T>> {
        validate_columns(&self.columns)?;
        let mut options = self.options;
        if let Some(page_size) = self.page_size {
            options = options.with_page_size(page_size)?;
        }
        options.validate()?;

        let mut state = PipelineState::new(options.page_size);
        let mut sort_key = None;
        if let Some((key, direction)) = self.sort {
            let column = find_sortable(&self.columns, &key)?;
            state.set_sort(Some(column.sort_spec(direction)));
            sort_key = Some(key);
        }
        state.set_filter(self.filter);

        log::debug!(
            "table built: {} columns, {} rows, page size {}",
            self.columns.len(),
            self.data.len(),
            options.page_size
        );

        Ok(TablePipeline {
            columns: self.columns,
            data: self.data,
            window: options.window_config(),
            options,
            state,
            sort_key,
            scroll_offset: 0,
            on_row_click: self.on_row_click,
            on_sort: self.on_sort,
            events: self.events,
        })
    }
}

/// A data table: columns over a collection with paging, one sort, one
/// filter and a virtualized body.
pub struct TablePipeline<T> {
    columns: Vec<Column<T>>,
    data: Vec<T>,
    options: TableOptions,
    window: WindowConfig,
    state: PipelineState<T>,
    /// Column key of the active sort.
    sort_key: Option<String>,
    scroll_offset: u64,
    on_row_click: Option<RowClickFn<T>>,
    on_sort: Option<SortFn>,
    events: EventBus,
}

impl<T: Item> TablePipeline<T> {
    pub fn builder(columns: Vec<Column<T>>) -> TableBuilder<T> {
        TableBuilder::new(columns)
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> u64 {
        self.window.viewport_height
    }

    pub fn active_sort(&self) -> Option<ColumnSort> {
        let key = self.sort_key.clone()?;
        let direction = self.state.active_sort()?.direction();
        Some(ColumnSort { key, direction })
    }

    pub fn active_filter(&self) -> Option<&FilterSpec<T>> {
        self.state.active_filter()
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&PipelineEvent) + Send + 'static,
    {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Number of items that pass the active filter.
    pub fn processed_len(&self) -> Result<usize> {
        self.matching_len(&self.data)
    }

    fn matching_len(&self, data: &[T]) -> Result<usize> {
        match self.state.active_filter() {
            None => Ok(data.len()),
            Some(spec) => {
                let mut count = 0;
                for item in data {
                    if spec.matches(item)? {
                        count += 1;
                    }
                }
                Ok(count)
            }
        }
    }

    // ------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------

    /// Moves to page `n` (zero-based), clamped. Returns whether the page changed.
    pub fn set_page(&mut self, n: usize) -> Result<bool> {
        let count = self.processed_len()?;
        let change = self.state.set_page(n, count);
        Ok(self.commit_page(change))
    }

    pub fn first_page(&mut self) -> Result<bool> {
        self.set_page(0)
    }

    pub fn previous_page(&mut self) -> Result<bool> {
        let count = self.processed_len()?;
        let change = self.state.pagination_mut().previous_page(count);
        Ok(self.commit_page(change))
    }

    pub fn next_page(&mut self) -> Result<bool> {
        let count = self.processed_len()?;
        let change = self.state.pagination_mut().next_page(count);
        Ok(self.commit_page(change))
    }

    pub fn last_page(&mut self) -> Result<bool> {
        let count = self.processed_len()?;
        let change = self.state.pagination_mut().last_page(count);
        Ok(self.commit_page(change))
    }

    fn commit_page(&mut self, change: Option<PageChange>) -> bool {
        match change {
            Some(change) => {
                log::debug!("page {} -> {}", change.from, change.to);
                self.events.publish(&change.into());
                true
            }
            None => false,
        }
    }

    fn reset_page(&mut self) {
        let change = self.state.pagination_mut().goto_page(0, 0);
        self.commit_page(change);
    }

    // ------------------------------------------------------------------
    // Sorting
    // ------------------------------------------------------------------

    /// Sorts by a column. Returns `false` when that sort was already active.
    pub fn set_sort(&mut self, key: &str, direction: Direction) -> Result<bool> {
        if self.active_sort().is_some_and(|s| s.key == key && s.direction == direction) {
            return Ok(false);
        }
        let spec = find_sortable(&self.columns, key)?.sort_spec(direction);
        self.state.set_sort(Some(spec));
        self.sort_key = Some(key.to_string());
        self.commit_sort(key, direction);
        self.reset_page();
        Ok(true)
    }

    /// Header click: unsorted or another column sorts ascending, ascending
    /// flips to descending, descending clears the sort.
    ///
    /// Returns the resulting direction, `None` once cleared.
    pub fn toggle_sort(&mut self, key: &str) -> Result<Option<Direction>> {
        let next = match self.active_sort() {
            Some(active) if active.key == key => match active.direction {
                Direction::Asc => Some(Direction::Desc),
                Direction::Desc => None,
            },
            _ => Some(Direction::Asc),
        };
        match next {
            Some(direction) => {
                self.set_sort(key, direction)?;
            }
            None => {
                self.clear_sort();
            }
        }
        Ok(next)
    }

    /// Flips the direction of the active sort, if any.
    pub fn toggle_sort_direction(&mut self) -> Option<Direction> {
        let direction = self.state.toggle_sort_direction()?;
        if let Some(key) = self.sort_key.clone() {
            self.commit_sort(&key, direction);
        }
        self.reset_page();
        Some(direction)
    }

    /// Removes the active sort. Returns whether there was one.
    pub fn clear_sort(&mut self) -> bool {
        self.sort_key = None;
        if self.state.set_sort(None).is_none() {
            return false;
        }
        log::debug!("sort cleared");
        self.events.publish(&PipelineEvent::SortCleared);
        self.reset_page();
        true
    }

    fn commit_sort(&mut self, key: &str, direction: Direction) {
        log::debug!("sort {} {}", key, direction);
        if let Some(on_sort) = self.on_sort.as_mut() {
            on_sort(key, direction);
        }
        self.events.publish(&PipelineEvent::SortChanged {
            key: key.to_string(),
            direction,
        });
    }

    // ------------------------------------------------------------------
    // Filtering and data
    // ------------------------------------------------------------------

    /// Replaces the active filter. Clearing an absent filter is a no-op.
    pub fn set_filter(&mut self, spec: Option<FilterSpec<T>>) -> bool {
        if spec.is_none() && self.state.active_filter().is_none() {
            return false;
        }
        let label = spec.as_ref().map(|s| s.label().to_string());
        self.state.set_filter(spec);
        log::debug!("filter {:?}", label);
        self.events.publish(&PipelineEvent::FilterChanged { label });
        self.reset_page();
        true
    }

    /// Replaces the data and re-clamps the current page.
    ///
    /// The active filter runs over the new data first. If it fails, the table
    /// keeps its previous data and page and nothing is published.
    pub fn set_data(&mut self, data: Vec<T>) -> Result<()> {
        let count = self.matching_len(&data)?;
        self.data = data;
        self.events.publish(&PipelineEvent::DataReplaced {
            len: self.data.len(),
        });
        let change = self.state.pagination_mut().clamp(count);
        if let Some(change) = change {
            log::warn!(
                "page {} out of range after data change ({} items), moved to page {}",
                change.from,
                count,
                change.to
            );
        }
        self.commit_page(change);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    pub fn set_scroll_offset(&mut self, offset: u64) -> bool {
        if offset == self.scroll_offset {
            return false;
        }
        self.scroll_offset = offset;
        self.publish_viewport();
        true
    }

    pub fn set_viewport_height(&mut self, height: u64) -> bool {
        if height == self.window.viewport_height {
            return false;
        }
        self.window.viewport_height = height;
        self.publish_viewport();
        true
    }

    fn publish_viewport(&mut self) {
        self.events.publish(&PipelineEvent::ViewportChanged {
            scroll_offset: self.scroll_offset,
            viewport_height: self.window.viewport_height,
        });
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Invokes `on_row_click` for the row at `index` within the current page.
    ///
    /// Returns `false` when the index is past the page or no callback is set.
    pub fn click_row(&mut self, index: usize) -> Result<bool> {
        let TablePipeline {
            data,
            state,
            on_row_click,
            ..
        } = self;
        let Some(callback) = on_row_click.as_mut() else {
            return Ok(false);
        };
        let (page, _) = state.current_page_of(data.as_slice())?;
        match page.get(index) {
            Some(&item) => {
                callback(item, index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Runs the pipeline.
    pub fn render(&self) -> Result<TableFrame<'_, T>> {
        let (page, total_items) = self.state.current_page_of(&self.data)?;
        let pagination = self.state.pagination();
        let window = self.window.compute(page.len(), self.scroll_offset)?;

        let body = if page.is_empty() {
            TableBody::Empty
        } else {
            TableBody::Rows(
                window
                    .rows
                    .iter()
                    .map(|row| {
                        let item = page[row.index];
                        VisibleRow {
                            item,
                            row_key: item.item_id().into_owned(),
                            index: row.index,
                            offset_top: row.offset_top,
                        }
                    })
                    .collect(),
            )
        };

        let active_sort = self.active_sort();
        let headers = self
            .columns
            .iter()
            .map(|column| ColumnHeader {
                key: column.key(),
                title: column.title(),
                width: column.width(),
                sortable: column.is_sortable(),
                sorted: active_sort
                    .as_ref()
                    .filter(|s| s.key == column.key())
                    .map(|s| s.direction),
            })
            .collect();

        log::trace!(
            "render page {} ({} of {} items materialized)",
            pagination.current_page(),
            window.len(),
            total_items
        );

        Ok(TableFrame {
            columns: &self.columns,
            headers,
            body,
            padding_top: window.padding_top,
            padding_bottom: window.padding_bottom,
            total_size: window.total_size,
            current_page: pagination.current_page(),
            total_pages: pagination.total_pages(total_items).max(1),
            total_items,
            page_len: page.len(),
            page_label: pagination.page_label(total_items),
            can_previous: pagination.can_previous(),
            can_next: pagination.can_next(total_items),
            shows_controls: pagination.shows_controls(total_items),
            active_sort,
        })
    }
}

fn find_sortable<'c, T>(columns: &'c [Column<T>], key: &str) -> Result<&'c Column<T>> {
    let column = columns
        .iter()
        .find(|c| c.key() == key)
        .ok_or_else(|| PipelineError::InvalidConfiguration(format!("unknown column '{}'", key)))?;
    if !column.is_sortable() {
        return Err(PipelineError::InvalidConfiguration(format!(
            "column '{}' is not sortable",
            key
        )));
    }
    Ok(column)
}

impl<T> std::fmt::Debug for TablePipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TablePipeline")
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("options", &self.options)
            .field("state", &self.state)
            .field("scroll_offset", &self.scroll_offset)
            .field("events", &self.events)
            .finish()
    }
}
