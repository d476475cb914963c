//! Sortable, filterable card grid pipeline.
//!
//! The grid shows its whole processed collection (no paging, no window). Sort
//! and filter options are picked by label through a [`Selection`].

use serde::Serialize;
use vitrine_core::{
    filter, sort, Direction, EventBus, FilterSpec, Item, PipelineEvent, Result, Selection,
    SortSpec, SubscriptionId,
};

type CardClickFn<T> = Box<dyn FnMut(&T) + Send>;

/// Label of the "no filter" entry of the filter menu.
pub const ALL_ITEMS: &str = "All Items";

/// Everything a grid view needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct GridFrame<'a, T> {
    /// Filtered and sorted items, all of them.
    #[serde(skip)]
    pub items: Vec<&'a T>,
    /// "All Items (N)" or "<filter label> (N)".
    pub heading: String,
    /// Whether the sort/filter toolbar is shown at all.
    pub toolbar_visible: bool,
    /// "Sort: <label>", or "Sort" with no sort options.
    pub sort_button: String,
    /// The active filter label, or "Filter".
    pub filter_button: String,
    pub sort_options: Vec<&'a str>,
    pub filter_options: Vec<&'a str>,
    pub active_sort: Option<&'a str>,
    pub sort_direction: Option<Direction>,
    pub active_filter: Option<&'a str>,
    /// Size of the unfiltered collection.
    pub total_items: usize,
}

impl<T> GridFrame<'_, T> {
    /// The "No items found" state.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Builder for [`GridPipeline`].
pub struct GridBuilder<T> {
    items: Vec<T>,
    sort_options: Vec<SortSpec<T>>,
    filter_options: Vec<FilterSpec<T>>,
    on_card_click: Option<CardClickFn<T>>,
    events: EventBus,
}

impl<T: Item> GridBuilder<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        GridBuilder {
            items: items.into_iter().collect(),
            sort_options: Vec::new(),
            filter_options: Vec::new(),
            on_card_click: None,
            events: EventBus::new(),
        }
    }

    pub fn sort_option(mut self, spec: SortSpec<T>) -> Self {
        self.sort_options.push(spec);
        self
    }

    pub fn sort_options(mut self, specs: impl IntoIterator<Item = SortSpec<T>>) -> Self {
        self.sort_options.extend(specs);
        self
    }

    pub fn filter_option(mut self, spec: FilterSpec<T>) -> Self {
        self.filter_options.push(spec);
        self
    }

    pub fn filter_options(mut self, specs: impl IntoIterator<Item = FilterSpec<T>>) -> Self {
        self.filter_options.extend(specs);
        self
    }

    pub fn on_card_click<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.on_card_click = Some(Box::new(callback));
        self
    }

    pub fn subscribe<F>(mut self, subscriber: F) -> Self
    where
        F: FnMut(&PipelineEvent) + Send + 'static,
    {
        self.events.subscribe(subscriber);
        self
    }

    pub fn build(self) -> GridPipeline<T> {
        let selection = Selection::initial(&self.sort_options);
        GridPipeline {
            items: self.items,
            sort_options: self.sort_options,
            filter_options: self.filter_options,
            selection,
            on_card_click: self.on_card_click,
            events: self.events,
        }
    }
}

/// A card grid over a collection.
///
/// ```rust
/// use vitrine::{FilterSpec, GridPipeline, Item, Record, SortSpec, Value};
///
/// let items = vec![
///     Record::new(1).with("title", "Dune").with("kind", "Books"),
///     Record::new(2).with("title", "Lamp").with("kind", "Home"),
///     Record::new(3).with("title", "Emma").with("kind", "Books"),
/// ];
/// let mut grid = GridPipeline::builder(items)
///     .sort_option(SortSpec::by_field("Title", "title"))
///     .filter_option(FilterSpec::new("Books", |r: &Record| {
///         r.field("kind") == Value::String("Books")
///     }))
///     .build();
///
/// assert_eq!(grid.render().unwrap().heading, "All Items (3)");
///
/// grid.select_filter(Some("Books")).unwrap();
/// let frame = grid.render().unwrap();
/// assert_eq!(frame.heading, "Books (2)");
/// assert_eq!(frame.items[0].item_id(), "1");
/// ```
pub struct GridPipeline<T> {
    items: Vec<T>,
    sort_options: Vec<SortSpec<T>>,
    filter_options: Vec<FilterSpec<T>>,
    selection: Selection,
    on_card_click: Option<CardClickFn<T>>,
    events: EventBus,
}

impl<T: Item> GridPipeline<T> {
    pub fn builder(items: impl IntoIterator<Item = T>) -> GridBuilder<T> {
        GridBuilder::new(items)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn sort_options(&self) -> &[SortSpec<T>] {
        &self.sort_options
    }

    pub fn filter_options(&self) -> &[FilterSpec<T>] {
        &self.filter_options
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

    /// Picks a sort option by label; picking the active one flips its
    /// direction. Returns the resulting direction.
    pub fn select_sort(&mut self, label: &str) -> Result<Direction> {
        let outcome = self.selection.select_sort(&self.sort_options, label)?;
        let direction = outcome.direction();
        self.events.publish(&PipelineEvent::SortChanged {
            key: label.to_string(),
            direction,
        });
        Ok(direction)
    }

    /// Picks a filter option by label, or shows all items with `None`.
    /// Returns whether the active filter changed.
    pub fn select_filter(&mut self, label: Option<&str>) -> Result<bool> {
        let changed = self.selection.select_filter(&self.filter_options, label)?;
        if changed {
            self.events.publish(&PipelineEvent::FilterChanged {
                label: label.map(str::to_string),
            });
        }
        Ok(changed)
    }

    /// Replaces the collection. The selection is kept.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        log::debug!("grid items replaced ({})", self.items.len());
        self.events.publish(&PipelineEvent::DataReplaced {
            len: self.items.len(),
        });
    }

    /// Filtered and sorted items.
    pub fn processed(&self) -> Result<Vec<&T>> {
        let filtered = filter(&self.items, self.selection.filter_spec(&self.filter_options))?;
        let spec = self.selection.sort_spec(&self.sort_options);
        sort(filtered, spec.as_ref())
    }

    /// Invokes `on_card_click` for the card at `index` of the processed items.
    pub fn click_card(&mut self, index: usize) -> Result<bool> {
        let GridPipeline {
            items,
            sort_options,
            filter_options,
            selection,
            on_card_click,
            ..
        } = self;
        let Some(callback) = on_card_click.as_mut() else {
            return Ok(false);
        };
        let filtered = filter(items.iter(), selection.filter_spec(filter_options.as_slice()))?;
        let spec = selection.sort_spec(sort_options.as_slice());
        let processed = sort(filtered, spec.as_ref())?;
        match processed.get(index) {
            Some(&item) => {
                callback(item);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Runs the pipeline.
    pub fn render(&self) -> Result<GridFrame<'_, T>> {
        let items = self.processed()?;

        let active_sort = self
            .selection
            .active_sort()
            .and_then(|s| self.sort_options.get(s.index))
            .map(|spec| spec.label());
        let active_filter = self
            .selection
            .filter_spec(&self.filter_options)
            .map(|spec| spec.label());

        let heading = match active_filter {
            Some(label) => format!("{} ({})", label, items.len()),
            None => format!("{} ({})", ALL_ITEMS, self.items.len()),
        };

        log::trace!("grid render: {} of {} items", items.len(), self.items.len());

        Ok(GridFrame {
            heading,
            toolbar_visible: !self.sort_options.is_empty() || !self.filter_options.is_empty(),
            sort_button: active_sort.map_or_else(|| "Sort".to_string(), |l| format!("Sort: {l}")),
            filter_button: active_filter.unwrap_or("Filter").to_string(),
            sort_options: self.sort_options.iter().map(|s| s.label()).collect(),
            filter_options: self.filter_options.iter().map(|f| f.label()).collect(),
            active_sort,
            sort_direction: self.selection.sort_direction(),
            active_filter,
            total_items: self.items.len(),
            items,
        })
    }
}

impl<T> std::fmt::Debug for GridPipeline<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridPipeline")
            .field("items", &self.items.len())
            .field("sort_options", &self.sort_options)
            .field("filter_options", &self.filter_options)
            .field("selection", &self.selection)
            .field("events", &self.events)
            .finish()
    }
}
