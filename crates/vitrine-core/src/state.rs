//! Pipeline state and its transitions.
//!
//! [`PipelineState`] is the paged flavour used by tables: page, page size,
//! one active sort and one active filter. [`Selection`] is the card grid's
//! sort/filter selection machine, which picks among caller-registered
//! options by label.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::error::{PipelineError, Result};
use crate::filter::{filter, FilterSpec};
use crate::item::Item;
use crate::paginate::{PageChange, Pagination};
use crate::sort::{sort, Direction, SortSpec};

/// State owned by a paged view.
///
/// Only the transition methods mutate it; processing borrows it immutably, so
/// running the pipeline twice over the same items gives identical output.
pub struct PipelineState<T> {
    pagination: Pagination,
    active_sort: Option<SortSpec<T>>,
    active_filter: Option<FilterSpec<T>>,
}

impl<T> PipelineState<T> {
    /// Starts on the first page with no sort and no filter.
    pub fn new(page_size: NonZeroUsize) -> Self {
        PipelineState {
            pagination: Pagination::with_page_size(page_size),
            active_sort: None,
            active_filter: None,
        }
    }

    /// Sets the initial sort.
    pub fn with_sort(mut self, spec: SortSpec<T>) -> Self {
        self.active_sort = Some(spec);
        self
    }

    /// Sets the initial filter.
    pub fn with_filter(mut self, spec: FilterSpec<T>) -> Self {
        self.active_filter = Some(spec);
        self
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.pagination.page_size()
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Mutable access for navigation (`next_page`, `last_page`, ...).
    pub fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    pub fn active_sort(&self) -> Option<&SortSpec<T>> {
        self.active_sort.as_ref()
    }

    pub fn active_filter(&self) -> Option<&FilterSpec<T>> {
        self.active_filter.as_ref()
    }

    /// Moves to page `n`, clamped against `count` processed items.
    pub fn set_page(&mut self, n: usize, count: usize) -> Option<PageChange> {
        self.pagination.goto_page(n, count)
    }

    /// Replaces the active sort. Returns the previous one.
    pub fn set_sort(&mut self, spec: Option<SortSpec<T>>) -> Option<SortSpec<T>> {
        std::mem::replace(&mut self.active_sort, spec)
    }

    /// Replaces the active filter. Returns the previous one.
    pub fn set_filter(&mut self, spec: Option<FilterSpec<T>>) -> Option<FilterSpec<T>> {
        std::mem::replace(&mut self.active_filter, spec)
    }

    /// Flips the direction of the active sort, if any, and returns the new one.
    pub fn toggle_sort_direction(&mut self) -> Option<Direction> {
        let spec = self.active_sort.take()?;
        let direction = spec.direction().toggled();
        self.active_sort = Some(spec.with_direction(direction));
        Some(direction)
    }
}

impl<T: Item> PipelineState<T> {
    /// Filters then sorts `items`.
    pub fn process<'a>(&self, items: &'a [T]) -> Result<Vec<&'a T>> {
        let filtered = filter(items, self.active_filter.as_ref())?;
        sort(filtered, self.active_sort.as_ref())
    }

    /// Processes `items` and returns the current page of the result, together
    /// with the processed count.
    pub fn current_page_of<'a>(&self, items: &'a [T]) -> Result<(Vec<&'a T>, usize)> {
        let mut processed = self.process(items)?;
        let count = processed.len();
        let range = self.pagination.range(count);
        processed.truncate(range.end);
        processed.drain(..range.start);
        Ok((processed, count))
    }
}

impl<T> Clone for PipelineState<T> {
    fn clone(&self) -> Self {
        PipelineState {
            pagination: self.pagination,
            active_sort: self.active_sort.clone(),
            active_filter: self.active_filter.clone(),
        }
    }
}

impl<T> std::fmt::Debug for PipelineState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineState")
            .field("pagination", &self.pagination)
            .field("active_sort", &self.active_sort)
            .field("active_filter", &self.active_filter)
            .finish()
    }
}

/// The active sort option of a [`Selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveSort {
    /// Index into the sort options.
    pub index: usize,
    pub direction: Direction,
}

/// Outcome of [`Selection::select_sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortSelection {
    /// The already active option was picked again; its direction flipped.
    Toggled(Direction),
    /// A different option became active with its own default direction.
    Replaced(Direction),
}

impl SortSelection {
    pub fn direction(self) -> Direction {
        match self {
            SortSelection::Toggled(d) | SortSelection::Replaced(d) => d,
        }
    }
}

/// Sort/filter selection over labelled options.
///
/// - Selecting the active sort option again flips its direction; selecting
///   another option replaces it, starting from that option's direction.
/// - Selecting a filter replaces the active filter; `None` means all items.
/// - Neither transition touches the other axis.
///
/// ```
/// use vitrine_core::{Direction, Record, Selection, SortSpec};
///
/// let options: Vec<SortSpec<Record>> = vec![
///     SortSpec::by_field("Price", "price"),
///     SortSpec::by_field("Rating", "rating").descending(),
/// ];
/// let mut selection = Selection::initial(&options);
/// assert_eq!(selection.sort_direction(), Some(Direction::Asc));
///
/// selection.select_sort(&options, "Price").unwrap();
/// assert_eq!(selection.sort_direction(), Some(Direction::Desc));
///
/// selection.select_sort(&options, "Rating").unwrap();
/// assert_eq!(selection.sort_direction(), Some(Direction::Desc));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    sort: Option<ActiveSort>,
    filter: Option<usize>,
}

impl Selection {
    /// First sort option active (if any), no filter.
    pub fn initial<T>(sort_options: &[SortSpec<T>]) -> Self {
        Selection {
            sort: sort_options.first().map(|spec| ActiveSort {
                index: 0,
                direction: spec.direction(),
            }),
            filter: None,
        }
    }

    pub fn active_sort(&self) -> Option<ActiveSort> {
        self.sort
    }

    pub fn active_filter(&self) -> Option<usize> {
        self.filter
    }

    pub fn sort_direction(&self) -> Option<Direction> {
        self.sort.map(|s| s.direction)
    }

    /// Selects a sort option by label.
    pub fn select_sort<T>(&mut self, options: &[SortSpec<T>], label: &str) -> Result<SortSelection> {
        let index = options
            .iter()
            .position(|spec| spec.label() == label)
            .ok_or_else(|| unknown("sort", label))?;

        let outcome = match self.sort {
            Some(active) if options[active.index].label() == label => {
                SortSelection::Toggled(active.direction.toggled())
            }
            _ => SortSelection::Replaced(options[index].direction()),
        };
        let index = match (self.sort, outcome) {
            (Some(active), SortSelection::Toggled(_)) => active.index,
            _ => index,
        };
        self.sort = Some(ActiveSort {
            index,
            direction: outcome.direction(),
        });
        log::debug!("sort '{}' selected ({:?})", label, outcome);
        Ok(outcome)
    }

    /// Selects a filter by label, or clears it with `None`.
    ///
    /// Returns `true` when the active filter changed.
    pub fn select_filter<T>(&mut self, options: &[FilterSpec<T>], label: Option<&str>) -> Result<bool> {
        let next = match label {
            None => None,
            Some(label) => Some(
                options
                    .iter()
                    .position(|spec| spec.label() == label)
                    .ok_or_else(|| unknown("filter", label))?,
            ),
        };
        if next == self.filter {
            return Ok(false);
        }
        self.filter = next;
        log::debug!("filter selected: {:?}", label);
        Ok(true)
    }

    /// The active sort option with the selected direction applied.
    pub fn sort_spec<T>(&self, options: &[SortSpec<T>]) -> Option<SortSpec<T>> {
        let active = self.sort?;
        options
            .get(active.index)
            .map(|spec| spec.clone().with_direction(active.direction))
    }

    /// The active filter option.
    pub fn filter_spec<'o, T>(&self, options: &'o [FilterSpec<T>]) -> Option<&'o FilterSpec<T>> {
        options.get(self.filter?)
    }
}

fn unknown(kind: &'static str, label: &str) -> PipelineError {
    PipelineError::UnknownOption {
        kind,
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Record;
    use crate::paginate::page_size;
    use crate::value::Value;

    fn sort_options() -> Vec<SortSpec<Record>> {
        vec![
            SortSpec::by_field("Price: Low to High", "price"),
            SortSpec::by_field("Price: High to Low", "price").descending(),
            SortSpec::by_field("Rating", "rating").descending(),
        ]
    }

    fn filter_options() -> Vec<FilterSpec<Record>> {
        vec![
            FilterSpec::new("Featured", |r: &Record| r.field("featured") == Value::Bool(true)),
            FilterSpec::new("Books", |r: &Record| r.field("category") == Value::String("Books")),
        ]
    }

    #[test]
    fn initial_selection_uses_first_sort_option() {
        let selection = Selection::initial(&sort_options());
        assert_eq!(
            selection.active_sort(),
            Some(ActiveSort {
                index: 0,
                direction: Direction::Asc
            })
        );
        assert_eq!(selection.active_filter(), None);

        let empty: Vec<SortSpec<Record>> = Vec::new();
        assert_eq!(Selection::initial(&empty).active_sort(), None);
    }

    #[test]
    fn reselecting_cycles_direction() {
        let options = sort_options();
        let mut selection = Selection::initial(&options);

        let first = selection.select_sort(&options, "Price: Low to High").unwrap();
        assert_eq!(first, SortSelection::Toggled(Direction::Desc));
        let second = selection.select_sort(&options, "Price: Low to High").unwrap();
        assert_eq!(second, SortSelection::Toggled(Direction::Asc));
        let third = selection.select_sort(&options, "Price: Low to High").unwrap();
        assert_eq!(third, SortSelection::Toggled(Direction::Desc));
    }

    #[test]
    fn switching_uses_the_option_default_direction() {
        let options = sort_options();
        let mut selection = Selection::initial(&options);
        selection.select_sort(&options, "Price: Low to High").unwrap();

        let outcome = selection.select_sort(&options, "Rating").unwrap();
        assert_eq!(outcome, SortSelection::Replaced(Direction::Desc));
        assert_eq!(selection.active_sort().unwrap().index, 2);

        let back = selection.select_sort(&options, "Price: Low to High").unwrap();
        assert_eq!(back, SortSelection::Replaced(Direction::Asc));
    }

    #[test]
    fn axes_are_independent() {
        let sorts = sort_options();
        let filters = filter_options();
        let mut selection = Selection::initial(&sorts);

        selection.select_sort(&sorts, "Rating").unwrap();
        assert!(selection.select_filter(&filters, Some("Books")).unwrap());
        assert_eq!(selection.active_sort().unwrap().index, 2);

        selection.select_sort(&sorts, "Rating").unwrap();
        assert_eq!(selection.active_filter(), Some(1));
    }

    #[test]
    fn filter_selection_is_idempotent() {
        let filters = filter_options();
        let mut selection = Selection::default();
        assert!(selection.select_filter(&filters, Some("Featured")).unwrap());
        assert!(!selection.select_filter(&filters, Some("Featured")).unwrap());
        assert!(selection.select_filter(&filters, None).unwrap());
        assert!(!selection.select_filter(&filters, None).unwrap());
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let mut selection = Selection::default();
        assert!(matches!(
            selection.select_sort(&sort_options(), "Nope"),
            Err(PipelineError::UnknownOption { kind: "sort", .. })
        ));
        assert!(matches!(
            selection.select_filter(&filter_options(), Some("Nope")),
            Err(PipelineError::UnknownOption { kind: "filter", .. })
        ));
    }

    #[test]
    fn sort_spec_carries_selected_direction() {
        let options = sort_options();
        let mut selection = Selection::initial(&options);
        selection.select_sort(&options, "Price: Low to High").unwrap();
        let spec = selection.sort_spec(&options).unwrap();
        assert_eq!(spec.label(), "Price: Low to High");
        assert_eq!(spec.direction(), Direction::Desc);
    }

    #[test]
    fn state_processes_filter_then_sort_then_page() {
        let items: Vec<Record> = (0..7)
            .map(|i| Record::new(i).with("n", 10 - i).with("even", i % 2 == 0))
            .collect();
        let mut state = PipelineState::new(page_size(2).unwrap())
            .with_sort(SortSpec::by_field("N", "n"))
            .with_filter(FilterSpec::new("Even", |r: &Record| {
                r.field("even") == Value::Bool(true)
            }));

        // Even ids: 0, 2, 4, 6 -> n: 10, 8, 6, 4 -> ascending by n: 6, 4, 2, 0
        let (page, count) = state.current_page_of(&items).unwrap();
        assert_eq!(count, 4);
        let ids: Vec<_> = page.iter().map(|r| r.item_id().into_owned()).collect();
        assert_eq!(ids, ["6", "4"]);

        state.set_page(1, count);
        let (page, _) = state.current_page_of(&items).unwrap();
        let ids: Vec<_> = page.iter().map(|r| r.item_id().into_owned()).collect();
        assert_eq!(ids, ["2", "0"]);
    }

    #[test]
    fn toggle_sort_direction_without_sort_is_noop() {
        let mut state: PipelineState<Record> = PipelineState::new(page_size(5).unwrap());
        assert_eq!(state.toggle_sort_direction(), None);

        state.set_sort(Some(SortSpec::by_field("N", "n")));
        assert_eq!(state.toggle_sort_direction(), Some(Direction::Desc));
        assert_eq!(state.toggle_sort_direction(), Some(Direction::Asc));
    }
}
