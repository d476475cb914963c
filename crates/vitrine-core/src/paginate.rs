//! Page slicing and page navigation.

use std::num::NonZeroUsize;
use std::ops::Range;

use serde::Serialize;

use crate::error::{PipelineError, Result};

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Validates a page size.
pub fn page_size(n: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(n).ok_or_else(|| PipelineError::invalid("page size must be greater than zero"))
}

/// Number of pages needed for `count` items.
///
/// Zero items need zero pages; callers display that as one empty page.
pub fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get())
}

/// Index range of a page, clipped to `count`.
pub fn page_range(count: usize, page: usize, page_size: NonZeroUsize) -> Range<usize> {
    let size = page_size.get();
    let start = page.saturating_mul(size).min(count);
    let end = start.saturating_add(size).min(count);
    start..end
}

/// Returns the half-open slice `[page * size, (page + 1) * size)` of `items`.
///
/// The last page may be short; a page past the end is empty.
///
/// ```
/// use vitrine_core::{paginate, page_size};
///
/// let items = [0, 1, 2, 3, 4];
/// let size = page_size(2).unwrap();
/// assert_eq!(paginate(&items, 0, size), &[0, 1]);
/// assert_eq!(paginate(&items, 2, size), &[4]);
/// assert!(paginate(&items, 3, size).is_empty());
/// ```
pub fn paginate<X>(items: &[X], page: usize, page_size: NonZeroUsize) -> &[X] {
    &items[page_range(items.len(), page, page_size)]
}

/// A committed page move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageChange {
    pub from: usize,
    pub to: usize,
}

/// Current page plus page size, with clamped navigation.
///
/// Every navigation method takes the current item count, clamps its target to
/// `[0, max(1, total_pages) - 1]`, and returns `None` when the page does not
/// actually change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: NonZeroUsize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            current_page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Creates pagination on the first page, rejecting a zero page size.
    pub fn new(page_size: usize) -> Result<Self> {
        Ok(Self::with_page_size(self::page_size(page_size)?))
    }

    /// Creates pagination on the first page.
    pub fn with_page_size(page_size: NonZeroUsize) -> Self {
        Pagination {
            current_page: 0,
            page_size,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn total_pages(&self, count: usize) -> usize {
        total_pages(count, self.page_size)
    }

    /// Last valid page index; zero for an empty collection.
    pub fn last_page_index(&self, count: usize) -> usize {
        self.total_pages(count).max(1) - 1
    }

    /// Moves to page `n`, clamped.
    pub fn goto_page(&mut self, n: usize, count: usize) -> Option<PageChange> {
        let target = n.min(self.last_page_index(count));
        if target == self.current_page {
            return None;
        }
        let change = PageChange {
            from: self.current_page,
            to: target,
        };
        self.current_page = target;
        Some(change)
    }

    pub fn first_page(&mut self, count: usize) -> Option<PageChange> {
        self.goto_page(0, count)
    }

    pub fn previous_page(&mut self, count: usize) -> Option<PageChange> {
        self.goto_page(self.current_page.saturating_sub(1), count)
    }

    pub fn next_page(&mut self, count: usize) -> Option<PageChange> {
        self.goto_page(self.current_page.saturating_add(1), count)
    }

    pub fn last_page(&mut self, count: usize) -> Option<PageChange> {
        self.goto_page(self.last_page_index(count), count)
    }

    /// Pulls the current page back into range after the count changed.
    pub fn clamp(&mut self, count: usize) -> Option<PageChange> {
        self.goto_page(self.current_page, count)
    }

    /// Changes the page size and re-clamps the current page.
    pub fn set_page_size(&mut self, page_size: NonZeroUsize, count: usize) -> Option<PageChange> {
        self.page_size = page_size;
        self.clamp(count)
    }

    pub fn can_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn can_next(&self, count: usize) -> bool {
        self.current_page < self.last_page_index(count)
    }

    /// Whether page controls are worth showing: more than one page.
    pub fn shows_controls(&self, count: usize) -> bool {
        self.total_pages(count) > 1
    }

    /// "Page X of Y", one-based, with an empty collection shown as page 1 of 1.
    pub fn page_label(&self, count: usize) -> String {
        format!(
            "Page {} of {}",
            self.current_page + 1,
            self.total_pages(count).max(1)
        )
    }

    /// Index range of the current page within a collection of `count` items.
    pub fn range(&self, count: usize) -> Range<usize> {
        page_range(count, self.current_page, self.page_size)
    }

    /// Slice of the current page.
    pub fn slice<'s, X>(&self, items: &'s [X]) -> &'s [X] {
        paginate(items, self.current_page, self.page_size)
    }
}
