//! Sort specifications and the sort engine.
//!
//! A [`SortSpec`] pairs a [`SortKey`] (a field name or a comparator) with a
//! [`Direction`]. It resolves to a single three-way comparison,
//! and [`sort`] applies it with a stable merge sort.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::compare::compare_field_values;
use crate::error::{CollaboratorError, Result};
use crate::item::Item;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending order (smallest first).
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Asc,
    /// Descending order (largest first).
    #[serde(rename = "desc", alias = "descending")]
    Desc,
}

impl Direction {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Direction::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Direction::Desc)
    }

    /// Returns the opposite direction.
    pub fn toggled(self) -> Direction {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Returns the short name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A caller-supplied three-way comparison between two items.
pub type CompareFn<T> = dyn Fn(&T, &T) -> std::result::Result<Ordering, CollaboratorError> + Send + Sync;

/// What a sort orders by.
pub enum SortKey<T> {
    /// Compare the named field with the three-tier field policy.
    ByField(String),
    /// Delegate to a comparator.
    ByComparator(Arc<CompareFn<T>>),
}

impl<T> Clone for SortKey<T> {
    fn clone(&self) -> Self {
        match self {
            SortKey::ByField(key) => SortKey::ByField(key.clone()),
            SortKey::ByComparator(f) => SortKey::ByComparator(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for SortKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::ByField(key) => f.debug_tuple("ByField").field(key).finish(),
            SortKey::ByComparator(_) => f.write_str("ByComparator(..)"),
        }
    }
}

/// A labelled sort rule with a direction.
///
/// ```
/// use vitrine_core::{sort, Direction, Item, Record, SortSpec};
///
/// let items = vec![
///     Record::new(1).with("price", 30),
///     Record::new(2).with("price", 10),
///     Record::new(3).with("price", 20),
/// ];
/// let spec = SortSpec::by_field("Price", "price");
///
/// let sorted = sort(items.iter().collect(), Some(&spec)).unwrap();
/// let ids: Vec<_> = sorted.iter().map(|r| r.item_id().into_owned()).collect();
/// assert_eq!(ids, ["2", "3", "1"]);
/// ```
pub struct SortSpec<T> {
    label: String,
    key: SortKey<T>,
    direction: Direction,
}

impl<T> SortSpec<T> {
    /// Sorts by a field using the three-tier field policy, ascending.
    pub fn by_field(label: impl Into<String>, key: impl Into<String>) -> Self {
        SortSpec {
            label: label.into(),
            key: SortKey::ByField(key.into()),
            direction: Direction::Asc,
        }
    }

    /// Sorts with an infallible comparator, ascending.
    pub fn by_comparator<F>(label: impl Into<String>, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::try_by_comparator(label, move |a, b| Ok(compare(a, b)))
    }

    /// Sorts with a comparator that may fail, ascending.
    pub fn try_by_comparator<F>(label: impl Into<String>, compare: F) -> Self
    where
        F: Fn(&T, &T) -> std::result::Result<Ordering, CollaboratorError> + Send + Sync + 'static,
    {
        SortSpec {
            label: label.into(),
            key: SortKey::ByComparator(Arc::new(compare)),
            direction: Direction::Asc,
        }
    }

    /// Builds a sort from an already constructed key.
    pub fn new(label: impl Into<String>, key: SortKey<T>, direction: Direction) -> Self {
        SortSpec {
            label: label.into(),
            key,
            direction,
        }
    }

    /// Sets the direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the direction to ascending.
    pub fn ascending(self) -> Self {
        self.with_direction(Direction::Asc)
    }

    /// Sets the direction to descending.
    pub fn descending(self) -> Self {
        self.with_direction(Direction::Desc)
    }

    /// Returns the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the key.
    pub fn key(&self) -> &SortKey<T> {
        &self.key
    }

    /// Returns the direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the field name for field-keyed specs.
    pub fn field(&self) -> Option<&str> {
        match &self.key {
            SortKey::ByField(key) => Some(key),
            SortKey::ByComparator(_) => None,
        }
    }
}

impl<T: Item> SortSpec<T> {
    /// Compares two items, direction applied.
    pub fn compare(&self, a: &T, b: &T) -> std::result::Result<Ordering, CollaboratorError> {
        let ordering = match &self.key {
            SortKey::ByField(key) => compare_field_values(&a.field(key), &b.field(key)),
            SortKey::ByComparator(compare) => compare(a, b)?,
        };
        Ok(self.direction.apply(ordering))
    }
}

impl<T> Clone for SortSpec<T> {
    fn clone(&self) -> Self {
        SortSpec {
            label: self.label.clone(),
            key: self.key.clone(),
            direction: self.direction,
        }
    }
}

impl<T> fmt::Debug for SortSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortSpec")
            .field("label", &self.label)
            .field("key", &self.key)
            .field("direction", &self.direction)
            .finish()
    }
}

/// Sorts item references by a spec.
///
/// Without a sort the input is returned untouched. The sort is stable: items
/// that compare equal keep their input order. A failing comparator aborts the
/// sort and its error is returned.
pub fn sort<'a, T: Item>(items: Vec<&'a T>, spec: Option<&SortSpec<T>>) -> Result<Vec<&'a T>> {
    let Some(spec) = spec else {
        return Ok(items);
    };

    let mut items = items;
    let mut scratch = Vec::with_capacity(items.len());
    merge_sort_by(&mut items, &mut scratch, &mut |a: &&T, b: &&T| spec.compare(a, b))?;
    log::trace!(
        "sorted {} items by '{}' ({})",
        items.len(),
        spec.label(),
        spec.direction()
    );
    Ok(items)
}

const INSERTION_THRESHOLD: usize = 16;

/// Stable merge sort with a fallible comparator.
///
/// Never panics on inconsistent comparators (mixed-type field tiers and NaN
/// are not total orders); the output is always a permutation of the input.
fn merge_sort_by<X, F, E>(items: &mut [X], scratch: &mut Vec<X>, compare: &mut F) -> std::result::Result<(), E>
where
    X: Copy,
    F: FnMut(&X, &X) -> std::result::Result<Ordering, E>,
{
    let len = items.len();
    if len <= INSERTION_THRESHOLD {
        for i in 1..len {
            let mut j = i;
            while j > 0 && compare(&items[j], &items[j - 1])? == Ordering::Less {
                items.swap(j, j - 1);
                j -= 1;
            }
        }
        return Ok(());
    }

    let mid = len / 2;
    merge_sort_by(&mut items[..mid], scratch, compare)?;
    merge_sort_by(&mut items[mid..], scratch, compare)?;

    scratch.clear();
    let (mut left, mut right) = (0, mid);
    while left < mid && right < len {
        // Take from the right run only when strictly smaller.
        if compare(&items[right], &items[left])? == Ordering::Less {
            scratch.push(items[right]);
            right += 1;
        } else {
            scratch.push(items[left]);
            left += 1;
        }
    }
    scratch.extend_from_slice(&items[left..mid]);
    scratch.extend_from_slice(&items[right..len]);
    items.copy_from_slice(scratch);
    Ok(())
}
