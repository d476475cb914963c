//! Filter specifications and the filter engine.

use std::fmt;
use std::sync::Arc;

use crate::error::{CollaboratorError, Result};

/// A caller-supplied predicate over one item.
pub type PredicateFn<T> = dyn Fn(&T) -> std::result::Result<bool, CollaboratorError> + Send + Sync;

/// A labelled predicate restricting the visible collection.
///
/// Only one filter is active at a time. Selecting another filter replaces
/// the previous one; filters never compose.
pub struct FilterSpec<T> {
    label: String,
    predicate: Arc<PredicateFn<T>>,
}

impl<T> FilterSpec<T> {
    /// Creates a filter from an infallible predicate.
    pub fn new<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::try_new(label, move |item| Ok(predicate(item)))
    }

    /// Creates a filter from a predicate that may fail.
    pub fn try_new<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> std::result::Result<bool, CollaboratorError> + Send + Sync + 'static,
    {
        FilterSpec {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Returns the label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tests one item.
    pub fn matches(&self, item: &T) -> std::result::Result<bool, CollaboratorError> {
        (self.predicate)(item)
    }
}

impl<T> Clone for FilterSpec<T> {
    fn clone(&self) -> Self {
        FilterSpec {
            label: self.label.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for FilterSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSpec")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Keeps the items a filter accepts, in their original order.
///
/// Without a filter every item is kept. The first predicate failure aborts the
/// pass and is returned.
///
/// ```
/// use vitrine_core::{filter, FilterSpec, Item, Record, Value};
///
/// let items = vec![
///     Record::new(1).with("category", "Books"),
///     Record::new(2).with("category", "Toys"),
/// ];
/// let books = FilterSpec::new("Books", |r: &Record| r.field("category") == Value::String("Books"));
///
/// let kept = filter(&items, Some(&books)).unwrap();
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].item_id(), "1");
/// ```
pub fn filter<'a, T, I>(items: I, spec: Option<&FilterSpec<T>>) -> Result<Vec<&'a T>>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
{
    let Some(spec) = spec else {
        return Ok(items.into_iter().collect());
    };

    let mut kept = Vec::new();
    for item in items {
        if spec.matches(item)? {
            kept.push(item);
        }
    }
    log::trace!("filter '{}' kept {} items", spec.label(), kept.len());
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, Record};
    use crate::value::Value;
    use crate::PipelineError;

    fn catalog() -> Vec<Record> {
        vec![
            Record::new(1).with("category", "Toys").with("featured", true),
            Record::new(2).with("category", "Home").with("featured", false),
            Record::new(3).with("category", "Toys").with("featured", false),
            Record::new(4).with("category", "Food"),
        ]
    }

    #[test]
    fn no_spec_keeps_everything() {
        let items = catalog();
        assert_eq!(filter(&items, None).unwrap().len(), 4);
    }

    #[test]
    fn keeps_matches_in_order() {
        let items = catalog();
        let toys = FilterSpec::new("Toys", |r: &Record| r.field("category") == Value::String("Toys"));
        let kept: Vec<_> = filter(&items, Some(&toys))
            .unwrap()
            .iter()
            .map(|r| r.item_id().into_owned())
            .collect();
        assert_eq!(kept, ["1", "3"]);
    }

    #[test]
    fn no_matches_yields_empty() {
        let items = catalog();
        let books = FilterSpec::new("Books", |r: &Record| r.field("category") == Value::String("Books"));
        assert!(filter(&items, Some(&books)).unwrap().is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let items = catalog();
        let featured = FilterSpec::new("Featured", |r: &Record| r.field("featured") == Value::Bool(true));
        let once = filter(&items, Some(&featured)).unwrap();
        let twice = filter(once.iter().copied(), Some(&featured)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn failing_predicate_propagates() {
        let items = catalog();
        let broken = FilterSpec::try_new("Broken", |r: &Record| {
            if r.item_id() == "3" {
                Err(CollaboratorError::new("bad item"))
            } else {
                Ok(true)
            }
        });
        assert!(matches!(
            filter(&items, Some(&broken)),
            Err(PipelineError::CollaboratorFailure(_))
        ));
    }
}
