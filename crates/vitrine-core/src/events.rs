//! Change notifications emitted by the pipelines.

use serde::Serialize;

use crate::paginate::PageChange;
use crate::sort::Direction;

/// A committed state transition.
///
/// Events are published after the state changed, never for no-op
/// transitions (re-selecting the current page, clearing an absent sort).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    PageChanged { from: usize, to: usize },
    SortChanged { key: String, direction: Direction },
    SortCleared,
    FilterChanged { label: Option<String> },
    DataReplaced { len: usize },
    ViewportChanged { scroll_offset: u64, viewport_height: u64 },
}

impl From<PageChange> for PipelineEvent {
    fn from(change: PageChange) -> Self {
        PipelineEvent::PageChanged {
            from: change.from,
            to: change.to,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&PipelineEvent) + Send>;

/// Synchronous fan-out of [`PipelineEvent`]s to subscribers, in
/// subscription order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&PipelineEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn publish(&mut self, event: &PipelineEvent) {
        log::trace!("publishing {:?} to {} subscriber(s)", event, self.subscribers.len());
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
