//! Renderer collaborators.
//!
//! The pipelines produce frames; turning a frame into output (markup, terminal
//! text, widgets) is the job of the types in this module. The pipelines never
//! look at what a renderer returns.

use crate::grid::GridFrame;
use crate::table::TableFrame;

/// Renders one cell of a column.
///
/// Any `Fn(&T) -> String` is a cell renderer.
pub trait CellRenderer<T>: Send + Sync {
    fn render_cell(&self, item: &T) -> String;
}

impl<T, F> CellRenderer<T> for F
where
    F: Fn(&T) -> String + Send + Sync,
{
    fn render_cell(&self, item: &T) -> String {
        self(item)
    }
}

/// Renders the sections of a grid card.
///
/// Only the content is required; header and footer default to nothing.
pub trait CardRenderer<T> {
    type Output;

    fn render_header(&self, _item: &T) -> Option<Self::Output> {
        None
    }

    fn render_content(&self, item: &T) -> Self::Output;

    fn render_footer(&self, _item: &T) -> Option<Self::Output> {
        None
    }

    /// Renders all sections of one card.
    fn render_card(&self, item: &T) -> RenderedCard<Self::Output> {
        RenderedCard {
            header: self.render_header(item),
            content: self.render_content(item),
            footer: self.render_footer(item),
        }
    }
}

/// The rendered sections of one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard<O> {
    pub header: Option<O>,
    pub content: O,
    pub footer: Option<O>,
}

/// Consumes table frames.
pub trait TableView<T> {
    type Output;

    fn render_table(&self, frame: &TableFrame<'_, T>) -> Self::Output;
}

/// Consumes grid frames, rendering each card with a [`CardRenderer`].
pub trait GridView<T> {
    /// What the card renderer produces per section.
    type Card;
    type Output;

    fn render_grid(
        &self,
        frame: &GridFrame<'_, T>,
        cards: &dyn CardRenderer<T, Output = Self::Card>,
    ) -> Self::Output;
}
