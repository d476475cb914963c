//! Plain-text renderer.
//!
//! Renders frames as fixed-width text, measuring cells by display width so
//! wide characters line up. Useful in terminals and in tests.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vitrine_core::Item;

use crate::grid::GridFrame;
use crate::render::{CardRenderer, GridView, TableView};
use crate::table::TableFrame;

/// Text shown for an empty table body or grid.
pub const NO_ITEMS: &str = "No items found";

/// Fixed-width text renderer for tables and grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    /// Spaces between columns.
    pub gap: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        TextRenderer { gap: 2 }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    fn join_cells(&self, cells: &[String], widths: &[usize]) -> String {
        let gap = " ".repeat(self.gap);
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| pad_to_width(&truncate_to_width(cell, width), width))
            .collect();
        padded.join(&gap).trim_end().to_string()
    }
}

impl<T: Item> TableView<T> for TextRenderer {
    type Output = String;

    fn render_table(&self, frame: &TableFrame<'_, T>) -> String {
        let rows: Vec<Vec<String>> = frame
            .visible_rows()
            .iter()
            .map(|row| frame.columns.iter().map(|c| c.cell_text(row.item)).collect())
            .collect();

        let titles: Vec<String> = frame
            .headers
            .iter()
            .map(|h| match h.indicator() {
                "" => h.title.to_string(),
                arrow => format!("{} {}", h.title, arrow),
            })
            .collect();

        let widths: Vec<usize> = frame
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                header.width.unwrap_or_else(|| {
                    rows.iter()
                        .map(|cells| cells[i].width())
                        .chain(std::iter::once(titles[i].width()))
                        .max()
                        .unwrap_or(0)
                })
            })
            .collect();

        let mut lines = vec![self.join_cells(&titles, &widths)];
        let rule_width = widths.iter().sum::<usize>() + self.gap * widths.len().saturating_sub(1);
        lines.push("-".repeat(rule_width));

        match (frame.visible_rows().first(), frame.visible_rows().last()) {
            (Some(first), Some(last)) => {
                if first.index > 0 {
                    lines.push(format!("({} rows above)", first.index));
                }
                for cells in &rows {
                    lines.push(self.join_cells(cells, &widths));
                }
                let below = frame.page_len.saturating_sub(last.index + 1);
                if below > 0 {
                    lines.push(format!("({} rows below)", below));
                }
            }
            _ => lines.push(NO_ITEMS.to_string()),
        }

        if frame.shows_controls {
            lines.push(String::new());
            let prev = if frame.can_previous { "<" } else { " " };
            let next = if frame.can_next { ">" } else { " " };
            lines.push(format!("{} {} {}", prev, frame.page_label, next).trim().to_string());
        }

        lines.join("\n")
    }
}

impl<T> GridView<T> for TextRenderer {
    type Card = String;
    type Output = String;

    fn render_grid(
        &self,
        frame: &GridFrame<'_, T>,
        cards: &dyn CardRenderer<T, Output = String>,
    ) -> String {
        let mut lines = Vec::new();

        if frame.toolbar_visible {
            let mut toolbar = vec![frame.heading.clone()];
            if !frame.filter_options.is_empty() {
                toolbar.push(format!("[{}]", frame.filter_button));
            }
            if !frame.sort_options.is_empty() {
                let arrow = match frame.sort_direction {
                    Some(direction) if direction.is_asc() => " ▲",
                    Some(_) => " ▼",
                    None => "",
                };
                toolbar.push(format!("[{}{}]", frame.sort_button, arrow));
            }
            lines.push(toolbar.join(" "));
        }

        if frame.is_empty() {
            lines.push(NO_ITEMS.to_string());
        }
        for item in &frame.items {
            let card = cards.render_card(item);
            let sections: Vec<String> = card
                .header
                .into_iter()
                .chain(std::iter::once(card.content))
                .chain(card.footer)
                .collect();
            lines.push(format!("- {}", sections.join(" | ")));
        }

        lines.join("\n")
    }
}

/// Truncates to a display width, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if current + w > limit {
            break;
        }
        result.push(c);
        current += w;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}

/// Right-pads with spaces to a display width.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let missing = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(missing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_fits_unchanged() {
        assert_eq!(truncate_to_width("hello", 5), "hello");
        assert_eq!(truncate_to_width("", 3), "");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
        assert_eq!(truncate_to_width("abc", 1), "…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn truncate_respects_wide_chars() {
        // each CJK char is two columns wide
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }

    #[test]
    fn pad_uses_display_width() {
        assert_eq!(pad_to_width("日本", 6), "日本  ");
        assert_eq!(pad_to_width("toolong", 3), "toolong");
    }
}
