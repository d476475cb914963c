//! Virtualization window over uniformly sized rows.
//!
//! Given a viewport height, a row height and a scroll offset, the window
//! picks the contiguous range of rows that is on screen (plus `overscan` rows
//! either side) and reports how much vertical space the skipped rows occupy:
//!
//! ```text
//! padding_top + materialized rows + padding_bottom == total_rows * row_height
//! ```
//!
//! Work per render is bounded by the visible row count plus twice the
//! overscan, whatever the number of rows.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Default estimated row height, in pixels.
pub const DEFAULT_ROW_HEIGHT: u64 = 48;

/// Default viewport height, in pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: u64 = 400;

/// Default number of extra rows rendered on each side.
pub const DEFAULT_OVERSCAN: usize = 10;

/// Geometry of a virtualized viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Estimated height of every row.
    pub row_height: u64,
    /// Height of the scrollable viewport.
    pub viewport_height: u64,
    /// Rows rendered beyond each edge of the visible range.
    pub overscan: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            row_height: DEFAULT_ROW_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl WindowConfig {
    /// Creates a config with the default overscan.
    pub fn new(row_height: u64, viewport_height: u64) -> Self {
        WindowConfig {
            row_height,
            viewport_height,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    /// Sets the overscan.
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Rejects a zero row height.
    pub fn validate(&self) -> Result<()> {
        if self.row_height == 0 {
            return Err(PipelineError::invalid("row height must be greater than zero"));
        }
        Ok(())
    }

    /// Rows intersecting the viewport, without overscan.
    ///
    /// The first row is the one under `scroll_offset` (clamped to the last
    /// row); the range always holds at least that row when there are rows.
    pub fn visible_range(&self, total_rows: usize, scroll_offset: u64) -> Result<Range<usize>> {
        self.validate()?;
        if total_rows == 0 {
            return Ok(0..0);
        }

        let last = total_rows - 1;
        let start = to_index(scroll_offset / self.row_height).min(last);
        let bottom = scroll_offset.saturating_add(self.viewport_height);
        let end = to_index(bottom.div_ceil(self.row_height).saturating_sub(1))
            .max(start)
            .min(last);
        Ok(start..end + 1)
    }

    /// Rows to materialize: the visible range widened by the overscan.
    pub fn render_range(&self, total_rows: usize, scroll_offset: u64) -> Result<Range<usize>> {
        let visible = self.visible_range(total_rows, scroll_offset)?;
        if visible.is_empty() {
            return Ok(visible);
        }
        let start = visible.start.saturating_sub(self.overscan);
        let end = visible.end.saturating_add(self.overscan).min(total_rows);
        Ok(start..end)
    }

    /// Computes the window for `total_rows` rows scrolled to `scroll_offset`.
    ///
    /// ```
    /// use vitrine_core::WindowConfig;
    ///
    /// let config = WindowConfig::new(48, 400).with_overscan(2);
    /// let window = config.compute(1000, 4800).unwrap();
    ///
    /// assert_eq!(window.range(), 98..111);
    /// assert_eq!(window.padding_top, 98 * 48);
    /// assert_eq!(
    ///     window.padding_top + window.materialized_height() + window.padding_bottom,
    ///     1000 * 48
    /// );
    /// ```
    pub fn compute(&self, total_rows: usize, scroll_offset: u64) -> Result<Window> {
        let range = self.render_range(total_rows, scroll_offset)?;
        let total_size = pixels(total_rows, self.row_height);
        if range.is_empty() {
            return Ok(Window {
                total_size,
                ..Window::default()
            });
        }

        let rows: Vec<VirtualRow> = range
            .clone()
            .map(|index| VirtualRow {
                index,
                offset_top: pixels(index, self.row_height),
                height: self.row_height,
            })
            .collect();

        let padding_top = pixels(range.start, self.row_height);
        let padding_bottom = total_size - pixels(range.end, self.row_height);
        log::trace!(
            "window rows {}..{} of {} (scroll {}, viewport {})",
            range.start,
            range.end,
            total_rows,
            scroll_offset,
            self.viewport_height
        );

        Ok(Window {
            rows,
            padding_top,
            padding_bottom,
            total_size,
        })
    }
}

fn to_index(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

fn pixels(rows: usize, row_height: u64) -> u64 {
    (rows as u64).saturating_mul(row_height)
}

/// One materialized row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VirtualRow {
    /// Index of the row within the windowed sequence.
    pub index: usize,
    /// Distance from the top of the content to the row's top edge.
    pub offset_top: u64,
    pub height: u64,
}

impl VirtualRow {
    /// Bottom edge of the row.
    pub fn end(&self) -> u64 {
        self.offset_top + self.height
    }
}

/// Result of a window computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Window {
    /// Rows to materialize, in order.
    pub rows: Vec<VirtualRow>,
    /// Height of all skipped rows above the first materialized row.
    pub padding_top: u64,
    /// Height of all skipped rows below the last materialized row.
    pub padding_bottom: u64,
    /// Height of all rows.
    pub total_size: u64,
}

impl Window {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index range of the materialized rows.
    pub fn range(&self) -> Range<usize> {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => first.index..last.index + 1,
            _ => 0..0,
        }
    }

    /// Combined height of the materialized rows.
    pub fn materialized_height(&self) -> u64 {
        self.rows.iter().map(|row| row.height).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_row_height_is_rejected() {
        let config = WindowConfig::new(0, 400);
        assert!(matches!(
            config.compute(10, 0),
            Err(PipelineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn empty_rows_give_empty_window() {
        let window = WindowConfig::default().compute(0, 0).unwrap();
        assert!(window.is_empty());
        assert_eq!(window.padding_top, 0);
        assert_eq!(window.padding_bottom, 0);
        assert_eq!(window.total_size, 0);
    }

    #[test]
    fn small_page_is_fully_materialized() {
        // 10 rows of 48px in a 400px viewport: 9 visible, overscan covers the rest.
        let window = WindowConfig::default().compute(10, 0).unwrap();
        assert_eq!(window.range(), 0..10);
        assert_eq!(window.padding_top, 0);
        assert_eq!(window.padding_bottom, 0);
        assert_eq!(window.total_size, 480);
    }

    #[test]
    fn visible_range_at_top() {
        let config = WindowConfig::new(48, 400).with_overscan(0);
        // ceil(400 / 48) = 9 rows touch the viewport
        assert_eq!(config.visible_range(100, 0).unwrap(), 0..9);
        assert_eq!(config.render_range(100, 0).unwrap(), 0..9);
    }

    #[test]
    fn visible_range_mid_scroll() {
        let config = WindowConfig::new(10, 30).with_overscan(1);
        // Scroll 25: rows 2 (20..30), 3, 4, 5 (50..60) intersect 25..55
        assert_eq!(config.visible_range(100, 25).unwrap(), 2..6);
        assert_eq!(config.render_range(100, 25).unwrap(), 1..7);
    }

    #[test]
    fn scroll_past_end_clamps_to_last_row() {
        let config = WindowConfig::new(10, 30).with_overscan(2);
        assert_eq!(config.visible_range(5, 1000).unwrap(), 4..5);
        assert_eq!(config.render_range(5, 1000).unwrap(), 2..5);
    }

    #[test]
    fn zero_viewport_still_holds_the_row_under_offset() {
        let config = WindowConfig::new(10, 0).with_overscan(0);
        assert_eq!(config.visible_range(5, 20).unwrap(), 2..3);
    }

    #[test]
    fn row_offsets_are_contiguous() {
        let window = WindowConfig::new(48, 400)
            .with_overscan(3)
            .compute(500, 10_000)
            .unwrap();
        for pair in window.rows.windows(2) {
            assert_eq!(pair[0].end(), pair[1].offset_top);
            assert_eq!(pair[0].index + 1, pair[1].index);
        }
        assert_eq!(window.rows[0].offset_top, window.padding_top);
    }

    #[test]
    fn geometry_is_preserved() {
        let config = WindowConfig::new(48, 400).with_overscan(10);
        for (total, scroll) in [(1, 0), (37, 500), (1000, 0), (1000, 47_999), (1000, 99_999)] {
            let window = config.compute(total, scroll).unwrap();
            assert_eq!(
                window.padding_top + window.materialized_height() + window.padding_bottom,
                total as u64 * 48
            );
        }
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: WindowConfig = serde_json::from_str(r#"{"overscan": 3}"#).unwrap();
        assert_eq!(config.row_height, DEFAULT_ROW_HEIGHT);
        assert_eq!(config.viewport_height, DEFAULT_VIEWPORT_HEIGHT);
        assert_eq!(config.overscan, 3);
    }
}
