//! Table options.
//!
//! Options deserialize from JSON or YAML with every field optional:
//!
//! ```yaml
//! page_size: 25
//! height: 600
//! row_height: 40
//! overscan: 5
//! ```

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use vitrine_core::{
    PipelineError, Result, WindowConfig, DEFAULT_OVERSCAN, DEFAULT_PAGE_SIZE, DEFAULT_ROW_HEIGHT,
    DEFAULT_VIEWPORT_HEIGHT,
};

/// Sizing options for a [`TablePipeline`](crate::TablePipeline).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Rows per page.
    pub page_size: NonZeroUsize,
    /// Viewport height of the scrollable body, in pixels.
    pub height: u64,
    /// Estimated height of one row, in pixels.
    pub row_height: u64,
    /// Extra rows materialized above and below the viewport.
    pub overscan: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            page_size: DEFAULT_PAGE_SIZE,
            height: DEFAULT_VIEWPORT_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
        }
    }
}

impl TableOptions {
    /// Parses and validates options from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: TableOptions =
            serde_json::from_str(json).map_err(|e| PipelineError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Parses and validates options from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let options: TableOptions =
            serde_yaml::from_str(yaml).map_err(|e| PipelineError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Sets the page size, rejecting zero.
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self> {
        self.page_size = vitrine_core::page_size(page_size)?;
        Ok(self)
    }

    pub fn with_height(mut self, height: u64) -> Self {
        self.height = height;
        self
    }

    pub fn with_row_height(mut self, row_height: u64) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.window_config().validate()
    }

    /// Window geometry for these options.
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig::new(self.row_height, self.height).with_overscan(self.overscan)
    }
}
