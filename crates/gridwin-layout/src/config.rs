#![forbid(unsafe_code)]

//! Startup configuration.
//!
//! The initial panel list and the container/grid dimensions come from
//! external configuration; this module validates them and builds a
//! ready [`GridEngine`]. Where the configuration comes from (file,
//! embedding host) is the caller's concern.

use std::fmt;

use gridwin_core::geometry::{Frame, Vec2};
use gridwin_core::transform::{GridMetrics, GridMetricsError};
use serde::{Deserialize, Serialize};

use crate::engine::GridEngine;
use crate::store::{LayoutStore, LayoutStoreError};

/// Declarative layout: grid dimensions, container pixel size, and the
/// initial panel frames (grid units, display order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub rows: u16,
    pub cols: u16,
    pub container: Vec2,
    #[serde(default)]
    pub panels: Vec<Frame>,
}

impl LayoutConfig {
    /// The demo layout: five panels on a 32×32 grid over 512×512px.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            rows: 32,
            cols: 32,
            container: [512.0, 512.0],
            panels: vec![
                Frame::new(9.0, 4.0, 6.0, 4.0),
                Frame::new(2.0, 9.0, 13.0, 16.0),
                Frame::new(16.0, 2.0, 4.0, 4.0),
                Frame::new(16.0, 7.0, 14.0, 9.0),
                Frame::new(16.0, 17.0, 10.0, 13.0),
            ],
        }
    }

    /// Check the configuration without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let _ = GridMetrics::new(self.container, self.rows, self.cols)?;
        for (index, frame) in self.panels.iter().enumerate() {
            if frame.size[0] < 0.0 || frame.size[1] < 0.0 {
                return Err(ConfigError::NegativePanelSize {
                    index,
                    size: frame.size,
                });
            }
        }
        Ok(())
    }

    /// Validate and build a ready engine with the panels inserted in
    /// display order.
    pub fn build(&self) -> Result<GridEngine, ConfigError> {
        self.validate()?;
        let metrics = GridMetrics::new(self.container, self.rows, self.cols)?;
        let mut store = LayoutStore::new();
        for frame in &self.panels {
            let _ = store.insert(*frame)?;
        }
        gridwin_core::info!(
            rows = self.rows,
            cols = self.cols,
            panels = self.panels.len(),
            "layout configured"
        );
        Ok(GridEngine::new(metrics, store))
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::demo()
    }
}

/// Rejected configuration input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    Metrics(GridMetricsError),
    NegativePanelSize { index: usize, size: Vec2 },
    Store(LayoutStoreError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metrics(err) => write!(f, "{err}"),
            Self::NegativePanelSize { index, size } => write!(
                f,
                "panel {index} has negative size {}x{}",
                size[0], size[1]
            ),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Metrics(err) => Some(err),
            Self::NegativePanelSize { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<GridMetricsError> for ConfigError {
    fn from(err: GridMetricsError) -> Self {
        Self::Metrics(err)
    }
}

impl From<LayoutStoreError> for ConfigError {
    fn from(err: LayoutStoreError) -> Self {
        Self::Store(err)
    }
}
