use crate::error::Result;
use gridpack::GridOptions;
use serde::{Deserialize, Serialize};

/// Visible size of the host's drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub cell_padding: f64,
    pub random_offset: f64,
    /// Queue transitions instead of moving nodes immediately.
    pub animated: bool,
    /// Seed for the jitter generator.
    pub seed: u64,
    /// Overrides the viewport width as the packed surface width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_height: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 270.0,
            node_height: 80.0,
            cell_padding: 40.0,
            random_offset: 20.0,
            animated: false,
            seed: 0,
            grid_width: None,
            grid_height: None,
        }
    }
}

impl LayoutConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn grid_options(&self, viewport: Viewport) -> GridOptions {
        GridOptions {
            node_width: self.node_width,
            node_height: self.node_height,
            cell_padding: self.cell_padding,
            random_offset: self.random_offset,
            grid_width: self.grid_width.unwrap_or(viewport.width),
            grid_height: self.grid_height.unwrap_or(viewport.height),
        }
    }
}
