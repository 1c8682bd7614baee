// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Style handed to the renderer with every graph (edges + node colors).

use serde::{Deserialize, Serialize};

/// Full render style applied on surface creation and on every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RenderOptions {
    /// Edge styling.
    pub edges: EdgeOptions,
    /// Node coloring.
    pub nodes: NodeOptions,
}

/// Edge line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// Plain line.
    Line,
    /// Line with an arrow head at the child.
    #[default]
    Arrow,
}

/// Edge styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeOptions {
    /// Line style.
    pub style: EdgeStyle,
    /// Color of edges touching a selected node.
    pub highlight_color: String,
    /// Width multiplier for selected edges.
    pub width_selection_multiplier: u32,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            style: EdgeStyle::Arrow,
            highlight_color: "green".into(),
            width_selection_multiplier: 3,
        }
    }
}

/// Node fill/border colors, normal and highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeOptions {
    /// Fill.
    pub background: String,
    /// Outline.
    pub border: String,
    /// Fill of highlighted nodes.
    pub highlight_background: String,
    /// Outline of highlighted nodes.
    pub highlight_border: String,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            background: "#97C2FC".into(),
            border: "#2B7CE9".into(),
            highlight_background: "yellow".into(),
            highlight_border: "#2B7CE9".into(),
        }
    }
}
