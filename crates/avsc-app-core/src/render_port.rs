// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port traits for whatever draws the graph, so sessions do not depend on a
//! specific rendering library.

use avsc_graph::{GraphModel, NodeId};

use crate::render_options::RenderOptions;

/// A live drawing of one graph. Updated in place when a new schema is opened.
pub trait GraphSurface {
    /// Re-apply render options.
    fn set_options(&mut self, options: &RenderOptions);
    /// Replace the drawn graph.
    fn set_data(&mut self, graph: &GraphModel);
    /// Highlight exactly `ids`; an empty slice clears highlighting.
    fn select_nodes(&mut self, ids: &[NodeId]);
}

/// Factory for surfaces; called once, on the first open.
pub trait RenderPort {
    /// Surface type produced by this port.
    type Surface: GraphSurface;

    /// Create a surface showing `graph` with `options`.
    fn create_surface(&mut self, graph: &GraphModel, options: &RenderOptions) -> Self::Surface;
}
