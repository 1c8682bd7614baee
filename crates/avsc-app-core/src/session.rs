// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Schema session: the current graph, its search index, and the surface
//! drawing it.
//!
//! Opening a schema replaces the previous graph and index wholesale. The
//! surface is created on the first open and updated in place afterwards.

use avsc_graph::{
    transform_with, GraphModel, NodeId, SchemaRoot, SearchError, SearchIndex, StylePolicy,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::render_options::RenderOptions;
use crate::render_port::{GraphSurface, RenderPort};

/// Session failure.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Highlight requested before any schema was opened.
    #[error("no schema loaded")]
    NoSchemaLoaded,
    /// The query could not be compiled.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Counts reported after opening a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSummary {
    /// Nodes in the new graph.
    pub nodes: usize,
    /// Edges in the new graph.
    pub edges: usize,
}

struct Loaded<S> {
    graph: GraphModel,
    index: SearchIndex,
    surface: S,
}

/// Holds the open schema and drives its surface.
pub struct SchemaSession<P: RenderPort> {
    port: P,
    style: StylePolicy,
    options: RenderOptions,
    loaded: Option<Loaded<P::Surface>>,
}

impl<P: RenderPort> SchemaSession<P> {
    /// New session with nothing loaded.
    pub fn new(port: P, style: StylePolicy, options: RenderOptions) -> Self {
        Self {
            port,
            style,
            options,
            loaded: None,
        }
    }

    /// Transform `schema` and show it, discarding whatever was open before.
    pub fn open(&mut self, schema: &SchemaRoot, max_depth: Option<u32>) -> OpenSummary {
        let (graph, index) = transform_with(schema, max_depth, &self.style);
        let summary = OpenSummary {
            nodes: graph.nodes.len(),
            edges: graph.edges.len(),
        };

        let surface = match self.loaded.take() {
            Some(Loaded { mut surface, .. }) => {
                debug!("updating existing surface");
                surface.set_options(&self.options);
                surface.set_data(&graph);
                surface
            }
            None => {
                debug!("creating surface");
                self.port.create_surface(&graph, &self.options)
            }
        };
        self.loaded = Some(Loaded {
            graph,
            index,
            surface,
        });

        info!(nodes = summary.nodes, edges = summary.edges, "schema opened");
        summary
    }

    /// Search the open schema and highlight the matches on the surface.
    pub fn highlight<A: AsRef<str>>(
        &mut self,
        query: &str,
        attributes: &[A],
    ) -> Result<Vec<NodeId>, SessionError> {
        let loaded = self.loaded.as_mut().ok_or(SessionError::NoSchemaLoaded)?;
        let ids = loaded.index.search(query, attributes)?;
        debug!(query, matches = ids.len(), "highlight");
        loaded.surface.select_nodes(&ids);
        Ok(ids)
    }

    /// Graph of the open schema.
    pub fn graph(&self) -> Option<&GraphModel> {
        self.loaded.as_ref().map(|l| &l.graph)
    }

    /// Search index of the open schema.
    pub fn index(&self) -> Option<&SearchIndex> {
        self.loaded.as_ref().map(|l| &l.index)
    }

    /// Surface drawing the open schema.
    pub fn surface(&self) -> Option<&P::Surface> {
        self.loaded.as_ref().map(|l| &l.surface)
    }

    /// Render options applied on every open.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Replace the render options; takes effect on the next open.
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }
}
