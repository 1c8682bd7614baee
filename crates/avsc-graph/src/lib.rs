// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Avro schema → renderable graph.
//!
//! [`transform`] walks a decoded schema once and yields a flat [`GraphModel`]
//! (nodes + edges, decorated for display) plus a parallel [`SearchIndex`];
//! [`search`] answers regex queries against that index. Loading and drawing
//! live with the callers.

pub mod model;
pub mod schema;
pub mod search;
pub mod style;
pub mod transform;

pub use model::{
    GraphEdge, GraphModel, GraphNode, Hash32, ModelError, NodeId, NodeShape, SearchIndex,
    SearchRecord, ROOT_ID,
};
pub use schema::{
    load_schema, parse_schema, schema_from_value, FieldType, LoadError, SchemaField, SchemaRoot,
    TypeDefinition, TypeShape,
};
pub use search::{search, SearchError, SEARCHABLE_ATTRIBUTES};
pub use style::{StylePolicy, TypeTag, MAX_FONT_SIZE, MIN_FONT_SIZE};
pub use transform::{transform, transform_with};
