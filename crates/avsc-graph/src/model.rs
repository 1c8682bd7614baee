// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Renderer-agnostic graph and search index produced by the transform.
//! Pure data with deterministic serialization/hashing.

use blake3::Hash;
use ciborium::ser::into_writer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Node identifier, assigned `1..=N` in discovery order.
pub type NodeId = u64;
/// Blake3 hash of a canonical graph (32 bytes).
pub type Hash32 = [u8; 32];

/// Id of the schema root.
pub const ROOT_ID: NodeId = 1;

/// Node outline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    /// Schema root.
    Box,
    /// Field.
    Ellipse,
}

/// Renderable node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Node identifier.
    pub id: NodeId,
    /// Decorated display label.
    pub label: String,
    /// Outline.
    pub shape: NodeShape,
    /// Font size in points.
    pub font_size: u32,
    /// Font color name.
    pub font_color: String,
    /// HTML tooltip (`<br/>`-joined lines).
    pub title: String,
    /// Corner radius (root only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<u32>,
    /// Border width (root only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}

/// Parent → child edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphEdge {
    /// Parent node.
    pub from: NodeId,
    /// Child node.
    pub to: NodeId,
}

/// Failure to encode a graph canonically.
#[derive(Debug, Error)]
pub enum ModelError {
    /// CBOR encoding failed.
    #[error("canonical encode failed: {0}")]
    Encode(#[from] ciborium::ser::Error<std::io::Error>),
}

/// Nodes and edges describing a schema's structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GraphModel {
    /// Nodes in id order.
    pub nodes: Vec<GraphNode>,
    /// Edges in discovery order.
    pub edges: Vec<GraphEdge>,
}

impl GraphModel {
    /// Look up a node. Ids are dense, so this is an index.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        let idx = usize::try_from(id.checked_sub(1)?).ok()?;
        self.nodes.get(idx).filter(|n| n.id == id)
    }

    /// Direct children of `id`, in discovery order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter(move |e| e.from == id).map(|e| e.to)
    }

    /// Parent of `id` (`None` for the root or unknown ids).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.edges.iter().find(|e| e.to == id).map(|e| e.from)
    }

    /// Canonical CBOR encoding for hashing/comparison.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, ModelError> {
        let mut bytes = Vec::new();
        into_writer(self, &mut bytes)?;
        Ok(bytes)
    }

    /// Blake3 hash of the canonical form.
    pub fn compute_hash(&self) -> Result<Hash32, ModelError> {
        let h: Hash = blake3::hash(&self.to_canonical_bytes()?);
        Ok(h.into())
    }
}

/// Searchable text for one node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRecord {
    /// Node this record belongs to.
    pub id: NodeId,
    /// Raw field name (`""` when absent).
    pub name: String,
    /// Same text as the node title.
    pub description: String,
}

impl SearchRecord {
    /// Text of a searchable attribute; `None` for attributes a record does not carry.
    pub fn attribute(&self, attribute: &str) -> Option<&str> {
        match attribute {
            "name" => Some(&self.name),
            "description" => Some(&self.description),
            _ => None,
        }
    }
}

/// Flat list of search records, in node construction order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SearchIndex {
    records: Vec<SearchRecord>,
}

impl SearchIndex {
    /// Freeze records into an index.
    pub fn new(records: Vec<SearchRecord>) -> Self {
        Self { records }
    }

    /// All records.
    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records exist.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: NodeId) -> GraphNode {
        GraphNode {
            id,
            label: format!("n{id}"),
            shape: NodeShape::Ellipse,
            font_size: 20,
            font_color: "black".into(),
            title: String::new(),
            radius: None,
            border_width: None,
        }
    }

    fn sample() -> GraphModel {
        GraphModel {
            nodes: (1..=4).map(node).collect(),
            edges: vec![
                GraphEdge { from: 1, to: 2 },
                GraphEdge { from: 2, to: 3 },
                GraphEdge { from: 1, to: 4 },
            ],
        }
    }

    #[test]
    fn lookups() {
        let g = sample();
        assert_eq!(g.node(3).map(|n| n.label.as_str()), Some("n3"));
        assert!(g.node(0).is_none());
        assert!(g.node(5).is_none());
        assert_eq!(g.children(1).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(g.parent(3), Some(2));
        assert_eq!(g.parent(ROOT_ID), None);
    }

    #[test]
    fn hash_tracks_content() {
        let a = sample();
        let mut b = sample();
        assert_eq!(a.compute_hash().ok(), b.compute_hash().ok());
        b.nodes[1].label.push('!');
        assert_ne!(a.compute_hash().ok(), b.compute_hash().ok());
    }

    #[test]
    fn json_uses_renderer_field_names() {
        let mut root = node(1);
        root.shape = NodeShape::Box;
        root.border_width = Some(2);
        let json = serde_json::to_value(&root).unwrap_or_default();
        assert_eq!(json["fontSize"], 20);
        assert_eq!(json["fontColor"], "black");
        assert_eq!(json["shape"], "box");
        assert_eq!(json["borderWidth"], 2);
        assert!(json.get("radius").is_none());

        let edge = serde_json::to_value(GraphEdge { from: 1, to: 2 }).unwrap_or_default();
        assert_eq!(edge, serde_json::json!({"from": 1, "to": 2}));
    }

    #[test]
    fn record_attributes() {
        let r = SearchRecord {
            id: 2,
            name: "email".into(),
            description: "email<br/>string".into(),
        };
        assert_eq!(r.attribute("name"), Some("email"));
        assert_eq!(r.attribute("description"), Some("email<br/>string"));
        assert_eq!(r.attribute("id"), None);
        assert_eq!(r.attribute("label"), None);
    }
}
