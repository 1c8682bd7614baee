// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Schema → graph transform.
//!
//! One depth-first walk over the schema produces the [`GraphModel`] and the
//! [`SearchIndex`] together. Ids are handed out in discovery order, so a node's
//! parent always has a smaller id. Namespace and ancestor path travel down the
//! recursion as immutable context; the only mutable state is the builder that
//! owns the output buffers for this one call.

use tracing::{debug, trace};

use crate::model::{
    GraphEdge, GraphModel, GraphNode, NodeId, NodeShape, SearchIndex, SearchRecord, ROOT_ID,
};
use crate::schema::{FieldType, SchemaField, SchemaRoot, TypeDefinition};
use crate::style::{StylePolicy, TypeTag, LINE_BREAK};

const UNNAMED_ROOT: &str = "unnamed_root";
const UNNAMED_FIELD: &str = "unnamed";

/// Transform with the default style tables.
///
/// `max_depth` of `None` (or `Some(0)`) walks the whole tree; otherwise fields at
/// `level >= max_depth` become nodes but their children are skipped.
pub fn transform(root: &SchemaRoot, max_depth: Option<u32>) -> (GraphModel, SearchIndex) {
    transform_with(root, max_depth, &StylePolicy::default())
}

/// Transform with an explicit style policy.
pub fn transform_with(
    root: &SchemaRoot,
    max_depth: Option<u32>,
    style: &StylePolicy,
) -> (GraphModel, SearchIndex) {
    let mut builder = GraphBuilder::new(style, max_depth);
    builder.visit_root(root);
    let (graph, index) = builder.finish();
    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        ?max_depth,
        "schema transformed"
    );
    (graph, index)
}

/// Per-call recursion context.
#[derive(Clone, Copy)]
struct Visit<'a> {
    level: u32,
    parent: NodeId,
    namespace: Option<&'a str>,
    ancestors: &'a [String],
}

struct GraphBuilder<'s> {
    style: &'s StylePolicy,
    max_depth: Option<u32>,
    next_id: NodeId,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    records: Vec<SearchRecord>,
}

impl<'s> GraphBuilder<'s> {
    fn new(style: &'s StylePolicy, max_depth: Option<u32>) -> Self {
        Self {
            style,
            max_depth,
            next_id: ROOT_ID,
            nodes: Vec::new(),
            edges: Vec::new(),
            records: Vec::new(),
        }
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn visit_root(&mut self, root: &SchemaRoot) {
        let label = root
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_ROOT);
        let namespace = root.own_namespace();
        let path = match namespace {
            Some(ns) => format!("{ns}.{label}"),
            None => label.to_owned(),
        };

        let id = self.allocate_id();
        self.nodes.push(GraphNode {
            id,
            label: label.to_owned(),
            shape: NodeShape::Box,
            font_size: self.style.max_font_size,
            font_color: self.style.root_font_color.clone(),
            title: path.clone(),
            radius: Some(1),
            border_width: Some(2),
        });
        self.records.push(SearchRecord {
            id,
            name: root.name.clone().unwrap_or_default(),
            description: path,
        });

        let ctx = Visit {
            level: 1,
            parent: id,
            namespace,
            ancestors: &[],
        };
        for field in root.fields.iter().flatten() {
            self.visit_field(field, ctx);
        }
    }

    fn visit_field(&mut self, field: &SchemaField, ctx: Visit<'_>) {
        let field_type = field.field_type();
        let type_name = field_type.type_name();
        let definition = field_type.definition();
        let tag = TypeTag::of(type_name);

        let namespace = definition
            .and_then(TypeDefinition::own_namespace)
            .or(ctx.namespace);

        let name = field
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_FIELD);
        let path_element = if tag == TypeTag::Array {
            format!("{name}[]")
        } else {
            name.to_owned()
        };
        let mut ancestors = Vec::with_capacity(ctx.ancestors.len() + 1);
        ancestors.extend_from_slice(ctx.ancestors);
        ancestors.push(path_element);

        let title = describe(field, field_type, namespace, &ancestors);
        let id = self.allocate_id();
        trace!(id, parent = ctx.parent, level = ctx.level, name, "field node");

        self.nodes.push(GraphNode {
            id,
            label: tag.decorate(name),
            shape: NodeShape::Ellipse,
            font_size: self.style.font_size(ctx.level),
            font_color: self.style.color_for(tag).to_owned(),
            title: title.clone(),
            radius: None,
            border_width: None,
        });
        self.records.push(SearchRecord {
            id,
            name: field.name.clone().unwrap_or_default(),
            description: title,
        });
        self.edges.push(GraphEdge {
            from: ctx.parent,
            to: id,
        });

        if self.max_depth.is_some_and(|max| max > 0 && ctx.level >= max) {
            return;
        }
        let Some(children) = definition.and_then(TypeDefinition::child_fields) else {
            return;
        };
        let child_ctx = Visit {
            level: ctx.level + 1,
            parent: id,
            namespace,
            ancestors: &ancestors,
        };
        for child in children {
            self.visit_field(child, child_ctx);
        }
    }

    fn finish(self) -> (GraphModel, SearchIndex) {
        let graph = GraphModel {
            nodes: self.nodes,
            edges: self.edges,
        };
        (graph, SearchIndex::new(self.records))
    }
}

/// Title lines: ancestor path, type clause, doc.
fn describe(
    field: &SchemaField,
    field_type: FieldType<'_>,
    namespace: Option<&str>,
    ancestors: &[String],
) -> String {
    let mut lines = Vec::with_capacity(3);
    if !ancestors.is_empty() {
        lines.push(ancestors.join("."));
    }
    if let Some(type_name) = field_type.type_name().filter(|n| !n.is_empty()) {
        lines.push(type_clause(type_name, field_type.definition(), namespace));
    }
    if let Some(doc) = field.doc.as_deref().filter(|d| !d.is_empty()) {
        lines.push(doc.to_owned());
    }
    lines.join(LINE_BREAK)
}

fn type_clause(
    type_name: &str,
    definition: Option<&TypeDefinition>,
    namespace: Option<&str>,
) -> String {
    let symbols = definition.and_then(|d| d.symbols.as_ref());
    let record_name = definition.and_then(|d| d.name.as_deref());
    match (type_name, symbols, record_name) {
        ("enum", Some(symbols), _) => format!("enum:{LINE_BREAK}{}", symbols.join(", ")),
        ("record", _, Some(name)) => match namespace {
            Some(ns) => format!("record:{LINE_BREAK}{ns}.{name}"),
            None => format!("record:{LINE_BREAK}{name}"),
        },
        _ => type_name.to_owned(),
    }
}
