// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Avro-style schema input model.
//!
//! Decoding is lenient: values of the wrong JSON shape collapse to "absent"
//! rather than failing the whole document. Only the loader rejects input, and
//! only when the text is not JSON or the root is not an object.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Root of a schema document. The root is itself a record-like type definition.
pub type SchemaRoot = TypeDefinition;

/// A single field inside a record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SchemaField {
    /// Field name; absent names are rendered as a placeholder.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Raw `type` encoding of the field.
    #[serde(rename = "type", default)]
    pub ty: TypeShape,
    /// Field documentation.
    #[serde(default, deserialize_with = "lenient_string")]
    pub doc: Option<String>,
}

impl SchemaField {
    /// Decode a field from an arbitrary JSON value. Non-objects become an empty field.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Classify the field's `type` once.
    pub fn field_type(&self) -> FieldType<'_> {
        self.ty.classify()
    }
}

/// Structured type definition (record, array, map, enum, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TypeDefinition {
    /// Type name carried in the definition's own `type` property.
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub type_name: Option<String>,
    /// Definition name (records, enums).
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Namespace overriding the ambient one for this subtree.
    #[serde(default, deserialize_with = "lenient_string")]
    pub namespace: Option<String>,
    /// Record fields.
    #[serde(default, deserialize_with = "lenient_fields")]
    pub fields: Option<Vec<SchemaField>>,
    /// Array item definition.
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Option<ItemsDefinition>,
    /// Enum symbols.
    #[serde(default, deserialize_with = "lenient_symbols")]
    pub symbols: Option<Vec<String>>,
}

impl TypeDefinition {
    /// Decode a definition from an arbitrary JSON value. Non-objects become an empty definition.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Child fields: own `fields` first, then `items.fields` (array of records).
    pub fn child_fields(&self) -> Option<&[SchemaField]> {
        self.fields
            .as_deref()
            .or_else(|| self.items.as_ref().and_then(|items| items.fields.as_deref()))
    }

    /// Non-empty namespace, if any.
    pub fn own_namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }
}

/// `items` of an array definition; only nested record fields matter here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemsDefinition {
    /// Fields of the item record.
    #[serde(default, deserialize_with = "lenient_fields")]
    pub fields: Option<Vec<SchemaField>>,
}

/// The three-shaped `type` encoding, as decoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum TypeShape {
    /// No `type` property (or `null`).
    #[default]
    Absent,
    /// Bare type name, e.g. `"string"`.
    Name(String),
    /// Union sequence, e.g. `["null", "string"]`.
    Union(Vec<UnionBranch>),
    /// Inline type definition.
    Definition(Box<TypeDefinition>),
    /// Any other JSON value (numbers, booleans).
    Opaque,
}

/// One branch of a union sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum UnionBranch {
    /// Type name branch.
    Name(String),
    /// Inline definition branch.
    Definition(Box<TypeDefinition>),
    /// Anything else (nested unions, numbers, `null` literals).
    Opaque,
}

impl From<Value> for TypeShape {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::String(name) => Self::Name(name),
            Value::Array(branches) => {
                Self::Union(branches.into_iter().map(UnionBranch::from).collect())
            }
            Value::Object(_) => Self::Definition(Box::new(TypeDefinition::from_value(value))),
            Value::Bool(_) | Value::Number(_) => Self::Opaque,
        }
    }
}

impl From<Value> for UnionBranch {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::Name(name),
            Value::Object(_) => Self::Definition(Box::new(TypeDefinition::from_value(value))),
            _ => Self::Opaque,
        }
    }
}

/// A field's type after classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType<'a> {
    /// A structured definition, possibly reached through a nullable union.
    Composite(&'a TypeDefinition),
    /// A bare name (primitive or the non-null branch of a union).
    Named(&'a str),
    /// Nothing usable.
    Unresolved,
}

impl<'a> FieldType<'a> {
    /// Resolved type name.
    pub fn type_name(self) -> Option<&'a str> {
        match self {
            Self::Composite(def) => def.type_name.as_deref(),
            Self::Named(name) => Some(name),
            Self::Unresolved => None,
        }
    }

    /// Resolved type definition.
    pub fn definition(self) -> Option<&'a TypeDefinition> {
        match self {
            Self::Composite(def) => Some(def),
            Self::Named(_) | Self::Unresolved => None,
        }
    }
}

impl TypeShape {
    /// Resolve the encoding into a [`FieldType`].
    ///
    /// A union only counts when it has more than one branch; its branch at
    /// index 1 is taken as-is, so a definition there wins without unwrapping.
    pub fn classify(&self) -> FieldType<'_> {
        match self {
            Self::Union(branches) if branches.len() > 1 => match &branches[1] {
                UnionBranch::Definition(def) => FieldType::Composite(def),
                UnionBranch::Name(name) => FieldType::Named(name),
                UnionBranch::Opaque => FieldType::Unresolved,
            },
            Self::Definition(def) => FieldType::Composite(def),
            Self::Name(name) => FieldType::Named(name),
            Self::Union(_) | Self::Absent | Self::Opaque => FieldType::Unresolved,
        }
    }
}

fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_fields<'de, D>(de: D) -> Result<Option<Vec<SchemaField>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => Some(items.into_iter().map(SchemaField::from_value).collect()),
        _ => None,
    })
}

fn lenient_items<'de, D>(de: D) -> Result<Option<ItemsDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    Ok(match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

fn lenient_symbols<'de, D>(de: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Array(symbols) => Some(
            symbols
                .into_iter()
                .map(|symbol| match symbol {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Failure to turn input text into a [`SchemaRoot`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// The schema file could not be read.
    #[error("failed to read schema {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The input is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    /// The document root is not a JSON object.
    #[error("schema root must be a JSON object")]
    RootNotObject,
}

/// Build a root from an already-decoded JSON value.
pub fn schema_from_value(value: Value) -> Result<SchemaRoot, LoadError> {
    match value {
        Value::Object(_) => Ok(TypeDefinition::from_value(value)),
        _ => Err(LoadError::RootNotObject),
    }
}

/// Decode a root from JSON bytes.
///
/// Nesting depth is not capped here; deep inputs grow the stack on demand
/// instead of hitting serde_json's recursion limit.
pub fn parse_schema(bytes: &[u8]) -> Result<SchemaRoot, LoadError> {
    let mut json = serde_json::Deserializer::from_slice(bytes);
    json.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    schema_from_value(value)
}

/// Read and decode a schema file.
pub fn load_schema(path: impl AsRef<Path>) -> Result<SchemaRoot, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(value: Value) -> SchemaField {
        SchemaField::from_value(value)
    }

    #[test]
    fn primitive_type_is_named() {
        let f = field(json!({"name": "id", "type": "long"}));
        assert_eq!(f.field_type(), FieldType::Named("long"));
    }

    #[test]
    fn nullable_union_takes_second_branch() {
        let f = field(json!({"name": "email", "type": ["null", "string"]}));
        assert_eq!(f.field_type(), FieldType::Named("string"));

        let f = field(json!({
            "name": "addr",
            "type": ["null", {"type": "record", "name": "Addr", "fields": []}]
        }));
        let def = f.field_type().definition();
        assert_eq!(def.and_then(|d| d.name.as_deref()), Some("Addr"));
        assert_eq!(f.field_type().type_name(), Some("record"));
    }

    #[test]
    fn short_union_and_missing_type_are_unresolved() {
        assert_eq!(
            field(json!({"name": "x", "type": ["string"]})).field_type(),
            FieldType::Unresolved
        );
        assert_eq!(
            field(json!({"name": "x"})).field_type(),
            FieldType::Unresolved
        );
        assert_eq!(
            field(json!({"name": "x", "type": 7})).field_type(),
            FieldType::Unresolved
        );
        assert_eq!(
            field(json!({"name": "x", "type": ["null", ["a", "b"]]})).field_type(),
            FieldType::Unresolved
        );
    }

    #[test]
    fn definition_without_type_name_is_still_composite() {
        let f = field(json!({"name": "x", "type": {"fields": [{"name": "y"}]}}));
        let ty = f.field_type();
        assert!(ty.definition().is_some());
        assert_eq!(ty.type_name(), None);
    }

    #[test]
    fn child_fields_prefer_own_fields_over_items() {
        let def = TypeDefinition::from_value(json!({
            "type": "array",
            "items": {"type": "record", "fields": [{"name": "inner"}]}
        }));
        let children = def.child_fields().unwrap_or_default();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name.as_deref(), Some("inner"));

        let def = TypeDefinition::from_value(json!({
            "type": "record",
            "fields": [{"name": "own"}],
            "items": {"fields": [{"name": "inner"}]}
        }));
        let children = def.child_fields().unwrap_or_default();
        assert_eq!(children[0].name.as_deref(), Some("own"));
    }

    #[test]
    fn wrong_shapes_are_tolerated() {
        let def = TypeDefinition::from_value(json!({
            "name": 12,
            "fields": "nope",
            "items": "string",
            "symbols": ["A", 2]
        }));
        assert_eq!(def.name, None);
        assert_eq!(def.fields, None);
        assert_eq!(def.items, None);
        assert_eq!(def.symbols, Some(vec!["A".to_owned(), "2".to_owned()]));

        let def = TypeDefinition::from_value(json!({"fields": ["bare", {"name": "ok"}]}));
        let fields = def.fields.unwrap_or_default();
        assert_eq!(fields[0], SchemaField::default());
        assert_eq!(fields[1].name.as_deref(), Some("ok"));
    }

    #[test]
    fn loader_rejects_non_json_and_non_object_roots() {
        assert!(matches!(parse_schema(b"{not json"), Err(LoadError::Decode(_))));
        assert!(matches!(parse_schema(b"[1, 2]"), Err(LoadError::RootNotObject)));
        let root = parse_schema(br#"{"name": "User", "fields": []}"#);
        assert!(matches!(root, Ok(ref r) if r.name.as_deref() == Some("User")));
    }

    #[test]
    fn loader_accepts_deeply_nested_records() {
        let depth = 60;
        let mut text = String::from(r#"{"name": "Leaf", "type": "string"}"#);
        for level in (0..depth).rev() {
            text = format!(
                r#"{{"name": "f{level}", "type": {{"type": "record", "name": "R{level}", "fields": [{text}]}}}}"#
            );
        }
        let doc = format!(r#"{{"name": "Root", "fields": [{text}]}}"#);

        let root = parse_schema(doc.as_bytes());
        assert!(root.is_ok(), "{:?}", root.as_ref().err());
        let (graph, _) = crate::transform::transform(&root.unwrap_or_default(), None);
        assert_eq!(graph.nodes.len(), depth + 2);
        assert_eq!(graph.nodes[depth + 1].label, "_Leaf_");
    }

    #[test]
    fn loader_rejects_trailing_garbage() {
        assert!(matches!(
            parse_schema(br#"{"name": "User"} extra"#),
            Err(LoadError::Decode(_))
        ));
    }

    #[test]
    fn loader_reports_missing_file() {
        let err = load_schema("/definitely/not/here.avsc");
        assert!(matches!(err, Err(LoadError::Io { .. })));
    }
}
