//! Canonical in-memory model for JSON-Schema-shaped values.
//!
//! Route tables carry their body/query/response metadata as plain JSON values
//! following the JSON Schema shape, regardless of which schema-definition
//! library produced them. This module normalizes those values into a typed
//! tree once, so the rest of the crate never probes raw JSON for structural
//! questions. Construction is total: anything that does not look like a
//! schema object is kept as a [`SchemaKind::Value`] fallback instead of
//! failing.

use serde_json::{Map, Value};

/// The extension keyword marking a field as optional independently of the
/// parent's `required` list. Schema-definition libraries that attach
/// optionality as out-of-band metadata serialize it this way.
pub const OPTIONAL_MARKER: &str = "x-optional";

/// Extension keyword marking a property as a multi-file upload field.
pub const FILES_MARKER: &str = "x-files";

/// A single node of a schema tree.
///
/// Field optionality is resolved once, here: a property is optional when its
/// name is missing from the parent's `required` list (if the parent carries
/// one) or when the node itself carries the [`OPTIONAL_MARKER`] keyword.
/// Consumers only ever read the flat flag.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// Structural kind of this node
    pub kind: SchemaKind,
    /// Whether the field described by this node may be omitted
    pub optional: bool,
}

/// Structural kind of a schema node, dispatched on the `type` tag.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// `type: object`. `properties` keeps insertion order; `None` means the
    /// keyword was absent entirely (an open string-keyed mapping), which is
    /// distinct from an empty property table.
    Object {
        properties: Option<Vec<(String, SchemaNode)>>,
    },
    /// `type: array` with an optional `items` schema
    Array { items: Option<Box<SchemaNode>> },
    /// `type: string` with optional `enum` members and `format` tag
    String {
        enum_values: Option<Vec<String>>,
        format: Option<String>,
    },
    /// `type: number` or `type: integer` with optional `enum` members
    Number {
        enum_values: Option<Vec<serde_json::Number>>,
    },
    /// `type: boolean`
    Boolean,
    /// `type: null`
    Null,
    /// No recognized primitive `type` tag; combinators may apply. A `Some`
    /// holding an empty vector means the combinator keyword was present but
    /// listed no operands.
    Untyped {
        any_of: Option<Vec<SchemaNode>>,
        one_of: Option<Vec<SchemaNode>>,
        all_of: Option<Vec<SchemaNode>>,
    },
    /// The input was not a schema object at all. Records the JSON kind name
    /// of the raw value so callers can still render something sensible.
    Value { kind_name: &'static str },
}

impl SchemaNode {
    /// Build a canonical node from a JSON-Schema-shaped value.
    ///
    /// Never fails: non-object inputs become [`SchemaKind::Value`], and an
    /// unknown `type` tag falls back to [`SchemaKind::Untyped`] so combinator
    /// keywords still apply.
    pub fn from_value(value: &Value) -> Self {
        let optional = matches!(value.get(OPTIONAL_MARKER), Some(Value::Bool(true)));
        let kind = match value {
            Value::Object(map) => Self::kind_from_map(map),
            Value::Null => SchemaKind::Value { kind_name: "null" },
            Value::Bool(_) => SchemaKind::Value {
                kind_name: "boolean",
            },
            Value::Number(_) => SchemaKind::Value {
                kind_name: "number",
            },
            Value::String(_) => SchemaKind::Value {
                kind_name: "string",
            },
            Value::Array(_) => SchemaKind::Value { kind_name: "array" },
        };
        SchemaNode { kind, optional }
    }

    fn kind_from_map(map: &Map<String, Value>) -> SchemaKind {
        match map.get("type").and_then(Value::as_str) {
            Some("object") => {
                let required = map.get("required").and_then(Value::as_array).map(|names| {
                    names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                });
                let properties = map.get("properties").and_then(Value::as_object).map(|props| {
                    props
                        .iter()
                        .map(|(name, child)| {
                            let mut node = SchemaNode::from_value(child);
                            // A missing `required` list marks nothing optional;
                            // only an explicit list can exclude a field.
                            if let Some(required) = &required {
                                node.optional =
                                    node.optional || !required.iter().any(|r| r == name);
                            }
                            (name.clone(), node)
                        })
                        .collect()
                });
                SchemaKind::Object { properties }
            }
            Some("array") => SchemaKind::Array {
                items: map
                    .get("items")
                    .map(|items| Box::new(SchemaNode::from_value(items))),
            },
            Some("string") => SchemaKind::String {
                enum_values: map.get("enum").and_then(Value::as_array).map(|members| {
                    members
                        .iter()
                        .map(|m| match m {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect()
                }),
                format: map
                    .get("format")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            },
            Some("number") | Some("integer") => SchemaKind::Number {
                enum_values: map.get("enum").and_then(Value::as_array).map(|members| {
                    members
                        .iter()
                        .filter_map(|m| match m {
                            Value::Number(n) => Some(n.clone()),
                            _ => None,
                        })
                        .collect()
                }),
            },
            Some("boolean") => SchemaKind::Boolean,
            Some("null") => SchemaKind::Null,
            // No type tag, or one we do not recognize: combinators may apply
            _ => SchemaKind::Untyped {
                any_of: Self::combinator(map, "anyOf"),
                one_of: Self::combinator(map, "oneOf"),
                all_of: Self::combinator(map, "allOf"),
            },
        }
    }

    fn combinator(map: &Map<String, Value>, keyword: &str) -> Option<Vec<SchemaNode>> {
        map.get(keyword)
            .and_then(Value::as_array)
            .map(|members| members.iter().map(SchemaNode::from_value).collect())
    }

    /// Whether this node describes a binary string (a file upload field)
    pub fn is_binary(&self) -> bool {
        matches!(&self.kind, SchemaKind::String { format: Some(f), .. } if f == "binary")
    }

    /// Whether this node describes an array of binary strings (a multi-file
    /// upload field)
    pub fn is_binary_array(&self) -> bool {
        matches!(&self.kind, SchemaKind::Array { items: Some(items) } if items.is_binary())
    }
}

/// Pick a deterministic example value for a raw schema value.
///
/// Preference order: the first entry of `examples`, then `1` when an `anyOf`
/// arm is numeric, then the first `enum` member. Selection is intentionally
/// stable so regenerating the document never produces spurious diffs.
pub fn example_for(value: &Value) -> Option<Value> {
    if let Some(examples) = value.get("examples").and_then(Value::as_array) {
        return examples.first().cloned();
    }
    if let Some(any_of) = value.get("anyOf").and_then(Value::as_array) {
        if any_of
            .iter()
            .any(|arm| arm.get("type").and_then(Value::as_str) == Some("number"))
        {
            return Some(Value::from(1));
        }
    }
    value
        .get("enum")
        .and_then(Value::as_array)
        .and_then(|members| members.first().cloned())
}
