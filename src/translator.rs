//! Schema-to-type-expression translation.
//!
//! Renders a [`SchemaNode`] as a TypeScript-style structural type expression
//! for human-readable display in the generated document. This is a pure,
//! total function: unrecognized shapes degrade to `any` (or the raw value's
//! own kind name) instead of erroring, because the output is a documentation
//! aid, never something that gets parsed back.

use crate::schema::{SchemaKind, SchemaNode};

/// Render a schema node as a structural type expression string.
///
/// Objects render their properties in insertion order, marking a field with
/// `?` when its node carries the resolved optionality flag. `anyOf` and
/// `oneOf` both render as a ` | ` union (the distinction is deliberately not
/// surfaced), `allOf` as a ` & ` intersection. A combinator that is present
/// but lists no operands yields an empty string.
pub fn type_expression(node: &SchemaNode) -> String {
    match &node.kind {
        SchemaKind::Value { kind_name } => (*kind_name).to_string(),
        SchemaKind::Object {
            properties: Some(properties),
        } => {
            let fields = properties
                .iter()
                .map(|(name, child)| {
                    let marker = if child.optional { "?" } else { "" };
                    format!("  {}{}: {}", name, marker, type_expression(child))
                })
                .collect::<Vec<_>>()
                .join(";\n");
            format!("{{\n{};\n}}", fields)
        }
        SchemaKind::Object { properties: None } => "Record<string, any>".to_string(),
        SchemaKind::Array { items: Some(items) } => {
            format!("Array<{}>", type_expression(items))
        }
        SchemaKind::Array { items: None } => "any[]".to_string(),
        SchemaKind::String {
            enum_values: Some(members),
            ..
        } => members
            .iter()
            .map(|member| format!("\"{}\"", member))
            .collect::<Vec<_>>()
            .join(" | "),
        SchemaKind::String {
            format: Some(format),
            ..
        } if format == "binary" => "File".to_string(),
        SchemaKind::String { .. } => "string".to_string(),
        SchemaKind::Number {
            enum_values: Some(members),
        } => members
            .iter()
            .map(|member| member.to_string())
            .collect::<Vec<_>>()
            .join(" | "),
        SchemaKind::Number { .. } => "number".to_string(),
        SchemaKind::Boolean => "boolean".to_string(),
        SchemaKind::Null => "null".to_string(),
        SchemaKind::Untyped {
            any_of: Some(members),
            ..
        } => join_members(members, " | "),
        SchemaKind::Untyped {
            one_of: Some(members),
            ..
        } => join_members(members, " | "),
        SchemaKind::Untyped {
            all_of: Some(members),
            ..
        } => join_members(members, " & "),
        SchemaKind::Untyped { .. } => "any".to_string(),
    }
}

fn join_members(members: &[SchemaNode], separator: &str) -> String {
    members
        .iter()
        .map(type_expression)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn expr(value: serde_json::Value) -> String {
        type_expression(&SchemaNode::from_value(&value))
    }

    #[test]
    fn test_primitive_tokens() {
        assert_eq!(expr(json!({ "type": "string" })), "string");
        assert_eq!(expr(json!({ "type": "number" })), "number");
        assert_eq!(expr(json!({ "type": "integer" })), "number");
        assert_eq!(expr(json!({ "type": "boolean" })), "boolean");
        assert_eq!(expr(json!({ "type": "null" })), "null");
    }

    #[test]
    fn test_string_enum_preserves_order() {
        let schema = json!({ "type": "string", "enum": ["b", "a"] });
        assert_eq!(expr(schema), "\"b\" | \"a\"");
    }

    #[test]
    fn test_string_binary_format() {
        assert_eq!(expr(json!({ "type": "string", "format": "binary" })), "File");
    }

    #[test]
    fn test_enum_takes_precedence_over_format() {
        let schema = json!({ "type": "string", "format": "binary", "enum": ["x"] });
        assert_eq!(expr(schema), "\"x\"");
    }

    #[test]
    fn test_number_enum() {
        let schema = json!({ "type": "number", "enum": [1, 2, 3] });
        assert_eq!(expr(schema), "1 | 2 | 3");
    }

    #[test]
    fn test_object_with_required_and_optional_fields() {
        let schema = json!({
            "type": "object",
            "properties": {
                "x": { "type": "string" },
                "y": { "type": "number" }
            },
            "required": ["x"]
        });
        assert_eq!(expr(schema), "{\n  x: string;\n  y?: number;\n}");
    }

    #[test]
    fn test_object_with_marker_optional_field() {
        let schema = json!({
            "type": "object",
            "properties": {
                "x": { "type": "string", "x-optional": true }
            }
        });
        assert_eq!(expr(schema), "{\n  x?: string;\n}");
    }

    #[test]
    fn test_object_without_properties() {
        assert_eq!(expr(json!({ "type": "object" })), "Record<string, any>");
    }

    #[test]
    fn test_nested_object() {
        let schema = json!({
            "type": "object",
            "properties": {
                "user": {
                    "type": "object",
                    "properties": { "name": { "type": "string" } },
                    "required": ["name"]
                }
            },
            "required": ["user"]
        });
        assert_eq!(expr(schema), "{\n  user: {\n  name: string;\n};\n}");
    }

    #[test]
    fn test_array_of_strings() {
        let schema = json!({ "type": "array", "items": { "type": "string" } });
        assert_eq!(expr(schema), "Array<string>");
    }

    #[test]
    fn test_array_without_items() {
        assert_eq!(expr(json!({ "type": "array" })), "any[]");
    }

    #[test]
    fn test_any_of_union() {
        let schema = json!({ "anyOf": [{ "type": "string" }, { "type": "number" }] });
        assert_eq!(expr(schema), "string | number");
    }

    #[test]
    fn test_one_of_renders_like_any_of() {
        let schema = json!({ "oneOf": [{ "type": "string" }, { "type": "number" }] });
        assert_eq!(expr(schema), "string | number");
    }

    #[test]
    fn test_any_of_takes_precedence_over_one_of() {
        let schema = json!({
            "anyOf": [{ "type": "string" }],
            "oneOf": [{ "type": "number" }]
        });
        assert_eq!(expr(schema), "string");
    }

    #[test]
    fn test_all_of_intersection() {
        let schema = json!({
            "allOf": [
                { "type": "object", "properties": { "a": { "type": "string" } }, "required": ["a"] },
                { "type": "object", "properties": { "b": { "type": "number" } }, "required": ["b"] }
            ]
        });
        assert_eq!(expr(schema), "{\n  a: string;\n} & {\n  b: number;\n}");
    }

    #[test]
    fn test_untyped_without_combinators() {
        assert_eq!(expr(json!({})), "any");
    }

    #[test]
    fn test_unknown_type_tag_falls_back_to_any() {
        assert_eq!(expr(json!({ "type": "file" })), "any");
    }

    // A combinator that is present but empty yields an empty join. Accepted
    // behavior, not an error.
    #[test]
    fn test_empty_any_of_yields_empty_string() {
        assert_eq!(expr(json!({ "anyOf": [] })), "");
    }

    #[test]
    fn test_raw_value_renders_its_kind_name() {
        assert_eq!(expr(json!("not a schema")), "string");
        assert_eq!(expr(json!(7)), "number");
        assert_eq!(expr(json!(null)), "null");
    }

    #[test]
    fn test_idempotence() {
        let node = SchemaNode::from_value(&json!({
            "type": "object",
            "properties": {
                "id": { "type": "number" },
                "tags": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["id"]
        }));
        assert_eq!(type_expression(&node), type_expression(&node));
    }
}
