//! JSON Schema types and the Type→Schema Converter.
//!
//! `JsonSchema` is the wire-format schema object emitted for a tool's
//! `inputSchema`/`outputSchema`, a prompt's argument list, or a resource's
//! described shape. `convert` turns a language-neutral [`TypeDescriptor`]
//! tree — harvested by `mcp-compiler` from Rust source, or built by hand
//! through `mcp-derive` field reflection — into one of these objects.
//!
//! Converter failures are never fatal: unrepresentable types collapse to
//! an empty schema `{}` and a pushed warning, matching the "does not
//! throw" contract of the spec's Type→Schema Converter.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON Schema object as emitted on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonSchema {
    /// The empty schema `{}` — emitted for unrepresentable types.
    Any(EmptySchema),
    Typed(TypedSchema),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptySchema {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypedSchema {
    String {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none", rename = "minLength")]
        min_length: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none", rename = "maxLength")]
        max_length: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none", rename = "enum")]
        enum_values: Option<Vec<String>>,
    },
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        minimum: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        maximum: Option<f64>,
    },
    Integer {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        minimum: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        maximum: Option<i64>,
    },
    Boolean {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Null {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    Array {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        items: Box<JsonSchema>,
    },
    Object {
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        properties: Option<HashMap<String, JsonSchema>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        required: Option<Vec<String>>,
        #[serde(rename = "additionalProperties")]
        additional_properties: bool,
    },
    /// Union of object shapes — `{oneOf: [...]}`. Kept untagged relative
    /// to the others since `oneOf` has no sibling `type` key on the wire.
    #[serde(untagged)]
    OneOf { one_of: Vec<JsonSchema> },
}

impl JsonSchema {
    pub fn any() -> Self {
        JsonSchema::Any(EmptySchema {})
    }

    pub fn string() -> Self {
        JsonSchema::Typed(TypedSchema::String {
            description: None,
            min_length: None,
            max_length: None,
            enum_values: None,
        })
    }

    pub fn string_enum(values: Vec<String>) -> Self {
        JsonSchema::Typed(TypedSchema::String {
            description: None,
            min_length: None,
            max_length: None,
            enum_values: Some(values),
        })
    }

    pub fn number() -> Self {
        JsonSchema::Typed(TypedSchema::Number {
            description: None,
            minimum: None,
            maximum: None,
        })
    }

    pub fn integer() -> Self {
        JsonSchema::Typed(TypedSchema::Integer {
            description: None,
            minimum: None,
            maximum: None,
        })
    }

    pub fn boolean() -> Self {
        JsonSchema::Typed(TypedSchema::Boolean { description: None })
    }

    pub fn null() -> Self {
        JsonSchema::Typed(TypedSchema::Null { description: None })
    }

    pub fn array(items: JsonSchema) -> Self {
        JsonSchema::Typed(TypedSchema::Array {
            description: None,
            items: Box::new(items),
        })
    }

    pub fn object() -> Self {
        JsonSchema::Typed(TypedSchema::Object {
            description: None,
            properties: None,
            required: None,
            additional_properties: false,
        })
    }

    pub fn one_of(variants: Vec<JsonSchema>) -> Self {
        JsonSchema::Typed(TypedSchema::OneOf { one_of: variants })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if let JsonSchema::Typed(t) = &mut self {
            match t {
                TypedSchema::String { description: d, .. }
                | TypedSchema::Number { description: d, .. }
                | TypedSchema::Integer { description: d, .. }
                | TypedSchema::Boolean { description: d }
                | TypedSchema::Null { description: d }
                | TypedSchema::Array { description: d, .. }
                | TypedSchema::Object { description: d, .. } => *d = Some(description),
                TypedSchema::OneOf { .. } => {}
            }
        }
        self
    }

    pub fn with_properties(mut self, properties: HashMap<String, JsonSchema>) -> Self {
        if let JsonSchema::Typed(TypedSchema::Object { properties: p, .. }) = &mut self {
            *p = Some(properties);
        }
        self
    }

    pub fn with_required(mut self, required: Vec<String>) -> Self {
        if let JsonSchema::Typed(TypedSchema::Object { required: r, .. }) = &mut self {
            *r = Some(required);
        }
        self
    }
}

/// A language-neutral description of a field's type, independent of the
/// source language's own type-literal AST. `mcp-compiler` builds these
/// from `syn::Type`; `mcp-derive` builds them from reflected struct
/// fields; hand-written servers build them directly.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    String,
    Number,
    Integer,
    Boolean,
    Null,
    StringEnum(Vec<String>),
    Array(Box<TypeDescriptor>),
    Object(Vec<FieldDescriptor>),
    /// Union of object shapes.
    OneOf(Vec<TypeDescriptor>),
    /// Non-representable type — converts to `{}` plus a warning.
    Unknown(String),
}

/// One member of an object type-literal, with the `IParam`-style
/// constraints the spec's converter merges into the emitted schema node.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
    pub optional: bool,
    /// Member description; wins over an inline JSDoc-equivalent `@param`
    /// description when both exist (spec §4.1 tie-break).
    pub description: Option<String>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            description: None,
            minimum: None,
            maximum: None,
            min_length: None,
            max_length: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Result of converting a type tree: the schema plus any non-fatal
/// warnings raised along the way (unknown/unrepresentable types).
#[derive(Debug, Clone, Default)]
pub struct ConvertResult {
    pub schema: JsonSchema,
    pub warnings: Vec<String>,
}

/// Convert one [`TypeDescriptor`] into a [`JsonSchema`], threading
/// constraint/description metadata through. Never panics or returns
/// `Err` — unrepresentable input degrades to `{}` plus a warning.
pub fn convert_type(ty: &TypeDescriptor, warnings: &mut Vec<String>) -> JsonSchema {
    match ty {
        TypeDescriptor::String => JsonSchema::string(),
        TypeDescriptor::Number => JsonSchema::number(),
        TypeDescriptor::Integer => JsonSchema::integer(),
        TypeDescriptor::Boolean => JsonSchema::boolean(),
        TypeDescriptor::Null => JsonSchema::null(),
        TypeDescriptor::StringEnum(values) => JsonSchema::string_enum(values.clone()),
        TypeDescriptor::Array(item) => JsonSchema::array(convert_type(item, warnings)),
        TypeDescriptor::Object(fields) => convert_object(fields, warnings),
        TypeDescriptor::OneOf(variants) => {
            JsonSchema::one_of(variants.iter().map(|v| convert_type(v, warnings)).collect())
        }
        TypeDescriptor::Unknown(label) => {
            warnings.push(format!(
                "type '{label}' is not representable in JSON Schema; emitting {{}}"
            ));
            JsonSchema::any()
        }
    }
}

/// Convert a `params`/`args`/`result` object type-literal — the common
/// entry point for tool/prompt schema generation.
pub fn convert_object_fields(fields: &[FieldDescriptor]) -> ConvertResult {
    let mut warnings = Vec::new();
    let schema = convert_object(fields, &mut warnings);
    ConvertResult { schema, warnings }
}

fn convert_object(fields: &[FieldDescriptor], warnings: &mut Vec<String>) -> JsonSchema {
    let mut properties = HashMap::with_capacity(fields.len());
    let mut required = Vec::new();

    for field in fields {
        let mut node = convert_type(&field.ty, warnings);
        // Member description wins over any inline annotation the caller
        // may have already folded into the TypeDescriptor.
        if let Some(description) = &field.description {
            node = node.with_description(description.clone());
        }
        node = merge_constraints(node, field);
        properties.insert(field.name.clone(), node);
        if !field.optional {
            required.push(field.name.clone());
        }
    }

    JsonSchema::object()
        .with_properties(properties)
        .with_required(required)
}

fn merge_constraints(mut schema: JsonSchema, field: &FieldDescriptor) -> JsonSchema {
    if let JsonSchema::Typed(t) = &mut schema {
        match t {
            TypedSchema::Number { minimum, maximum, .. } => {
                *minimum = field.minimum;
                *maximum = field.maximum;
            }
            TypedSchema::Integer { minimum, maximum, .. } => {
                *minimum = field.minimum.map(|m| m as i64);
                *maximum = field.maximum.map(|m| m as i64);
            }
            TypedSchema::String { min_length, max_length, .. } => {
                *min_length = field.min_length;
                *max_length = field.max_length;
            }
            _ => {}
        }
    }
    schema
}

/// Convenience for validating a wire value against a schema's shallow
/// shape — object/required/additionalProperties only, sufficient for the
/// Dispatcher's argument-validation step (§4.6). Full JSON Schema draft
/// validation is intentionally not reimplemented here; `mcp-server`
/// layers field-level messages on top of this.
pub fn required_fields(schema: &JsonSchema) -> &[String] {
    if let JsonSchema::Typed(TypedSchema::Object {
        required: Some(r), ..
    }) = schema
    {
        r
    } else {
        &[]
    }
}

pub fn properties(schema: &JsonSchema) -> Option<&HashMap<String, JsonSchema>> {
    if let JsonSchema::Typed(TypedSchema::Object { properties, .. }) = schema {
        properties.as_ref()
    } else {
        None
    }
}

/// Type-check a single JSON value against a schema node; used by
/// `mcp-server`'s argument validator to produce field-level messages.
pub fn type_matches(schema: &JsonSchema, value: &Value) -> bool {
    match schema {
        JsonSchema::Any(_) => true,
        JsonSchema::Typed(t) => match t {
            TypedSchema::String { enum_values, .. } => match value.as_str() {
                Some(s) => enum_values
                    .as_ref()
                    .map(|values| values.iter().any(|v| v == s))
                    .unwrap_or(true),
                None => false,
            },
            TypedSchema::Number { .. } => value.is_number(),
            TypedSchema::Integer { .. } => value.is_i64() || value.is_u64(),
            TypedSchema::Boolean { .. } => value.is_boolean(),
            TypedSchema::Null { .. } => value.is_null(),
            TypedSchema::Array { items, .. } => value
                .as_array()
                .map(|arr| arr.iter().all(|v| type_matches(items, v)))
                .unwrap_or(false),
            TypedSchema::Object { properties, .. } => value
                .as_object()
                .map(|obj| {
                    properties.as_ref().map_or(true, |props| {
                        obj.iter()
                            .all(|(k, v)| props.get(k).map_or(true, |s| type_matches(s, v)))
                    })
                })
                .unwrap_or(false),
            TypedSchema::OneOf { one_of } => one_of.iter().any(|s| type_matches(s, value)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_conversion() {
        let mut warnings = Vec::new();
        assert_eq!(convert_type(&TypeDescriptor::String, &mut warnings), JsonSchema::string());
        assert!(warnings.is_empty());
    }

    #[test]
    fn unknown_type_produces_warning_not_panic() {
        let mut warnings = Vec::new();
        let schema = convert_type(&TypeDescriptor::Unknown("WeakMap".into()), &mut warnings);
        assert_eq!(schema, JsonSchema::any());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn object_round_trip_required_and_optional() {
        let fields = vec![
            FieldDescriptor::new("a", TypeDescriptor::Number),
            FieldDescriptor::new("b", TypeDescriptor::Number),
            FieldDescriptor::new("label", TypeDescriptor::String).optional(),
        ];
        let result = convert_object_fields(&fields);
        assert!(result.warnings.is_empty());
        let required = required_fields(&result.schema);
        assert!(required.contains(&"a".to_string()));
        assert!(required.contains(&"b".to_string()));
        assert!(!required.contains(&"label".to_string()));
    }

    #[test]
    fn member_description_wins_tie_break() {
        let field = FieldDescriptor::new("x", TypeDescriptor::String)
            .with_description("member description");
        let result = convert_object_fields(&[field]);
        let props = properties(&result.schema).unwrap();
        if let JsonSchema::Typed(TypedSchema::String { description, .. }) = &props["x"] {
            assert_eq!(description.as_deref(), Some("member description"));
        } else {
            panic!("expected string schema");
        }
    }

    #[test]
    fn string_enum_constraint() {
        let schema = JsonSchema::string_enum(vec!["low".into(), "high".into()]);
        assert!(type_matches(&schema, &Value::String("low".into())));
        assert!(!type_matches(&schema, &Value::String("medium".into())));
    }

    #[test]
    fn union_of_object_shapes_is_one_of() {
        let fields_a = vec![FieldDescriptor::new("kind", TypeDescriptor::String)];
        let fields_b = vec![FieldDescriptor::new("count", TypeDescriptor::Integer)];
        let ty = TypeDescriptor::OneOf(vec![
            TypeDescriptor::Object(fields_a),
            TypeDescriptor::Object(fields_b),
        ]);
        let mut warnings = Vec::new();
        let schema = convert_type(&ty, &mut warnings);
        matches!(schema, JsonSchema::Typed(TypedSchema::OneOf { .. }));
    }

    #[test]
    fn numeric_constraints_merge() {
        let field = FieldDescriptor::new("age", TypeDescriptor::Integer);
        let mut field = field;
        field.minimum = Some(0.0);
        field.maximum = Some(130.0);
        let result = convert_object_fields(&[field]);
        let props = properties(&result.schema).unwrap();
        if let JsonSchema::Typed(TypedSchema::Integer { minimum, maximum, .. }) = &props["age"] {
            assert_eq!(*minimum, Some(0));
            assert_eq!(*maximum, Some(130));
        } else {
            panic!("expected integer schema");
        }
    }
}
