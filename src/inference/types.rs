//! Kinds, shapes and the synthesized schema description

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Primitive classification of a single scalar observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    /// Null, missing, or NaN
    Null,
    /// Boolean
    Bool,
    /// Whole number
    Int,
    /// Floating point number
    Float,
    /// Free text
    String,
    /// Text matching a date, date-time, or time pattern
    DateTime,
}

impl Kind {
    /// All kinds, in lattice-listing order
    pub const ALL: [Kind; 6] = [
        Kind::Null,
        Kind::Bool,
        Kind::Int,
        Kind::Float,
        Kind::String,
        Kind::DateTime,
    ];

    /// Short lowercase name
    pub fn type_name(&self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::DateTime => "datetime",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Ordered field definitions of an object shape
pub type Fields = IndexMap<String, FieldShape>;

/// Inferred structural type of a record or sub-value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldShape {
    /// Scalar of a single kind
    Primitive(Kind),
    /// Nested object with its own fields
    Object(Fields),
    /// Sequence whose elements share one shape
    Array(Box<FieldShape>),
    /// Value that may be absent or null
    Optional(Box<FieldShape>),
}

impl FieldShape {
    /// Wrap a shape as optional, keeping the wrapper flat
    ///
    /// `Optional` never nests and never wraps `Primitive(Null)`.
    pub fn optional(shape: FieldShape) -> FieldShape {
        match shape {
            FieldShape::Optional(_) | FieldShape::Primitive(Kind::Null) => shape,
            other => FieldShape::Optional(Box::new(other)),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, FieldShape::Optional(_))
    }

    /// Whether a record may omit the field or leave it null
    ///
    /// True for `Optional` and for `Primitive(Null)`, which `optional`
    /// leaves unwrapped.
    pub fn accepts_missing(&self) -> bool {
        matches!(self, FieldShape::Optional(_) | FieldShape::Primitive(Kind::Null))
    }

    /// The shape with any optional wrapper removed
    pub fn required(&self) -> &FieldShape {
        match self {
            FieldShape::Optional(inner) => inner,
            other => other,
        }
    }

    /// Owned variant of [`FieldShape::required`]
    pub fn into_required(self) -> FieldShape {
        match self {
            FieldShape::Optional(inner) => *inner,
            other => other,
        }
    }

    pub fn as_object(&self) -> Option<&Fields> {
        match self.required() {
            FieldShape::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldShape::Primitive(kind) => write!(f, "{}", kind),
            FieldShape::Array(element) => write!(f, "array<{}>", element),
            FieldShape::Optional(inner) => write!(f, "optional<{}>", inner),
            FieldShape::Object(fields) => {
                f.write_str("object{")?;
                for (i, (name, shape)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, shape)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Canonical schema synthesized from a sample
///
/// Created once per inference run and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDescription {
    name: String,
    fields: Fields,
    sample_count: usize,
    optional_fields: IndexSet<String>,
}

impl SchemaDescription {
    pub(crate) fn new(name: impl Into<String>, fields: Fields, sample_count: usize) -> Self {
        let mut optional_fields = IndexSet::new();
        collect_optional_paths(&fields, "", &mut optional_fields);
        Self {
            name: name.into(),
            fields,
            sample_count,
            optional_fields,
        }
    }

    /// Model name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level fields in first-seen order
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Look up a top-level field
    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.get(name)
    }

    /// Number of records examined
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Dotted paths of fields that were sometimes missing or null
    pub fn optional_fields(&self) -> &IndexSet<String> {
        &self.optional_fields
    }

    /// The top-level object shape
    pub fn root(&self) -> FieldShape {
        FieldShape::Object(self.fields.clone())
    }

    /// Same schema under another model name
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Convert to JSON Schema format
    pub fn to_json_schema(&self) -> serde_json::Value {
        let mut schema = serde_json::json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "title": self.name,
        });
        object_to_json_schema(&self.fields, &mut schema);
        schema
    }
}

fn collect_optional_paths(fields: &Fields, prefix: &str, out: &mut IndexSet<String>) {
    for (name, shape) in fields {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        if shape.accepts_missing() {
            out.insert(path.clone());
        }
        if let Some(nested) = shape.as_object() {
            collect_optional_paths(nested, &path, out);
        }
    }
}

fn object_to_json_schema(fields: &Fields, schema: &mut serde_json::Value) {
    schema["type"] = serde_json::json!("object");
    let mut props = serde_json::Map::new();
    let mut required = Vec::new();

    for (name, shape) in fields {
        let mut prop_schema = serde_json::json!({});
        shape_to_json_schema(shape, &mut prop_schema);
        props.insert(name.clone(), prop_schema);

        if !shape.accepts_missing() {
            required.push(serde_json::Value::String(name.clone()));
        }
    }

    schema["properties"] = serde_json::Value::Object(props);
    if !required.is_empty() {
        schema["required"] = serde_json::Value::Array(required);
    }
}

fn shape_to_json_schema(shape: &FieldShape, schema: &mut serde_json::Value) {
    match shape {
        FieldShape::Primitive(kind) => {
            let (type_name, format) = match kind {
                Kind::Null => ("null", None),
                Kind::Bool => ("boolean", None),
                Kind::Int => ("integer", None),
                Kind::Float => ("number", None),
                Kind::String => ("string", None),
                Kind::DateTime => ("string", Some("date-time")),
            };
            schema["type"] = serde_json::json!(type_name);
            if let Some(fmt) = format {
                schema["format"] = serde_json::json!(fmt);
            }
        }
        FieldShape::Array(element) => {
            schema["type"] = serde_json::json!("array");
            let mut items_schema = serde_json::json!({});
            shape_to_json_schema(element, &mut items_schema);
            schema["items"] = items_schema;
        }
        FieldShape::Object(fields) => object_to_json_schema(fields, schema),
        FieldShape::Optional(inner) => {
            let mut inner_schema = serde_json::json!({});
            shape_to_json_schema(inner, &mut inner_schema);
            schema["anyOf"] = serde_json::json!([inner_schema, {"type": "null"}]);
        }
    }
}
