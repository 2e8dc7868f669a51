use serde::Deserialize;
use std::collections::BTreeSet;

use crate::error::GenerationError;
use crate::uri_or_fragment::UriOrFragment;

/// Identity of a node inside a [`crate::SchemaGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Value of the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

impl SchemaType {
    fn parse(s: &str) -> Option<Self> {
        let ty: Self = match s {
            "object" => Self::Object,
            "array" => Self::Array,
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "null" => Self::Null,
            _ => return None,
        };
        Some(ty)
    }
}

/// How the generator treats a node, derived from its keywords.
/// `$ref` wins over `enum`, which wins over `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    Reference,
    Enum,
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
    Unconstrained,
}

/// Parsed schema element. Immutable once the graph is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    pub schema_type: Option<SchemaType>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// `enum` values as strings; non-string JSON values keep their JSON text.
    pub enum_values: Option<Vec<String>>,
    /// Declared order is preserved.
    pub properties: Vec<(String, NodeId)>,
    pub required: BTreeSet<String>,
    pub items: Option<NodeId>,
    pub reference: Option<UriOrFragment>,
    pub definitions: Vec<(String, NodeId)>,
    pub format: Option<String>,
}

impl SchemaNode {
    #[must_use]
    pub fn kind(&self) -> SchemaKind {
        if self.reference.is_some() {
            return SchemaKind::Reference;
        }
        if self.enum_values.is_some() {
            return SchemaKind::Enum;
        }
        match self.schema_type {
            Some(SchemaType::Object) => SchemaKind::Object,
            Some(SchemaType::Array) => SchemaKind::Array,
            Some(SchemaType::String) => SchemaKind::String,
            Some(SchemaType::Integer) => SchemaKind::Integer,
            Some(SchemaType::Number) => SchemaKind::Number,
            Some(SchemaType::Boolean) => SchemaKind::Boolean,
            Some(SchemaType::Null) => SchemaKind::Null,
            None if !self.properties.is_empty() => SchemaKind::Object,
            None => SchemaKind::Unconstrained,
        }
    }

    #[must_use]
    pub fn is_required(&self, property_name: &str) -> bool {
        self.required.contains(property_name)
    }
}

/// Keywords of one schema object as they appear in the document. Child schemas
/// stay as raw values so the graph builder can assign them arena ids.
///
/// Only the keywords used by the generator are modeled; other keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSchema {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub r#type: Option<String>,

    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,

    #[serde(default)]
    pub required: Option<Vec<String>>,

    #[serde(default)]
    pub r#enum: Option<Vec<serde_json::Value>>,

    #[serde(default)]
    pub items: Option<serde_json::Value>,

    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,

    #[serde(default)]
    pub definitions: Option<serde_json::Map<String, serde_json::Value>>,

    #[serde(default)]
    pub format: Option<String>,
}

impl RawSchema {
    pub(crate) fn from_value(
        value: &serde_json::Value,
        pointer: &str,
    ) -> Result<Self, GenerationError> {
        if !value.is_object() {
            return Err(invalid(pointer, "schema must be a JSON object"));
        }
        Self::deserialize(value).map_err(|e| invalid(pointer, &e.to_string()))
    }

    pub(crate) fn schema_type(&self, pointer: &str) -> Result<Option<SchemaType>, GenerationError> {
        self.r#type
            .as_deref()
            .map(|t| {
                SchemaType::parse(t)
                    .ok_or_else(|| invalid(pointer, &format!("unsupported type \"{t}\"")))
            })
            .transpose()
    }

    pub(crate) fn enum_values(&self, pointer: &str) -> Result<Option<Vec<String>>, GenerationError> {
        let Some(ref values) = self.r#enum else {
            return Ok(None);
        };
        if values.is_empty() {
            return Err(invalid(pointer, "enum must have at least one value"));
        }
        let mut result: Vec<String> = Vec::with_capacity(values.len());
        for value in values {
            let serde_json::Value::String(s) = value else {
                return Err(invalid(
                    pointer,
                    &format!("enum values must be strings, found {value}"),
                ));
            };
            if result.contains(s) {
                return Err(invalid(pointer, &format!("duplicate enum value \"{s}\"")));
            }
            result.push(s.clone());
        }
        Ok(Some(result))
    }
}

/// Normalize description: trim and treat empty/whitespace as None.
pub(crate) fn normalize_description(s: Option<&String>) -> Option<String> {
    s.as_ref().and_then(|t| {
        let trimmed: &str = t.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub(crate) fn invalid(pointer: &str, reason: &str) -> GenerationError {
    GenerationError::InvalidSchema {
        pointer: pointer.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> SchemaNode {
        SchemaNode {
            schema_type: None,
            title: None,
            description: None,
            enum_values: None,
            properties: Vec::new(),
            required: BTreeSet::new(),
            items: None,
            reference: None,
            definitions: Vec::new(),
            format: None,
        }
    }

    #[test]
    fn reference_wins_over_enum_and_type() {
        let mut n: SchemaNode = node();
        n.schema_type = Some(SchemaType::String);
        n.enum_values = Some(vec!["a".to_string()]);
        n.reference = Some(UriOrFragment::parse("#/definitions/a").expect("valid fragment"));
        assert_eq!(SchemaKind::Reference, n.kind());
    }

    #[test]
    fn enum_wins_over_type() {
        let mut n: SchemaNode = node();
        n.schema_type = Some(SchemaType::String);
        n.enum_values = Some(vec!["a".to_string()]);
        assert_eq!(SchemaKind::Enum, n.kind());
    }

    #[test]
    fn untyped_node_with_properties_is_object() {
        let mut n: SchemaNode = node();
        n.properties.push(("a".to_string(), NodeId(0)));
        assert_eq!(SchemaKind::Object, n.kind());
        assert_eq!(SchemaKind::Unconstrained, node().kind());
    }

    #[test]
    fn raw_schema_rejects_type_arrays() {
        let value = serde_json::json!({ "type": ["string", "null"] });
        let err = RawSchema::from_value(&value, "/properties/a").unwrap_err();
        assert!(
            matches!(err, GenerationError::InvalidSchema { ref pointer, .. } if pointer == "/properties/a"),
            "{err}"
        );
    }

    #[test]
    fn raw_schema_rejects_unknown_type_name() {
        let value = serde_json::json!({ "type": "text" });
        let raw: RawSchema = RawSchema::from_value(&value, "").expect("keywords are well-typed");
        assert!(raw.schema_type("").is_err());
    }

    #[test]
    fn enum_values_must_be_strings() {
        let value = serde_json::json!({ "type": "integer", "enum": [1, 2, 3] });
        let raw: RawSchema = RawSchema::from_value(&value, "/definitions/level")
            .expect("keywords are well-typed");
        let err = raw.enum_values("/definitions/level").unwrap_err();
        assert!(
            matches!(err, GenerationError::InvalidSchema { ref pointer, ref reason }
                if pointer == "/definitions/level" && reason.contains("strings")),
            "{err}"
        );
    }

    #[test]
    fn duplicate_enum_values_are_rejected() {
        let value = serde_json::json!({ "enum": ["red", "green", "red"] });
        let raw: RawSchema = RawSchema::from_value(&value, "/definitions/colour")
            .expect("keywords are well-typed");
        let err = raw.enum_values("/definitions/colour").unwrap_err();
        assert_eq!(
            "invalid schema at '/definitions/colour': duplicate enum value \"red\"",
            err.to_string()
        );
    }

    #[test]
    fn string_enum_values_keep_declared_order() {
        let value = serde_json::json!({ "enum": ["b", "a"] });
        let raw: RawSchema = RawSchema::from_value(&value, "").expect("keywords are well-typed");
        assert_eq!(
            Some(vec!["b".to_string(), "a".to_string()]),
            raw.enum_values("").expect("string values")
        );
    }

    #[test]
    fn normalize_description_trims_and_drops_blank() {
        assert_eq!(
            Some("text".to_string()),
            normalize_description(Some(&"  text \n".to_string()))
        );
        assert_eq!(None, normalize_description(Some(&"   ".to_string())));
        assert_eq!(None, normalize_description(None));
    }
}
