//! Strict keyword check for `deny_unsupported_keywords` mode.
//!
//! Walks the raw JSON Schema (as `serde_json::Value`) and collects every
//! keyword outside the supported subset, without stopping at the first one.

use crate::error::{GenerationError, SchemaIssue, SchemaIssueKind};
use crate::json_pointer;

/// Keywords the generator reads. `$schema` is accepted and ignored.
const SUPPORTED_KEYWORDS: &[&str] = &[
    "$schema",
    "title",
    "description",
    "type",
    "properties",
    "required",
    "enum",
    "items",
    "definitions",
    "$ref",
    "format",
];

/// Valid JSON Schema keywords the generated model cannot express.
const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "$id",
    "id",
    "$defs",
    "additionalItems",
    "additionalProperties",
    "allOf",
    "anyOf",
    "const",
    "default",
    "dependencies",
    "deprecated",
    "examples",
    "exclusiveMaximum",
    "exclusiveMinimum",
    "maxItems",
    "maxLength",
    "maxProperties",
    "maximum",
    "minItems",
    "minLength",
    "minProperties",
    "minimum",
    "multipleOf",
    "not",
    "oneOf",
    "pattern",
    "patternProperties",
    "propertyNames",
    "readOnly",
    "uniqueItems",
    "writeOnly",
];

/// Check `value` and every nested schema reachable through `properties`,
/// `items` and `definitions`.
///
/// # Errors
///
/// Returns `GenerationError::UnsupportedSchema` carrying every issue found.
pub fn check_supported_keywords(value: &serde_json::Value) -> Result<(), GenerationError> {
    let mut issues: Vec<SchemaIssue> = Vec::new();
    collect_issues(value, "", &mut issues);
    if issues.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = issues.len(), "schema uses unsupported keywords");
        Err(GenerationError::UnsupportedSchema { issues })
    }
}

fn push_issue(issues: &mut Vec<SchemaIssue>, path: &str, keyword: &str, kind: SchemaIssueKind) {
    issues.push(SchemaIssue {
        pointer: path.to_string(),
        keyword: keyword.to_string(),
        kind,
    });
}

fn collect_issues(value: &serde_json::Value, path: &str, issues: &mut Vec<SchemaIssue>) {
    let Some(obj) = value.as_object() else {
        return;
    };

    for (key, val) in obj {
        if SUPPORTED_KEYWORDS.contains(&key.as_str()) {
            match key.as_str() {
                "properties" | "definitions" => {
                    if let Some(children) = val.as_object() {
                        let key_path: String = json_pointer::format(path, key);
                        for (name, child) in children {
                            collect_issues(child, &json_pointer::format(&key_path, name), issues);
                        }
                    }
                }
                "items" => collect_issues(val, &json_pointer::format(path, key), issues),
                _ => {}
            }
        } else if UNSUPPORTED_KEYWORDS.contains(&key.as_str()) {
            push_issue(issues, path, key, SchemaIssueKind::Unsupported);
        } else {
            push_issue(issues, path, key, SchemaIssueKind::Unknown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(value: &serde_json::Value) -> Vec<SchemaIssue> {
        match check_supported_keywords(value) {
            Ok(()) => Vec::new(),
            Err(GenerationError::UnsupportedSchema { issues }) => issues,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn supported_subset_passes() {
        let v = serde_json::json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "type": "object",
            "description": "My class with an enum.",
            "properties": {
                "backgroundColor": { "$ref": "#/definitions/color" },
                "tags": { "type": "array", "items": { "type": "string" } },
                "created": { "type": "string", "format": "date-time" }
            },
            "required": ["tags"],
            "definitions": {
                "color": { "enum": ["red", "yellow", "green"] }
            }
        });
        assert!(check_supported_keywords(&v).is_ok());
    }

    #[test]
    fn unsupported_one_of_at_root() {
        let v = serde_json::json!({
            "type": "object",
            "oneOf": [{ "type": "string" }, { "type": "integer" }]
        });
        assert_eq!(
            vec![SchemaIssue {
                pointer: String::new(),
                keyword: "oneOf".to_string(),
                kind: SchemaIssueKind::Unsupported,
            }],
            issues(&v)
        );
    }

    #[test]
    fn nested_issues_carry_pointers() {
        let v = serde_json::json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "pattern": "^[a-z]+$" },
                "list": { "type": "array", "items": { "type": "integer", "minimum": 0 } }
            },
            "definitions": {
                "a/b": { "type": "string", "colour": "red" }
            }
        });
        let found: Vec<(String, String, SchemaIssueKind)> = issues(&v)
            .into_iter()
            .map(|i| (i.pointer, i.keyword, i.kind))
            .collect::<Vec<(String, String, SchemaIssueKind)>>();
        assert_eq!(
            vec![
                (
                    "/properties/name".to_string(),
                    "pattern".to_string(),
                    SchemaIssueKind::Unsupported
                ),
                (
                    "/properties/list/items".to_string(),
                    "minimum".to_string(),
                    SchemaIssueKind::Unsupported
                ),
                (
                    "/definitions/a~1b".to_string(),
                    "colour".to_string(),
                    SchemaIssueKind::Unknown
                ),
            ],
            found
        );
    }

    #[test]
    fn multiple_issues_collected() {
        let v = serde_json::json!({
            "type": "object",
            "$id": "http://example.com/s",
            "additionalProperties": false,
            "oneOf": []
        });
        let keywords: Vec<String> = issues(&v)
            .into_iter()
            .map(|i| i.keyword)
            .collect::<Vec<String>>();
        assert_eq!(
            vec![
                "$id".to_string(),
                "additionalProperties".to_string(),
                "oneOf".to_string()
            ],
            keywords
        );
    }
}
