//! End-to-end enum synthesis: schema text and hint text in, models and Rust source out.

use json_schema_datamodel::{
    ClassModel, DataModelGeneratorSettings, EnumModel, GenerationError, ModelSet, RenderedFile,
    TypeRef, generate_from_text, render_model_set,
};

const INLINE_ENUM_SCHEMA: &str = r#"{
  "type": "object",
  "description": "My class with an enum.",
  "properties": {
    "backgroundColor": {
      "description": "The color of the background.",
      "enum": ["red", "yellow", "green"]
    }
  }
}"#;

const REFERENCED_ENUM_SCHEMA: &str = r##"{
  "type": "object",
  "description": "My class with an enum.",
  "properties": {
    "backgroundColor": {
      "description": "The color of the background.",
      "$ref": "#/definitions/color"
    }
  },
  "definitions": {
    "color": {
      "description": "Some pretty colors.",
      "enum": ["red", "yellow", "green"]
    }
  }
}"##;

const QUALIFIED_ENUM_HINT: &str = "Microsoft.Json.Schema.ToDotNet.Hints.EnumHint, Microsoft.Json.Schema.ToDotNet";

fn settings() -> DataModelGeneratorSettings {
    DataModelGeneratorSettings::new("N", "C")
}

fn member_names(model: &EnumModel) -> Vec<&str> {
    model
        .members
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<&str>>()
}

fn inline_hint(extra: &str) -> String {
    format!(
        r#"{{ "C.BackgroundColor": [ {{ "$type": "{QUALIFIED_ENUM_HINT}", "typeName": "Color", "description": "Some pretty colors."{extra} }} ] }}"#
    )
}

#[test]
fn from_reference() {
    let hints: String = format!(r#"{{ "color": [ {{ "$type": "{QUALIFIED_ENUM_HINT}" }} ] }}"#);
    let models: ModelSet =
        generate_from_text(REFERENCED_ENUM_SCHEMA, Some(&hints), &settings()).expect("generates");

    let class: &ClassModel = models.class("C").expect("root class");
    assert_eq!(Some("My class with an enum."), class.description.as_deref());
    assert_eq!(TypeRef::Enum("Color".to_string()), class.properties[0].type_ref);
    assert_eq!(
        Some("The color of the background."),
        class.properties[0].description.as_deref()
    );

    let color: &EnumModel = models.enumeration("Color").expect("enum");
    assert_eq!(Some("Some pretty colors."), color.description.as_deref());
    assert_eq!(vec!["Red", "Yellow", "Green"], member_names(color));
}

#[test]
fn throws_when_enum_hint_does_not_specify_a_type_name() {
    let hints: String = format!(
        r#"{{ "C.BackgroundColor": [ {{ "$type": "{QUALIFIED_ENUM_HINT}", "description": "Some pretty colors." }} ] }}"#
    );
    let err = generate_from_text(INLINE_ENUM_SCHEMA, Some(&hints), &settings()).unwrap_err();
    assert!(matches!(err, GenerationError::MissingTypeName { .. }), "{err}");
}

#[test]
fn from_inline_definition() {
    let models: ModelSet =
        generate_from_text(INLINE_ENUM_SCHEMA, Some(&inline_hint("")), &settings())
            .expect("generates");
    let color: &EnumModel = models.enumeration("Color").expect("enum");
    assert_eq!(Some("Some pretty colors."), color.description.as_deref());
    assert_eq!(vec!["Red", "Yellow", "Green"], member_names(color));
    assert_eq!(Some("Red"), color.default_member().map(|m| m.name.as_str()));
}

#[test]
fn enum_values_from_hint() {
    let models: ModelSet = generate_from_text(
        INLINE_ENUM_SCHEMA,
        Some(&inline_hint(r#", "enum": ["crimson", "lemon", "avocado"]"#)),
        &settings(),
    )
    .expect("generates");
    let color: &EnumModel = models.enumeration("Color").expect("enum");
    assert_eq!(vec!["Crimson", "Lemon", "Avocado"], member_names(color));
}

#[test]
fn throws_when_hint_enum_count_differs_from_schema() {
    let schema: String = INLINE_ENUM_SCHEMA.replace(
        r#"["red", "yellow", "green"]"#,
        r#"["red", "yellow", "green", "blue"]"#,
    );
    let err = generate_from_text(
        &schema,
        Some(&inline_hint(r#", "enum": ["crimson", "lemon", "avocado"]"#)),
        &settings(),
    )
    .unwrap_err();
    assert!(
        matches!(
            err,
            GenerationError::EnumArityMismatch {
                hint_count: 3,
                schema_count: 4,
                ..
            }
        ),
        "{err}"
    );
}

#[test]
fn zero_value_from_hint() {
    let models: ModelSet = generate_from_text(
        INLINE_ENUM_SCHEMA,
        Some(&inline_hint(
            r#", "enum": ["crimson", "lemon", "avocado"], "zeroValue": "colorless""#,
        )),
        &settings(),
    )
    .expect("generates");
    let color: &EnumModel = models.enumeration("Color").expect("enum");
    assert_eq!(
        vec!["Colorless", "Crimson", "Lemon", "Avocado"],
        member_names(color)
    );
    assert_eq!(None, color.members[0].value);
}

#[test]
fn rendered_enum_keeps_schema_values_on_wire() {
    let models: ModelSet = generate_from_text(
        INLINE_ENUM_SCHEMA,
        Some(&inline_hint(
            r#", "enum": ["crimson", "lemon", "avocado"], "zeroValue": "colorless""#,
        )),
        &settings(),
    )
    .expect("generates");
    let files: Vec<RenderedFile> = render_model_set(&models, &settings()).expect("renders");
    let color: &RenderedFile = files
        .iter()
        .find(|f| f.file_name == "color.rs")
        .expect("color.rs rendered");
    let expected: &str = r#"//! Generated by json-schema-datamodel. Do not edit manually.

use serde::{Deserialize, Serialize};

/// Some pretty colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    #[serde(skip)]
    Colorless,
    #[serde(rename = "red")]
    Crimson,
    #[serde(rename = "yellow")]
    Lemon,
    #[serde(rename = "green")]
    Avocado,
}
"#;
    assert_eq!(expected, color.contents);
}

#[test]
fn malformed_hints_fail_before_the_schema_is_read() {
    let err = generate_from_text("not even json", Some(r#"{ "C": 3 }"#), &settings()).unwrap_err();
    assert!(matches!(err, GenerationError::HintFormat { .. }), "{err}");
}

#[test]
fn enums_need_distinct_string_values() {
    let numeric: &str = r#"{ "type": "object", "definitions": { "level": { "type": "integer", "enum": [1, 2, 3] } } }"#;
    let err = generate_from_text(numeric, None, &settings()).unwrap_err();
    assert!(
        matches!(err, GenerationError::InvalidSchema { ref pointer, .. } if pointer == "/definitions/level"),
        "{err}"
    );

    let repeated: &str = r#"{ "type": "object", "definitions": { "colour": { "enum": ["red", "red"] } } }"#;
    let err = generate_from_text(repeated, None, &settings()).unwrap_err();
    assert!(
        matches!(err, GenerationError::InvalidSchema { ref reason, .. } if reason.contains("duplicate")),
        "{err}"
    );
}
