//! Example matching the README: a schema with a referenced enum, a recursive
//! definition and an inline enum named by a hint.
//!
//! Rendered Rust is written to stdout.

use std::io;

use json_schema_datamodel::{DataModelGeneratorSettings, ModelSet};

const SCHEMA_JSON: &str = r##"{
  "type": "object",
  "description": "A drawing surface.",
  "required": ["name"],
  "properties": {
    "name": { "type": "string" },
    "backgroundColor": {
      "description": "The color of the background.",
      "$ref": "#/definitions/color"
    },
    "border": { "enum": ["none", "thin", "thick"] },
    "layers": { "type": "array", "items": { "$ref": "#/definitions/layer" } }
  },
  "definitions": {
    "color": {
      "description": "Some pretty colors.",
      "enum": ["red", "yellow", "green"]
    },
    "layer": {
      "type": "object",
      "properties": {
        "opacity": { "type": "number" },
        "parent": { "$ref": "#/definitions/layer" }
      }
    }
  }
}"##;

const HINTS_JSON: &str = r#"{
  "color": [ { "$type": "EnumHint", "zeroValue": "colorless" } ],
  "Canvas.Border": [ { "$type": "EnumHint", "typeName": "BorderStyle" } ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings: DataModelGeneratorSettings = DataModelGeneratorSettings {
        generate_overrides: true,
        ..DataModelGeneratorSettings::new("Drawing", "Canvas")
    };
    let models: ModelSet =
        json_schema_datamodel::generate_from_text(SCHEMA_JSON, Some(HINTS_JSON), &settings)?;
    let mut stdout: io::Stdout = io::stdout();
    json_schema_datamodel::render_to_writer(&models, &settings, &mut stdout)?;
    Ok(())
}
