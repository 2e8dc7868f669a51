//! Synthesize a typed object model (classes, enumerations, properties) from a
//! JSON Schema document, customized by a side-channel hint dictionary, and
//! render it as Rust source.
//!
//! The pipeline is: schema text -> [`SchemaGraph`] -> [`DataModelGenerator`]
//! (consulting a [`HintDictionary`]) -> [`ModelSet`] -> rendered files.

mod error;
mod generator;
mod graph;
mod hints;
mod json_pointer;
mod model;
mod naming;
mod overrides;
mod render;
mod schema;
mod settings;
mod uri_or_fragment;
mod validate;
mod writer;

pub use error::{GenerationError, SchemaIssue, SchemaIssueKind};
pub use generator::DataModelGenerator;
pub use graph::SchemaGraph;
pub use hints::{
    ClassNameHint, EnumHint, EnumSite, Hint, HintDictionary, HintVariant, PropertyNameHint,
    SynthesizedEnum,
};
pub use model::{
    ClassModel, EnumMember, EnumModel, GeneratedModel, ModelSet, PropertyModel, TypeRef,
};
pub use overrides::{
    Comparison, EqualityContract, HASH_MULTIPLIER, HASH_SEED, HashCombiner, HashStrategy,
    MemberContract, stable_str_hash,
};
pub use render::{RenderedFile, render_model_set, render_to_writer};
pub use schema::{NodeId, SchemaKind, SchemaNode, SchemaType};
pub use settings::{DEFAULT_OUTPUT_DIRECTORY, DataModelGeneratorSettings};
pub use uri_or_fragment::{UriFormatError, UriOrFragment, UriReference};
pub use validate::check_supported_keywords;
pub use writer::write_files;

use std::path::PathBuf;

/// Generate the model set for a schema document.
///
/// Settings are validated first, then the hints are parsed (so a malformed hint
/// document fails before any traversal), then the graph is built and walked.
///
/// # Errors
///
/// Returns the first `GenerationError` met; no partial model set is returned.
pub fn generate_from_text(
    schema_json: &str,
    hints_json: Option<&str>,
    settings: &DataModelGeneratorSettings,
) -> Result<ModelSet, GenerationError> {
    settings.validate()?;
    let hints: HintDictionary = match hints_json {
        Some(text) => HintDictionary::deserialize(text)?,
        None => HintDictionary::new(),
    };
    let value: serde_json::Value = serde_json::from_str(schema_json)?;
    if settings.deny_unsupported_keywords {
        check_supported_keywords(&value)?;
    }
    let graph: SchemaGraph = SchemaGraph::from_value(&value)?;
    DataModelGenerator::new(&graph, &hints, settings).generate()
}

/// Generate, render and write the model set into `settings.output_directory`.
/// Nothing is written unless generation and rendering both succeed.
///
/// # Errors
///
/// Any error from [`generate_from_text`], [`render_model_set`] or [`write_files`].
pub fn generate_to_directory(
    schema_json: &str,
    hints_json: Option<&str>,
    settings: &DataModelGeneratorSettings,
) -> Result<Vec<PathBuf>, GenerationError> {
    let models: ModelSet = generate_from_text(schema_json, hints_json, settings)?;
    let files: Vec<RenderedFile> = render_model_set(&models, settings)?;
    write_files(&files, &settings.output_directory, settings.force_overwrite)
}
