use std::path::PathBuf;

use thiserror::Error;

use crate::uri_or_fragment::UriFormatError;

/// Error type for schema graph construction, hint parsing, model synthesis and output.
///
/// Every generation-time variant aborts the whole run; no partial `ModelSet` is returned.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A `$ref` (or schema identity) string is neither a fragment nor a valid URI.
    #[error(transparent)]
    Format(#[from] UriFormatError),

    /// A `$ref` has no matching entry in the schema graph's index.
    #[error("unresolved reference '{reference}': {reason}")]
    UnresolvedReference { reference: String, reason: String },

    /// The hint document is malformed or uses an unknown discriminator.
    #[error("invalid hint document at '{key}': {reason}")]
    HintFormat { key: String, reason: String },

    /// An enum-valued schema has no derivable type name.
    #[error(
        "cannot name the enumeration at '{key}': it is not a definition and no EnumHint supplies \"typeName\""
    )]
    MissingTypeName { key: String },

    /// Hint-supplied member list length disagrees with the schema's `enum` array.
    #[error(
        "EnumHint for '{type_name}' lists {hint_count} member names but the schema enum has {schema_count} values"
    )]
    EnumArityMismatch {
        type_name: String,
        hint_count: usize,
        schema_count: usize,
    },

    /// One or more required settings are missing.
    #[error("invalid settings: missing {}", missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    /// The schema document cannot be read as a schema.
    #[error("invalid schema at '{pointer}': {reason}")]
    InvalidSchema { pointer: String, reason: String },

    /// Two definitions map to the same reference index key.
    #[error("duplicate definition '{pointer}'")]
    DuplicateDefinition { pointer: String },

    /// Two distinct schema nodes would synthesize the same type name.
    #[error("type name '{type_name}' is synthesized from both '{first}' and '{second}'")]
    TypeNameConflict {
        type_name: String,
        first: String,
        second: String,
    },

    /// The root schema does not describe an object.
    #[error("root schema must have type \"object\"")]
    RootNotObject,

    /// Strict mode found keywords outside the supported subset.
    #[error("schema uses unsupported keywords: {}", format_issues(issues))]
    UnsupportedSchema { issues: Vec<SchemaIssue> },

    /// The writer refused to replace existing files.
    #[error("output files already exist (use force overwrite to replace): {}", format_paths(paths))]
    OutputExists { paths: Vec<PathBuf> },

    /// I/O error (reading the schema or hints, writing output files).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON parsing error in the schema document.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A single keyword found by the strict schema check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// JSON Pointer to the offending keyword.
    pub pointer: String,
    pub keyword: String,
    pub kind: SchemaIssueKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaIssueKind {
    /// A known JSON Schema keyword that the model does not support.
    Unsupported,
    /// A keyword that is not part of JSON Schema at all.
    Unknown,
}

fn format_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(|issue| {
            let kind: &str = match issue.kind {
                SchemaIssueKind::Unsupported => "unsupported",
                SchemaIssueKind::Unknown => "unknown",
            };
            let location: &str = if issue.pointer.is_empty() {
                "(root)"
            } else {
                &issue.pointer
            };
            format!("{location}: {kind} keyword \"{}\"", issue.keyword)
        })
        .collect::<Vec<String>>()
        .join("; ")
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<String>>()
        .join(", ")
}
