//! Rust source rendering for a [`ModelSet`].
//!
//! Each model becomes one file named after its type (`snake_case`), and a
//! `mod.rs` index declares and re-exports them all. Types reference each other
//! through `use super::{...}`.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::io::Write;

use crate::error::GenerationError;
use crate::model::{ClassModel, EnumModel, GeneratedModel, ModelSet, TypeRef};
use crate::naming::to_field_name;
use crate::overrides::{EqualityContract, HashStrategy};
use crate::settings::DataModelGeneratorSettings;

const GENERATED_HEADER: &str = "//! Generated by json-schema-datamodel. Do not edit manually.";
const INDEX_FILE_NAME: &str = "mod.rs";

/// One rendered source file, named relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub contents: String,
}

/// Render every model plus the `mod.rs` index, in model-set order.
///
/// # Errors
///
/// Returns `GenerationError::Io` if writing to the in-memory buffer fails.
pub fn render_model_set(
    models: &ModelSet,
    settings: &DataModelGeneratorSettings,
) -> Result<Vec<RenderedFile>, GenerationError> {
    let boxed: HashSet<(String, String)> = boxed_references(models);
    let modules: Vec<(String, &GeneratedModel)> = module_names(models);
    let mut files: Vec<RenderedFile> = Vec::with_capacity(modules.len() + 1);

    for (module, model) in &modules {
        let mut buffer: Vec<u8> = Vec::new();
        match model {
            GeneratedModel::Class(class) => emit_class(class, &boxed, &mut buffer)?,
            GeneratedModel::Enum(enumeration) => emit_enum(enumeration, &mut buffer)?,
        }
        files.push(RenderedFile {
            file_name: format!("{}.rs", module.trim_start_matches("r#")),
            contents: String::from_utf8_lossy(&buffer).into_owned(),
        });
    }

    let mut index: Vec<u8> = Vec::new();
    emit_index(&settings.namespace_name, &modules, &mut index)?;
    files.push(RenderedFile {
        file_name: INDEX_FILE_NAME.to_string(),
        contents: String::from_utf8_lossy(&index).into_owned(),
    });

    tracing::debug!(files = files.len(), "rendered model set");
    Ok(files)
}

/// Render every file into one stream, each preceded by a `// <file name>` line.
///
/// # Errors
///
/// Returns `GenerationError::Io` if writing to `writer` fails.
pub fn render_to_writer<W: Write>(
    models: &ModelSet,
    settings: &DataModelGeneratorSettings,
    writer: &mut W,
) -> Result<(), GenerationError> {
    for (position, file) in render_model_set(models, settings)?.iter().enumerate() {
        if position > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "// {}", file.file_name)?;
        write!(writer, "{}", file.contents)?;
    }
    Ok(())
}

/// Module identifier per model. Identifiers that collide after `snake_case`
/// conversion get a numeric suffix.
fn module_names(models: &ModelSet) -> Vec<(String, &GeneratedModel)> {
    let mut used: HashSet<String> = HashSet::new();
    models
        .iter()
        .map(|model| {
            let base: String = to_field_name(model.file_name_stem());
            let mut module: String = base.clone();
            let mut ordinal: usize = 2;
            while !used.insert(module.clone()) {
                module = format!("{}_{ordinal}", base.trim_start_matches("r#"));
                ordinal += 1;
            }
            (module, model)
        })
        .collect()
}

/// `(owner, target)` pairs of direct class fields that must be boxed because
/// `target` can reach `owner` again without passing through a sequence.
fn boxed_references(models: &ModelSet) -> HashSet<(String, String)> {
    let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
    for class in models.classes() {
        let targets: Vec<&str> = class
            .properties
            .iter()
            .filter_map(|p| match &p.type_ref {
                TypeRef::Class(name) => Some(name.as_str()),
                _ => None,
            })
            .collect();
        edges.insert(class.name.as_str(), targets);
    }

    let mut boxed: HashSet<(String, String)> = HashSet::new();
    for (owner, targets) in &edges {
        for target in targets {
            if reaches(&edges, target, owner) {
                boxed.insert(((*owner).to_string(), (*target).to_string()));
            }
        }
    }
    boxed
}

fn reaches(edges: &HashMap<&str, Vec<&str>>, from: &str, to: &str) -> bool {
    let mut stack: Vec<&str> = vec![from];
    let mut seen: HashSet<&str> = HashSet::new();
    while let Some(current) = stack.pop() {
        if current == to {
            return true;
        }
        if seen.insert(current) {
            stack.extend(edges.get(current).into_iter().flatten().copied());
        }
    }
    false
}

fn rust_type(type_ref: &TypeRef, owner: &str, boxed: &HashSet<(String, String)>) -> String {
    match type_ref {
        TypeRef::Boolean => "bool".to_string(),
        TypeRef::Integer => "i64".to_string(),
        TypeRef::Number => "f64".to_string(),
        TypeRef::String => "String".to_string(),
        TypeRef::DateTime => "chrono::DateTime<chrono::Utc>".to_string(),
        TypeRef::Any => "serde_json::Value".to_string(),
        TypeRef::Class(name) if boxed.contains(&(owner.to_string(), name.clone())) => {
            format!("Box<{name}>")
        }
        TypeRef::Class(name) | TypeRef::Enum(name) => name.clone(),
        TypeRef::Sequence(element) => {
            // Vec already provides the indirection a recursive type needs.
            format!("Vec<{}>", rust_type(element, owner, &HashSet::new()))
        }
    }
}

/// Escape a string for use inside a Rust double-quoted attribute.
fn escape_for_rust_attr(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Emit a doc comment from a description: each line becomes a `///` line.
/// `line_prefix` is prepended to each line (e.g. `""` for types, `"    "` for fields).
fn emit_doc_comment<W: Write>(
    writer: &mut W,
    description: Option<&str>,
    line_prefix: &str,
) -> std::io::Result<()> {
    let Some(desc) = description else {
        return Ok(());
    };
    let trimmed: &str = desc.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    for line in trimmed.lines() {
        let line: &str = line.trim_end();
        if line.is_empty() {
            writeln!(writer, "{line_prefix}///")?;
        } else {
            writeln!(writer, "{line_prefix}/// {line}")?;
        }
    }
    Ok(())
}

fn emit_file_header<W: Write>(writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{GENERATED_HEADER}")?;
    writeln!(writer)?;
    writeln!(writer, "use serde::{{Deserialize, Serialize}};")
}

fn emit_class<W: Write>(
    class: &ClassModel,
    boxed: &HashSet<(String, String)>,
    writer: &mut W,
) -> std::io::Result<()> {
    emit_file_header(writer)?;
    let imports: BTreeSet<&str> = class
        .properties
        .iter()
        .filter_map(|p| p.type_ref.named_type())
        .filter(|name| *name != class.name)
        .collect();
    let imports: Vec<&str> = imports.into_iter().collect::<Vec<&str>>();
    match imports.as_slice() {
        [] => {}
        [single] => writeln!(writer, "use super::{single};")?,
        many => writeln!(writer, "use super::{{{}}};", many.join(", "))?,
    }
    writeln!(writer)?;

    emit_doc_comment(writer, class.description.as_deref(), "")?;
    writeln!(writer, "#[derive(Debug, Clone, Serialize, Deserialize)]")?;
    writeln!(writer, "pub struct {} {{", class.name)?;
    for property in &class.properties {
        let field: String = to_field_name(&property.name);
        emit_doc_comment(writer, property.description.as_deref(), "    ")?;
        if field.trim_start_matches("r#") != property.json_name {
            let escaped: String = escape_for_rust_attr(&property.json_name);
            writeln!(writer, "    #[serde(rename = \"{escaped}\")]")?;
        }
        let ty: String = rust_type(&property.type_ref, &class.name, boxed);
        if property.required {
            writeln!(writer, "    pub {field}: {ty},")?;
        } else {
            writeln!(
                writer,
                "    #[serde(default, skip_serializing_if = \"Option::is_none\")]"
            )?;
            writeln!(writer, "    pub {field}: Option<{ty}>,")?;
        }
    }
    writeln!(writer, "}}")?;

    if let Some(contract) = class.equality_contract() {
        writeln!(writer)?;
        emit_equality(&contract, writer)?;
        writeln!(writer)?;
        emit_hash(&contract, writer)?;
    }
    Ok(())
}

fn emit_equality<W: Write>(contract: &EqualityContract, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "impl PartialEq for {} {{", contract.type_name)?;
    if contract.members.is_empty() {
        writeln!(writer, "    fn eq(&self, _other: &Self) -> bool {{")?;
        writeln!(writer, "        true")?;
    } else {
        writeln!(writer, "    fn eq(&self, other: &Self) -> bool {{")?;
        for (position, member) in contract.members.iter().enumerate() {
            let field: String = to_field_name(&member.property_name);
            if position == 0 {
                writeln!(writer, "        self.{field} == other.{field}")?;
            } else {
                writeln!(writer, "            && self.{field} == other.{field}")?;
            }
        }
    }
    writeln!(writer, "    }}")?;
    writeln!(writer, "}}")
}

fn emit_hash<W: Write>(contract: &EqualityContract, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "impl std::hash::Hash for {} {{", contract.type_name)?;
    writeln!(
        writer,
        "    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {{"
    )?;
    writeln!(writer, "        state.write_u32({});", contract.seed)?;
    for member in &contract.members {
        let field: String = to_field_name(&member.property_name);
        match member.hashing {
            HashStrategy::Direct => {
                writeln!(writer, "        std::hash::Hash::hash(&self.{field}, state);")?;
            }
            HashStrategy::Canonical => {
                writeln!(
                    writer,
                    "        std::hash::Hash::hash(&format!(\"{{:?}}\", self.{field}), state);"
                )?;
            }
        }
    }
    writeln!(writer, "    }}")?;
    writeln!(writer, "}}")
}

fn emit_enum<W: Write>(enumeration: &EnumModel, writer: &mut W) -> std::io::Result<()> {
    emit_file_header(writer)?;
    writeln!(writer)?;
    emit_doc_comment(writer, enumeration.description.as_deref(), "")?;
    writeln!(
        writer,
        "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]"
    )?;
    writeln!(writer, "pub enum {} {{", enumeration.name)?;
    for (position, member) in enumeration.members.iter().enumerate() {
        if position == 0 {
            writeln!(writer, "    #[default]")?;
        }
        match member.value {
            Some(ref value) => {
                let escaped: String = escape_for_rust_attr(value);
                writeln!(writer, "    #[serde(rename = \"{escaped}\")]")?;
            }
            None => writeln!(writer, "    #[serde(skip)]")?,
        }
        writeln!(writer, "    {},", member.name)?;
    }
    writeln!(writer, "}}")
}

fn emit_index<W: Write>(
    namespace: &str,
    modules: &[(String, &GeneratedModel)],
    writer: &mut W,
) -> std::io::Result<()> {
    writeln!(writer, "{GENERATED_HEADER}")?;
    writeln!(writer, "//!")?;
    writeln!(writer, "//! Data model for namespace `{namespace}`.")?;
    writeln!(writer)?;
    for (module, _) in modules {
        writeln!(writer, "mod {module};")?;
    }
    if !modules.is_empty() {
        writeln!(writer)?;
    }
    for (module, model) in modules {
        writeln!(writer, "pub use {module}::{};", model.name())?;
    }
    Ok(())
}
