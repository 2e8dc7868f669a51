//! Walks a [`SchemaGraph`] and synthesizes the class and enum models.

use std::collections::{HashMap, HashSet};

use crate::error::GenerationError;
use crate::graph::SchemaGraph;
use crate::hints::{ClassNameHint, EnumSite, HintDictionary, PropertyNameHint, SynthesizedEnum};
use crate::model::{ClassModel, EnumModel, GeneratedModel, ModelSet, PropertyModel, TypeRef};
use crate::naming::{disambiguate, property_key, to_type_name};
use crate::schema::{NodeId, SchemaKind, SchemaNode, invalid};
use crate::settings::DataModelGeneratorSettings;

const DATE_TIME_FORMAT: &str = "date-time";
const ITEM_SUFFIX: &str = "Item";

/// How the node being mapped was reached; supplies the default name for
/// inline types and the `"Class.Property"` hint key.
#[derive(Debug, Clone)]
struct Site {
    property_key: Option<String>,
    inline_name: String,
}

impl Site {
    fn items(&self) -> Self {
        Self {
            property_key: self.property_key.clone(),
            inline_name: format!("{}{ITEM_SUFFIX}", self.inline_name),
        }
    }
}

/// One generation run. Consumed by [`DataModelGenerator::generate`]; models are
/// buffered and only handed out when the whole walk succeeds.
pub struct DataModelGenerator<'a> {
    graph: &'a SchemaGraph,
    hints: &'a HintDictionary,
    settings: &'a DataModelGeneratorSettings,
    class_names: HashMap<NodeId, String>,
    enum_names: HashMap<NodeId, String>,
    claimed_names: HashMap<String, NodeId>,
    /// Array nodes being mapped since the last class boundary.
    open_arrays: HashSet<NodeId>,
    models: Vec<GeneratedModel>,
}

impl<'a> DataModelGenerator<'a> {
    #[must_use]
    pub fn new(
        graph: &'a SchemaGraph,
        hints: &'a HintDictionary,
        settings: &'a DataModelGeneratorSettings,
    ) -> Self {
        Self {
            graph,
            hints,
            settings,
            class_names: HashMap::new(),
            enum_names: HashMap::new(),
            claimed_names: HashMap::new(),
            open_arrays: HashSet::new(),
            models: Vec::new(),
        }
    }

    /// Synthesize every class and enum reachable from the root, then every root
    /// definition not reached that way.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Configuration` for incomplete settings,
    /// `GenerationError::RootNotObject` when the root is not an object schema,
    /// and any resolution, hint or naming error met during the walk. No models
    /// are returned on failure.
    pub fn generate(mut self) -> Result<ModelSet, GenerationError> {
        self.settings.validate()?;
        let root: NodeId = self.graph.root();
        if self.graph.node(root).kind() != SchemaKind::Object {
            return Err(GenerationError::RootNotObject);
        }
        tracing::info!(
            namespace = %self.settings.namespace_name,
            root_class = %self.settings.root_class_name,
            nodes = self.graph.len(),
            "generating data model"
        );

        let root_site: Site = Site {
            property_key: None,
            inline_name: to_type_name(&self.settings.root_class_name),
        };
        self.class_type(root, &root_site)?;

        let graph: &'a SchemaGraph = self.graph;
        for (name, id) in &graph.node(root).definitions {
            if graph.resolve_node(*id)? != *id {
                // Aliases are synthesized under the definition they point at.
                continue;
            }
            let site: Site = Site {
                property_key: None,
                inline_name: to_type_name(name),
            };
            self.type_ref(*id, &site)?;
        }

        tracing::info!(models = self.models.len(), "generated data model");
        Ok(ModelSet::new(self.models))
    }

    /// Map an already-resolved node to a property type.
    fn type_ref(&mut self, id: NodeId, site: &Site) -> Result<TypeRef, GenerationError> {
        let graph: &'a SchemaGraph = self.graph;
        let node: &'a SchemaNode = graph.node(id);
        let type_ref: TypeRef = match node.kind() {
            SchemaKind::Reference => {
                let target: NodeId = graph.resolve_node(id)?;
                return self.type_ref(target, site);
            }
            SchemaKind::Enum => TypeRef::Enum(self.enum_type(id, site)?),
            SchemaKind::Object => TypeRef::Class(self.class_type(id, site)?),
            SchemaKind::Array => {
                if !self.open_arrays.insert(id) {
                    return Err(invalid(
                        graph.pointer(id),
                        "array items refer back to the array without passing through an object",
                    ));
                }
                let element: TypeRef = match node.items {
                    Some(items) => {
                        let target: NodeId = graph.resolve_node(items)?;
                        self.type_ref(target, &site.items())?
                    }
                    None => TypeRef::Any,
                };
                self.open_arrays.remove(&id);
                TypeRef::Sequence(Box::new(element))
            }
            SchemaKind::String if node.format.as_deref() == Some(DATE_TIME_FORMAT) => {
                TypeRef::DateTime
            }
            SchemaKind::String => TypeRef::String,
            SchemaKind::Integer => TypeRef::Integer,
            SchemaKind::Number => TypeRef::Number,
            SchemaKind::Boolean => TypeRef::Boolean,
            SchemaKind::Null | SchemaKind::Unconstrained => TypeRef::Any,
        };
        Ok(type_ref)
    }

    /// Name of the class for `id`, synthesizing it on first visit. The name is
    /// recorded before properties are walked so recursive references reuse it.
    fn class_type(&mut self, id: NodeId, site: &Site) -> Result<String, GenerationError> {
        if let Some(name) = self.class_names.get(&id) {
            return Ok(name.clone());
        }
        let class_name: String = self.class_name(id, site);
        self.claim(&class_name, id)?;
        self.class_names.insert(id, class_name.clone());

        let graph: &'a SchemaGraph = self.graph;
        let node: &'a SchemaNode = graph.node(id);
        let declared: &'a [(String, NodeId)] = &node.properties;
        let mut names: Vec<String> = Vec::with_capacity(declared.len());
        let mut sites: Vec<Site> = Vec::with_capacity(declared.len());
        for (json_name, _) in declared {
            let default_name: String = to_type_name(json_name);
            let key: String = property_key(&class_name, &default_name);
            let name: String = self
                .hints
                .find::<PropertyNameHint>(&key)
                .map_or_else(|| default_name.clone(), |h| to_type_name(&h.property_name));
            names.push(name);
            sites.push(Site {
                property_key: Some(key),
                inline_name: default_name,
            });
        }

        // Arrays reached from here recurse through this class, which is already named.
        let enclosing_arrays: HashSet<NodeId> = std::mem::take(&mut self.open_arrays);
        let mut properties: Vec<PropertyModel> = Vec::with_capacity(declared.len());
        for (((json_name, child), name), property_site) in
            declared.iter().zip(disambiguate(names)).zip(sites)
        {
            let target: NodeId = graph.resolve_node(*child)?;
            let type_ref: TypeRef = self.type_ref(target, &property_site)?;
            properties.push(PropertyModel {
                name,
                json_name: json_name.clone(),
                type_ref,
                required: node.is_required(json_name),
                description: graph.node(*child).description.clone(),
            });
        }
        self.open_arrays = enclosing_arrays;

        tracing::debug!(class = %class_name, properties = properties.len(), "synthesized class");
        self.models.push(GeneratedModel::Class(ClassModel {
            namespace: self.settings.namespace_name.clone(),
            name: class_name.clone(),
            description: node.description.clone(),
            properties,
            generate_overrides: self.settings.generate_overrides,
        }));
        Ok(class_name)
    }

    fn class_name(&self, id: NodeId, site: &Site) -> String {
        if id == self.graph.root() {
            return site.inline_name.clone();
        }
        let mut keys: Vec<String> = Vec::new();
        let default_name: String = match self.graph.definition_name(id) {
            Some(definition) => {
                keys.push(definition.to_string());
                to_type_name(definition)
            }
            None => {
                keys.extend(site.property_key.clone());
                site.inline_name.clone()
            }
        };
        if !keys.contains(&default_name) {
            keys.push(default_name.clone());
        }
        self.hints
            .find_first::<ClassNameHint>(keys.iter().map(String::as_str))
            .map_or(default_name, |(_, hint)| to_type_name(&hint.type_name))
    }

    /// Name of the enum for `id`, synthesizing it on first visit. A definition
    /// shared by several properties keeps the hint found at its first site.
    fn enum_type(&mut self, id: NodeId, site: &Site) -> Result<String, GenerationError> {
        if let Some(name) = self.enum_names.get(&id) {
            return Ok(name.clone());
        }
        let graph: &'a SchemaGraph = self.graph;
        let node: &'a SchemaNode = graph.node(id);
        let enum_site: EnumSite<'_> = EnumSite {
            property_key: site.property_key.as_deref(),
            definition_name: graph.definition_name(id),
            pointer: graph.pointer(id),
            description: node.description.as_deref(),
            values: node.enum_values.as_deref().unwrap_or_default(),
        };
        let synthesized: SynthesizedEnum = enum_site.synthesize(self.hints)?;
        self.claim(&synthesized.type_name, id)?;
        self.enum_names.insert(id, synthesized.type_name.clone());

        tracing::debug!(
            enumeration = %synthesized.type_name,
            members = synthesized.members.len(),
            "synthesized enum"
        );
        let name: String = synthesized.type_name.clone();
        self.models.push(GeneratedModel::Enum(EnumModel {
            namespace: self.settings.namespace_name.clone(),
            name: synthesized.type_name,
            description: synthesized.description,
            members: synthesized.members,
        }));
        Ok(name)
    }

    fn claim(&mut self, type_name: &str, id: NodeId) -> Result<(), GenerationError> {
        match self.claimed_names.get(type_name) {
            Some(&owner) if owner != id => Err(GenerationError::TypeNameConflict {
                type_name: type_name.to_string(),
                first: describe_pointer(self.graph.pointer(owner)),
                second: describe_pointer(self.graph.pointer(id)),
            }),
            Some(_) => Ok(()),
            None => {
                self.claimed_names.insert(type_name.to_string(), id);
                Ok(())
            }
        }
    }
}

fn describe_pointer(pointer: &str) -> String {
    format!("#{pointer}")
}
