//! Arena of schema nodes plus the `$ref` index.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::error::GenerationError;
use crate::json_pointer;
use crate::schema::{NodeId, RawSchema, SchemaKind, SchemaNode, invalid, normalize_description};
use crate::uri_or_fragment::UriOrFragment;

const DEFINITIONS: &str = "definitions";

/// A schema document resolved into an arena of [`SchemaNode`]s.
///
/// The index maps fragment pointers to nodes: `#` for the whole document,
/// `#/definitions/<name>` for each root definition, and
/// `#/definitions/<a>/definitions/<b>` for definitions nested in definitions.
#[derive(Debug, Clone)]
pub struct SchemaGraph {
    nodes: Vec<SchemaNode>,
    pointers: Vec<String>,
    root: NodeId,
    index: BTreeMap<String, NodeId>,
    definition_names: HashMap<NodeId, String>,
}

impl SchemaGraph {
    /// Parse schema text and build the graph.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Json` if the text is not JSON, or any error
    /// from [`SchemaGraph::from_value`].
    pub fn from_json(schema_json: &str) -> Result<Self, GenerationError> {
        let value: serde_json::Value = serde_json::from_str(schema_json)?;
        Self::from_value(&value)
    }

    /// Build the graph from an already-parsed JSON tree.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidSchema` for ill-typed keywords,
    /// `GenerationError::Format` for a malformed `$ref`, and
    /// `GenerationError::DuplicateDefinition` if two definitions share an index key.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, GenerationError> {
        let mut builder: GraphBuilder = GraphBuilder::default();
        let root: NodeId = builder.add_node(value, "", Some("#"))?;
        Ok(Self {
            nodes: builder.nodes,
            pointers: builder.pointers,
            root,
            index: builder.index,
            definition_names: builder.definition_names,
        })
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this graph.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    /// JSON Pointer of the node within the source document (`""` for the root).
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this graph.
    #[must_use]
    pub fn pointer(&self, id: NodeId) -> &str {
        &self.pointers[id.0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index keys in sorted order.
    pub fn index_keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// The raw `definitions` key under which `id` was declared, if any.
    #[must_use]
    pub fn definition_name(&self, id: NodeId) -> Option<&str> {
        self.definition_names.get(&id).map(String::as_str)
    }

    /// Resolve one reference to the node it addresses.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::UnresolvedReference` if the reference is not a
    /// fragment, is not a `#` or `#/definitions/...` pointer, or has no index entry.
    pub fn resolve(&self, reference: &UriOrFragment) -> Result<NodeId, GenerationError> {
        let unresolved = |reason: &str| GenerationError::UnresolvedReference {
            reference: reference.to_string(),
            reason: reason.to_string(),
        };
        if !reference.is_fragment() {
            return Err(unresolved("only document-local fragment references are supported"));
        }
        let segments: Vec<String> = json_pointer::fragment_segments(reference.fragment())
            .ok_or_else(|| unresolved("not a JSON Pointer fragment"))?;
        if !segments.len().is_multiple_of(2) || segments.chunks(2).any(|pair| pair[0] != DEFINITIONS) {
            return Err(unresolved(
                "only \"#\" and \"#/definitions/<name>\" pointers are supported",
            ));
        }
        let mut key: String = "#".to_string();
        for segment in &segments {
            json_pointer::push_segment(&mut key, segment);
        }
        self.index
            .get(&key)
            .copied()
            .ok_or_else(|| unresolved("no such definition"))
    }

    /// Follow `$ref` links from `id` until reaching a node that is not itself a reference.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::UnresolvedReference` for a missing target or a
    /// reference chain that loops back on itself.
    pub fn resolve_node(&self, id: NodeId) -> Result<NodeId, GenerationError> {
        let mut current: NodeId = id;
        let mut seen: HashSet<NodeId> = HashSet::new();
        while let Some(ref reference) = self.node(current).reference {
            if !seen.insert(current) {
                return Err(GenerationError::UnresolvedReference {
                    reference: reference.to_string(),
                    reason: "reference chain loops without reaching a schema".to_string(),
                });
            }
            let target: NodeId = self.resolve(reference)?;
            tracing::trace!(%reference, target = target.index(), "resolved reference");
            current = target;
        }
        Ok(current)
    }

    /// Kind of the node after following references.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaGraph::resolve_node`].
    pub fn resolved_kind(&self, id: NodeId) -> Result<SchemaKind, GenerationError> {
        Ok(self.node(self.resolve_node(id)?).kind())
    }
}

#[derive(Default)]
struct GraphBuilder {
    nodes: Vec<SchemaNode>,
    pointers: Vec<String>,
    index: BTreeMap<String, NodeId>,
    definition_names: HashMap<NodeId, String>,
}

impl GraphBuilder {
    /// Add `value` (found at JSON Pointer `pointer`) and its children. `index_key`
    /// is set for the root and for definitions reachable through definitions only.
    fn add_node(
        &mut self,
        value: &serde_json::Value,
        pointer: &str,
        index_key: Option<&str>,
    ) -> Result<NodeId, GenerationError> {
        let raw: RawSchema = RawSchema::from_value(value, pointer)?;

        let reference: Option<UriOrFragment> = raw
            .reference
            .as_deref()
            .map(UriOrFragment::parse)
            .transpose()?;

        let mut properties: Vec<(String, NodeId)> = Vec::new();
        if let Some(ref props) = raw.properties {
            let props_pointer: String = json_pointer::format(pointer, "properties");
            for (name, child) in props {
                let child_pointer: String = json_pointer::format(&props_pointer, name);
                let child_id: NodeId = self.add_node(child, &child_pointer, None)?;
                properties.push((name.clone(), child_id));
            }
        }

        let items: Option<NodeId> = match raw.items {
            Some(serde_json::Value::Array(_)) => {
                return Err(invalid(pointer, "tuple-typed \"items\" is not supported"));
            }
            Some(ref items_value) => {
                let items_pointer: String = json_pointer::format(pointer, "items");
                Some(self.add_node(items_value, &items_pointer, None)?)
            }
            None => None,
        };

        let mut definitions: Vec<(String, NodeId)> = Vec::new();
        if let Some(ref defs) = raw.definitions {
            let defs_pointer: String = json_pointer::format(pointer, DEFINITIONS);
            for (name, child) in defs {
                let child_pointer: String = json_pointer::format(&defs_pointer, name);
                let child_key: Option<String> = index_key
                    .map(|key| json_pointer::format(&json_pointer::format(key, DEFINITIONS), name));
                let child_id: NodeId =
                    self.add_node(child, &child_pointer, child_key.as_deref())?;
                if let Some(key) = child_key {
                    if self.index.insert(key.clone(), child_id).is_some() {
                        return Err(GenerationError::DuplicateDefinition { pointer: key });
                    }
                    self.definition_names.insert(child_id, name.clone());
                }
                definitions.push((name.clone(), child_id));
            }
        }

        let node: SchemaNode = SchemaNode {
            schema_type: raw.schema_type(pointer)?,
            title: raw.title.clone(),
            description: normalize_description(raw.description.as_ref()),
            enum_values: raw.enum_values(pointer)?,
            properties,
            required: raw
                .required
                .clone()
                .unwrap_or_default()
                .into_iter()
                .collect::<BTreeSet<String>>(),
            items,
            reference,
            definitions,
            format: raw.format.clone(),
        };
        let id: NodeId = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.pointers.push(pointer.to_string());
        if index_key == Some("#") && self.index.insert("#".to_string(), id).is_some() {
            return Err(GenerationError::DuplicateDefinition {
                pointer: "#".to_string(),
            });
        }
        Ok(id)
    }
}
