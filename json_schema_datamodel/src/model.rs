//! The generated object model handed to renderers.

use crate::overrides::{EqualityContract, HashCombiner};

/// Target type of a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Boolean,
    Integer,
    Number,
    String,
    /// `string` with `format: date-time`.
    DateTime,
    /// Unconstrained (`{}`), `null`, or an array without `items`.
    Any,
    Class(String),
    Enum(String),
    Sequence(Box<TypeRef>),
}

impl TypeRef {
    /// The class or enum name this type ultimately refers to, looking through sequences.
    #[must_use]
    pub fn named_type(&self) -> Option<&str> {
        match self {
            Self::Class(name) | Self::Enum(name) => Some(name),
            Self::Sequence(element) => element.named_type(),
            _ => None,
        }
    }

    /// True if values of this type have no total hash (floating-point numbers
    /// and unconstrained values, directly or inside sequences).
    #[must_use]
    pub fn needs_canonical_hash(&self) -> bool {
        match self {
            Self::Number | Self::Any => true,
            Self::Sequence(element) => element.needs_canonical_hash(),
            _ => false,
        }
    }

    fn stable_hash(&self) -> u32 {
        let mut combiner: HashCombiner = HashCombiner::new();
        match self {
            Self::Boolean => combiner.add_str("Boolean"),
            Self::Integer => combiner.add_str("Integer"),
            Self::Number => combiner.add_str("Number"),
            Self::String => combiner.add_str("String"),
            Self::DateTime => combiner.add_str("DateTime"),
            Self::Any => combiner.add_str("Any"),
            Self::Class(name) => combiner.add_str("Class").add_str(name),
            Self::Enum(name) => combiner.add_str("Enum").add_str(name),
            Self::Sequence(element) => combiner.add_str("Sequence").add(element.stable_hash()),
        };
        combiner.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyModel {
    /// `PascalCase` name.
    pub name: String,
    /// Key of the property in JSON documents.
    pub json_name: String,
    pub type_ref: TypeRef,
    pub required: bool,
    pub description: Option<String>,
}

impl PropertyModel {
    fn stable_hash(&self) -> u32 {
        HashCombiner::new()
            .add_str(&self.name)
            .add_str(&self.json_name)
            .add(self.type_ref.stable_hash())
            .add_bool(self.required)
            .add_opt_str(self.description.as_deref())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassModel {
    pub namespace: String,
    pub name: String,
    pub description: Option<String>,
    /// Declared schema order.
    pub properties: Vec<PropertyModel>,
    /// Whether the renderer should emit explicit equality and hash implementations.
    pub generate_overrides: bool,
}

impl ClassModel {
    /// Equality/hash contract for the renderer, when overrides are enabled.
    #[must_use]
    pub fn equality_contract(&self) -> Option<EqualityContract> {
        self.generate_overrides
            .then(|| EqualityContract::for_class(self))
    }

    /// Deterministic, order-sensitive hash over every field (seed 17, multiplier 31).
    /// Equal models always produce the same value, across runs and platforms.
    #[must_use]
    pub fn hash_code(&self) -> u32 {
        let mut combiner: HashCombiner = HashCombiner::new();
        combiner
            .add_str(&self.namespace)
            .add_str(&self.name)
            .add_opt_str(self.description.as_deref());
        for property in &self.properties {
            combiner.add(property.stable_hash());
        }
        combiner.add_bool(self.generate_overrides).finish()
    }
}

/// One enumeration member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumMember {
    /// `PascalCase` member name.
    pub name: String,
    /// The schema `enum` value this member stands for; `None` for the zero sentinel.
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumModel {
    pub namespace: String,
    pub name: String,
    pub description: Option<String>,
    /// The first member is the type's default value.
    pub members: Vec<EnumMember>,
}

impl EnumModel {
    #[must_use]
    pub fn default_member(&self) -> Option<&EnumMember> {
        self.members.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeneratedModel {
    Class(ClassModel),
    Enum(EnumModel),
}

impl GeneratedModel {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Class(class) => &class.name,
            Self::Enum(enumeration) => &enumeration.name,
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            Self::Class(class) => &class.namespace,
            Self::Enum(enumeration) => &enumeration.namespace,
        }
    }

    /// Stem of the file this model should be written to, derived from the type name.
    #[must_use]
    pub fn file_name_stem(&self) -> &str {
        self.name()
    }
}

/// Every model produced by one successful generation run, in synthesis order
/// (a class appears after the nested types it was the first to reference).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSet {
    models: Vec<GeneratedModel>,
}

impl ModelSet {
    pub(crate) const fn new(models: Vec<GeneratedModel>) -> Self {
        Self { models }
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeneratedModel> {
        self.models.iter()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        self.models.iter().filter_map(|m| match m {
            GeneratedModel::Class(class) => Some(class),
            GeneratedModel::Enum(_) => None,
        })
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumModel> {
        self.models.iter().filter_map(|m| match m {
            GeneratedModel::Enum(enumeration) => Some(enumeration),
            GeneratedModel::Class(_) => None,
        })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&GeneratedModel> {
        self.models.iter().find(|m| m.name() == name)
    }

    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassModel> {
        self.classes().find(|c| c.name == name)
    }

    #[must_use]
    pub fn enumeration(&self, name: &str) -> Option<&EnumModel> {
        self.enums().find(|e| e.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    #[must_use]
    pub fn into_models(self) -> Vec<GeneratedModel> {
        self.models
    }
}

impl<'a> IntoIterator for &'a ModelSet {
    type Item = &'a GeneratedModel;
    type IntoIter = std::slice::Iter<'a, GeneratedModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}
