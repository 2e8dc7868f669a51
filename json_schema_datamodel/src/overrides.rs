//! Structural equality and hash-code contract for generated classes.
//!
//! The contract is derived from a class's ordered property list; renderers
//! consume it instead of relying on target-language defaults.

use crate::model::{ClassModel, TypeRef};

/// Initial value of every hash combination.
pub const HASH_SEED: u32 = 17;

/// Factor applied to the running hash before adding each field's hash.
pub const HASH_MULTIPLIER: u32 = 31;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Order-sensitive hash accumulator: `result = result * 31 + field_hash`,
/// starting from 17, with wrapping arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCombiner {
    result: u32,
}

impl Default for HashCombiner {
    fn default() -> Self {
        Self::new()
    }
}

impl HashCombiner {
    #[must_use]
    pub const fn new() -> Self {
        Self { result: HASH_SEED }
    }

    pub fn add(&mut self, value: u32) -> &mut Self {
        self.result = self.result.wrapping_mul(HASH_MULTIPLIER).wrapping_add(value);
        self
    }

    pub fn add_str(&mut self, value: &str) -> &mut Self {
        self.add(stable_str_hash(value))
    }

    /// Absent values contribute 0.
    pub fn add_opt_str(&mut self, value: Option<&str>) -> &mut Self {
        self.add(value.map_or(0, stable_str_hash))
    }

    pub fn add_bool(&mut self, value: bool) -> &mut Self {
        self.add(u32::from(value))
    }

    #[must_use]
    pub const fn finish(&self) -> u32 {
        self.result
    }
}

/// 32-bit FNV-1a over UTF-8 bytes; independent of process and platform.
#[must_use]
pub fn stable_str_hash(value: &str) -> u32 {
    value.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// How a member is compared for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Primitive or enum value.
    Value,
    /// Nested class, compared structurally.
    Structural,
    /// Element-wise, in order.
    Sequence,
}

/// How a member feeds the hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashStrategy {
    /// The member's own hash.
    Direct,
    /// Hash a canonical text form; used for members without a total hash.
    Canonical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberContract {
    pub property_name: String,
    pub comparison: Comparison,
    pub hashing: HashStrategy,
    pub required: bool,
}

/// Field-by-field equality and hash combination over a class's properties, in
/// declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqualityContract {
    pub type_name: String,
    pub seed: u32,
    pub multiplier: u32,
    pub members: Vec<MemberContract>,
}

impl EqualityContract {
    #[must_use]
    pub fn for_class(class: &ClassModel) -> Self {
        let members: Vec<MemberContract> = class
            .properties
            .iter()
            .map(|property| MemberContract {
                property_name: property.name.clone(),
                comparison: comparison_for(&property.type_ref),
                hashing: if property.type_ref.needs_canonical_hash() {
                    HashStrategy::Canonical
                } else {
                    HashStrategy::Direct
                },
                required: property.required,
            })
            .collect();
        Self {
            type_name: class.name.clone(),
            seed: HASH_SEED,
            multiplier: HASH_MULTIPLIER,
            members,
        }
    }
}

const fn comparison_for(type_ref: &TypeRef) -> Comparison {
    match type_ref {
        TypeRef::Sequence(_) => Comparison::Sequence,
        TypeRef::Class(_) => Comparison::Structural,
        _ => Comparison::Value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyModel;

    fn property(name: &str, type_ref: TypeRef, required: bool) -> PropertyModel {
        PropertyModel {
            name: name.to_string(),
            json_name: name.to_lowercase(),
            type_ref,
            required,
            description: None,
        }
    }

    #[test]
    fn fnv_matches_reference_values() {
        assert_eq!(0x811c_9dc5, stable_str_hash(""));
        assert_eq!(0xe40c_292c, stable_str_hash("a"));
        assert_eq!(0xbf9c_f968, stable_str_hash("foobar"));
    }

    #[test]
    fn combiner_applies_seed_and_multiplier_in_order() {
        let mut forward: HashCombiner = HashCombiner::new();
        forward.add(1).add(2);
        assert_eq!((17 * 31 + 1) * 31 + 2, forward.finish());

        let mut reversed: HashCombiner = HashCombiner::new();
        reversed.add(2).add(1);
        assert_ne!(forward.finish(), reversed.finish());
    }

    #[test]
    fn contract_follows_declared_property_order() {
        let class: ClassModel = ClassModel {
            namespace: "N".to_string(),
            name: "Shape".to_string(),
            description: None,
            properties: vec![
                property("Kind", TypeRef::Enum("Kind".to_string()), true),
                property("Area", TypeRef::Number, false),
                property(
                    "Points",
                    TypeRef::Sequence(Box::new(TypeRef::Class("Point".to_string()))),
                    true,
                ),
                property("Parent", TypeRef::Class("Shape".to_string()), false),
            ],
            generate_overrides: true,
        };
        let contract: EqualityContract = class.equality_contract().expect("overrides enabled");
        assert_eq!("Shape", contract.type_name);
        assert_eq!((17, 31), (contract.seed, contract.multiplier));
        let summary: Vec<(&str, Comparison, HashStrategy)> = contract
            .members
            .iter()
            .map(|m| (m.property_name.as_str(), m.comparison, m.hashing))
            .collect::<Vec<(&str, Comparison, HashStrategy)>>();
        assert_eq!(
            vec![
                ("Kind", Comparison::Value, HashStrategy::Direct),
                ("Area", Comparison::Value, HashStrategy::Canonical),
                ("Points", Comparison::Sequence, HashStrategy::Direct),
                ("Parent", Comparison::Structural, HashStrategy::Direct),
            ],
            summary
        );
    }

    #[test]
    fn no_contract_without_overrides() {
        let class: ClassModel = ClassModel {
            namespace: "N".to_string(),
            name: "C".to_string(),
            description: None,
            properties: Vec::new(),
            generate_overrides: false,
        };
        assert_eq!(None, class.equality_contract());
    }
}
