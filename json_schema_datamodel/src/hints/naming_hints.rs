use serde::Deserialize;

use super::{Hint, HintVariant};

/// Overrides the name of a synthesized nested or definition class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassNameHint {
    pub type_name: String,
}

impl HintVariant for ClassNameHint {
    fn from_hint(hint: &Hint) -> Option<&Self> {
        match hint {
            Hint::ClassName(h) => Some(h),
            _ => None,
        }
    }
}

/// Overrides the generated name of one property. Keyed `"Class.Property"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PropertyNameHint {
    pub property_name: String,
}

impl HintVariant for PropertyNameHint {
    fn from_hint(hint: &Hint) -> Option<&Self> {
        match hint {
            Hint::PropertyName(h) => Some(h),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::HintDictionary;
    use super::*;
    use crate::error::GenerationError;

    #[test]
    fn class_name_hint_requires_type_name() {
        let err = HintDictionary::deserialize(r#"{ "address": [ { "$type": "ClassNameHint" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, GenerationError::HintFormat { .. }), "{err}");
    }

    #[test]
    fn naming_hints_are_found_by_variant() {
        let hints: HintDictionary = HintDictionary::deserialize(
            r#"{
                "address": [ { "$type": "ClassNameHint", "typeName": "PostalAddress" } ],
                "Person.Dob": [ { "$type": "PropertyNameHint", "propertyName": "DateOfBirth" } ]
            }"#,
        )
        .expect("hints should parse");
        assert_eq!(
            Some("PostalAddress"),
            hints
                .find::<ClassNameHint>("address")
                .map(|h| h.type_name.as_str())
        );
        assert_eq!(None, hints.find::<PropertyNameHint>("address"));
        assert_eq!(
            Some("DateOfBirth"),
            hints
                .find::<PropertyNameHint>("Person.Dob")
                .map(|h| h.property_name.as_str())
        );
    }
}
