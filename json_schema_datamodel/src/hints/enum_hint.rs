use serde::Deserialize;

use super::{Hint, HintDictionary, HintVariant};
use crate::error::GenerationError;
use crate::model::EnumMember;
use crate::naming::{disambiguate, to_member_name, to_type_name};

/// Customizes how a schema's `enum` keyword becomes an enumeration type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnumHint {
    /// Name of the enumeration; required for inline enums.
    #[serde(default)]
    pub type_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Friendly member names, one per schema `enum` value, in the same order.
    #[serde(default, rename = "enum")]
    pub enum_members: Option<Vec<String>>,

    /// Extra sentinel member placed first so it becomes the default value.
    #[serde(default)]
    pub zero_value: Option<String>,
}

impl HintVariant for EnumHint {
    fn from_hint(hint: &Hint) -> Option<&Self> {
        match hint {
            Hint::Enum(h) => Some(h),
            _ => None,
        }
    }
}

/// Where an enum-valued schema node was found.
#[derive(Debug, Clone, Copy)]
pub struct EnumSite<'a> {
    /// `"Class.Property"` when reached through a property.
    pub property_key: Option<&'a str>,
    /// Raw `definitions` key when the node is a definition.
    pub definition_name: Option<&'a str>,
    /// JSON Pointer of the enum node; reported when no property key names the site.
    pub pointer: &'a str,
    /// The enum node's own description.
    pub description: Option<&'a str>,
    /// The schema's `enum` values.
    pub values: &'a [String],
}

/// Name, description and members of an enumeration, ready to become an `EnumModel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedEnum {
    pub type_name: String,
    pub description: Option<String>,
    pub members: Vec<EnumMember>,
}

impl EnumSite<'_> {
    /// Hint keys consulted, most specific first.
    #[must_use]
    pub fn hint_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        if let Some(key) = self.property_key {
            keys.push(key.to_string());
        }
        if let Some(name) = self.definition_name {
            keys.push(name.to_string());
            let type_name: String = to_type_name(name);
            if type_name != name {
                keys.push(type_name);
            }
        }
        keys
    }

    /// Look up the applicable `EnumHint` and synthesize the enumeration.
    ///
    /// # Errors
    ///
    /// See [`EnumSite::apply`].
    pub fn synthesize(&self, hints: &HintDictionary) -> Result<SynthesizedEnum, GenerationError> {
        let keys: Vec<String> = self.hint_keys();
        let hint: Option<&EnumHint> = hints
            .find_first::<EnumHint>(keys.iter().map(String::as_str))
            .map(|(_, hint)| hint);
        self.apply(hint)
    }

    /// Apply `hint` (if any) to this site.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::MissingTypeName` when neither the hint nor a
    /// definition key supplies a name, and `GenerationError::EnumArityMismatch`
    /// when the hint's member list length differs from the schema's `enum`.
    pub fn apply(&self, hint: Option<&EnumHint>) -> Result<SynthesizedEnum, GenerationError> {
        let type_name: String = hint
            .and_then(|h| h.type_name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(to_type_name)
            .or_else(|| self.definition_name.map(to_type_name))
            .ok_or_else(|| GenerationError::MissingTypeName {
                key: self
                    .property_key
                    .map_or_else(|| format!("#{}", self.pointer), str::to_string),
            })?;

        let friendly_names: &[String] = match hint.and_then(|h| h.enum_members.as_deref()) {
            Some(names) if names.len() != self.values.len() => {
                return Err(GenerationError::EnumArityMismatch {
                    type_name,
                    hint_count: names.len(),
                    schema_count: self.values.len(),
                });
            }
            Some(names) => names,
            None => self.values,
        };

        let zero_value: Option<&str> = hint.and_then(|h| h.zero_value.as_deref());
        let mut names: Vec<String> = Vec::with_capacity(friendly_names.len() + 1);
        if let Some(zero) = zero_value {
            names.push(to_member_name(zero));
        }
        names.extend(friendly_names.iter().map(|n| to_member_name(n)));

        let mut values: Vec<Option<String>> = Vec::with_capacity(names.len());
        if zero_value.is_some() {
            values.push(None);
        }
        values.extend(self.values.iter().cloned().map(Some));

        let members: Vec<EnumMember> = disambiguate(names)
            .into_iter()
            .zip(values)
            .map(|(name, value)| EnumMember { name, value })
            .collect();

        let description: Option<String> = hint
            .and_then(|h| h.description.as_deref())
            .or(self.description)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(SynthesizedEnum {
            type_name,
            description,
            members,
        })
    }
}
