//! User-supplied customizations ("hints") that override default type synthesis.
//!
//! A hint document is a JSON object mapping a key to an array of hint records:
//!
//! ```json
//! {
//!   "color": [ { "$type": "EnumHint", "zeroValue": "none" } ],
//!   "C.BackgroundColor": [ { "$type": "EnumHint", "typeName": "Color" } ]
//! }
//! ```
//!
//! Keys address a definition (`"color"`), a synthesized type (`"Color"`) or a
//! single property (`"Class.Property"`). Each record names its variant in the
//! `$type` discriminator; the remaining fields belong to that variant.

mod enum_hint;
mod naming_hints;

pub use enum_hint::{EnumHint, EnumSite, SynthesizedEnum};
pub use naming_hints::{ClassNameHint, PropertyNameHint};

use std::collections::BTreeMap;

use crate::error::GenerationError;

const DISCRIMINATOR: &str = "$type";

/// One hint record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    Enum(EnumHint),
    ClassName(ClassNameHint),
    PropertyName(PropertyNameHint),
}

impl Hint {
    /// Variant name as written in the `$type` discriminator.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Enum(_) => "EnumHint",
            Self::ClassName(_) => "ClassNameHint",
            Self::PropertyName(_) => "PropertyNameHint",
        }
    }

    fn decode(key: &str, record: serde_json::Value) -> Result<Self, GenerationError> {
        let serde_json::Value::Object(mut fields) = record else {
            return Err(hint_error(key, "hint record must be a JSON object"));
        };
        let Some(discriminator) = fields.remove(DISCRIMINATOR) else {
            return Err(hint_error(key, "hint record has no \"$type\""));
        };
        let Some(type_name) = discriminator.as_str() else {
            return Err(hint_error(key, "\"$type\" must be a string"));
        };
        let payload: serde_json::Value = serde_json::Value::Object(fields);
        let decoded: Result<Self, serde_json::Error> = match variant_name(type_name) {
            "EnumHint" => serde_json::from_value(payload).map(Self::Enum),
            "ClassNameHint" => serde_json::from_value(payload).map(Self::ClassName),
            "PropertyNameHint" => serde_json::from_value(payload).map(Self::PropertyName),
            _ => {
                return Err(hint_error(
                    key,
                    &format!("unknown hint type \"{type_name}\""),
                ));
            }
        };
        decoded.map_err(|e| hint_error(key, &e.to_string()))
    }
}

/// Accepts `"EnumHint"` as well as qualified names such as
/// `"Some.Namespace.EnumHint, Some.Assembly"`.
fn variant_name(type_name: &str) -> &str {
    let without_assembly: &str = type_name.split(',').next().unwrap_or(type_name).trim();
    without_assembly
        .rsplit('.')
        .next()
        .unwrap_or(without_assembly)
}

/// Implemented by every hint variant so callers can look hints up by type.
pub trait HintVariant {
    fn from_hint(hint: &Hint) -> Option<&Self>;
}

/// Key -> ordered hint records. Read-only once deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintDictionary {
    entries: BTreeMap<String, Vec<Hint>>,
}

impl HintDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a hint document.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::HintFormat` if the text is not a JSON object of
    /// arrays, a record lacks a `$type`, the `$type` is unknown, or a record has
    /// unknown or ill-typed fields.
    pub fn deserialize(hints_json: &str) -> Result<Self, GenerationError> {
        let value: serde_json::Value =
            serde_json::from_str(hints_json).map_err(|e| hint_error("", &e.to_string()))?;
        let serde_json::Value::Object(map) = value else {
            return Err(hint_error("", "hint document must be a JSON object"));
        };
        let mut dictionary: Self = Self::new();
        for (key, records) in map {
            let serde_json::Value::Array(records) = records else {
                return Err(hint_error(&key, "hints must be given as an array"));
            };
            for (position, record) in records.into_iter().enumerate() {
                let location: String = format!("{key}[{position}]");
                let hint: Hint = Hint::decode(&location, record)?;
                dictionary.insert(&key, hint);
            }
        }
        tracing::debug!(keys = dictionary.entries.len(), "loaded hint dictionary");
        Ok(dictionary)
    }

    /// Append a hint under `key`.
    pub fn insert(&mut self, key: &str, hint: Hint) {
        self.entries.entry(key.to_string()).or_default().push(hint);
    }

    /// Every hint recorded under `key`, in document order. Never fails.
    #[must_use]
    pub fn lookup(&self, key: &str) -> &[Hint] {
        self.entries.get(key).map_or(&[], Vec::as_slice)
    }

    /// The first hint of variant `T` recorded under `key`.
    #[must_use]
    pub fn find<T: HintVariant>(&self, key: &str) -> Option<&T> {
        self.lookup(key).iter().find_map(T::from_hint)
    }

    /// The first hint of variant `T` under the first key that has one.
    #[must_use]
    pub fn find_first<'a, T: HintVariant>(
        &'a self,
        keys: impl IntoIterator<Item = &'a str>,
    ) -> Option<(&'a str, &'a T)> {
        keys.into_iter()
            .find_map(|key| self.find::<T>(key).map(|hint| (key, hint)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn hint_error(key: &str, reason: &str) -> GenerationError {
    GenerationError::HintFormat {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
