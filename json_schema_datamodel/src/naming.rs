//! PascalCase normalization for synthesized type, property and member names.

use heck::{ToSnakeCase, ToUpperCamelCase};
use std::collections::BTreeMap;

/// Convert an identifier-like string to a `PascalCase` type or property name.
/// Splits on non-alphanumeric characters and case boundaries; prefixes `T`
/// when the result would be empty or start with a digit.
/// Examples: `"backgroundColor"` -> `"BackgroundColor"`, `"widget_settings"` -> `"WidgetSettings"`
#[must_use]
pub fn to_type_name(s: &str) -> String {
    prefix_if_needed(s.to_upper_camel_case(), 'T')
}

/// Convert an enum value or friendly name to a `PascalCase` member name.
/// Prefixes `E` (short for Enum) if the result is empty or starts with a digit.
#[must_use]
pub fn to_member_name(s: &str) -> String {
    prefix_if_needed(s.to_upper_camel_case(), 'E')
}

/// `snake_case` field name for the Rust renderer; keywords become raw identifiers.
#[must_use]
pub fn to_field_name(s: &str) -> String {
    let snake: String = prefix_if_needed(s.to_snake_case(), '_');
    if is_rust_keyword(&snake) {
        if matches!(snake.as_str(), "self" | "super" | "crate" | "Self") {
            format!("{snake}_")
        } else {
            format!("r#{snake}")
        }
    } else {
        snake
    }
}

/// Key addressing one property in the hint dictionary: `"Class.Property"`.
#[must_use]
pub fn property_key(class_name: &str, property_name: &str) -> String {
    format!("{class_name}.{property_name}")
}

/// Make member names unique while keeping declared order. Colliding names get
/// an ordinal suffix: `["a", "A"]` -> `["A1", "A2"]`.
#[must_use]
pub fn disambiguate(names: Vec<String>) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for name in &names {
        *counts.entry(name.clone()).or_insert(0) += 1;
    }
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    names
        .into_iter()
        .map(|name| {
            if counts.get(&name).copied().unwrap_or(0) > 1 {
                let ordinal: &mut usize = seen.entry(name.clone()).or_insert(0);
                *ordinal += 1;
                format!("{name}{ordinal}")
            } else {
                name
            }
        })
        .collect()
}

fn prefix_if_needed(name: String, prefix: char) -> String {
    if name.is_empty() || name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("{prefix}{name}")
    } else {
        name
    }
}

fn is_rust_keyword(s: &str) -> bool {
    matches!(
        s,
        "as" | "async"
            | "await"
            | "break"
            | "const"
            | "continue"
            | "crate"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "gen"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "Self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "yield"
    )
}
