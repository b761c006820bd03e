//! Identifier handling for emitted TypeScript
//!
//! Canonical type names are PascalCase; property keys that are not valid
//! identifiers are emitted quoted. Suggested names for hoisted anonymous
//! types are synthesized from the owning type's name plus the property key.

use std::sync::OnceLock;

use regex::Regex;

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid pattern"))
}

/// Convert to PascalCase, splitting on any non-alphanumeric character
pub fn pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if !c.is_ascii_alphanumeric() {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Whether `s` can be emitted bare as a TypeScript identifier
pub fn is_identifier(s: &str) -> bool {
    identifier_pattern().is_match(s)
}

/// Render a property key for an interface field: bare when it is a valid
/// identifier, single-quoted otherwise.
pub fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        format!("'{}'", key.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// Synthesize a name for an anonymous fragment that may need hoisting to a
/// named declaration: the owning type's name followed by the PascalCase key.
pub fn suggested_name(parent: Option<&str>, key: &str) -> String {
    format!("{}{}", parent.unwrap_or(""), pascal_case(key))
}
