//! Schema tree helpers
//!
//! Input schemas are untyped JSON trees (`serde_json::Value`) following
//! JSON-Schema conventions. This module holds the read-only accessors the
//! converter and the descriptors share: `$ref` detection, JSON-pointer
//! section lookup, and canonical stringification for structural identity.

use serde_json::Value;

/// The `$ref` target of a schema fragment, if the fragment carries one
/// and it is a string.
pub fn ref_target(schema: &Value) -> Option<&str> {
    schema.get("$ref")?.as_str()
}

/// True when `$ref` is the only key of the fragment. Pure references are
/// transparent aliases: resolving them yields already-known descriptors.
pub fn is_pure_ref(schema: &Value) -> bool {
    schema
        .as_object()
        .is_some_and(|object| object.len() == 1 && object.contains_key("$ref"))
}

/// Look up a document section by pointer, accepting the `#/components/schemas`
/// spelling used in `$ref` values (the leading `#` is stripped).
pub fn section<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    document.pointer(pointer.trim_start_matches('#'))
}

/// Deterministic stringification of a schema fragment.
///
/// serde_json keeps object keys sorted, so `to_string` already yields a
/// canonical form: structurally equal fragments stringify identically.
pub fn canonical_string(schema: &Value) -> String {
    schema.to_string()
}
