//! Rule Table & Dispatcher
//!
//! An ordered list of (predicate-schema, descriptor kind) pairs. A predicate
//! is itself a JSON Schema that the input fragment must satisfy; the first
//! satisfied predicate wins, so table order IS the disambiguation policy.
//! Union keywords come before `enum`, which comes before the primitive `type`
//! checks, which fall through to a catch-all: a fragment carrying both a
//! `type` and a `oneOf` must dispatch as a union.
//!
//! Predicates are compiled lazily with the `jsonschema` crate and cached in a
//! parallel slot per rule, so each predicate compiles at most once per table
//! lifetime no matter how many fragments are dispatched.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Value};

use crate::error::{Result, TypegenError};

/// The closed set of descriptor variants a fragment can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// `oneOf` / `anyOf` / `allOf` composition
    Union,
    /// Scalar `enum` literals
    Enum,
    /// `type: number` or `type: integer`
    Number,
    /// `type: string`
    String,
    /// `type: object`
    Object,
    /// `type: array`
    Array,
    /// Catch-all for any other object-shaped fragment
    Any,
}

/// One dispatch rule: a declarative predicate schema and the kind it selects.
/// Rules are immutable; the compiled form lives on the owning table.
pub struct Rule {
    pub predicate: Value,
    pub kind: DescriptorKind,
}

/// Ordered rule table with a per-rule compiled-predicate cache
pub struct RuleTable {
    rules: Vec<Rule>,
    compiled: Vec<OnceLock<JSONSchema>>,
    compilations: AtomicUsize,
}

impl RuleTable {
    /// Build a table from rules in priority order
    pub fn new(rules: Vec<Rule>) -> Self {
        let compiled = rules.iter().map(|_| OnceLock::new()).collect();
        Self {
            rules,
            compiled,
            compilations: AtomicUsize::new(0),
        }
    }

    /// The standard dispatch table.
    ///
    /// Order is semantic: `oneOf`, `anyOf`, `allOf` (unions win over
    /// everything), then `enum`, then `type` matches for number/string/
    /// object/array, then a catch-all accepting any object.
    pub fn standard() -> Self {
        Self::new(vec![
            union_rule("oneOf"),
            union_rule("anyOf"),
            union_rule("allOf"),
            Rule {
                predicate: json!({
                    "type": "object",
                    "required": ["enum"],
                    "properties": {
                        "enum": {
                            "type": "array",
                            "items": {
                                "oneOf": [
                                    {"type": "string"},
                                    {"type": "number"},
                                    {"type": "integer"}
                                ]
                            }
                        }
                    },
                    "additionalProperties": true
                }),
                kind: DescriptorKind::Enum,
            },
            typed_rule("(integer|number)", DescriptorKind::Number),
            typed_rule("string", DescriptorKind::String),
            typed_rule("object", DescriptorKind::Object),
            typed_rule("array", DescriptorKind::Array),
            Rule {
                predicate: json!({
                    "type": "object",
                    "additionalProperties": true
                }),
                kind: DescriptorKind::Any,
            },
        ])
    }

    /// Find the kind of the first rule whose predicate accepts `schema`.
    ///
    /// Returns `Ok(None)` when nothing matches; with the standard table that
    /// only happens for non-object inputs, which callers must guard against.
    pub fn find_match(&self, schema: &Value) -> Result<Option<DescriptorKind>> {
        for index in 0..self.rules.len() {
            let validator = self.validator(index)?;
            if validator.is_valid(schema) {
                let kind = self.rules[index].kind;
                tracing::trace!(rule = index, ?kind, "schema matched rule");
                return Ok(Some(kind));
            }
        }
        Ok(None)
    }

    /// Number of rules in the table
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// How many predicate compilations have run so far. Stable once every
    /// rule has been exercised: dispatch never recompiles.
    pub fn predicate_compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }

    fn validator(&self, index: usize) -> Result<&JSONSchema> {
        if let Some(compiled) = self.compiled[index].get() {
            return Ok(compiled);
        }
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&self.rules[index].predicate)
            .map_err(|e| TypegenError::InvalidRule {
                index,
                message: e.to_string(),
            })?;
        self.compilations.fetch_add(1, Ordering::Relaxed);
        // First writer wins; a concurrent loser's artifact is equivalent.
        Ok(self.compiled[index].get_or_init(|| compiled))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn union_rule(keyword: &str) -> Rule {
    Rule {
        predicate: json!({
            "type": "object",
            "required": [keyword],
            "properties": {
                keyword: {
                    "type": "array",
                    "items": {"type": "object"}
                }
            },
            "additionalProperties": true
        }),
        kind: DescriptorKind::Union,
    }
}

fn typed_rule(pattern: &str, kind: DescriptorKind) -> Rule {
    Rule {
        predicate: json!({
            "type": "object",
            "required": ["type"],
            "properties": {
                "type": {"type": "string", "pattern": pattern}
            },
            "additionalProperties": true
        }),
        kind,
    }
}
