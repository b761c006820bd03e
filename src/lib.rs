//! OpenAPI Type Generator
//!
//! Converts JSON-Schema fragments from OpenAPI documents into an
//! intermediate model of type descriptors, then emits TypeScript type
//! declarations in dependency order: every type is declared before the
//! types that use it, exactly once, even across diamonds and cycles.
//!
//! ## Features
//!
//! - **Rule-based dispatch**: an ordered table of predicate schemas decides
//!   which descriptor variant a fragment becomes; first match wins, unions
//!   before enums before primitive types
//! - **Reference resolution**: pure `$ref` fragments resolve transparently
//!   through a shared context; `$ref` mixed with sibling keys fails hard
//! - **Dependency-first rendering**: a cycle-safe recursive walk reports
//!   each distinct type once, dependencies before dependents
//! - **Structural identity**: de-duplication keys on name + canonical
//!   schema shape, never on reference identity
//!
//! ## Architecture
//!
//! ```text
//! OpenAPI document
//!   └─ Converter ── RuleTable (predicate → kind, compiled lazily)
//!        │              │
//!        │              └─ {Union, Enum, Number, String, Object, Array, Any}
//!        ├─ Context (reference → descriptors, one scope per run)
//!        └─ render_recursive ── callback(descriptor, text) per type,
//!                               dependency-first
//! ```

pub mod config;
pub mod context;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod names;
pub mod render;
pub mod rules;
pub mod schema;

pub use config::TypegenConfig;
pub use context::Context;
pub use convert::Converter;
pub use descriptor::{Descriptor, DescriptorContainer, DescriptorRef, TypeIdentity};
pub use error::{Result, TypegenError};
pub use render::{render_all, render_recursive, VisitedSet};
pub use rules::{DescriptorKind, Rule, RuleTable};
