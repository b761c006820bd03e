//! Type Descriptors
//!
//! A descriptor is the in-memory model of one resolved type: it can render
//! its own declaration text and report the other descriptors that text
//! depends on. Concrete variants form a closed set selected by the rule
//! table: {Number, String, Object, Array, Enum, Union, Any}, all emitting
//! TypeScript.
//!
//! Key constraints:
//! - `render` discovers dependencies through its out-parameter ONLY; the
//!   recursive renderer never inspects schemas itself.
//! - Identity is structural (`TypeIdentity`), never reference-based; it is
//!   the sole de-duplication key during rendering.
//! - Nested fragments are resolved at render time through the context, which
//!   is what lets mutually-referencing models work: by the time anything
//!   renders, every named model is registered.

pub mod any;
pub mod array;
pub mod enumeration;
pub mod number;
pub mod object;
pub mod string;
pub mod union;

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::context::{Context, ContextHandle};
use crate::convert::Converter;
use crate::error::Result;
use crate::rules::DescriptorKind;
use crate::schema;

pub use any::AnyDescriptor;
pub use array::ArrayDescriptor;
pub use enumeration::EnumDescriptor;
pub use number::NumberDescriptor;
pub use object::ObjectDescriptor;
pub use string::StringDescriptor;
pub use union::UnionDescriptor;

/// Shared descriptor handle. The whole model is single-threaded, so `Rc`.
pub type DescriptorRef = Rc<dyn Descriptor>;

/// An ordered union of descriptors for one schema fragment. Order reflects
/// declaration precedence, not dependency order.
pub type DescriptorContainer = Vec<DescriptorRef>;

/// Structural identity of a descriptor: the effective name plus the
/// canonical form of the source fragment. Two descriptors built from
/// equivalent fragments with equivalent names compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeIdentity {
    name: Option<String>,
    shape: String,
}

impl TypeIdentity {
    pub fn new(name: Option<&str>, schema_fragment: &Value) -> Self {
        Self {
            name: name.map(str::to_string),
            shape: schema::canonical_string(schema_fragment),
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", name, self.shape),
            None => write!(f, "<anonymous> {}", self.shape),
        }
    }
}

/// State shared by every descriptor variant
pub struct Base {
    schema: Value,
    converter: Converter,
    context: ContextHandle,
    name: Option<String>,
    suggested_name: Option<String>,
    source_path: String,
}

impl Base {
    pub(crate) fn new(
        schema: Value,
        converter: Converter,
        context: ContextHandle,
        name: Option<&str>,
        suggested_name: Option<&str>,
        source_path: &str,
    ) -> Self {
        Self {
            schema,
            converter,
            context,
            name: name.map(str::to_string),
            suggested_name: suggested_name.map(str::to_string),
            source_path: source_path.to_string(),
        }
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn suggested_name(&self) -> Option<&str> {
        self.suggested_name.as_deref()
    }

    /// Declared name, falling back to the suggested one
    pub fn effective_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.suggested_name.as_deref())
    }

    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    pub(crate) fn converter(&self) -> &Converter {
        &self.converter
    }

    /// The active resolution scope; fails only if the owning context was
    /// dropped before rendering.
    pub(crate) fn scope(&self) -> Result<Context> {
        self.context.upgrade()
    }

    /// Documentation block extracted from the fragment's title/description
    pub fn comments(&self) -> String {
        doc_comment(&self.schema)
    }

    /// Emit `export type Name = expr;` with the comment block when enabled
    pub(crate) fn type_alias(&self, name: &str, expr: &str) -> String {
        let mut out = String::new();
        if self.converter.config().include_comments {
            out.push_str(&self.comments());
        }
        out.push_str(&format!("export type {} = {};", name, expr));
        out
    }
}

/// The contract every concrete descriptor variant satisfies
pub trait Descriptor {
    /// Shared state accessor
    fn base(&self) -> &Base;

    /// Which rule-table variant this descriptor is
    fn kind(&self) -> DescriptorKind;

    /// Produce this type's declaration (top level) or inline expression.
    ///
    /// Every referenced type that needs separate rendering must be appended
    /// to `children`; this is the only channel through which the renderer
    /// discovers the dependency graph.
    fn render(&self, children: &mut DescriptorContainer, top_level: bool) -> Result<String>;

    fn schema(&self) -> &Value {
        self.base().schema()
    }

    fn name(&self) -> Option<&str> {
        self.base().name()
    }

    fn suggested_name(&self) -> Option<&str> {
        self.base().suggested_name()
    }

    fn effective_name(&self) -> Option<&str> {
        self.base().effective_name()
    }

    fn source_path(&self) -> &str {
        self.base().source_path()
    }

    /// The name under which other types reference this descriptor instead of
    /// inlining it. Declared names only by default; hoisted variants (enums)
    /// widen this to their suggested name.
    fn reference_name(&self) -> Option<&str> {
        self.base().name()
    }

    /// Documentation block per the contract: `# title` heading plus blank
    /// line, then the description line by line; empty when neither exists.
    fn comments(&self) -> String {
        self.base().comments()
    }

    /// Structural de-duplication key
    fn identity(&self) -> TypeIdentity {
        TypeIdentity::new(self.effective_name(), self.schema())
    }
}

/// Format a JSDoc block from a fragment's `title`/`description`
pub fn doc_comment(schema_fragment: &Value) -> String {
    let mut lines: Vec<String> = Vec::new();
    if let Some(description) = schema_fragment.get("description").and_then(Value::as_str) {
        lines.extend(description.trim().lines().map(str::to_string));
    }
    if let Some(title) = schema_fragment.get("title").and_then(Value::as_str) {
        lines.insert(0, String::new());
        lines.insert(0, format!("# {}", title));
    }
    if lines.is_empty() {
        return String::new();
    }

    let mut out = String::from("/**\n");
    for line in &lines {
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(&format!(" * {}\n", line));
        }
    }
    out.push_str(" */\n");
    out
}

/// Reference a descriptor by name (recording it as a dependency) or render
/// it inline when it has no referenceable name.
pub(crate) fn reference_or_inline(
    descriptor: &DescriptorRef,
    children: &mut DescriptorContainer,
) -> Result<String> {
    match descriptor.reference_name() {
        Some(name) => {
            children.push(Rc::clone(descriptor));
            Ok(name.to_string())
        }
        None => descriptor.render(children, false),
    }
}

/// Inline a whole container as a union expression, referencing named members
/// and inlining anonymous ones.
pub(crate) fn inline_union(
    container: &DescriptorContainer,
    children: &mut DescriptorContainer,
) -> Result<String> {
    let mut parts = Vec::with_capacity(container.len());
    for descriptor in container {
        parts.push(reference_or_inline(descriptor, children)?);
    }
    Ok(parts.join(" | "))
}
