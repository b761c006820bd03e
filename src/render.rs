//! Recursive dependency-ordered rendering
//!
//! Produces a total order over a possibly cyclic, possibly diamond-shaped
//! graph of descriptors such that every descriptor is reported after the
//! descriptors it depends on, each exactly once.
//!
//! The algorithm, per container, in container order:
//! 1. Skip a descriptor whose identity is already in the visited set.
//! 2. Mark it visited BEFORE exploring its children: this is what makes
//!    cyclic graphs safe: a child that transitively depends back on it sees
//!    the mark and skips instead of re-entering.
//! 3. Render it, collecting its direct dependencies through the render
//!    out-parameter.
//! 4. Recurse into the not-yet-visited children with the SAME visited set,
//!    so de-duplication holds across sibling subtrees, not just one branch.
//! 5. Report the descriptor to the callback AFTER the recursion returns, so
//!    dependencies always reach the callback first.
//!
//! Termination: the visited set only grows and the universe of distinct
//! identities in one run is finite. Failures inside a descriptor's render
//! are not caught here; they abort the whole batch and no further callbacks
//! fire.

use std::collections::HashSet;

use crate::descriptor::{Descriptor, DescriptorContainer, DescriptorRef, TypeIdentity};
use crate::error::Result;

/// The set of identities already rendered (or currently being rendered).
/// Passed by mutable borrow through the whole traversal, never copied;
/// copying would break cross-branch de-duplication.
#[derive(Default)]
pub struct VisitedSet {
    seen: HashSet<TypeIdentity>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an identity; returns false when it was already present
    pub fn insert(&mut self, identity: TypeIdentity) -> bool {
        self.seen.insert(identity)
    }

    pub fn contains(&self, identity: &TypeIdentity) -> bool {
        self.seen.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Render a batch of roots with a fresh visited set
pub fn render_all<F>(roots: &DescriptorContainer, mut on_rendered: F) -> Result<()>
where
    F: FnMut(&DescriptorRef, &str),
{
    let mut visited = VisitedSet::new();
    render_recursive(roots, &mut on_rendered, &mut visited)
}

/// Render `roots` and, recursively, everything they depend on,
/// dependency-first, reporting each distinct type exactly once.
pub fn render_recursive<F>(
    roots: &DescriptorContainer,
    on_rendered: &mut F,
    visited: &mut VisitedSet,
) -> Result<()>
where
    F: FnMut(&DescriptorRef, &str),
{
    for descriptor in roots {
        if !visited.insert(descriptor.identity()) {
            continue;
        }

        let mut children = DescriptorContainer::new();
        let text = descriptor.render(&mut children, true)?;

        let pending: DescriptorContainer = children
            .into_iter()
            .filter(|child| !visited.contains(&child.identity()))
            .collect();
        render_recursive(&pending, on_rendered, visited)?;

        tracing::debug!(
            type_name = descriptor.effective_name().unwrap_or("<anonymous>"),
            "rendered"
        );
        on_rendered(descriptor, &text);
    }
    Ok(())
}
