//! Resolution context
//!
//! Maps reference strings (`#/components/schemas/User`) to the descriptor
//! containers already produced for them within one conversion run. The scope
//! grows monotonically: entries are registered and resolved, never removed.
//! One context may be shared across multiple `convert` calls to let schemas
//! reference each other.
//!
//! The context is a cheap-clone handle (`Rc` inside); descriptors keep a weak
//! handle back to it, since the named descriptors themselves live inside the
//! map and a strong handle both ways would keep the whole run alive forever.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::descriptor::DescriptorContainer;
use crate::error::{Result, TypegenError};

type ModelMap = HashMap<String, DescriptorContainer>;

/// Name-to-descriptor resolution scope for one conversion run
#[derive(Clone, Default)]
pub struct Context {
    models: Rc<RefCell<ModelMap>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the descriptors produced for a reference
    pub fn register(&self, reference: impl Into<String>, container: DescriptorContainer) {
        self.models.borrow_mut().insert(reference.into(), container);
    }

    /// Resolve a reference to its already-known descriptors. The returned
    /// container shares the registered descriptors (no new ones are built).
    pub fn resolve(&self, reference: &str) -> Option<DescriptorContainer> {
        self.models.borrow().get(reference).cloned()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.models.borrow().contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.models.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.borrow().is_empty()
    }

    pub(crate) fn downgrade(&self) -> ContextHandle {
        ContextHandle {
            models: Rc::downgrade(&self.models),
        }
    }
}

/// Weak handle stored on descriptors; upgraded at render time
#[derive(Clone)]
pub struct ContextHandle {
    models: Weak<RefCell<ModelMap>>,
}

impl ContextHandle {
    pub(crate) fn upgrade(&self) -> Result<Context> {
        self.models
            .upgrade()
            .map(|models| Context { models })
            .ok_or(TypegenError::ContextReleased)
    }
}
