//! Catch-all descriptor for fragments no other rule claims

use crate::descriptor::{Base, Descriptor, DescriptorContainer};
use crate::error::Result;
use crate::rules::DescriptorKind;

pub struct AnyDescriptor {
    base: Base,
}

impl AnyDescriptor {
    pub(crate) fn new(base: Base) -> Self {
        Self { base }
    }
}

impl Descriptor for AnyDescriptor {
    fn base(&self) -> &Base {
        &self.base
    }

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Any
    }

    fn render(&self, _children: &mut DescriptorContainer, top_level: bool) -> Result<String> {
        Ok(match (top_level, self.base.effective_name()) {
            (true, Some(name)) => self.base.type_alias(name, "any"),
            _ => "any".to_string(),
        })
    }
}
