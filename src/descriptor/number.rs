//! Numeric type descriptor

use crate::descriptor::{Base, Descriptor, DescriptorContainer};
use crate::error::Result;
use crate::rules::DescriptorKind;

/// `type: number` / `type: integer` fragments; both emit `number`
pub struct NumberDescriptor {
    base: Base,
}

impl NumberDescriptor {
    pub(crate) fn new(base: Base) -> Self {
        Self { base }
    }
}

impl Descriptor for NumberDescriptor {
    fn base(&self) -> &Base {
        &self.base
    }

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Number
    }

    fn render(&self, _children: &mut DescriptorContainer, top_level: bool) -> Result<String> {
        Ok(match (top_level, self.base.effective_name()) {
            (true, Some(name)) => self.base.type_alias(name, "number"),
            _ => "number".to_string(),
        })
    }
}
