//! String type descriptor

use crate::descriptor::{Base, Descriptor, DescriptorContainer};
use crate::error::Result;
use crate::rules::DescriptorKind;

pub struct StringDescriptor {
    base: Base,
}

impl StringDescriptor {
    pub(crate) fn new(base: Base) -> Self {
        Self { base }
    }
}

impl Descriptor for StringDescriptor {
    fn base(&self) -> &Base {
        &self.base
    }

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::String
    }

    fn render(&self, _children: &mut DescriptorContainer, top_level: bool) -> Result<String> {
        Ok(match (top_level, self.base.effective_name()) {
            (true, Some(name)) => self.base.type_alias(name, "string"),
            _ => "string".to_string(),
        })
    }
}
