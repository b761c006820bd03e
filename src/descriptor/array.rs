//! Array descriptor
//!
//! The `items` fragment is resolved through the converter at render time;
//! named element types are reported as dependencies and referenced by name,
//! anonymous ones are inlined. A missing or uninterpretable `items` falls
//! back to `any[]`.

use crate::descriptor::{inline_union, Base, Descriptor, DescriptorContainer};
use crate::error::Result;
use crate::names;
use crate::rules::DescriptorKind;

pub struct ArrayDescriptor {
    base: Base,
}

impl ArrayDescriptor {
    pub(crate) fn new(base: Base) -> Self {
        Self { base }
    }

    fn element_expr(&self, children: &mut DescriptorContainer) -> Result<String> {
        let Some(items) = self.base.schema().get("items") else {
            return Ok("any".to_string());
        };
        let scope = self.base.scope()?;
        let path = format!("{}/items", self.base.source_path());
        let suggested = names::suggested_name(self.base.effective_name(), "item");

        match self.base.converter().convert(
            items,
            &scope,
            None,
            Some(&suggested),
            &path,
        )? {
            Some(container) => inline_union(&container, children),
            None => {
                tracing::warn!(path = %path, "array items matched no rule, using any");
                Ok("any".to_string())
            }
        }
    }
}

impl Descriptor for ArrayDescriptor {
    fn base(&self) -> &Base {
        &self.base
    }

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Array
    }

    fn render(&self, children: &mut DescriptorContainer, top_level: bool) -> Result<String> {
        let element = self.element_expr(children)?;
        let expr = if element.contains('|') || element.contains('&') {
            format!("({})[]", element)
        } else {
            format!("{}[]", element)
        };
        Ok(match (top_level, self.base.effective_name()) {
            (true, Some(name)) => self.base.type_alias(name, &expr),
            _ => expr,
        })
    }
}
