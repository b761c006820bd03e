//! Enum descriptor
//!
//! Scalar `enum` fragments render as a union of literals. Anonymous enums
//! carrying a suggested name are *hoisted*: they report themselves under
//! that name, so parents reference the name and the renderer emits the
//! declaration separately.

use serde_json::Value;

use crate::descriptor::{Base, Descriptor, DescriptorContainer};
use crate::error::{Result, TypegenError};
use crate::rules::DescriptorKind;

pub struct EnumDescriptor {
    base: Base,
}

impl EnumDescriptor {
    pub(crate) fn new(base: Base) -> Self {
        Self { base }
    }

    fn literals(&self) -> Result<String> {
        let values = self
            .base
            .schema()
            .get("enum")
            .and_then(Value::as_array)
            .ok_or_else(|| TypegenError::MalformedSchema {
                path: self.base.source_path().to_string(),
                detail: "enum keyword must hold an array".to_string(),
            })?;

        let mut parts = Vec::with_capacity(values.len());
        for value in values {
            let literal = match value {
                Value::String(s) => {
                    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
                }
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(TypegenError::MalformedSchema {
                        path: self.base.source_path().to_string(),
                        detail: format!("enum values must be strings or numbers, got {}", other),
                    })
                }
            };
            parts.push(literal);
        }
        Ok(parts.join(" | "))
    }
}

impl Descriptor for EnumDescriptor {
    fn base(&self) -> &Base {
        &self.base
    }

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Enum
    }

    // Hoisting: a suggested name is enough to reference an enum by name
    fn reference_name(&self) -> Option<&str> {
        self.base.effective_name()
    }

    fn render(&self, _children: &mut DescriptorContainer, top_level: bool) -> Result<String> {
        let expr = self.literals()?;
        Ok(match (top_level, self.base.effective_name()) {
            (true, Some(name)) => self.base.type_alias(name, &expr),
            _ => expr,
        })
    }
}
