//! Union descriptor
//!
//! Handles `oneOf` / `anyOf` / `allOf` compositions. Members are converted
//! through the converter at render time; named members are reported as
//! dependencies and referenced by name. `oneOf`/`anyOf` join with `|`,
//! `allOf` with `&`.

use serde_json::Value;

use crate::descriptor::{inline_union, Base, Descriptor, DescriptorContainer};
use crate::error::{Result, TypegenError};
use crate::names;
use crate::rules::DescriptorKind;

const COMPOSITE_KEYWORDS: [(&str, &str); 3] =
    [("oneOf", " | "), ("anyOf", " | "), ("allOf", " & ")];

pub struct UnionDescriptor {
    base: Base,
}

impl UnionDescriptor {
    pub(crate) fn new(base: Base) -> Self {
        Self { base }
    }

    fn members(&self) -> Result<(&'static str, &Vec<Value>, &'static str)> {
        for (keyword, separator) in COMPOSITE_KEYWORDS {
            if let Some(value) = self.base.schema().get(keyword) {
                let members =
                    value
                        .as_array()
                        .ok_or_else(|| TypegenError::MalformedSchema {
                            path: self.base.source_path().to_string(),
                            detail: format!("{} must hold an array", keyword),
                        })?;
                return Ok((keyword, members, separator));
            }
        }
        Err(TypegenError::MalformedSchema {
            path: self.base.source_path().to_string(),
            detail: "expected one of oneOf/anyOf/allOf".to_string(),
        })
    }
}

impl Descriptor for UnionDescriptor {
    fn base(&self) -> &Base {
        &self.base
    }

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Union
    }

    fn render(&self, children: &mut DescriptorContainer, top_level: bool) -> Result<String> {
        let scope = self.base.scope()?;
        let (keyword, members, separator) = self.members()?;

        let mut parts = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            let path = format!("{}/{}/{}", self.base.source_path(), keyword, index);
            let suggested = names::suggested_name(
                self.base.effective_name(),
                &format!("variant{}", index),
            );
            let part = match self.base.converter().convert(
                member,
                &scope,
                None,
                Some(&suggested),
                &path,
            )? {
                Some(container) => inline_union(&container, children)?,
                None => {
                    tracing::warn!(path = %path, "union member matched no rule, using any");
                    "any".to_string()
                }
            };
            // Mixed separators inside one expression need grouping
            if part.contains('|') || part.contains('&') {
                parts.push(format!("({})", part));
            } else {
                parts.push(part);
            }
        }
        let expr = parts.join(separator);

        Ok(match (top_level, self.base.effective_name()) {
            (true, Some(name)) => self.base.type_alias(name, &expr),
            _ => expr,
        })
    }
}
