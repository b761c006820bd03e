//! Object descriptor
//!
//! Named objects emit `export interface Name { … }`; anonymous objects
//! inline as a single-line literal. Optionality comes from the object-level
//! `required` array. `additionalProperties` (true or a schema) becomes an
//! index signature.

use serde_json::Value;

use crate::descriptor::{doc_comment, inline_union, Base, Descriptor, DescriptorContainer};
use crate::error::Result;
use crate::names;
use crate::rules::DescriptorKind;

pub struct ObjectDescriptor {
    base: Base,
}

struct Field {
    comment: String,
    line: String,
}

impl ObjectDescriptor {
    pub(crate) fn new(base: Base) -> Self {
        Self { base }
    }

    fn fields(&self, children: &mut DescriptorContainer) -> Result<Vec<Field>> {
        let scope = self.base.scope()?;
        let schema = self.base.schema();
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut fields = Vec::new();

        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            for (key, property) in properties {
                let path = format!("{}/properties/{}", self.base.source_path(), key);
                let suggested = names::suggested_name(self.base.effective_name(), key);
                let type_expr = match self.base.converter().convert(
                    property,
                    &scope,
                    None,
                    Some(&suggested),
                    &path,
                )? {
                    Some(container) => inline_union(&container, children)?,
                    None => {
                        tracing::warn!(path = %path, "property matched no rule, using any");
                        "any".to_string()
                    }
                };
                let optional = if required.contains(&key.as_str()) { "" } else { "?" };
                fields.push(Field {
                    comment: doc_comment(property),
                    line: format!("{}{}: {}", names::property_key(key), optional, type_expr),
                });
            }
        }

        match schema.get("additionalProperties") {
            Some(Value::Bool(true)) => fields.push(Field {
                comment: String::new(),
                line: "[key: string]: any".to_string(),
            }),
            Some(extra) if extra.is_object() => {
                let path = format!("{}/additionalProperties", self.base.source_path());
                let suggested = names::suggested_name(self.base.effective_name(), "value");
                let type_expr = match self.base.converter().convert(
                    extra,
                    &scope,
                    None,
                    Some(&suggested),
                    &path,
                )? {
                    Some(container) => inline_union(&container, children)?,
                    None => "any".to_string(),
                };
                fields.push(Field {
                    comment: String::new(),
                    line: format!("[key: string]: {}", type_expr),
                });
            }
            _ => {}
        }

        Ok(fields)
    }
}

impl Descriptor for ObjectDescriptor {
    fn base(&self) -> &Base {
        &self.base
    }

    fn kind(&self) -> DescriptorKind {
        DescriptorKind::Object
    }

    fn render(&self, children: &mut DescriptorContainer, top_level: bool) -> Result<String> {
        let fields = self.fields(children)?;
        let config = self.base.converter().config();

        if top_level {
            if let Some(name) = self.base.effective_name() {
                let mut out = String::new();
                if config.include_comments {
                    out.push_str(&self.base.comments());
                }
                out.push_str(&format!("export interface {} {{\n", name));
                for field in &fields {
                    if config.include_comments && !field.comment.is_empty() {
                        for line in field.comment.lines() {
                            out.push_str(&format!("{}{}\n", config.indent, line));
                        }
                    }
                    out.push_str(&format!("{}{};\n", config.indent, field.line));
                }
                out.push('}');
                return Ok(out);
            }
        }

        if fields.is_empty() {
            return Ok("{}".to_string());
        }
        let body = fields
            .iter()
            .map(|field| field.line.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Ok(format!("{{ {} }}", body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::convert::Converter;
    use serde_json::json;

    fn convert_object(
        converter: &Converter,
        context: &Context,
        schema: Value,
        name: Option<&str>,
    ) -> crate::descriptor::DescriptorRef {
        converter
            .convert(&schema, context, name, None, "#/test")
            .expect("convert")
            .expect("matched")
            .remove(0)
    }

    #[test]
    fn test_named_interface_with_optionality() {
        let converter = Converter::default();
        let context = Context::new();
        let descriptor = convert_object(
            &converter,
            &context,
            json!({
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": {"type": "number"},
                    "name": {"type": "string"}
                }
            }),
            Some("User"),
        );

        let mut children = DescriptorContainer::new();
        let text = descriptor.render(&mut children, true).expect("render");
        assert_eq!(
            text,
            "export interface User {\n  id: number;\n  name?: string;\n}"
        );
    }

    #[test]
    fn test_anonymous_object_inlines() {
        let converter = Converter::default();
        let context = Context::new();
        let descriptor = convert_object(
            &converter,
            &context,
            json!({
                "type": "object",
                "required": ["x"],
                "properties": {"x": {"type": "number"}}
            }),
            None,
        );

        let mut children = DescriptorContainer::new();
        let text = descriptor.render(&mut children, false).expect("render");
        assert_eq!(text, "{ x: number }");
    }

    #[test]
    fn test_empty_object() {
        let converter = Converter::default();
        let context = Context::new();
        let descriptor = convert_object(&converter, &context, json!({"type": "object"}), None);

        let mut children = DescriptorContainer::new();
        let text = descriptor.render(&mut children, false).expect("render");
        assert_eq!(text, "{}");
    }

    #[test]
    fn test_index_signatures() {
        let converter = Converter::default();
        let context = Context::new();

        let open = convert_object(
            &converter,
            &context,
            json!({"type": "object", "additionalProperties": true}),
            None,
        );
        let mut children = DescriptorContainer::new();
        assert_eq!(
            open.render(&mut children, false).expect("render"),
            "{ [key: string]: any }"
        );

        let typed = convert_object(
            &converter,
            &context,
            json!({"type": "object", "additionalProperties": {"type": "string"}}),
            None,
        );
        assert_eq!(
            typed.render(&mut children, false).expect("render"),
            "{ [key: string]: string }"
        );
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let converter = Converter::default();
        let context = Context::new();
        let descriptor = convert_object(
            &converter,
            &context,
            json!({
                "type": "object",
                "properties": {"content-type": {"type": "string"}}
            }),
            Some("Headers"),
        );

        let mut children = DescriptorContainer::new();
        let text = descriptor.render(&mut children, true).expect("render");
        assert_eq!(
            text,
            "export interface Headers {\n  'content-type'?: string;\n}"
        );
    }

    #[test]
    fn test_enum_property_is_hoisted() {
        let converter = Converter::default();
        let context = Context::new();
        let descriptor = convert_object(
            &converter,
            &context,
            json!({
                "type": "object",
                "properties": {"status": {"enum": ["draft", "sent"]}}
            }),
            Some("Order"),
        );

        let mut children = DescriptorContainer::new();
        let text = descriptor.render(&mut children, true).expect("render");
        assert_eq!(
            text,
            "export interface Order {\n  status?: OrderStatus;\n}"
        );
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].reference_name(), Some("OrderStatus"));
    }

    #[test]
    fn test_property_comments_are_indented() {
        let converter = Converter::default();
        let context = Context::new();
        let descriptor = convert_object(
            &converter,
            &context,
            json!({
                "type": "object",
                "properties": {"id": {"type": "number", "description": "Unique id."}}
            }),
            Some("User"),
        );

        let mut children = DescriptorContainer::new();
        let text = descriptor.render(&mut children, true).expect("render");
        assert_eq!(
            text,
            "export interface User {\n  /**\n   * Unique id.\n   */\n  id?: number;\n}"
        );
    }
}
