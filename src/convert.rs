//! Converter
//!
//! Turns a JSON-Schema fragment into a container of type descriptors:
//! resolves `$ref` through the context, dispatches everything else through
//! the rule table, and constructs exactly one descriptor per match. Also
//! carries whole-document and directory conversion on top of the single-
//! fragment operation.
//!
//! The converter is a cheap-clone handle (`Rc` inside); descriptors hold a
//! clone so they can resolve nested fragments while rendering, and all
//! clones share one rule table, so predicate compilation is amortized
//! across runs.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use serde_json::Value;
use walkdir::WalkDir;

use crate::config::TypegenConfig;
use crate::context::Context;
use crate::descriptor::{
    AnyDescriptor, ArrayDescriptor, Base, DescriptorContainer, DescriptorRef, EnumDescriptor,
    NumberDescriptor, ObjectDescriptor, StringDescriptor, UnionDescriptor,
};
use crate::error::{Result, TypegenError};
use crate::rules::{DescriptorKind, RuleTable};
use crate::schema;

/// Schema-to-descriptor converter
#[derive(Clone)]
pub struct Converter {
    rules: Rc<RuleTable>,
    config: Rc<TypegenConfig>,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(TypegenConfig::default())
    }
}

impl Converter {
    pub fn new(config: TypegenConfig) -> Self {
        Self::with_rules(RuleTable::standard(), config)
    }

    pub fn with_rules(rules: RuleTable, config: TypegenConfig) -> Self {
        Self {
            rules: Rc::new(rules),
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &TypegenConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Convert one schema fragment.
    ///
    /// A pure `$ref` fragment resolves through `context` and returns the
    /// already-known descriptors; a `$ref` with sibling keys is a hard
    /// failure (no merge semantics). Anything else dispatches through the
    /// rule table; `Ok(None)` means no rule matched and the caller decides
    /// whether that is fatal.
    pub fn convert(
        &self,
        schema: &Value,
        context: &Context,
        name: Option<&str>,
        suggested_name: Option<&str>,
        source_path: &str,
    ) -> Result<Option<DescriptorContainer>> {
        if schema.get("$ref").is_some() {
            let Some(target) = schema::ref_target(schema) else {
                return Err(TypegenError::MalformedSchema {
                    path: source_path.to_string(),
                    detail: "$ref must be a string".to_string(),
                });
            };
            if !schema::is_pure_ref(schema) {
                return Err(TypegenError::RefWithSiblings {
                    path: source_path.to_string(),
                });
            }
            tracing::debug!(reference = target, "resolving reference");
            return match context.resolve(target) {
                Some(container) => Ok(Some(container)),
                None => Err(TypegenError::UnresolvedRef {
                    reference: target.to_string(),
                }),
            };
        }

        let Some(kind) = self.rules.find_match(schema)? else {
            tracing::debug!(path = source_path, "no rule matched schema");
            return Ok(None);
        };
        let base = Base::new(
            schema.clone(),
            self.clone(),
            context.downgrade(),
            name,
            suggested_name,
            source_path,
        );
        Ok(Some(vec![self.construct(kind, base)]))
    }

    /// Convert every named schema in an OpenAPI document.
    ///
    /// Scans the configured sections. Non-alias entries are converted and
    /// registered first; pure-`$ref` aliases resolve in a second pass
    /// against the populated context, so aliases may point forward. Entries
    /// matching no rule are skipped with a warning.
    pub fn convert_document(
        &self,
        document: &Value,
        context: &Context,
    ) -> Result<DescriptorContainer> {
        let mut roots = DescriptorContainer::new();
        let mut aliases: Vec<(String, &Value)> = Vec::new();

        for section_path in &self.config.schema_sections {
            let Some(entries) = schema::section(document, section_path).and_then(Value::as_object)
            else {
                continue;
            };
            for (name, entry) in entries {
                let pointer = format!("{}/{}", section_path, name);
                if schema::is_pure_ref(entry) {
                    aliases.push((pointer, entry));
                    continue;
                }
                match self.convert(entry, context, Some(name.as_str()), None, &pointer)? {
                    Some(container) => {
                        context.register(pointer.as_str(), container.clone());
                        roots.extend(container);
                    }
                    None => {
                        tracing::warn!(pointer = %pointer, "schema matched no rule, skipped");
                    }
                }
            }
        }

        for (pointer, entry) in aliases {
            let container = self
                .convert(entry, context, None, None, &pointer)?
                .unwrap_or_default();
            context.register(pointer.as_str(), container);
        }

        Ok(roots)
    }

    /// Convert every `.json` file under a directory.
    ///
    /// Files carrying one of the configured schema sections are treated as
    /// documents; anything else is one named schema (name = PascalCase file
    /// stem) registered under the first configured section.
    pub fn convert_directory(&self, dir: &Path, context: &Context) -> Result<DescriptorContainer> {
        let section = self
            .config
            .schema_sections
            .first()
            .map(String::as_str)
            .unwrap_or("#/components/schemas");
        let mut roots = DescriptorContainer::new();

        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.extension().map(|e| e != "json").unwrap_or(true) {
                continue;
            }

            let content = fs::read_to_string(path)?;
            let document: Value = serde_json::from_str(&content)?;

            if self
                .config
                .schema_sections
                .iter()
                .any(|s| schema::section(&document, s).is_some())
            {
                roots.extend(self.convert_document(&document, context)?);
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Schema")
                .trim_end_matches(".schema");
            let name = crate::names::pascal_case(stem);
            let pointer = format!("{}/{}", section, name);
            match self.convert(&document, context, Some(&name), None, &pointer)? {
                Some(container) => {
                    context.register(pointer.as_str(), container.clone());
                    roots.extend(container);
                }
                None => {
                    tracing::warn!(file = %path.display(), "schema matched no rule, skipped");
                }
            }
        }

        Ok(roots)
    }

    // Direct tag-to-constructor mapping; no reflection anywhere.
    fn construct(&self, kind: DescriptorKind, base: Base) -> DescriptorRef {
        match kind {
            DescriptorKind::Union => Rc::new(UnionDescriptor::new(base)),
            DescriptorKind::Enum => Rc::new(EnumDescriptor::new(base)),
            DescriptorKind::Number => Rc::new(NumberDescriptor::new(base)),
            DescriptorKind::String => Rc::new(StringDescriptor::new(base)),
            DescriptorKind::Object => Rc::new(ObjectDescriptor::new(base)),
            DescriptorKind::Array => Rc::new(ArrayDescriptor::new(base)),
            DescriptorKind::Any => Rc::new(AnyDescriptor::new(base)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_pure_ref_is_transparent() {
        let converter = Converter::default();
        let context = Context::new();
        let registered = converter
            .convert(
                &json!({"type": "object"}),
                &context,
                Some("Foo"),
                None,
                "#/definitions/Foo",
            )
            .expect("convert")
            .expect("matched");
        context.register("#/definitions/Foo", registered.clone());

        let resolved = converter
            .convert(
                &json!({"$ref": "#/definitions/Foo"}),
                &context,
                None,
                None,
                "#/somewhere",
            )
            .expect("convert")
            .expect("resolved");

        assert_eq!(resolved.len(), 1);
        // Same descriptor, not an equivalent copy
        assert!(Rc::ptr_eq(&registered[0], &resolved[0]));
    }

    #[test]
    fn test_ref_with_siblings_fails() {
        let converter = Converter::default();
        let context = Context::new();
        context.register("#/definitions/Foo", DescriptorContainer::new());

        let result = converter.convert(
            &json!({"$ref": "#/definitions/Foo", "description": "x"}),
            &context,
            None,
            None,
            "#/somewhere",
        );
        assert!(matches!(
            result,
            Err(TypegenError::RefWithSiblings { path }) if path == "#/somewhere"
        ));
    }

    #[test]
    fn test_unresolved_ref_carries_the_reference() {
        let converter = Converter::default();
        let context = Context::new();
        let result = converter.convert(
            &json!({"$ref": "#/definitions/Missing"}),
            &context,
            None,
            None,
            "#/somewhere",
        );
        assert!(matches!(
            result,
            Err(TypegenError::UnresolvedRef { reference }) if reference == "#/definitions/Missing"
        ));
    }

    #[test]
    fn test_non_object_input_yields_none() {
        let converter = Converter::default();
        let context = Context::new();
        let result = converter
            .convert(&json!("just a string"), &context, None, None, "#/x")
            .expect("convert");
        assert!(result.is_none());
    }

    #[test]
    fn test_dispatch_produces_one_descriptor() {
        let converter = Converter::default();
        let context = Context::new();
        let container = converter
            .convert(
                &json!({"type": "object", "oneOf": [{"type": "string"}]}),
                &context,
                Some("Choice"),
                None,
                "#/components/schemas/Choice",
            )
            .expect("convert")
            .expect("matched");
        assert_eq!(container.len(), 1);
        assert_eq!(container[0].kind(), DescriptorKind::Union);
        assert_eq!(container[0].name(), Some("Choice"));
        assert_eq!(container[0].source_path(), "#/components/schemas/Choice");
    }

    #[test]
    fn test_document_conversion_registers_and_resolves_aliases() {
        let converter = Converter::default();
        let context = Context::new();
        let document = json!({
            "components": {
                "schemas": {
                    "User": {
                        "type": "object",
                        "properties": {"id": {"type": "number"}}
                    },
                    "Account": {"$ref": "#/components/schemas/User"}
                }
            }
        });

        let roots = converter
            .convert_document(&document, &context)
            .expect("convert document");

        // Only User is a root; Account is a transparent alias to it
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name(), Some("User"));
        assert!(context.contains("#/components/schemas/User"));

        let alias = context
            .resolve("#/components/schemas/Account")
            .expect("alias registered");
        assert!(Rc::ptr_eq(&alias[0], &roots[0]));
    }

    #[test]
    fn test_document_conversion_skips_unmatched_entries() {
        let converter = Converter::default();
        let context = Context::new();
        let document = json!({
            "definitions": {
                "Bad": "not a schema object",
                "Good": {"type": "string"}
            }
        });

        let roots = converter
            .convert_document(&document, &context)
            .expect("convert document");
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name(), Some("Good"));
    }

    #[test]
    fn test_directory_conversion() {
        let dir = tempfile::tempdir().expect("temp dir");

        let mut doc = fs::File::create(dir.path().join("api.json")).expect("create");
        write!(
            doc,
            r#"{{"components": {{"schemas": {{"User": {{"type": "object"}}}}}}}}"#
        )
        .expect("write");

        let mut standalone =
            fs::File::create(dir.path().join("order_status.schema.json")).expect("create");
        write!(standalone, r#"{{"enum": ["draft", "sent"]}}"#).expect("write");

        let converter = Converter::default();
        let context = Context::new();
        let roots = converter
            .convert_directory(dir.path(), &context)
            .expect("convert directory");

        let names: Vec<_> = roots.iter().filter_map(|d| d.name()).collect();
        assert_eq!(names, vec!["User", "OrderStatus"]);
        assert!(context.contains("#/components/schemas/OrderStatus"));
    }
}
