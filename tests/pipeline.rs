//! End-to-end pipeline tests: OpenAPI document in, dependency-ordered
//! TypeScript declarations out.

use serde_json::json;

use oapi_typegen::{render_all, Context, Converter, Descriptor, TypegenConfig};

fn sample_document() -> serde_json::Value {
    json!({
        "components": {
            "schemas": {
                "Order": {
                    "title": "Order",
                    "description": "A customer order.",
                    "type": "object",
                    "required": ["id", "status"],
                    "properties": {
                        "id": {"type": "number"},
                        "status": {"enum": ["draft", "sent"]},
                        "items": {
                            "type": "array",
                            "items": {"$ref": "#/components/schemas/Product"}
                        }
                    }
                },
                "Product": {
                    "type": "object",
                    "required": ["sku"],
                    "properties": {
                        "sku": {"type": "string"},
                        "price": {"type": "number"}
                    }
                },
                "OrderId": {
                    "oneOf": [{"type": "string"}, {"type": "number"}]
                }
            }
        }
    })
}

fn generate(converter: &Converter, document: &serde_json::Value) -> Vec<(String, String)> {
    let context = Context::new();
    let roots = converter
        .convert_document(document, &context)
        .expect("convert document");

    let mut rendered = Vec::new();
    render_all(&roots, |descriptor, text| {
        rendered.push((
            descriptor.effective_name().unwrap_or("?").to_string(),
            text.to_string(),
        ));
    })
    .expect("render");
    rendered
}

#[test]
fn generates_declarations_in_dependency_order() {
    let rendered = generate(&Converter::default(), &sample_document());

    let names: Vec<&str> = rendered.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Product", "OrderStatus", "Order", "OrderId"]);
}

#[test]
fn generates_expected_declaration_text() {
    let rendered = generate(&Converter::default(), &sample_document());
    let output = rendered
        .iter()
        .map(|(_, text)| text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let expected = "\
export interface Product {
  price?: number;
  sku: string;
}

export type OrderStatus = 'draft' | 'sent';

/**
 * # Order
 *
 * A customer order.
 */
export interface Order {
  id: number;
  items?: Product[];
  status: OrderStatus;
}

export type OrderId = string | number;";

    assert_eq!(output, expected);
}

#[test]
fn comments_can_be_disabled() {
    let config = TypegenConfig {
        include_comments: false,
        ..TypegenConfig::default()
    };
    let rendered = generate(&Converter::new(config), &sample_document());

    let order = &rendered
        .iter()
        .find(|(name, _)| name == "Order")
        .expect("Order rendered")
        .1;
    assert!(!order.contains("/**"));
    assert!(order.starts_with("export interface Order {"));
}

#[test]
fn rendering_twice_with_one_context_converges() {
    // The context may be shared across convert calls; rendering the same
    // roots through one visited set reports nothing new the second time.
    let converter = Converter::default();
    let context = Context::new();
    let document = sample_document();
    let roots = converter
        .convert_document(&document, &context)
        .expect("convert document");

    let mut visited = oapi_typegen::VisitedSet::new();
    let mut first = 0usize;
    oapi_typegen::render_recursive(&roots, &mut |_, _| first += 1, &mut visited)
        .expect("render");
    let mut second = 0usize;
    oapi_typegen::render_recursive(&roots, &mut |_, _| second += 1, &mut visited)
        .expect("render");

    assert_eq!(first, 4);
    assert_eq!(second, 0);
}
