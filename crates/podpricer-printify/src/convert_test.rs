use serde_json::json;

use super::*;

fn product_from(value: serde_json::Value) -> Product {
    let wire: PrintifyProduct = serde_json::from_value(value).unwrap();
    convert_product(wire)
}

// -----------------------------------------------------------------------
// convert_product
// -----------------------------------------------------------------------

#[test]
fn convert_product_maps_options_and_variants() {
    let product = product_from(json!({
        "id": "5f2b0c",
        "title": "Heavy Cotton Tee",
        "blueprint_id": 6,
        "print_provider_id": 29,
        "options": [
            {"name": "Colors", "type": "color", "values": [{"id": 42, "title": "Navy"}]},
            {"name": "Sizes", "type": "size", "values": [{"id": 17, "title": "XL"}]}
        ],
        "variants": [{
            "id": 1001,
            "title": "Navy / XL",
            "cost": 1150,
            "price": 2499,
            "is_enabled": true,
            "is_default": true,
            "options": [42, 17]
        }],
        "images": [{"src": "https://img/1.png", "is_default": false},
                   {"src": "https://img/2.png", "is_default": true}]
    }));

    assert_eq!(product.id, "5f2b0c");
    assert_eq!(product.blueprint_id, Some(6));
    assert_eq!(product.print_provider_id, Some(29));
    assert_eq!(product.options[1].option_type, "size");
    assert_eq!(product.options[1].values[0].id, "17");
    assert_eq!(product.image_url.as_deref(), Some("https://img/2.png"));

    let variant = &product.variants[0];
    assert_eq!(variant.cost, 1150);
    assert_eq!(variant.price, 2499);
    assert!(variant.is_default);
    assert!(variant.is_visible, "missing is_visible defaults to true");
    assert_eq!(
        variant.options,
        Some(OptionsRepr::ByIdList(vec!["42".to_owned(), "17".to_owned()]))
    );
}

#[test]
fn convert_product_tolerates_nulls_and_missing_fields() {
    let product = product_from(json!({
        "id": "abc",
        "title": null,
        "variants": [{"id": 1, "cost": null, "options": null}]
    }));

    assert_eq!(product.title, "");
    assert!(product.options.is_empty());
    assert!(product.image_url.is_none());
    let variant = &product.variants[0];
    assert_eq!(variant.cost, 0);
    assert_eq!(variant.price, 0);
    assert!(variant.is_enabled);
    assert!(variant.options.is_none());
}

#[test]
fn convert_product_falls_back_to_nested_provider() {
    let product = product_from(json!({
        "id": "abc",
        "provider": {"id": 99},
        "variants": []
    }));
    assert_eq!(product.print_provider_id, Some(99));
}

#[test]
fn convert_product_resolves_labels_end_to_end() {
    let product = product_from(json!({
        "id": "abc",
        "options": [
            {"name": "Sizes", "type": "size", "values": [{"id": 17, "title": "XL"}]},
            {"name": "Colors", "type": "color", "values": [{"id": "42", "title": "Navy"}]}
        ],
        "variants": [{"id": 1, "options": ["17", 42]}]
    }));
    let labels = podpricer_core::resolve_labels(&product.variants[0], &product.options);
    assert_eq!(labels.size, "XL");
    assert_eq!(labels.color, "Navy");
}

// -----------------------------------------------------------------------
// convert_options_repr
// -----------------------------------------------------------------------

#[test]
fn options_object_keeps_source_order() {
    let repr = convert_options_repr(json!({"Size": "L", "Color": "Black", "Fit": 3}));
    assert_eq!(
        repr,
        Some(OptionsRepr::ByNameMap(vec![
            ("Size".to_owned(), "L".to_owned()),
            ("Color".to_owned(), "Black".to_owned()),
            ("Fit".to_owned(), "3".to_owned()),
        ]))
    );
}

#[test]
fn options_array_skips_non_scalar_items() {
    let repr = convert_options_repr(json!([1, {"x": 1}, "2", null]));
    assert_eq!(
        repr,
        Some(OptionsRepr::ByIdList(vec!["1".to_owned(), "2".to_owned()]))
    );
}

#[test]
fn options_of_other_shapes_are_absent() {
    assert_eq!(convert_options_repr(json!("Navy / L")), None);
    assert_eq!(convert_options_repr(json!(7)), None);
    assert_eq!(convert_options_repr(serde_json::Value::Null), None);
}

// -----------------------------------------------------------------------
// Request bodies and error bodies
// -----------------------------------------------------------------------

#[test]
fn price_update_body_serializes_variant_list() {
    let body = price_update_body(&[UpdateRecord {
        variant_id: 1001,
        price: 2500,
        is_enabled: true,
        is_visible: false,
    }]);
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        json!({"variants": [{"id": 1001, "price": 2500, "is_enabled": true, "is_visible": false}]})
    );
}

#[test]
fn publish_body_uses_wire_field_names() {
    let body = serde_json::to_value(publish_body(PublishFlags::retail_price_only())).unwrap();
    assert_eq!(
        body,
        json!({
            "title": false,
            "description": false,
            "images": false,
            "variants": false,
            "tags": false,
            "keyFeatures": false,
            "shipping_template": false,
            "retail_price": true
        })
    );
}

#[test]
fn capacity_reason_reads_errors_reason() {
    let body = r#"{"status":"error","code":8251,"message":"Validation failed.","errors":{"reason":"Product has too many enabled variants"}}"#;
    assert_eq!(
        capacity_reason(body).as_deref(),
        Some("Product has too many enabled variants")
    );
}

#[test]
fn capacity_reason_ignores_other_codes_and_non_json() {
    assert_eq!(capacity_reason(r#"{"code":8150,"errors":{"reason":"x"}}"#), None);
    assert_eq!(capacity_reason("<html>502</html>"), None);
}

#[test]
fn blueprint_without_title_gets_placeholder() {
    let blueprint = convert_blueprint(PrintifyBlueprint { id: 5, title: None });
    assert_eq!(blueprint.title, "Blueprint 5");
}
