//! Conversion from Printify wire types to `podpricer_core` domain types,
//! and from domain requests back to wire bodies.

use podpricer_core::{
    Blueprint, OptionValue, OptionsRepr, Product, ProductOption, ProductRef, PublishFlags, Shop,
    UpdateRecord, Variant,
};
use serde_json::Value;

use crate::types::{
    PriceUpdateBody, PrintifyBlueprint, PrintifyOption, PrintifyProduct, PrintifyShop,
    PrintifyVariant, ProductListItem, PublishBody, VariantPrice, CAPACITY_ERROR_CODE,
};

/// Converts a product detail response. Never fails: missing fields take
/// their documented defaults.
#[must_use]
pub fn convert_product(product: PrintifyProduct) -> Product {
    let print_provider_id = product
        .print_provider_id
        .or_else(|| product.provider.as_ref().and_then(|p| p.id));

    let image_url = product
        .images
        .iter()
        .find(|img| img.is_default)
        .or_else(|| product.images.first())
        .map(|img| img.src.clone());

    Product {
        id: product.id,
        title: product.title.unwrap_or_default(),
        blueprint_id: product.blueprint_id,
        print_provider_id,
        options: product.options.into_iter().map(convert_option).collect(),
        variants: product.variants.into_iter().map(convert_variant).collect(),
        image_url,
    }
}

fn convert_option(option: PrintifyOption) -> ProductOption {
    ProductOption {
        name: option.name.unwrap_or_default(),
        option_type: option.option_type.unwrap_or_default(),
        values: option
            .values
            .into_iter()
            .map(|v| OptionValue {
                id: v.id.to_string(),
                title: v.title.unwrap_or_default(),
            })
            .collect(),
    }
}

/// Missing enabled/visible flags default to `true`, matching how the
/// storefront treats them.
fn convert_variant(variant: PrintifyVariant) -> Variant {
    Variant {
        id: variant.id,
        title: variant.title.unwrap_or_default(),
        cost: variant.cost.unwrap_or(0),
        price: variant.price.unwrap_or(0),
        is_enabled: variant.is_enabled.unwrap_or(true),
        is_visible: variant.is_visible.unwrap_or(true),
        is_default: variant.is_default.unwrap_or(false),
        print_area_key: variant.print_area_key.filter(|k| !k.is_empty()),
        options: variant.options.and_then(convert_options_repr),
    }
}

/// Interprets a raw variant `options` value.
///
/// - array → [`OptionsRepr::ByIdList`] of the integer/string items (other
///   items are skipped);
/// - object → [`OptionsRepr::ByNameMap`] of the string/number values, in
///   source order;
/// - anything else → `None`.
#[must_use]
pub fn convert_options_repr(raw: Value) -> Option<OptionsRepr> {
    match raw {
        Value::Array(items) => Some(OptionsRepr::ByIdList(
            items.iter().filter_map(scalar_to_string).collect(),
        )),
        Value::Object(map) => Some(OptionsRepr::ByNameMap(
            map.iter()
                .filter_map(|(k, v)| scalar_to_string(v).map(|s| (k.clone(), s)))
                .collect(),
        )),
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[must_use]
pub fn convert_shop(shop: PrintifyShop) -> Shop {
    Shop {
        id: shop.id,
        title: shop.title.unwrap_or_default(),
    }
}

#[must_use]
pub fn convert_list_item(item: ProductListItem) -> ProductRef {
    ProductRef {
        id: item.id,
        title: item.title.unwrap_or_default(),
    }
}

#[must_use]
pub fn convert_blueprint(blueprint: PrintifyBlueprint) -> Blueprint {
    Blueprint {
        id: blueprint.id,
        title: blueprint
            .title
            .unwrap_or_else(|| format!("Blueprint {}", blueprint.id)),
    }
}

#[must_use]
pub fn price_update_body(updates: &[UpdateRecord]) -> PriceUpdateBody {
    PriceUpdateBody {
        variants: updates
            .iter()
            .map(|u| VariantPrice {
                id: u.variant_id,
                price: u.price,
                is_enabled: u.is_enabled,
                is_visible: u.is_visible,
            })
            .collect(),
    }
}

#[must_use]
pub fn publish_body(flags: PublishFlags) -> PublishBody {
    PublishBody {
        title: flags.title,
        description: flags.description,
        images: flags.images,
        variants: flags.variants,
        tags: flags.tags,
        key_features: flags.key_features,
        shipping_template: flags.shipping_template,
        retail_price: flags.retail_price,
    }
}

/// Extracts `errors.reason` from an error body whose `code` is the
/// too-many-variants code; `None` for any other body.
#[must_use]
pub fn capacity_reason(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    if value.get("code").and_then(Value::as_i64) != Some(CAPACITY_ERROR_CODE) {
        return None;
    }
    Some(
        value
            .get("errors")
            .and_then(|e| e.get("reason"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
    )
}

#[cfg(test)]
#[path = "convert_test.rs"]
mod tests;
