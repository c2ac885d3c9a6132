//! Printify REST API wire types.
//!
//! Only the fields the pricing workflow reads are modelled. Most fields are
//! optional on the wire or have been observed as `null`, so they are
//! `Option`s here and defaulted during conversion.
//!
//! ### Variant `options`
//! Usually an array of option-value IDs (integers, occasionally strings)
//! referencing the product's `options[].values[].id`. Some products carry an
//! object mapping option name to value title instead. The field is kept as a
//! raw [`serde_json::Value`] and interpreted in `convert.rs`, so an unexpected
//! shape degrades to "no options" instead of failing the whole product.

use serde::{Deserialize, Serialize};

/// Printify error code returned when a product has too many enabled variants.
pub const CAPACITY_ERROR_CODE: i64 = 8251;

/// Entry of `GET shops.json`.
#[derive(Debug, Deserialize)]
pub struct PrintifyShop {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
}

/// One page of `GET shops/{shop}/products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductsPage {
    #[serde(default)]
    pub data: Vec<ProductListItem>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ProductListItem {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// `GET shops/{shop}/products/{id}.json`.
#[derive(Debug, Deserialize)]
pub struct PrintifyProduct {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub blueprint_id: Option<i64>,
    #[serde(default)]
    pub print_provider_id: Option<i64>,
    /// Older products expose the provider only as a nested object.
    #[serde(default)]
    pub provider: Option<ProviderRef>,
    #[serde(default)]
    pub options: Vec<PrintifyOption>,
    #[serde(default)]
    pub variants: Vec<PrintifyVariant>,
    #[serde(default)]
    pub images: Vec<PrintifyImage>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderRef {
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PrintifyOption {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub option_type: Option<String>,
    #[serde(default)]
    pub values: Vec<PrintifyOptionValue>,
}

#[derive(Debug, Deserialize)]
pub struct PrintifyOptionValue {
    pub id: WireId,
    #[serde(default)]
    pub title: Option<String>,
}

/// An identifier that arrives as either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Int(i64),
    Str(String),
}

impl std::fmt::Display for WireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PrintifyVariant {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    /// Minor units.
    #[serde(default)]
    pub cost: Option<i64>,
    /// Minor units.
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub is_enabled: Option<bool>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub is_default: Option<bool>,
    #[serde(default)]
    pub print_area_key: Option<String>,
    #[serde(default)]
    pub options: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct PrintifyImage {
    pub src: String,
    #[serde(default)]
    pub is_default: bool,
}

/// `GET shipping.json`.
#[derive(Debug, Deserialize)]
pub struct ShippingResponse {
    #[serde(default)]
    pub standard: Option<ShippingTier>,
}

#[derive(Debug, Deserialize)]
pub struct ShippingTier {
    /// Minor units.
    #[serde(default)]
    pub cost: Option<i64>,
}

/// Entry of `GET catalog/blueprints.json`.
#[derive(Debug, Deserialize)]
pub struct PrintifyBlueprint {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
}

/// Body of `PUT shops/{shop}/products/{id}.json`.
#[derive(Debug, Serialize)]
pub struct PriceUpdateBody {
    pub variants: Vec<VariantPrice>,
}

#[derive(Debug, Serialize)]
pub struct VariantPrice {
    pub id: i64,
    pub price: i64,
    pub is_enabled: bool,
    pub is_visible: bool,
}

/// Body of `POST shops/{shop}/products/{id}/publish.json`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Serialize)]
pub struct PublishBody {
    pub title: bool,
    pub description: bool,
    pub images: bool,
    pub variants: bool,
    pub tags: bool,
    #[serde(rename = "keyFeatures")]
    pub key_features: bool,
    pub shipping_template: bool,
    pub retail_price: bool,
}
