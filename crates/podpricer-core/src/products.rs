use serde::{Deserialize, Serialize};

/// Label used for any size or color that cannot be resolved.
pub const UNKNOWN_LABEL: &str = "N/A";

/// A catalog product as returned by the commerce service, with all options
/// and variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID as issued by the commerce service (opaque string).
    pub id: String,
    pub title: String,
    /// Catalog blueprint the product was created from; resolves to a garment
    /// type through the blueprint map.
    pub blueprint_id: Option<i64>,
    /// Print provider fulfilling the product, used for shipping lookups.
    pub print_provider_id: Option<i64>,
    /// Ordered option axes (e.g. `Colors`, `Sizes`).
    pub options: Vec<ProductOption>,
    pub variants: Vec<Variant>,
    /// First product image, if any.
    pub image_url: Option<String>,
}

impl Product {
    /// Returns the variant flagged `is_default`, or the first variant when
    /// none is flagged.
    #[must_use]
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.variants.first())
    }

    /// Number of variants currently enabled for sale.
    #[must_use]
    pub fn enabled_variant_count(&self) -> usize {
        self.variants.iter().filter(|v| v.is_enabled).count()
    }
}

/// One option axis of a product, e.g. `{ name: "Sizes", type: "size" }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductOption {
    /// Free-text display name.
    pub name: String,
    /// Free-text option type; frequently `"size"` or `"color"`, may be empty.
    pub option_type: String,
    pub values: Vec<OptionValue>,
}

/// A single selectable value of a [`ProductOption`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionValue {
    /// Value ID, stringified so integer and string IDs compare equal.
    pub id: String,
    pub title: String,
}

/// The shapes a variant's `options` field arrives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionsRepr {
    /// Ordered value IDs referencing [`OptionValue::id`].
    ByIdList(Vec<String>),
    /// Option name → value title pairs, in source order.
    ByNameMap(Vec<(String, String)>),
}

/// A purchasable SKU of a [`Product`]. Money fields are in minor units
/// (cents).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: i64,
    /// Display title, e.g. `"Navy / XL"`.
    pub title: String,
    /// Manufacturing cost in minor units.
    pub cost: i64,
    /// Current retail price in minor units.
    pub price: i64,
    pub is_enabled: bool,
    pub is_visible: bool,
    pub is_default: bool,
    /// Print area used for shipping lookups, when the service exposes one.
    pub print_area_key: Option<String>,
    /// `None` when the service omitted the field or sent an unusable shape.
    pub options: Option<OptionsRepr>,
}

/// Size and color display labels recovered for a variant. Never persisted;
/// recomputed from the product options on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLabels {
    pub size: String,
    pub color: String,
}

impl Default for ResolvedLabels {
    fn default() -> Self {
        Self {
            size: UNKNOWN_LABEL.to_string(),
            color: UNKNOWN_LABEL.to_string(),
        }
    }
}

/// A variant paired with its resolved labels, for display.
#[derive(Debug, Clone, Serialize)]
pub struct LabeledVariant {
    #[serde(flatten)]
    pub variant: Variant,
    pub labels: ResolvedLabels,
}

/// The unit of a price-set mutation sent to the commerce service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub variant_id: i64,
    /// New retail price in minor units; never negative.
    pub price: i64,
    pub is_enabled: bool,
    pub is_visible: bool,
}
