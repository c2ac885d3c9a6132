pub mod app_config;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod options;
pub mod pricing;
pub mod products;
pub mod reference;
pub mod report;
pub mod service;
pub mod signal;

#[cfg(test)]
mod fake_catalog;

pub use app_config::{AppConfig, Environment};
pub use cache::{BlueprintCache, ShippingCache};
pub use catalog::{Blueprint, CatalogService, ProductRef, PublishFlags, Shop};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{CatalogError, ConfigError, PricingError, CAPACITY_REMEDIATION};
pub use options::{classify, label_variants, resolve_labels, OptionKind};
pub use pricing::{compute_price_set, to_major, to_minor, PriceSignal, SignalKind};
pub use products::{
    LabeledVariant, OptionValue, OptionsRepr, Product, ProductOption, ResolvedLabels,
    UpdateRecord, Variant, UNKNOWN_LABEL,
};
pub use reference::{select_reference, select_reference_with_match, ReferenceMatch};
pub use report::{format_money, MarginTier, PriceChange, PriceReport};
pub use service::{
    CatalogListing, PricingService, ProductResult, ProductSummary, PublishResult,
};
pub use signal::{disambiguate, PriceFields};
