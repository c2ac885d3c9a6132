//! The commerce-service seam the pricing core talks through.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::products::{Product, UpdateRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub title: String,
}

/// Entry of a shop's product list; detail is fetched separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: String,
    pub title: String,
}

/// A catalog blueprint (garment type) products are created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: i64,
    pub title: String,
}

/// Which product fields a publish pushes to the storefront.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishFlags {
    pub title: bool,
    pub description: bool,
    pub images: bool,
    pub variants: bool,
    pub tags: bool,
    pub key_features: bool,
    pub shipping_template: bool,
    pub retail_price: bool,
}

impl PublishFlags {
    /// Pushes only the retail price, leaving every other storefront field
    /// untouched.
    #[must_use]
    pub fn retail_price_only() -> Self {
        Self {
            title: false,
            description: false,
            images: false,
            variants: false,
            tags: false,
            key_features: false,
            shipping_template: false,
            retail_price: true,
        }
    }
}

/// Read and write access to a print-on-demand catalog.
///
/// Empty results are returned as empty collections; the caller decides
/// whether emptiness is an error.
pub trait CatalogService: Send + Sync {
    fn list_shops(&self) -> impl Future<Output = Result<Vec<Shop>, CatalogError>> + Send;

    fn list_products(
        &self,
        shop_id: i64,
    ) -> impl Future<Output = Result<Vec<ProductRef>, CatalogError>> + Send;

    fn get_product(
        &self,
        shop_id: i64,
        product_id: &str,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Replaces the prices of the listed variants.
    ///
    /// # Errors
    ///
    /// [`CatalogError::CapacityExceeded`] when the service refuses because
    /// the product has too many enabled variants; [`CatalogError::Rejected`]
    /// for any other refusal.
    fn update_variant_prices(
        &self,
        shop_id: i64,
        product_id: &str,
        updates: &[UpdateRecord],
    ) -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// Standard shipping cost in minor units, or `None` when the service has
    /// no rate for the combination.
    fn shipping_cost(
        &self,
        provider_id: i64,
        print_area_key: &str,
        country: &str,
    ) -> impl Future<Output = Result<Option<i64>, CatalogError>> + Send;

    fn list_blueprints(&self) -> impl Future<Output = Result<Vec<Blueprint>, CatalogError>> + Send;

    fn publish_product(
        &self,
        shop_id: i64,
        product_id: &str,
        flags: PublishFlags,
    ) -> impl Future<Output = Result<(), CatalogError>> + Send;
}
