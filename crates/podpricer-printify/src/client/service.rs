//! [`CatalogService`] implementation backed by the Printify API.

use podpricer_core::{
    Blueprint, CatalogError, CatalogService, Product, ProductRef, PublishFlags, Shop, UpdateRecord,
};

use super::PrintifyClient;

impl CatalogService for PrintifyClient {
    async fn list_shops(&self) -> Result<Vec<Shop>, CatalogError> {
        Ok(PrintifyClient::list_shops(self).await?)
    }

    async fn list_products(&self, shop_id: i64) -> Result<Vec<ProductRef>, CatalogError> {
        Ok(self.fetch_all_products(shop_id).await?)
    }

    async fn get_product(&self, shop_id: i64, product_id: &str) -> Result<Product, CatalogError> {
        Ok(PrintifyClient::get_product(self, shop_id, product_id).await?)
    }

    async fn update_variant_prices(
        &self,
        shop_id: i64,
        product_id: &str,
        updates: &[UpdateRecord],
    ) -> Result<(), CatalogError> {
        Ok(PrintifyClient::update_variant_prices(self, shop_id, product_id, updates).await?)
    }

    async fn shipping_cost(
        &self,
        provider_id: i64,
        print_area_key: &str,
        country: &str,
    ) -> Result<Option<i64>, CatalogError> {
        Ok(PrintifyClient::shipping_cost(self, provider_id, print_area_key, country).await?)
    }

    async fn list_blueprints(&self) -> Result<Vec<Blueprint>, CatalogError> {
        Ok(PrintifyClient::list_blueprints(self).await?)
    }

    async fn publish_product(
        &self,
        shop_id: i64,
        product_id: &str,
        flags: PublishFlags,
    ) -> Result<(), CatalogError> {
        Ok(PrintifyClient::publish_product(self, shop_id, product_id, flags).await?)
    }
}
