//! In-memory [`CatalogService`] used by the core's unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::catalog::{Blueprint, CatalogService, ProductRef, PublishFlags, Shop};
use crate::error::CatalogError;
use crate::products::{Product, UpdateRecord};

#[derive(Default)]
struct Recorded {
    calls: HashMap<&'static str, usize>,
    fail_next: HashSet<&'static str>,
    updates: Vec<(String, Vec<UpdateRecord>)>,
    published: Vec<(String, PublishFlags)>,
}

#[derive(Default)]
pub(crate) struct FakeCatalog {
    shops: Vec<Shop>,
    products: Vec<Product>,
    blueprints: Vec<Blueprint>,
    shipping: HashMap<(i64, String, String), Option<i64>>,
    update_errors: HashMap<String, CatalogError>,
    publish_errors: HashMap<String, CatalogError>,
    recorded: Mutex<Recorded>,
}

impl FakeCatalog {
    pub(crate) fn with_shop(mut self, id: i64, title: &str) -> Self {
        self.shops.push(Shop {
            id,
            title: title.to_string(),
        });
        self
    }

    pub(crate) fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    pub(crate) fn with_blueprint(mut self, id: i64, title: &str) -> Self {
        self.blueprints.push(Blueprint {
            id,
            title: title.to_string(),
        });
        self
    }

    pub(crate) fn with_shipping(
        mut self,
        provider_id: i64,
        print_area_key: &str,
        country: &str,
        cost: Option<i64>,
    ) -> Self {
        self.shipping.insert(
            (provider_id, print_area_key.to_string(), country.to_string()),
            cost,
        );
        self
    }

    pub(crate) fn with_update_error(mut self, product_id: &str, err: CatalogError) -> Self {
        self.update_errors.insert(product_id.to_string(), err);
        self
    }

    pub(crate) fn with_publish_error(mut self, product_id: &str, err: CatalogError) -> Self {
        self.publish_errors.insert(product_id.to_string(), err);
        self
    }

    /// Makes the next call to `method` fail with a request error.
    pub(crate) fn fail_next(&self, method: &'static str) {
        self.lock().fail_next.insert(method);
    }

    pub(crate) fn calls(&self, method: &str) -> usize {
        self.lock().calls.get(method).copied().unwrap_or(0)
    }

    pub(crate) fn updates(&self) -> Vec<(String, Vec<UpdateRecord>)> {
        self.lock().updates.clone()
    }

    pub(crate) fn published(&self) -> Vec<(String, PublishFlags)> {
        self.lock().published.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn enter(&self, method: &'static str) -> Result<(), CatalogError> {
        let mut recorded = self.lock();
        *recorded.calls.entry(method).or_default() += 1;
        if recorded.fail_next.remove(method) {
            return Err(CatalogError::Request(format!("{method} unavailable")));
        }
        Ok(())
    }
}

impl CatalogService for FakeCatalog {
    async fn list_shops(&self) -> Result<Vec<Shop>, CatalogError> {
        self.enter("list_shops")?;
        Ok(self.shops.clone())
    }

    async fn list_products(&self, _shop_id: i64) -> Result<Vec<ProductRef>, CatalogError> {
        self.enter("list_products")?;
        Ok(self
            .products
            .iter()
            .map(|p| ProductRef {
                id: p.id.clone(),
                title: p.title.clone(),
            })
            .collect())
    }

    async fn get_product(&self, _shop_id: i64, product_id: &str) -> Result<Product, CatalogError> {
        self.enter("get_product")?;
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| CatalogError::Request(format!("product {product_id} not found")))
    }

    async fn update_variant_prices(
        &self,
        _shop_id: i64,
        product_id: &str,
        updates: &[UpdateRecord],
    ) -> Result<(), CatalogError> {
        self.enter("update_variant_prices")?;
        if let Some(err) = self.update_errors.get(product_id) {
            return Err(err.clone());
        }
        self.lock()
            .updates
            .push((product_id.to_string(), updates.to_vec()));
        Ok(())
    }

    async fn shipping_cost(
        &self,
        provider_id: i64,
        print_area_key: &str,
        country: &str,
    ) -> Result<Option<i64>, CatalogError> {
        self.enter("shipping_cost")?;
        Ok(self
            .shipping
            .get(&(provider_id, print_area_key.to_string(), country.to_string()))
            .copied()
            .flatten())
    }

    async fn list_blueprints(&self) -> Result<Vec<Blueprint>, CatalogError> {
        self.enter("list_blueprints")?;
        Ok(self.blueprints.clone())
    }

    async fn publish_product(
        &self,
        _shop_id: i64,
        product_id: &str,
        flags: PublishFlags,
    ) -> Result<(), CatalogError> {
        self.enter("publish_product")?;
        if let Some(err) = self.publish_errors.get(product_id) {
            return Err(err.clone());
        }
        self.lock().published.push((product_id.to_string(), flags));
        Ok(())
    }
}
