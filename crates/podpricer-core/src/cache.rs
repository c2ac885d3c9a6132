//! Process-lifetime memoization of slow catalog lookups.
//!
//! Both caches populate each key at most once: concurrent callers for the
//! same key wait on the first caller's fetch instead of issuing their own.
//! Failed fetches are not cached, so a later call retries them.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::OnceCell;

use crate::catalog::CatalogService;
use crate::error::CatalogError;

/// Blueprint id → title, fetched once per process.
#[derive(Debug, Default)]
pub struct BlueprintCache {
    names: OnceCell<HashMap<i64, String>>,
}

impl BlueprintCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the full blueprint map, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the catalog error of a failed first fetch.
    pub async fn names<C: CatalogService>(
        &self,
        catalog: &C,
    ) -> Result<&HashMap<i64, String>, CatalogError> {
        self.names
            .get_or_try_init(|| async {
                let blueprints = catalog.list_blueprints().await?;
                tracing::debug!(count = blueprints.len(), "blueprint map loaded");
                Ok::<_, CatalogError>(blueprints.into_iter().map(|b| (b.id, b.title)).collect())
            })
            .await
    }

    /// Garment type for a blueprint id, `"Blueprint {id}"` when the id is
    /// unknown and `"Unknown"` when the product has none.
    ///
    /// # Errors
    ///
    /// See [`BlueprintCache::names`].
    pub async fn garment_type<C: CatalogService>(
        &self,
        catalog: &C,
        blueprint_id: Option<i64>,
    ) -> Result<String, CatalogError> {
        let Some(id) = blueprint_id else {
            return Ok("Unknown".to_string());
        };
        let names = self.names(catalog).await?;
        Ok(names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Blueprint {id}")))
    }
}

type ShippingKey = (i64, String, String);

/// `(provider, print area, country)` → standard shipping cost in minor
/// units. An unavailable rate is cached as `None`.
#[derive(Debug, Default)]
pub struct ShippingCache {
    entries: RwLock<HashMap<ShippingKey, Arc<OnceCell<Option<i64>>>>>,
}

impl ShippingCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: ShippingKey) -> Arc<OnceCell<Option<i64>>> {
        {
            let entries = self
                .entries
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(slot) = entries.get(&key) {
                return Arc::clone(slot);
            }
        }
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(entries.entry(key).or_default())
    }

    /// Cached shipping cost for the combination, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the catalog error of a failed fetch; the key stays
    /// unpopulated.
    pub async fn cost<C: CatalogService>(
        &self,
        catalog: &C,
        provider_id: i64,
        print_area_key: &str,
        country: &str,
    ) -> Result<Option<i64>, CatalogError> {
        let slot = self.slot((provider_id, print_area_key.to_string(), country.to_string()));
        let cost = slot
            .get_or_try_init(|| catalog.shipping_cost(provider_id, print_area_key, country))
            .await?;
        Ok(*cost)
    }

    /// Number of populated entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_catalog::FakeCatalog;

    #[tokio::test]
    async fn blueprint_map_is_fetched_once() {
        let catalog = FakeCatalog::default().with_blueprint(6, "Unisex Heavy Cotton Tee");
        let cache = BlueprintCache::new();

        assert_eq!(
            cache.garment_type(&catalog, Some(6)).await.unwrap(),
            "Unisex Heavy Cotton Tee"
        );
        assert_eq!(
            cache.garment_type(&catalog, Some(99)).await.unwrap(),
            "Blueprint 99"
        );
        assert_eq!(catalog.calls("list_blueprints"), 1);
    }

    #[tokio::test]
    async fn missing_blueprint_id_skips_fetch() {
        let catalog = FakeCatalog::default();
        let cache = BlueprintCache::new();
        assert_eq!(cache.garment_type(&catalog, None).await.unwrap(), "Unknown");
        assert_eq!(catalog.calls("list_blueprints"), 0);
    }

    #[tokio::test]
    async fn failed_blueprint_fetch_is_retried_next_time() {
        let catalog = FakeCatalog::default().with_blueprint(6, "Tee");
        catalog.fail_next("list_blueprints");
        let cache = BlueprintCache::new();

        assert!(cache.names(&catalog).await.is_err());
        assert_eq!(cache.names(&catalog).await.unwrap().len(), 1);
        assert_eq!(catalog.calls("list_blueprints"), 2);
    }

    #[tokio::test]
    async fn shipping_cost_is_fetched_once_per_key() {
        let catalog = FakeCatalog::default().with_shipping(29, "front", "US", Some(475));
        let cache = ShippingCache::new();

        for _ in 0..3 {
            assert_eq!(
                cache.cost(&catalog, 29, "front", "US").await.unwrap(),
                Some(475)
            );
        }
        assert_eq!(catalog.calls("shipping_cost"), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn unavailable_shipping_is_cached_as_none() {
        let catalog = FakeCatalog::default();
        let cache = ShippingCache::new();

        assert_eq!(cache.cost(&catalog, 1, "front", "CA").await.unwrap(), None);
        assert_eq!(cache.cost(&catalog, 1, "front", "CA").await.unwrap(), None);
        assert_eq!(catalog.calls("shipping_cost"), 1);
    }

    #[tokio::test]
    async fn shipping_error_is_not_cached() {
        let catalog = FakeCatalog::default().with_shipping(29, "front", "US", Some(475));
        catalog.fail_next("shipping_cost");
        let cache = ShippingCache::new();

        assert!(cache.cost(&catalog, 29, "front", "US").await.is_err());
        assert!(cache.is_empty());
        assert_eq!(
            cache.cost(&catalog, 29, "front", "US").await.unwrap(),
            Some(475)
        );
        assert_eq!(catalog.calls("shipping_cost"), 2);
    }

    #[tokio::test]
    async fn distinct_countries_are_distinct_keys() {
        let catalog = FakeCatalog::default()
            .with_shipping(29, "front", "US", Some(475))
            .with_shipping(29, "front", "GB", Some(899));
        let cache = ShippingCache::new();

        assert_eq!(
            cache.cost(&catalog, 29, "front", "GB").await.unwrap(),
            Some(899)
        );
        assert_eq!(
            cache.cost(&catalog, 29, "front", "US").await.unwrap(),
            Some(475)
        );
        assert_eq!(cache.len(), 2);
    }
}
