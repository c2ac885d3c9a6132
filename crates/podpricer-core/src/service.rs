//! Pricing operations composed over a [`CatalogService`].
//!
//! Multi-product operations isolate failures per product: each product's
//! error is recorded in its result and the run continues with the next one.
//! Single-product operations return the first error directly.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::cache::{BlueprintCache, ShippingCache};
use crate::catalog::{CatalogService, PublishFlags, Shop};
use crate::error::PricingError;
use crate::options::label_variants;
use crate::pricing::{compute_price_set, PriceSignal};
use crate::products::{LabeledVariant, Product, Variant};
use crate::reference::{select_reference_with_match, ReferenceMatch};
use crate::report::PriceReport;
use crate::signal::{disambiguate, PriceFields};

/// Outcome of repricing one product in a bulk run.
#[derive(Debug, Clone)]
pub struct ProductResult {
    pub product_id: String,
    pub outcome: Result<PriceReport, PricingError>,
}

impl ProductResult {
    #[must_use]
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Human-readable summary, including the remediation hint for errors
    /// that carry one.
    #[must_use]
    pub fn detail(&self) -> String {
        match &self.outcome {
            Ok(report) => report.headline(),
            Err(err) => describe_error(err),
        }
    }
}

/// Outcome of publishing one product.
#[derive(Debug, Clone)]
pub struct PublishResult {
    pub product_id: String,
    pub outcome: Result<(), PricingError>,
}

impl PublishResult {
    #[must_use]
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    #[must_use]
    pub fn detail(&self) -> String {
        match &self.outcome {
            Ok(()) => "published".to_string(),
            Err(err) => describe_error(err),
        }
    }
}

fn describe_error(err: &PricingError) -> String {
    match err.remediation() {
        Some(hint) => format!("{err}. {hint}"),
        None => err.to_string(),
    }
}

/// Display row for one product of the catalog listing.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub id: String,
    pub title: String,
    pub garment_type: String,
    pub image_url: Option<String>,
    pub variants: Vec<LabeledVariant>,
    /// `None` when the product has no variants.
    pub reference: Option<LabeledVariant>,
    /// Current retail/profit/margin of the reference variant.
    pub reference_fields: Option<PriceFields>,
    pub default_variant_id: Option<i64>,
    pub enabled_variant_count: usize,
    /// Standard shipping in minor units, when a rate is known.
    pub shipping_cost: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogListing {
    pub shop_id: i64,
    pub products: Vec<ProductSummary>,
    /// Sorted, de-duplicated garment types across `products`.
    pub garment_types: Vec<String>,
}

/// Entry point for every pricing operation.
#[derive(Debug)]
pub struct PricingService<C> {
    catalog: C,
    blueprints: BlueprintCache,
    shipping: ShippingCache,
    shipping_country: String,
}

impl<C: CatalogService> PricingService<C> {
    pub fn new(catalog: C, shipping_country: impl Into<String>) -> Self {
        Self {
            catalog,
            blueprints: BlueprintCache::new(),
            shipping: ShippingCache::new(),
            shipping_country: shipping_country.into(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The first shop of the account.
    ///
    /// # Errors
    ///
    /// [`PricingError::NoShopsFound`] when the account has no shops.
    pub async fn primary_shop(&self) -> Result<Shop, PricingError> {
        self.catalog
            .list_shops()
            .await?
            .into_iter()
            .next()
            .ok_or(PricingError::NoShopsFound)
    }

    /// Builds the read-only display listing of a shop's products.
    ///
    /// A product without variants is listed with no reference rather than
    /// failing. Shipping and garment-type lookup failures degrade to "no
    /// rate" and a generic label.
    ///
    /// # Errors
    ///
    /// [`PricingError::NoProductsFound`] for an empty shop, or the first
    /// failed product fetch.
    pub async fn list_catalog(&self, shop_id: i64) -> Result<CatalogListing, PricingError> {
        let refs = self.catalog.list_products(shop_id).await?;
        if refs.is_empty() {
            return Err(PricingError::NoProductsFound { shop_id });
        }

        let mut products = Vec::with_capacity(refs.len());
        for product_ref in &refs {
            let product = self.catalog.get_product(shop_id, &product_ref.id).await?;
            products.push(self.summarize(product).await);
        }

        let garment_types: BTreeSet<String> =
            products.iter().map(|p| p.garment_type.clone()).collect();

        Ok(CatalogListing {
            shop_id,
            products,
            garment_types: garment_types.into_iter().collect(),
        })
    }

    async fn summarize(&self, product: Product) -> ProductSummary {
        let variants = label_variants(&product);
        let reference = select_reference_with_match(&product.variants, &product.options)
            .map(|(variant, _)| variant);
        let reference_id = reference.map(|v| v.id);

        let garment_type = match self
            .blueprints
            .garment_type(&self.catalog, product.blueprint_id)
            .await
        {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(product_id = %product.id, error = %err, "blueprint lookup failed");
                product
                    .blueprint_id
                    .map_or_else(|| "Unknown".to_string(), |id| format!("Blueprint {id}"))
            }
        };

        let shipping_cost = self.shipping_for(&product, reference).await;

        ProductSummary {
            garment_type,
            image_url: product.image_url.clone(),
            reference: variants
                .iter()
                .find(|lv| Some(lv.variant.id) == reference_id)
                .cloned(),
            reference_fields: reference.map(PriceFields::from_variant),
            default_variant_id: product.default_variant().map(|v| v.id),
            enabled_variant_count: product.enabled_variant_count(),
            shipping_cost,
            variants,
            id: product.id,
            title: product.title,
        }
    }

    async fn shipping_for(&self, product: &Product, reference: Option<&Variant>) -> Option<i64> {
        let provider_id = product.print_provider_id?;
        let print_area_key = reference?.print_area_key.as_deref()?;
        match self
            .shipping
            .cost(
                &self.catalog,
                provider_id,
                print_area_key,
                &self.shipping_country,
            )
            .await
        {
            Ok(cost) => cost,
            Err(err) => {
                tracing::warn!(product_id = %product.id, error = %err, "shipping lookup failed");
                None
            }
        }
    }

    /// Applies one pricing signal to every listed product, sequentially.
    ///
    /// Never fails as a whole: each product's outcome is reported in its
    /// [`ProductResult`], in input order. An invalid signal fails every
    /// product without contacting the catalog.
    pub async fn apply_bulk(
        &self,
        shop_id: i64,
        product_ids: &[String],
        signal: PriceSignal,
        flat: bool,
    ) -> Vec<ProductResult> {
        if let Err(err) = signal.validate() {
            return product_ids
                .iter()
                .map(|id| ProductResult {
                    product_id: id.clone(),
                    outcome: Err(err.clone()),
                })
                .collect();
        }

        let mut results = Vec::with_capacity(product_ids.len());
        for product_id in product_ids {
            let outcome = self.reprice(shop_id, product_id, signal, flat).await;
            if let Err(err) = &outcome {
                tracing::warn!(product_id = %product_id, error = %err, "product repricing failed");
            }
            results.push(ProductResult {
                product_id: product_id.clone(),
                outcome,
            });
        }

        let failed = results.iter().filter(|r| !r.success()).count();
        if failed > 0 {
            tracing::warn!(
                failed,
                total = results.len(),
                "some products failed during bulk repricing"
            );
        }
        results
    }

    async fn reprice(
        &self,
        shop_id: i64,
        product_id: &str,
        signal: PriceSignal,
        flat: bool,
    ) -> Result<PriceReport, PricingError> {
        let product = self.catalog.get_product(shop_id, product_id).await?;
        let reference = reference_for(&product)?;
        self.submit(shop_id, &product, reference, signal, flat)
            .await
    }

    /// Reprices one product from an edit form that submitted all three
    /// pricing fields, keeping whichever field moved furthest from the
    /// reference variant's current values.
    ///
    /// # Errors
    ///
    /// - [`PricingError::NoReferenceVariant`] for a product without variants.
    /// - [`PricingError::InvalidNumericInput`] when a submitted field is not
    ///   finite, or the chosen field is negative.
    /// - [`PricingError::InvalidMargin`] when the chosen margin is 100% or more.
    /// - Catalog errors from fetching or updating the product.
    pub async fn apply_edit(
        &self,
        shop_id: i64,
        product_id: &str,
        submitted: PriceFields,
        flat: bool,
    ) -> Result<PriceReport, PricingError> {
        let product = self.catalog.get_product(shop_id, product_id).await?;
        let reference = reference_for(&product)?;

        submitted.ensure_finite()?;
        let current = PriceFields::from_variant(reference);
        let kind = disambiguate(&current, &submitted);
        tracing::debug!(product_id, field = kind.field_name(), "edit resolved to field");
        let signal = submitted.signal(kind)?;

        self.submit(shop_id, &product, reference, signal, flat)
            .await
    }

    async fn submit(
        &self,
        shop_id: i64,
        product: &Product,
        reference: &Variant,
        signal: PriceSignal,
        flat: bool,
    ) -> Result<PriceReport, PricingError> {
        let updates = compute_price_set(&product.variants, reference, signal, flat)?;
        self.catalog
            .update_variant_prices(shop_id, &product.id, &updates)
            .await?;

        tracing::info!(
            product_id = %product.id,
            variants = updates.len(),
            %signal,
            flat,
            "product repriced"
        );
        Ok(PriceReport::build(
            product,
            reference.id,
            signal,
            flat,
            &updates,
        ))
    }

    /// Publishes each product, pushing only its retail prices to the
    /// storefront. Failures are isolated per product.
    pub async fn publish(&self, shop_id: i64, product_ids: &[String]) -> Vec<PublishResult> {
        let flags = PublishFlags::retail_price_only();
        let mut results = Vec::with_capacity(product_ids.len());
        for product_id in product_ids {
            let outcome = self
                .catalog
                .publish_product(shop_id, product_id, flags)
                .await
                .map_err(PricingError::from);
            match &outcome {
                Ok(()) => tracing::info!(product_id = %product_id, "product published"),
                Err(err) => {
                    tracing::warn!(product_id = %product_id, error = %err, "publish failed");
                }
            }
            results.push(PublishResult {
                product_id: product_id.clone(),
                outcome,
            });
        }
        results
    }

    /// Blueprint id → title, ordered by id.
    ///
    /// # Errors
    ///
    /// Propagates a failed first fetch of the blueprint list.
    pub async fn blueprints(&self) -> Result<BTreeMap<i64, String>, PricingError> {
        let names = self.blueprints.names(&self.catalog).await?;
        Ok(names
            .iter()
            .map(|(id, title)| (*id, title.clone()))
            .collect())
    }
}

/// Reference variant for a pricing operation; absence is a hard failure.
fn reference_for(product: &Product) -> Result<&Variant, PricingError> {
    let (reference, how) = select_reference_with_match(&product.variants, &product.options)
        .ok_or_else(|| PricingError::NoReferenceVariant {
            product_id: product.id.clone(),
        })?;
    if how == ReferenceMatch::FirstFallback {
        tracing::warn!(
            product_id = %product.id,
            variant_id = reference.id,
            "no Large variant; pricing from the first variant"
        );
    }
    Ok(reference)
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
