//! HTTP client for the Printify REST API.
//!
//! Reads are retried on transient failures (429, 5xx, network) with
//! exponential back-off. Writes (price updates, publishes) are sent once and
//! their refusals are surfaced as typed errors.

mod fetch_all;
mod service;
mod write;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use podpricer_core::{AppConfig, Blueprint, Product, Shop};

use crate::convert::{convert_blueprint, convert_product, convert_shop};
use crate::error::PrintifyError;
use crate::retry::retry_with_backoff;
use crate::types::{PrintifyBlueprint, PrintifyProduct, PrintifyShop, ShippingResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.printify.com/v1/";

/// Maximum number of product-list pages to fetch before returning an error.
///
/// Each page may be retried up to `max_retries` times, so the worst-case
/// request count is `MAX_PAGES * (1 + max_retries)`.
pub(crate) const MAX_PAGES: usize = 200;

const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Client for the Printify REST API.
///
/// Use [`PrintifyClient::new`] for production or
/// [`PrintifyClient::with_base_url`] to point at a mock server in tests.
pub struct PrintifyClient {
    client: Client,
    api_key: String,
    base_url: Url,
    /// Retry attempts after the first failure, reads only.
    max_retries: u32,
    /// Base delay in milliseconds: the n-th retry waits `base * 2^(n-1)` ± jitter.
    backoff_base_ms: u64,
    page_limit: u32,
}

impl std::fmt::Debug for PrintifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintifyClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .field("page_limit", &self.page_limit)
            .finish_non_exhaustive()
    }
}

impl PrintifyClient {
    /// Creates a client pointed at the production Printify API.
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PrintifyError> {
        Self::with_base_url(
            api_key,
            DEFAULT_BASE_URL,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PrintifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PrintifyError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, PrintifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so relative joins append to the path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| PrintifyError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
            max_retries,
            backoff_base_ms,
            page_limit: DEFAULT_PAGE_LIMIT,
        })
    }

    /// Builds a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// See [`PrintifyClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, PrintifyError> {
        Ok(Self::with_base_url(
            &config.printify_api_key,
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )?
        .with_page_limit(config.products_page_limit))
    }

    /// Sets the product-list page size (clamped to at least 1).
    #[must_use]
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    /// Lists the shops of the account.
    ///
    /// # Errors
    ///
    /// Any read error; see [`PrintifyClient::get_json`].
    pub async fn list_shops(&self) -> Result<Vec<Shop>, PrintifyError> {
        let url = self.endpoint("shops.json")?;
        let shops: Vec<PrintifyShop> = self.get_json(url, "shops").await?;
        Ok(shops.into_iter().map(convert_shop).collect())
    }

    /// Fetches one product with all options and variants.
    ///
    /// # Errors
    ///
    /// Any read error; [`PrintifyError::NotFound`] for an unknown product.
    pub async fn get_product(&self, shop_id: i64, product_id: &str) -> Result<Product, PrintifyError> {
        let url = self.product_url(shop_id, product_id)?;
        let product: PrintifyProduct = self
            .get_json(url, &format!("product {product_id}"))
            .await?;
        Ok(convert_product(product))
    }

    /// Standard shipping cost in minor units for the combination; `None`
    /// when Printify has no rate for it (any 4xx/5xx after retries, or a body
    /// without a standard cost).
    ///
    /// # Errors
    ///
    /// Network failures, rate limiting after retries, and malformed bodies.
    pub async fn shipping_cost(
        &self,
        provider_id: i64,
        print_area_key: &str,
        country: &str,
    ) -> Result<Option<i64>, PrintifyError> {
        let url = self.shipping_url(provider_id, print_area_key, country)?;
        match self.get_json::<ShippingResponse>(url, "shipping").await {
            Ok(response) => Ok(response.standard.and_then(|tier| tier.cost)),
            Err(PrintifyError::NotFound { .. } | PrintifyError::UnexpectedStatus { .. }) => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Lists every catalog blueprint.
    ///
    /// # Errors
    ///
    /// Any read error; see [`PrintifyClient::get_json`].
    pub async fn list_blueprints(&self) -> Result<Vec<Blueprint>, PrintifyError> {
        let url = self.endpoint("catalog/blueprints.json")?;
        let blueprints: Vec<PrintifyBlueprint> = self.get_json(url, "blueprints").await?;
        Ok(blueprints.into_iter().map(convert_blueprint).collect())
    }

    /// GETs `url` with retries and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// - [`PrintifyError::RateLimited`]: HTTP 429 after all retries.
    /// - [`PrintifyError::NotFound`]: HTTP 404 (not retried).
    /// - [`PrintifyError::UnexpectedStatus`]: any other non-2xx (5xx retried).
    /// - [`PrintifyError::Http`]: network or TLS failure after all retries.
    /// - [`PrintifyError::Deserialize`]: body does not match `T` (not retried).
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, PrintifyError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .bearer_auth(&self.api_key)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(PrintifyError::RateLimited { retry_after_secs });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(PrintifyError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(PrintifyError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| PrintifyError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }

    fn endpoint(&self, path: &str) -> Result<Url, PrintifyError> {
        self.base_url
            .join(path)
            .map_err(|e| PrintifyError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    fn product_url(&self, shop_id: i64, product_id: &str) -> Result<Url, PrintifyError> {
        let mut url = self.endpoint(&format!("shops/{shop_id}/products/"))?;
        url.path_segments_mut()
            .map_err(|()| PrintifyError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "cannot be a base".to_owned(),
            })?
            .pop_if_empty()
            .push(&format!("{product_id}.json"));
        Ok(url)
    }

    fn products_page_url(&self, shop_id: i64, page: usize) -> Result<Url, PrintifyError> {
        let mut url = self.endpoint(&format!("shops/{shop_id}/products.json"))?;
        url.query_pairs_mut()
            .append_pair("limit", &self.page_limit.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    fn shipping_url(
        &self,
        provider_id: i64,
        print_area_key: &str,
        country: &str,
    ) -> Result<Url, PrintifyError> {
        let mut url = self.endpoint("shipping.json")?;
        url.query_pairs_mut()
            .append_pair("country", country)
            .append_pair("provider_id", &provider_id.to_string())
            .append_pair("print_area_key", print_area_key);
        Ok(url)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
