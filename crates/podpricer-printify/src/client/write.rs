//! Single-shot writes: price updates and publishes. Never retried.

use podpricer_core::{PublishFlags, UpdateRecord};
use reqwest::RequestBuilder;

use crate::convert::{capacity_reason, price_update_body, publish_body};
use crate::error::PrintifyError;

use super::PrintifyClient;

impl PrintifyClient {
    /// Replaces the prices of the listed variants of a product.
    ///
    /// # Errors
    ///
    /// - [`PrintifyError::CapacityExceeded`] when Printify answers with error
    ///   code 8251 (too many enabled variants).
    /// - [`PrintifyError::Rejected`] for any other non-2xx, with the raw body.
    /// - [`PrintifyError::Http`] on network failure.
    pub async fn update_variant_prices(
        &self,
        shop_id: i64,
        product_id: &str,
        updates: &[UpdateRecord],
    ) -> Result<(), PrintifyError> {
        let url = self.product_url(shop_id, product_id)?;
        let request = self.client.put(url).json(&price_update_body(updates));
        self.send_write(request).await
    }

    /// Publishes a product to its storefront, pushing only the fields set in
    /// `flags`.
    ///
    /// # Errors
    ///
    /// Same as [`PrintifyClient::update_variant_prices`].
    pub async fn publish_product(
        &self,
        shop_id: i64,
        product_id: &str,
        flags: PublishFlags,
    ) -> Result<(), PrintifyError> {
        let mut url = self.product_url(shop_id, product_id)?;
        // products/{id}.json → products/{id}/publish.json
        let product_path = url.path().trim_end_matches(".json").to_owned();
        url.set_path(&format!("{product_path}/publish.json"));
        let request = self.client.post(url).json(&publish_body(flags));
        self.send_write(request).await
    }

    async fn send_write(&self, request: RequestBuilder) -> Result<(), PrintifyError> {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let payload = response.text().await.unwrap_or_default();
        if let Some(reason) = capacity_reason(&payload) {
            return Err(PrintifyError::CapacityExceeded { reason });
        }
        Err(PrintifyError::Rejected {
            status: status.as_u16(),
            payload,
        })
    }
}
