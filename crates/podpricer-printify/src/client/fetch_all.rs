//! Multi-page product list fetch for `PrintifyClient`.

use podpricer_core::ProductRef;

use crate::convert::convert_list_item;
use crate::error::PrintifyError;
use crate::types::ProductsPage;

use super::PrintifyClient;
use super::MAX_PAGES;

impl PrintifyClient {
    /// Fetches one page (1-based) of a shop's product list.
    ///
    /// # Errors
    ///
    /// Any read error; see [`PrintifyClient::get_json`].
    pub async fn fetch_products_page(
        &self,
        shop_id: i64,
        page: usize,
    ) -> Result<ProductsPage, PrintifyError> {
        let url = self.products_page_url(shop_id, page)?;
        self.get_json(url, &format!("products page {page} of shop {shop_id}"))
            .await
    }

    /// Fetches every product of a shop by walking `current_page` up to
    /// `last_page`.
    ///
    /// Stops after a page that reports no `last_page`, reaches it, or
    /// returns no products. All-or-nothing: a failed page discards the pages
    /// already fetched.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_products_page`].
    /// Returns [`PrintifyError::PaginationLimit`] if the number of pages
    /// exceeds [`MAX_PAGES`].
    pub async fn fetch_all_products(&self, shop_id: i64) -> Result<Vec<ProductRef>, PrintifyError> {
        let mut all_products = Vec::new();
        let mut page = 1usize;

        for _ in 0..MAX_PAGES {
            let response = self.fetch_products_page(shop_id, page).await?;
            let fetched = response.data.len();
            all_products.extend(response.data.into_iter().map(convert_list_item));

            let current = response.current_page.map_or(page, |p| p as usize);
            let done = response
                .last_page
                .is_none_or(|last| current >= last as usize);
            if done || fetched == 0 {
                tracing::debug!(shop_id, count = all_products.len(), "product list fetched");
                return Ok(all_products);
            }
            page = current.max(page) + 1;
        }

        Err(PrintifyError::PaginationLimit {
            shop_id,
            max_pages: MAX_PAGES,
        })
    }
}
