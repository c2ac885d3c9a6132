use podpricer_core::CatalogError;
use thiserror::Error;

/// Errors returned by the Printify API client.
#[derive(Debug, Error)]
pub enum PrintifyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by Printify (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Printify error code 8251: the product has too many enabled variants.
    #[error("too many enabled variants: {reason}")]
    CapacityExceeded { reason: String },

    /// A write was refused; `payload` is the raw response body.
    #[error("request rejected with HTTP {status}: {payload}")]
    Rejected { status: u16, payload: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("pagination limit reached for shop {shop_id}: exceeded {max_pages} pages")]
    PaginationLimit { shop_id: i64, max_pages: usize },
}

impl From<PrintifyError> for CatalogError {
    fn from(err: PrintifyError) -> Self {
        match err {
            PrintifyError::CapacityExceeded { reason } => CatalogError::CapacityExceeded {
                code: crate::types::CAPACITY_ERROR_CODE,
                reason,
            },
            PrintifyError::Rejected { status, payload } => CatalogError::Rejected {
                status: Some(status),
                payload,
            },
            other => CatalogError::Request(other.to_string()),
        }
    }
}
