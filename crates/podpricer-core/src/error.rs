use thiserror::Error;

/// Remediation shown when the commerce service refuses an update because the
/// product has too many enabled variants.
pub const CAPACITY_REMEDIATION: &str =
    "The product likely has more than 100 enabled variants (hidden or archived ones count too). \
     Disable some variants, then try again.";

/// Errors raised by pricing and catalog operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("no shops found in the account")]
    NoShopsFound,

    #[error("no products found for shop {shop_id}")]
    NoProductsFound { shop_id: i64 },

    #[error("product {product_id} has no variants to price from")]
    NoReferenceVariant { product_id: String },

    #[error("margin must be below 100% (got {percent}%)")]
    InvalidMargin { percent: f64 },

    #[error("invalid {field} value \"{value}\": expected a non-negative number")]
    InvalidNumericInput { field: &'static str, value: String },

    /// Bulk input must set exactly one of retail, profit, or margin.
    #[error("set exactly one of retail, profit, or margin % ({provided} provided)")]
    AmbiguousSignal { provided: usize },

    #[error("too many enabled variants: {reason}")]
    CapacityExceeded { reason: String },

    #[error("update rejected: {payload}")]
    UpdateRejected { payload: String },

    #[error("catalog request failed: {0}")]
    Catalog(String),
}

impl PricingError {
    /// A specific remediation hint for errors that have one.
    #[must_use]
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            Self::CapacityExceeded { .. } => Some(CAPACITY_REMEDIATION),
            _ => None,
        }
    }
}

/// Errors reported by a [`crate::CatalogService`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The service's "too many enabled variants" error code.
    #[error("capacity exceeded (code {code}): {reason}")]
    CapacityExceeded { code: i64, reason: String },

    /// Any other unsuccessful write; `payload` is the raw response body.
    #[error("rejected (status {status:?}): {payload}")]
    Rejected { status: Option<u16>, payload: String },

    /// Transport, decoding, or other read failure.
    #[error("{0}")]
    Request(String),
}

impl From<CatalogError> for PricingError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CapacityExceeded { reason, .. } => Self::CapacityExceeded { reason },
            CatalogError::Rejected { payload, .. } => Self::UpdateRejected { payload },
            CatalogError::Request(message) => Self::Catalog(message),
        }
    }
}

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_error_carries_remediation() {
        let err = PricingError::CapacityExceeded {
            reason: "Too many variants".to_string(),
        };
        assert_eq!(err.remediation(), Some(CAPACITY_REMEDIATION));
    }

    #[test]
    fn generic_rejection_has_no_remediation() {
        let err = PricingError::UpdateRejected {
            payload: "{}".to_string(),
        };
        assert!(err.remediation().is_none());
    }

    #[test]
    fn catalog_errors_map_onto_pricing_taxonomy() {
        let capacity: PricingError = CatalogError::CapacityExceeded {
            code: 8251,
            reason: "limit".to_string(),
        }
        .into();
        assert_eq!(
            capacity,
            PricingError::CapacityExceeded {
                reason: "limit".to_string()
            }
        );

        let rejected: PricingError = CatalogError::Rejected {
            status: Some(400),
            payload: "{\"code\":1}".to_string(),
        }
        .into();
        assert!(matches!(rejected, PricingError::UpdateRejected { ref payload } if payload.contains("code")));

        let request: PricingError = CatalogError::Request("timeout".to_string()).into();
        assert_eq!(request, PricingError::Catalog("timeout".to_string()));
    }
}
