//! Price-set computation from a single pricing signal.
//!
//! Costs and prices are stored in minor units but computed in major-unit
//! `f64` arithmetic, then rounded half-up to the nearest minor unit after
//! adding [`ROUNDING_BIAS`] to counter binary truncation (e.g. `14.999999…`).
//!
//! | Signal | per-variant (`flat = false`) | flat (`flat = true`) |
//! |---|---|---|
//! | retail `R` | margin from reference, `cost / (1 - margin)` | `R` everywhere |
//! | profit `P` | `cost + P` | `reference cost + P` everywhere |
//! | margin `M` | `cost / (1 - M/100)` | `reference cost / (1 - M/100)` everywhere |

use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::products::{UpdateRecord, Variant};

/// Added to a major-unit price before rounding to minor units.
pub const ROUNDING_BIAS: f64 = 0.00001;

/// Which of the three correlated pricing fields a signal carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Retail,
    Profit,
    MarginPercent,
}

impl SignalKind {
    /// Field name used in validation errors and reports.
    #[must_use]
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Retail => "retail",
            Self::Profit => "profit",
            Self::MarginPercent => "margin %",
        }
    }
}

/// The single authoritative pricing input of an operation. Money values are
/// in major units (dollars).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PriceSignal {
    Retail(f64),
    Profit(f64),
    /// Margin percentage relative to retail, `0 <= M < 100`.
    MarginPercent(f64),
}

impl PriceSignal {
    /// Builds a validated signal of the given kind.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidNumericInput`] if `value` is not finite or is negative.
    /// - [`PricingError::InvalidMargin`] for a margin of 100% or more.
    pub fn new(kind: SignalKind, value: f64) -> Result<Self, PricingError> {
        let signal = match kind {
            SignalKind::Retail => Self::Retail(value),
            SignalKind::Profit => Self::Profit(value),
            SignalKind::MarginPercent => Self::MarginPercent(value),
        };
        signal.validate()?;
        Ok(signal)
    }

    /// Parses bulk-edit input where each field is optional free text and
    /// blank means unset. Exactly one field must be set.
    ///
    /// # Errors
    ///
    /// - [`PricingError::AmbiguousSignal`] when zero or several fields are set.
    /// - [`PricingError::InvalidNumericInput`] when the set field is not a
    ///   non-negative number.
    /// - [`PricingError::InvalidMargin`] for a margin of 100% or more.
    pub fn from_inputs(
        retail: Option<&str>,
        profit: Option<&str>,
        margin_percent: Option<&str>,
    ) -> Result<Self, PricingError> {
        let provided: Vec<(SignalKind, &str)> = [
            (SignalKind::Retail, retail),
            (SignalKind::Profit, profit),
            (SignalKind::MarginPercent, margin_percent),
        ]
        .into_iter()
        .filter_map(|(kind, raw)| {
            raw.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| (kind, s))
        })
        .collect();

        let [(kind, raw)] = provided.as_slice() else {
            return Err(PricingError::AmbiguousSignal {
                provided: provided.len(),
            });
        };

        let value = raw
            .parse::<f64>()
            .map_err(|_| PricingError::InvalidNumericInput {
                field: kind.field_name(),
                value: (*raw).to_string(),
            })?;
        Self::new(*kind, value)
    }

    #[must_use]
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::Retail(_) => SignalKind::Retail,
            Self::Profit(_) => SignalKind::Profit,
            Self::MarginPercent(_) => SignalKind::MarginPercent,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        match *self {
            Self::Retail(v) | Self::Profit(v) | Self::MarginPercent(v) => v,
        }
    }

    /// Checks the value invariants of the signal.
    ///
    /// # Errors
    ///
    /// See [`PriceSignal::new`].
    pub fn validate(&self) -> Result<(), PricingError> {
        let value = self.value();
        if !value.is_finite() || value < 0.0 {
            return Err(PricingError::InvalidNumericInput {
                field: self.kind().field_name(),
                value: value.to_string(),
            });
        }
        if let Self::MarginPercent(percent) = *self {
            if percent >= 100.0 {
                return Err(PricingError::InvalidMargin { percent });
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for PriceSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retail(v) => write!(f, "retail ${v:.2}"),
            Self::Profit(v) => write!(f, "profit ${v:.2}"),
            Self::MarginPercent(v) => write!(f, "margin {v:.0}%"),
        }
    }
}

/// Converts minor units (cents) to major units.
#[must_use]
pub fn to_major(minor: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let major = minor as f64 / 100.0;
    major
}

/// Rounds a major-unit amount half-up to minor units, clamped at zero.
#[must_use]
pub fn to_minor(major: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let minor = ((major + ROUNDING_BIAS) * 100.0).round() as i64;
    minor.max(0)
}

/// Margin of `price` over `cost` as a fraction of price; `0` when the price
/// is not positive.
#[must_use]
pub fn margin_fraction(price: f64, cost: f64) -> f64 {
    if price > 0.0 {
        (price - cost) / price
    } else {
        0.0
    }
}

/// Price that yields `margin` (a fraction below 1) over `cost`.
fn price_for_margin(cost: f64, margin: f64) -> Result<f64, PricingError> {
    if margin >= 1.0 {
        return Err(PricingError::InvalidMargin {
            percent: margin * 100.0,
        });
    }
    Ok(cost / (1.0 - margin))
}

/// Computes the update records for `variants` from one pricing signal.
///
/// In per-variant mode every variant keeps the same margin as the reference
/// (or the same profit, for a profit signal). In flat mode every variant gets
/// the single target price derived from the reference. Enabled/visible flags
/// are carried over unchanged.
///
/// # Errors
///
/// - [`PricingError::InvalidMargin`] when the effective margin is 100% or
///   more (a margin signal ≥ 100, or a retail signal over a zero-cost
///   reference in per-variant mode).
/// - [`PricingError::InvalidNumericInput`] for a non-finite or negative
///   signal value.
pub fn compute_price_set(
    variants: &[Variant],
    reference: &Variant,
    signal: PriceSignal,
    flat: bool,
) -> Result<Vec<UpdateRecord>, PricingError> {
    signal.validate()?;
    let reference_cost = to_major(reference.cost);

    let price_of: Box<dyn Fn(f64) -> f64> = match (signal, flat) {
        (PriceSignal::Retail(retail), true) => Box::new(move |_| retail),
        (PriceSignal::Retail(retail), false) => {
            let margin = margin_fraction(retail, reference_cost);
            price_for_margin(reference_cost, margin)?;
            Box::new(move |cost| cost / (1.0 - margin))
        }
        (PriceSignal::Profit(profit), true) => {
            let target = reference_cost + profit;
            Box::new(move |_| target)
        }
        (PriceSignal::Profit(profit), false) => Box::new(move |cost| cost + profit),
        (PriceSignal::MarginPercent(percent), true) => {
            let target = price_for_margin(reference_cost, percent / 100.0)?;
            Box::new(move |_| target)
        }
        (PriceSignal::MarginPercent(percent), false) => {
            let margin = percent / 100.0;
            price_for_margin(reference_cost, margin)?;
            Box::new(move |cost| cost / (1.0 - margin))
        }
    };

    Ok(variants
        .iter()
        .map(|variant| UpdateRecord {
            variant_id: variant.id,
            price: to_minor(price_of(to_major(variant.cost))),
            is_enabled: variant.is_enabled,
            is_visible: variant.is_visible,
        })
        .collect())
}

#[cfg(test)]
#[path = "pricing_test.rs"]
mod tests;
