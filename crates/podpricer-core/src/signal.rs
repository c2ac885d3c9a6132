//! Recovering which pricing field a user actually changed.
//!
//! The edit form submits retail, profit, and margin % together, and editing
//! any one recomputes the other two client-side. Float round-trips between
//! the three representations are not exact, so intent is re-derived from the
//! field that moved furthest from its prior value.

use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::pricing::{margin_fraction, to_major, PriceSignal, SignalKind};
use crate::products::Variant;

/// The three correlated pricing fields of one variant, in major units and
/// percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceFields {
    pub retail: f64,
    pub profit: f64,
    pub margin_percent: f64,
}

impl PriceFields {
    /// Current fields of `variant`: `retail = price`, `profit = retail − cost`,
    /// `margin % = profit / retail · 100` (0 when retail is not positive).
    #[must_use]
    pub fn from_variant(variant: &Variant) -> Self {
        let retail = to_major(variant.price);
        let cost = to_major(variant.cost);
        Self {
            retail,
            profit: retail - cost,
            margin_percent: margin_fraction(retail, cost) * 100.0,
        }
    }

    #[must_use]
    pub fn get(&self, kind: SignalKind) -> f64 {
        match kind {
            SignalKind::Retail => self.retail,
            SignalKind::Profit => self.profit,
            SignalKind::MarginPercent => self.margin_percent,
        }
    }

    /// Rejects submissions where any field is not a finite number.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidNumericInput`] naming the first bad field.
    pub fn ensure_finite(&self) -> Result<(), PricingError> {
        for kind in PRIORITY {
            let value = self.get(kind);
            if !value.is_finite() {
                return Err(PricingError::InvalidNumericInput {
                    field: kind.field_name(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Builds the validated signal carried by field `kind`.
    ///
    /// # Errors
    ///
    /// See [`PriceSignal::new`].
    pub fn signal(&self, kind: SignalKind) -> Result<PriceSignal, PricingError> {
        PriceSignal::new(kind, self.get(kind))
    }
}

/// Tie-break order: earlier entries win equal deltas.
const PRIORITY: [SignalKind; 3] = [
    SignalKind::Retail,
    SignalKind::Profit,
    SignalKind::MarginPercent,
];

/// Picks the field whose absolute change from `old` to `new` is largest.
/// Ties go to retail, then profit, then margin %.
#[must_use]
pub fn disambiguate(old: &PriceFields, new: &PriceFields) -> SignalKind {
    let mut best = PRIORITY[0];
    let mut best_delta = (new.get(best) - old.get(best)).abs();
    for kind in &PRIORITY[1..] {
        let delta = (new.get(*kind) - old.get(*kind)).abs();
        if delta > best_delta {
            best = *kind;
            best_delta = delta;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(retail: f64, profit: f64, margin_percent: f64) -> PriceFields {
        PriceFields {
            retail,
            profit,
            margin_percent,
        }
    }

    #[test]
    fn selects_profit_when_only_profit_changed() {
        let kind = disambiguate(&fields(10.0, 5.0, 33.0), &fields(10.0, 6.0, 33.0));
        assert_eq!(kind, SignalKind::Profit);
    }

    #[test]
    fn selects_retail_when_it_moved_most() {
        let kind = disambiguate(&fields(10.0, 5.0, 33.0), &fields(20.0, 7.0, 35.0));
        assert_eq!(kind, SignalKind::Retail);
    }

    #[test]
    fn selects_margin_when_it_moved_most() {
        let kind = disambiguate(&fields(25.0, 15.0, 60.0), &fields(25.5, 15.5, 40.0));
        assert_eq!(kind, SignalKind::MarginPercent);
    }

    #[test]
    fn ties_prefer_retail_then_profit() {
        assert_eq!(
            disambiguate(&fields(10.0, 5.0, 30.0), &fields(11.0, 6.0, 31.0)),
            SignalKind::Retail
        );
        assert_eq!(
            disambiguate(&fields(10.0, 5.0, 30.0), &fields(10.0, 6.0, 31.0)),
            SignalKind::Profit
        );
    }

    #[test]
    fn unchanged_fields_resolve_to_retail() {
        let same = fields(19.99, 8.0, 40.0);
        assert_eq!(disambiguate(&same, &same), SignalKind::Retail);
    }

    #[test]
    fn from_variant_derives_profit_and_margin() {
        let variant = Variant {
            id: 1,
            title: String::new(),
            cost: 1000,
            price: 2500,
            is_enabled: true,
            is_visible: true,
            is_default: false,
            print_area_key: None,
            options: None,
        };
        let current = PriceFields::from_variant(&variant);
        assert!((current.retail - 25.0).abs() < 1e-9);
        assert!((current.profit - 15.0).abs() < 1e-9);
        assert!((current.margin_percent - 60.0).abs() < 1e-9);
    }

    #[test]
    fn from_variant_zero_price_has_zero_margin() {
        let variant = Variant {
            id: 1,
            title: String::new(),
            cost: 1000,
            price: 0,
            is_enabled: true,
            is_visible: true,
            is_default: false,
            print_area_key: None,
            options: None,
        };
        let current = PriceFields::from_variant(&variant);
        assert!(current.margin_percent.abs() < f64::EPSILON);
        assert!((current.profit + 10.0).abs() < 1e-9);
    }

    #[test]
    fn ensure_finite_names_the_bad_field() {
        let err = fields(10.0, f64::NAN, 30.0).ensure_finite().unwrap_err();
        assert!(matches!(err, PricingError::InvalidNumericInput { field: "profit", .. }));
    }

    #[test]
    fn signal_from_chosen_field_is_validated() {
        let submitted = fields(10.0, -2.0, 120.0);
        assert!(matches!(
            submitted.signal(SignalKind::Profit),
            Err(PricingError::InvalidNumericInput { .. })
        ));
        assert!(matches!(
            submitted.signal(SignalKind::MarginPercent),
            Err(PricingError::InvalidMargin { .. })
        ));
        assert_eq!(
            submitted.signal(SignalKind::Retail).unwrap(),
            PriceSignal::Retail(10.0)
        );
    }
}
