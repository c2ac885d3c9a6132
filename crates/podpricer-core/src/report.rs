//! Confirmation rows describing an applied price set.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::options::resolve_labels;
use crate::pricing::{margin_fraction, to_major, PriceSignal};
use crate::products::{Product, UpdateRecord};

/// Coarse margin health bucket used when displaying prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginTier {
    /// 40% and above.
    High,
    /// 25% up to 40%.
    Medium,
    Low,
}

impl MarginTier {
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 40.0 {
            Self::High
        } else if percent >= 25.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Formats minor units as a two-decimal major amount, e.g. `1500` → `"15.00"`.
#[must_use]
pub fn format_money(minor: i64) -> String {
    Decimal::new(minor, 2).to_string()
}

/// Old and new pricing of one variant after an update.
#[derive(Debug, Clone, Serialize)]
pub struct PriceChange {
    pub variant_id: i64,
    pub size: String,
    pub color: String,
    /// Minor units.
    pub cost: i64,
    /// Minor units.
    pub old_price: i64,
    /// Minor units.
    pub new_price: i64,
    /// Minor units; negative when priced below cost.
    pub profit: i64,
    pub margin_percent: f64,
    pub tier: MarginTier,
}

/// Result of a successful price-set update for one product.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub product_id: String,
    pub title: String,
    pub signal: PriceSignal,
    pub flat: bool,
    pub reference_variant_id: i64,
    pub changes: Vec<PriceChange>,
}

impl PriceReport {
    /// Joins `updates` back onto the product's variants. Variants without an
    /// update record are left out.
    #[must_use]
    pub fn build(
        product: &Product,
        reference_variant_id: i64,
        signal: PriceSignal,
        flat: bool,
        updates: &[UpdateRecord],
    ) -> Self {
        let changes = product
            .variants
            .iter()
            .filter_map(|variant| {
                let update = updates.iter().find(|u| u.variant_id == variant.id)?;
                let labels = resolve_labels(variant, &product.options);
                let margin_percent =
                    margin_fraction(to_major(update.price), to_major(variant.cost)) * 100.0;
                Some(PriceChange {
                    variant_id: variant.id,
                    size: labels.size,
                    color: labels.color,
                    cost: variant.cost,
                    old_price: variant.price,
                    new_price: update.price,
                    profit: update.price - variant.cost,
                    margin_percent,
                    tier: MarginTier::from_percent(margin_percent),
                })
            })
            .collect();

        Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            signal,
            flat,
            reference_variant_id,
            changes,
        }
    }

    /// One-line description of what was applied.
    #[must_use]
    pub fn headline(&self) -> String {
        let mode = match (self.signal, self.flat) {
            (PriceSignal::Retail(_), false) => "others follow margin",
            (_, false) => "per-variant",
            (PriceSignal::Retail(_), true) => "flat",
            (_, true) => "flat retail from reference",
        };
        format!(
            "{} ({}): set {} ({mode}), {} variants updated",
            self.title,
            self.product_id,
            self.signal,
            self.changes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::{OptionValue, OptionsRepr, ProductOption, Variant};

    fn product() -> Product {
        let variant = |id: i64, size_id: &str, cost: i64, price: i64| Variant {
            id,
            title: String::new(),
            cost,
            price,
            is_enabled: true,
            is_visible: true,
            is_default: false,
            print_area_key: None,
            options: Some(OptionsRepr::ByIdList(vec![size_id.to_string()])),
        };
        Product {
            id: "abc".to_string(),
            title: "Tee".to_string(),
            blueprint_id: None,
            print_provider_id: None,
            options: vec![ProductOption {
                name: "Size".to_string(),
                option_type: "size".to_string(),
                values: vec![
                    OptionValue {
                        id: "1".to_string(),
                        title: "L".to_string(),
                    },
                    OptionValue {
                        id: "2".to_string(),
                        title: "XL".to_string(),
                    },
                ],
            }],
            variants: vec![variant(10, "1", 1000, 2000), variant(11, "2", 1200, 2000)],
            image_url: None,
        }
    }

    #[test]
    fn margin_tiers_follow_thresholds() {
        assert_eq!(MarginTier::from_percent(40.0), MarginTier::High);
        assert_eq!(MarginTier::from_percent(39.9), MarginTier::Medium);
        assert_eq!(MarginTier::from_percent(25.0), MarginTier::Medium);
        assert_eq!(MarginTier::from_percent(24.9), MarginTier::Low);
        assert_eq!(MarginTier::from_percent(-5.0), MarginTier::Low);
    }

    #[test]
    fn format_money_renders_two_decimals() {
        assert_eq!(format_money(1500), "15.00");
        assert_eq!(format_money(7), "0.07");
        assert_eq!(format_money(-250), "-2.50");
    }

    #[test]
    fn build_joins_updates_onto_variants() {
        let updates = vec![
            UpdateRecord {
                variant_id: 10,
                price: 2500,
                is_enabled: true,
                is_visible: true,
            },
            UpdateRecord {
                variant_id: 11,
                price: 3000,
                is_enabled: true,
                is_visible: true,
            },
        ];
        let report = PriceReport::build(&product(), 10, PriceSignal::Retail(25.0), false, &updates);

        assert_eq!(report.changes.len(), 2);
        let first = &report.changes[0];
        assert_eq!(first.size, "L");
        assert_eq!(first.color, "N/A");
        assert_eq!(first.old_price, 2000);
        assert_eq!(first.new_price, 2500);
        assert_eq!(first.profit, 1500);
        assert!((first.margin_percent - 60.0).abs() < 1e-9);
        assert_eq!(first.tier, MarginTier::High);
        assert_eq!(report.changes[1].size, "XL");
    }

    #[test]
    fn build_skips_variants_without_updates() {
        let updates = vec![UpdateRecord {
            variant_id: 11,
            price: 1500,
            is_enabled: true,
            is_visible: true,
        }];
        let report = PriceReport::build(&product(), 10, PriceSignal::Profit(3.0), true, &updates);
        assert_eq!(report.changes.len(), 1);
        assert_eq!(report.changes[0].variant_id, 11);
        assert_eq!(report.changes[0].tier, MarginTier::Low);
    }

    #[test]
    fn headline_names_signal_and_mode() {
        let report = PriceReport::build(&product(), 10, PriceSignal::Retail(25.0), false, &[]);
        assert_eq!(
            report.headline(),
            "Tee (abc): set retail $25.00 (others follow margin), 0 variants updated"
        );
    }

    #[test]
    fn report_serializes_signal_and_tier() {
        let updates = vec![UpdateRecord {
            variant_id: 10,
            price: 2500,
            is_enabled: true,
            is_visible: true,
        }];
        let report = PriceReport::build(&product(), 10, PriceSignal::Retail(25.0), false, &updates);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(
            value["signal"],
            serde_json::json!({"kind": "retail", "value": 25.0})
        );
        assert_eq!(value["changes"][0]["tier"], "high");
        assert_eq!(value["changes"][0]["new_price"], 2500);
    }
}
