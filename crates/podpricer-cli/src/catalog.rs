//! Read-only catalog commands: product listing and blueprints.

use podpricer_core::{format_money, PricingService, ProductSummary};
use podpricer_printify::PrintifyClient;

/// Print every product of the shop with its reference variant, current
/// pricing and standard shipping.
///
/// # Errors
///
/// Returns an error if the shop has no products or a product fetch fails.
pub(crate) async fn run_products(
    service: &PricingService<PrintifyClient>,
    shop_id: i64,
    json: bool,
) -> anyhow::Result<()> {
    let listing = service.list_catalog(shop_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!(
        "{:<26}{:<28}{:<10}{:<10}{:<10}{:<10}TITLE",
        "PRODUCT", "GARMENT", "REF", "RETAIL", "MARGIN", "SHIP"
    );
    for product in &listing.products {
        println!("{}", product_row(product));
    }
    println!(
        "{} products; garment types: {}",
        listing.products.len(),
        listing.garment_types.join(", ")
    );
    Ok(())
}

fn product_row(product: &ProductSummary) -> String {
    let reference = product.reference.as_ref().map_or_else(
        || "-".to_string(),
        |r| format!("{}/{}", r.labels.size, r.labels.color),
    );
    let (retail, margin) = product.reference_fields.map_or_else(
        || ("-".to_string(), "-".to_string()),
        |f| (format!("{:.2}", f.retail), format!("{:.1}%", f.margin_percent)),
    );
    let shipping = product
        .shipping_cost
        .map_or_else(|| "-".to_string(), format_money);
    format!(
        "{:<26}{:<28}{:<10}{:<10}{:<10}{:<10}{} ({} enabled)",
        product.id,
        truncate(&product.garment_type, 26),
        truncate(&reference, 9),
        retail,
        margin,
        shipping,
        product.title,
        product.enabled_variant_count
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        format!("{}...", s.chars().take(max - 3).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Print the blueprint id → title map.
///
/// # Errors
///
/// Returns an error if the blueprint list cannot be fetched.
pub(crate) async fn run_blueprints(
    service: &PricingService<PrintifyClient>,
    json: bool,
) -> anyhow::Result<()> {
    let blueprints = service.blueprints().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&blueprints)?);
        return Ok(());
    }

    for (id, title) in &blueprints {
        println!("{id:>6}  {title}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("Tee", 26), "Tee");
    }

    #[test]
    fn truncate_shortens_long_strings() {
        assert_eq!(truncate("Unisex Heavy Cotton Tee", 10), "Unisex ...");
    }
}
