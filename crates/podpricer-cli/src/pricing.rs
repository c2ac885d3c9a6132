//! Pricing commands: bulk update, single-product edit and publish.
//!
//! Per-product failures are reported in the output rather than aborting the
//! run; the command still exits with an error when any product failed.

use podpricer_core::{
    format_money, PriceFields, PriceReport, PriceSignal, PricingService, ProductResult,
    PublishResult,
};
use podpricer_printify::PrintifyClient;
use serde_json::json;

/// Raw `--retail`/`--profit`/`--margin` values of a bulk run.
#[derive(Debug, Default)]
pub(crate) struct BulkInputs {
    pub retail: Option<String>,
    pub profit: Option<String>,
    pub margin: Option<String>,
}

impl BulkInputs {
    /// Exactly one value must be set; blank counts as unset.
    pub(crate) fn signal(&self) -> Result<PriceSignal, podpricer_core::PricingError> {
        PriceSignal::from_inputs(
            self.retail.as_deref(),
            self.profit.as_deref(),
            self.margin.as_deref(),
        )
    }
}

/// Apply one pricing value to each listed product.
///
/// # Errors
///
/// Returns an error if the inputs do not name exactly one valid pricing
/// value, or if any product failed to update.
pub(crate) async fn run_bulk(
    service: &PricingService<PrintifyClient>,
    shop_id: i64,
    product_ids: &[String],
    inputs: &BulkInputs,
    flat: bool,
    json: bool,
) -> anyhow::Result<()> {
    let signal = inputs.signal()?;
    let results = service.apply_bulk(shop_id, product_ids, signal, flat).await;

    if json {
        let rows: Vec<_> = results.iter().map(product_result_json).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for result in &results {
            print_product_result(result);
        }
    }

    fail_on_errors(results.iter().filter(|r| !r.success()).count(), results.len())
}

/// Reprice one product from a full set of edited values.
///
/// # Errors
///
/// Returns the pricing error of the edit.
pub(crate) async fn run_edit(
    service: &PricingService<PrintifyClient>,
    shop_id: i64,
    product_id: &str,
    submitted: PriceFields,
    flat: bool,
    json: bool,
) -> anyhow::Result<()> {
    let report = service
        .apply_edit(shop_id, product_id, submitted, flat)
        .await
        .map_err(|e| match e.remediation() {
            Some(hint) => anyhow::anyhow!("{e}. {hint}"),
            None => anyhow::Error::new(e),
        })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("ok    {}", report.headline());
        print_changes(&report);
    }
    Ok(())
}

/// Publish each listed product's retail prices.
///
/// # Errors
///
/// Returns an error if any product failed to publish.
pub(crate) async fn run_publish(
    service: &PricingService<PrintifyClient>,
    shop_id: i64,
    product_ids: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let results = service.publish(shop_id, product_ids).await;

    if json {
        let rows: Vec<_> = results.iter().map(publish_result_json).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for result in &results {
            let status = if result.success() { "ok" } else { "FAIL" };
            println!("{status:<6}{}: {}", result.product_id, result.detail());
        }
    }

    fail_on_errors(results.iter().filter(|r| !r.success()).count(), results.len())
}

fn product_result_json(result: &ProductResult) -> serde_json::Value {
    json!({
        "product_id": result.product_id,
        "success": result.success(),
        "detail": result.detail(),
        "report": result.outcome.as_ref().ok(),
    })
}

fn publish_result_json(result: &PublishResult) -> serde_json::Value {
    json!({
        "product_id": result.product_id,
        "success": result.success(),
        "detail": result.detail(),
    })
}

fn print_product_result(result: &ProductResult) {
    match &result.outcome {
        Ok(report) => {
            println!("ok    {}", report.headline());
            print_changes(report);
        }
        Err(_) => println!("FAIL  {}: {}", result.product_id, result.detail()),
    }
}

fn print_changes(report: &PriceReport) {
    for change in &report.changes {
        println!(
            "      {:<8}{:<14}cost {:>8}  {:>8} -> {:>8}  profit {:>8}  {:>5.1}% {:?}",
            change.size,
            change.color,
            format_money(change.cost),
            format_money(change.old_price),
            format_money(change.new_price),
            format_money(change.profit),
            change.margin_percent,
            change.tier
        );
    }
}

fn fail_on_errors(failed: usize, total: usize) -> anyhow::Result<()> {
    if failed > 0 {
        anyhow::bail!("{failed} of {total} products failed");
    }
    Ok(())
}
