mod catalog;
mod pricing;

use clap::{Parser, Subcommand};
use podpricer_core::{AppConfig, PricingService};
use podpricer_printify::PrintifyClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "podpricer-cli")]
#[command(about = "Variant pricing for a Printify shop")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the shop's products with their reference variant and pricing
    Products,
    /// List catalog blueprints (garment types)
    Blueprints,
    /// Apply one pricing value to several products
    Bulk {
        /// Comma-separated product IDs
        #[arg(long, value_delimiter = ',', required = true)]
        products: Vec<String>,

        /// Target retail price in dollars
        #[arg(long)]
        retail: Option<String>,

        /// Target profit per item in dollars
        #[arg(long)]
        profit: Option<String>,

        /// Target margin percentage (below 100)
        #[arg(long)]
        margin: Option<String>,

        /// Give every variant the same price instead of following each variant's cost
        #[arg(long)]
        flat: bool,
    },
    /// Reprice one product from a full set of edited values
    Edit {
        product: String,

        #[arg(long, allow_negative_numbers = true)]
        retail: f64,

        #[arg(long, allow_negative_numbers = true)]
        profit: f64,

        #[arg(long, allow_negative_numbers = true)]
        margin: f64,

        #[arg(long)]
        flat: bool,
    },
    /// Push retail prices of the given products to the storefront
    Publish {
        #[arg(required = true)]
        products: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = podpricer_core::load_app_config()?;
    init_tracing(&config);

    let client = PrintifyClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build Printify client: {e}"))?;
    let service = PricingService::new(client, config.shipping_country.clone());
    let shop = service.primary_shop().await?;
    tracing::debug!(shop_id = shop.id, shop = %shop.title, env = %config.env, "using shop");

    match cli.command {
        Commands::Products => catalog::run_products(&service, shop.id, cli.json).await,
        Commands::Blueprints => catalog::run_blueprints(&service, cli.json).await,
        Commands::Bulk {
            products,
            retail,
            profit,
            margin,
            flat,
        } => {
            let inputs = pricing::BulkInputs {
                retail,
                profit,
                margin,
            };
            pricing::run_bulk(&service, shop.id, &products, &inputs, flat, cli.json).await
        }
        Commands::Edit {
            product,
            retail,
            profit,
            margin,
            flat,
        } => {
            let submitted = podpricer_core::PriceFields {
                retail,
                profit,
                margin_percent: margin,
            };
            pricing::run_edit(&service, shop.id, &product, submitted, flat, cli.json).await
        }
        Commands::Publish { products } => {
            pricing::run_publish(&service, shop.id, &products, cli.json).await
        }
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
