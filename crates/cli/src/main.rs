//! The Grasshopper CLI - database migrations and pricing checks.
//!
//! # Usage
//!
//! ```bash
//! # Apply review table migrations
//! gh-cli migrate
//!
//! # UPS Ground charge for a 2.5 lb box to North Carolina
//! gh-cli quote --weight 2.5 --state NC
//!
//! # Flat shipping rate for one product variation
//! gh-cli quote --product "B&B Sunday Shampoo" --variation Liter
//!
//! # Sale price and tax for a $34.00 catalog price
//! gh-cli sale-price 3400
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use grasshopper_core::Cents;
use rust_decimal::Decimal;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "gh-cli")]
#[command(author, version, about = "The Grasshopper CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Quote shipping by weight and state, or look up a product's flat rate
    Quote {
        /// Package weight in pounds
        #[arg(short, long, requires = "state", conflicts_with = "product")]
        weight: Option<Decimal>,

        /// Destination state code
        #[arg(short, long)]
        state: Option<String>,

        /// Product name as it appears in the catalog
        #[arg(short, long)]
        product: Option<String>,

        /// Variation name (defaults to "Standard")
        #[arg(short, long, requires = "product")]
        variation: Option<String>,
    },
    /// Show the sale price and tax for a catalog price in cents
    SalePrice {
        /// Catalog price in cents
        cents: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Quote {
            weight,
            state,
            product,
            variation,
        } => {
            let line = match (weight, state, product) {
                (Some(lbs), Some(state), _) => commands::quote::ups(lbs, &state)?,
                (None, _, Some(product)) => commands::quote::flat(&product, variation.as_deref()),
                _ => {
                    return Err(CliError::InvalidArgument(
                        "pass --weight with --state, or --product".to_string(),
                    ));
                }
            };
            println!("{line}");
        }
        Commands::SalePrice { cents } => {
            for line in commands::price::breakdown(Cents::new(cents)) {
                println!("{line}");
            }
        }
    }
    Ok(())
}
