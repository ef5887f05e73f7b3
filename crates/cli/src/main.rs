//! Nutribook CLI - database migrations and order ledger inspection.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! nb-cli migrate
//!
//! # Print every order in the ledger
//! nb-cli orders
//!
//! # Print one customer's orders as JSON
//! nb-cli orders --username anna --json
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "nb-cli")]
#[command(author, version, about = "Nutribook CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Print recorded orders
    Orders {
        /// Only show orders filed under this username
        #[arg(short, long)]
        username: Option<String>,

        /// Ledger file (defaults to `STOREFRONT_ORDERS_PATH` or `orders.json`)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Print the records as JSON instead of one line per order
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await,
        Commands::Orders {
            username,
            path,
            json,
        } => commands::orders::print(path, username.as_deref(), json).await,
    }
}
