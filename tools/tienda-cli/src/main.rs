//! Tienda CLI - terminal storefront over the cart core.
//!
//! Commands:
//! - `tienda catalog` - Show the product catalog
//! - `tienda cart` - Show the current cart and totals
//! - `tienda add <ID>` - Add one unit of a product
//! - `tienda increase <ID>` / `tienda decrease <ID>` - Adjust a line
//! - `tienda remove <ID>` - Remove a line
//! - `tienda clear` - Empty the cart (asks for confirmation)
//! - `tienda checkout` - Simulate checkout
//! - `tienda shop` - Interactive storefront loop

mod commands;
mod config;
mod output;
mod view;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tienda_commerce::cart::CartStore;
use tienda_commerce::catalog::Catalog;
use tienda_commerce::checkout::CartController;
use tienda_store::Store;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::output::Output;
use crate::view::TermView;

/// Tienda - a small local storefront
#[derive(Parser)]
#[command(name = "tienda")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data directory for the persisted cart
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the product catalog
    Catalog,

    /// Show the current cart and totals
    Cart,

    /// Add one unit of a product to the cart
    Add {
        /// Product id
        id: u32,
    },

    /// Increase a cart line by one unit
    Increase {
        /// Product id
        id: u32,
    },

    /// Decrease a cart line by one unit
    Decrease {
        /// Product id
        id: u32,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: u32,
    },

    /// Empty the cart
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Simulate checkout and clear the cart
    Checkout,

    /// Interactive storefront loop
    Shop,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    let output = Output::new(cli.verbose);

    let config = CliConfig::load_or_default(cli.config.as_deref())?;
    let data_dir = cli
        .data_dir
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from(".tienda"));

    // Persistence is not fatal: an unopenable store degrades the
    // session to in-memory operation after a notice.
    let store = match Store::open(&data_dir) {
        Ok(store) => {
            output.debug(&format!("using data dir {}", data_dir.display()));
            store
        }
        Err(err) => {
            output.warn(&format!(
                "Persistence unavailable ({err}); cart will not survive this session"
            ));
            Store::in_memory()
        }
    };

    let mut controller = CartController::new(
        Catalog::reference(),
        CartStore::new(store, config.pricing.currency),
        config.pricing.clone(),
        config.checkout.clone(),
        TermView,
    );

    let result = match cli.command {
        Commands::Catalog => commands::catalog(&mut controller),
        Commands::Cart => commands::cart(&mut controller),
        Commands::Add { id } => commands::add(&mut controller, id, &output),
        Commands::Increase { id } => commands::increase(&mut controller, id),
        Commands::Decrease { id } => commands::decrease(&mut controller, id),
        Commands::Remove { id } => commands::remove(&mut controller, id, &output),
        Commands::Clear { yes } => commands::clear(&mut controller, yes, &output),
        Commands::Checkout => commands::checkout(&mut controller, &output),
        Commands::Shop => commands::shop(&mut controller, &output),
    };

    if let Err(e) = result {
        output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("tienda_commerce=debug,tienda_store=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
