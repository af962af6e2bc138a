//! Enzobay CLI - Catalog browsing and store inspection tools.
//!
//! Store commands work on the same `<key>.json` snapshots the storefront
//! writes when run with `STOREFRONT_STORAGE=file`.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! enzobay-cli catalog list --category electronics
//! enzobay-cli catalog similar p-1
//!
//! # Inspect and edit the saved cart
//! enzobay-cli cart add p-1 -q 2
//! enzobay-cli cart show
//!
//! # Toggle a wishlist entry
//! enzobay-cli wishlist toggle p-4
//!
//! # Show live banners
//! enzobay-cli banners list -p home_top
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, show and find similar products
//! - `cart` - Show and edit the saved cart
//! - `wishlist` - Show and edit the saved wishlist
//! - `banners` - List live banners and manage dismissals

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use enzobay_core::BannerPosition;
use enzobay_storefront::catalog::DEFAULT_SIMILAR_LIMIT;
use enzobay_storefront::clock::SystemClock;

mod commands;

#[derive(Parser)]
#[command(name = "enzobay-cli")]
#[command(author, version, about = "Enzobay CLI tools")]
struct Cli {
    /// Directory holding store snapshots
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = ".enzobay", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Show and edit the saved cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show and edit the saved wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// List live banners and manage dismissals
    Banners {
        #[command(subcommand)]
        action: BannerAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,

        /// Search name, brand, category and tags
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one product
    Show { id: String },
    /// Products similar to one product
    Similar {
        id: String,

        #[arg(short, long, default_value_t = DEFAULT_SIMILAR_LIMIT)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and total
    Show,
    /// Add a product
    Add {
        id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (0 removes it)
    Set { id: String, quantity: u32 },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show saved products
    Show,
    /// Save or unsave a product
    Toggle { id: String },
    /// Remove a product
    Remove { id: String },
    /// Empty the wishlist
    Clear,
}

#[derive(Subcommand)]
enum BannerAction {
    /// List live, undismissed banners
    List {
        /// Only this slot (`home_top`, `home_middle`, ...)
        #[arg(short, long)]
        position: Option<BannerPosition>,
    },
    /// Hide a banner
    Dismiss { id: String },
    /// Show dismissed banners again
    Reset,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                print!("{output}");
            }
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let dir = cli.data_dir.as_path();
    let output = match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List { category, search } => {
                commands::catalog::list(category.as_deref(), search.as_deref())
            }
            CatalogAction::Show { id } => commands::catalog::show(&id)?,
            CatalogAction::Similar { id, limit } => commands::catalog::similar(&id, limit)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(dir)?,
            CartAction::Add { id, quantity } => commands::cart::add(dir, &id, quantity)?,
            CartAction::Set { id, quantity } => commands::cart::set(dir, &id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(dir, &id)?,
            CartAction::Clear => commands::cart::clear(dir)?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(dir)?,
            WishlistAction::Toggle { id } => commands::wishlist::toggle(dir, &id)?,
            WishlistAction::Remove { id } => commands::wishlist::remove(dir, &id)?,
            WishlistAction::Clear => commands::wishlist::clear(dir)?,
        },
        Commands::Banners { action } => match action {
            BannerAction::List { position } => {
                commands::banners::list(dir, position, Arc::new(SystemClock)).await?
            }
            BannerAction::Dismiss { id } => commands::banners::dismiss(dir, &id).await?,
            BannerAction::Reset => commands::banners::reset(dir)?,
        },
    };
    Ok(output)
}
