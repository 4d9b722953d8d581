//! Dovini CLI - shop the catalog from the command line.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! dovini catalog
//!
//! # View a product (records it in recently viewed)
//! dovini recent view 3
//!
//! # Add two units to the cart and show it
//! dovini cart add 3 -q 2
//! dovini cart show
//!
//! # Save a product for later
//! dovini wishlist toggle 3
//!
//! # Review a product
//! dovini reviews add 3 -r 5 -a "Ana" -t "Great fit" -b "Wore it all summer."
//! ```
//!
//! # Environment Variables
//!
//! - `DOVINI_CATALOG` - Catalog YAML path (default: catalog.yaml)
//! - `RUST_LOG` - Log filter (default: dovini=info,dovini_storefront=info)
//! - See `dovini_storefront::config` for storage and toast settings

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dovini_core::ProductId;
use dovini_storefront::stores::recently_viewed::DEFAULT_LIMIT;
use dovini_storefront::stores::{ToastKind, ToastStore};
use dovini_storefront::{AppState, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;
use commands::catalog::{self, Catalog};
use commands::reviews::ReviewArgs;

#[derive(Parser)]
#[command(name = "dovini")]
#[command(author, version, about = "Dovini storefront CLI")]
struct Cli {
    /// Product catalog (YAML list of products)
    #[arg(long, env = "DOVINI_CATALOG", default_value = "catalog.yaml", global = true)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Catalog,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// View products and manage viewing history
    Recent {
        #[command(subcommand)]
        action: RecentAction,
    },
    /// Read and write product reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewsAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product ID
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line
    Update {
        /// Product ID
        id: ProductId,

        /// New quantity (clamped to available stock, minimum 1)
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Empty the cart
    Clear,
    /// Show cart contents and total
    Show,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add or remove a product
    Toggle {
        /// Product ID
        id: ProductId,
    },
    /// Show saved products
    Show,
}

#[derive(Subcommand)]
enum RecentAction {
    /// View a product
    View {
        /// Product ID
        id: ProductId,
    },
    /// Forget a viewed product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Forget all viewed products
    Clear,
    /// Show recently viewed products
    Show {
        /// Maximum number of products to show
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum ReviewsAction {
    /// Review a product
    Add {
        /// Product ID
        id: ProductId,

        /// Star rating (1-5)
        #[arg(short, long)]
        rating: u8,

        /// Your name
        #[arg(short, long)]
        author: String,

        /// Review title
        #[arg(short, long)]
        title: String,

        /// Review text
        #[arg(short, long)]
        body: String,
    },
    /// Show reviews for a product
    Show {
        /// Product ID
        id: ProductId,
    },
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dovini=info,dovini_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().without_time().with_target(false))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Catalog => catalog::list(&Catalog::load(&cli.catalog).await?),
        Commands::Cart { action } => match action {
            CartAction::Add { id, quantity } => {
                let catalog = Catalog::load(&cli.catalog).await?;
                commands::cart::add(&state, &catalog, id, quantity)?;
            }
            CartAction::Update { id, quantity } => commands::cart::update(&state, id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&state, id),
            CartAction::Clear => commands::cart::clear(&state),
            CartAction::Show => commands::cart::show(&state),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Toggle { id } => {
                let catalog = Catalog::load(&cli.catalog).await?;
                commands::wishlist::toggle(&state, &catalog, id)?;
            }
            WishlistAction::Show => commands::wishlist::show(&state),
        },
        Commands::Recent { action } => match action {
            RecentAction::View { id } => {
                let catalog = Catalog::load(&cli.catalog).await?;
                commands::recent::view(&state, &catalog, id)?;
            }
            RecentAction::Remove { id } => commands::recent::remove(&state, id),
            RecentAction::Clear => commands::recent::clear(&state),
            RecentAction::Show { limit } => commands::recent::show(&state, limit),
        },
        Commands::Reviews { action } => {
            let catalog = Catalog::load(&cli.catalog).await?;
            match action {
                ReviewsAction::Add {
                    id,
                    rating,
                    author,
                    title,
                    body,
                } => {
                    let args = ReviewArgs {
                        stars: rating,
                        author,
                        title,
                        body,
                    };
                    commands::reviews::add(&state, &catalog, id, args)?;
                }
                ReviewsAction::Show { id } => commands::reviews::show(&state, &catalog, id)?,
            }
        }
    }

    render_toasts(state.toasts());
    Ok(())
}

/// Print the toasts raised by the command.
fn render_toasts(toasts: &ToastStore) {
    for toast in toasts.active() {
        match toast.kind {
            ToastKind::Success | ToastKind::Info => tracing::info!("{}", toast.message),
            ToastKind::Warning => tracing::warn!("{}", toast.message),
            ToastKind::Error => tracing::error!("{}", toast.message),
        }
        toasts.dismiss(toast.id);
    }
}
