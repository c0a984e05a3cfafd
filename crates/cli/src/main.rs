//! Inventory Panel CLI - drive the inventory API from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in; the session is kept in INVENTORY_SESSION_FILE
//! inv-cli login -e admin@example.com -p secreto
//!
//! # Browse products with the same filters as the web panel
//! inv-cli products list --search pintura --stock low
//!
//! # Record an outbound movement
//! inv-cli movements create -p 3 -k out -q 2
//!
//! # Overview
//! inv-cli dashboard
//! ```
//!
//! # Environment Variables
//!
//! - `INVENTORY_API_URL` - Base URL of the API (default `http://localhost:8080/api`)
//! - `INVENTORY_SESSION_FILE` - Where the session is persisted
//! - `INVENTORY_HTTP_TIMEOUT_SECS` - Optional request timeout
//! - `INVENTORY_LOG_JSON` - Emit JSON logs when set

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use inventory_panel_core::filter::{CategoryFilter, MovementFilter, StockFilter};
use inventory_panel_core::models::MovementKind;
use inventory_panel_core::types::{CategoryId, MovementId, ProductId, Role};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod output;

use commands::{Context, ProductFields};

#[derive(Parser)]
#[command(name = "inv-cli")]
#[command(author, version, about = "Inventory Panel CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and persist the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Account role (`admin` or `employee`)
        #[arg(short, long)]
        role: Option<Role>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Inventory overview
    Dashboard,
    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Browse and manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Browse and record stock movements
    Movements {
        #[command(subcommand)]
        action: MovementAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Case-insensitive match on name or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category id, or `all`
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// `all`, `low`, `out` or `available`
        #[arg(long, default_value = "all")]
        stock: StockFilter,
    },
    /// Show one product with its recent movements
    Show { id: ProductId },
    /// Create a product (admin)
    Create {
        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Update a product
    Update {
        id: ProductId,

        #[command(flatten)]
        fields: ProductArgs,
    },
    /// Delete a product
    Delete { id: ProductId },
}

#[derive(clap::Args)]
struct ProductArgs {
    #[arg(short, long)]
    name: Option<String>,

    #[arg(short, long)]
    description: Option<String>,

    #[arg(short, long)]
    category: Option<CategoryId>,

    #[arg(short, long)]
    price: Option<Decimal>,

    #[arg(short, long)]
    stock: Option<i64>,

    #[arg(short, long)]
    image_url: Option<String>,
}

impl From<ProductArgs> for ProductFields {
    fn from(args: ProductArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            category_id: args.category,
            price: args.price,
            stock: args.stock,
            image_url: args.image_url,
        }
    }
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List categories
    List,
    /// Create a category
    Create {
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Rename or describe a category
    Update {
        id: CategoryId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a category
    Delete { id: CategoryId },
}

#[derive(Subcommand)]
enum MovementAction {
    /// List movements
    List {
        /// `all`, `in` or `out`
        #[arg(short, long, default_value = "all")]
        kind: MovementFilter,
    },
    /// Record a movement
    Create {
        #[arg(short, long)]
        product: ProductId,

        /// `in` or `out`
        #[arg(short, long)]
        kind: MovementKind,

        #[arg(short, long)]
        quantity: i64,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a movement
    Delete { id: MovementId },
}

fn init_tracing() {
    // Defaults to info for our crates if RUST_LOG is not set
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "inventory_panel=info".into());

    // JSON for log collectors, text for a terminal
    let json = std::env::var_os("INVENTORY_LOG_JSON").is_some();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = Context::from_env()?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&mut ctx, email, password).await?;
        }
        Commands::Register {
            username,
            email,
            password,
            role,
        } => commands::auth::register(&mut ctx, username, email, password, role).await?,
        Commands::Logout => commands::auth::logout(&mut ctx)?,
        Commands::Whoami => commands::auth::whoami(&mut ctx).await?,
        Commands::Dashboard => commands::dashboard::show(&ctx).await?,
        Commands::Products { action } => match action {
            ProductAction::List {
                search,
                category,
                stock,
            } => commands::products::list(&ctx, search, category, stock).await?,
            ProductAction::Show { id } => commands::products::show(&ctx, id).await?,
            ProductAction::Create { fields } => {
                commands::products::create(&ctx, fields.into()).await?;
            }
            ProductAction::Update { id, fields } => {
                commands::products::update(&ctx, id, fields.into()).await?;
            }
            ProductAction::Delete { id } => commands::products::delete(&ctx, id).await?,
        },
        Commands::Categories { action } => match action {
            CategoryAction::List => commands::categories::list(&ctx).await?,
            CategoryAction::Create { name, description } => {
                commands::categories::create(&ctx, name, description).await?;
            }
            CategoryAction::Update {
                id,
                name,
                description,
            } => commands::categories::update(&ctx, id, name, description).await?,
            CategoryAction::Delete { id } => commands::categories::delete(&ctx, id).await?,
        },
        Commands::Movements { action } => match action {
            MovementAction::List { kind } => commands::movements::list(&ctx, kind).await?,
            MovementAction::Create {
                product,
                kind,
                quantity,
                description,
            } => {
                commands::movements::create(&ctx, product, kind, quantity, description).await?;
            }
            MovementAction::Delete { id } => commands::movements::delete(&ctx, id).await?,
        },
    }
    Ok(())
}
