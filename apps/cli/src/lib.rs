//! # BuildMart Storefront Library
//!
//! Wires configuration, the override store and the distance resolver to the
//! pricing core, one command per invocation.
//!
//! ## Module Organization
//! ```text
//! buildmart_cli/
//! ├── lib.rs          ◄─── You are here (logging, startup, dispatch)
//! ├── cli.rs          ◄─── clap command line definition
//! ├── config.rs       ◄─── AppConfig: defaults → TOML → BUILDMART_* env
//! ├── state/
//! │   ├── mod.rs      ◄─── AppContext (config, database, settings)
//! │   └── settings.rs ◄─── Effective settings (config ⊕ stored overrides)
//! ├── commands/
//! │   ├── catalog.rs  ◄─── products, product
//! │   ├── quote.rs    ◄─── quote
//! │   ├── order.rs    ◄─── order, payment-confirmation
//! │   └── admin.rs    ◄─── admin
//! └── error.rs        ◄─── AppError { code, message }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::{admin, catalog, emit, order, quote};
use config::AppConfig;
use error::AppError;
use state::AppContext;

/// Sets up logging to stderr.
///
/// `RUST_LOG` wins over the default filter. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,buildmart=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Runs one command.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load AppConfig (--config or platform path, then env)                │
/// │  2. Open the override store (SQLite, WAL, migrations)                   │
/// │  3. Merge stored overrides into Settings                                │
/// │  4. Dispatch the command, print its report (text or --json)             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let mut ctx = AppContext::open(config).await?;
    debug!(command = ?cli.command, "Dispatching");

    let json = cli.json;
    let result = dispatch(&mut ctx, cli.command, json).await;

    ctx.db.close().await;
    result
}

async fn dispatch(ctx: &mut AppContext, command: Command, json: bool) -> Result<(), AppError> {
    match command {
        Command::Products { category } => {
            emit(&catalog::list_products(&ctx.settings, category.as_deref()), json)
        }
        Command::Product { id } => emit(&catalog::show_product(&ctx.settings, &id)?, json),
        Command::Quote(args) => {
            let client = ctx.distance_client()?;
            emit(&quote::quote(&ctx.settings, &client, &args).await?, json)
        }
        Command::Order(args) => {
            let client = ctx.distance_client()?;
            emit(&order::place_order(&ctx.settings, &client, args).await?, json)
        }
        Command::PaymentConfirmation(args) => {
            let client = ctx.distance_client()?;
            emit(
                &order::payment_confirmation(&ctx.settings, &client, args).await?,
                json,
            )
        }
        Command::Admin(args) => emit(&admin::run(ctx, args).await?, json),
    }
}
