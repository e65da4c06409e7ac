//! Atelier CLI - Command line host for the storefront cart.
//!
//! Commands:
//! - `atelier add` - Add one unit of an item to the cart
//! - `atelier show` - List the items in the cart
//! - `atelier count` - Print the cart badge count
//! - `atelier summary` - Print the checkout summary
//! - `atelier clear` - Empty the cart
//! - `atelier config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{AddArgs, ClearArgs, ConfigArgs};

/// Atelier CLI - Manage the storefront shopping cart
#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Storage file holding the cart
    #[arg(long, global = true, default_value = context::DEFAULT_STORE_PATH)]
    store: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add one unit of an item to the cart
    Add(AddArgs),

    /// List the items in the cart
    Show,

    /// Print the total number of items (the cart badge)
    Count,

    /// Print the checkout summary
    Summary,

    /// Remove everything from the cart
    Clear(ClearArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Install the log subscriber. Logs go to stderr so command output stays clean.
fn init_tracing(verbose: bool, json: bool) {
    // Matches by target prefix, so this also covers atelier_commerce and atelier_cache.
    let default_filter = if verbose { "atelier=debug" } else { "atelier=info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(verbose)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), &cli.store, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Show => commands::cart::show(&ctx),
        Commands::Count => commands::cart::count(&ctx),
        Commands::Summary => commands::cart::summary(&ctx),
        Commands::Clear(args) => commands::cart::clear(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
