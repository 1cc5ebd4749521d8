//! # Brands API Main Entry Point
//!
//! `brands [serve]` runs the HTTP service, `brands migrate` applies pending
//! schema migrations and exits.

use anyhow::{Context, Result};
use brands::{
    config::ConfigLoader,
    db,
    server::run_server,
    telemetry::init_tracing,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "brands", about = "Brand profile API", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Default)]
enum Commands {
    /// Start the HTTP server (default)
    #[default]
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .load()
        .context("loading configuration")?;

    init_tracing(&config).context("initializing telemetry")?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Effective configuration");
    }

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;

    match cli.command.unwrap_or_default() {
        Commands::Migrate => {
            db::run_migrations(&db).await?;
        }
        Commands::Serve => {
            if config.run_migrations {
                db::run_migrations(&db).await?;
            }
            run_server(config, db).await?;
        }
    }

    Ok(())
}
