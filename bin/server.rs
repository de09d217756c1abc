// SWIFT Code Directory - Web Server

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use swift_directory::api::{build_router, AppState};
use swift_directory::{logger, seed_from_path, BankDirectory, Config};

#[derive(Debug, Parser)]
#[command(name = "swift-server", version, about = "REST API for the SWIFT code directory")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    logger::init_logger(args.verbose || config.logging.verbose, config.logging.json);

    let mut directory = BankDirectory::open(&config.database.path)
        .with_context(|| format!("Failed to open database {:?}", config.database.path))?;
    tracing::info!(path = ?config.database.path, "Database opened");

    if config.seed.on_startup {
        if let Some(csv_path) = &config.seed.csv_path {
            seed_from_path(directory.connection_mut(), csv_path)
                .with_context(|| format!("Failed to seed from {:?}", csv_path))?;
        }
    }

    let app = build_router(AppState::new(directory));

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(%addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
    }
}
