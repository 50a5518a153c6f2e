//! resound-ss (Song Service)
//!
//! Stores song metadata records pushed by resound-rs.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use resound_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use resound_ss::db::{init_database_pool, SongStore, DATABASE_FILE};
use resound_ss::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "resound-ss", version, about = "Song metadata catalog service")]
struct Args {
    /// Root folder holding the catalog database
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "RESOUND_SS_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(long, env = "RESOUND_SS_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load_or_default(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting Resound song service (resound-ss) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let root_folder = RootFolderResolver::new("song-service")
        .with_toml(&config)
        .resolve(args.root_folder.as_deref());
    let initializer = RootFolderInitializer::new(root_folder);
    initializer.ensure_directory_exists()?;

    let db_path = initializer.database_path(DATABASE_FILE);
    info!("Database: {}", db_path.display());
    let pool = init_database_pool(&db_path).await?;

    let app = build_router(AppState::new(SongStore::new(pool)));

    let service = &config.song_service;
    let bind = args.bind.unwrap_or_else(|| service.bind_address.clone());
    let port = args.port.unwrap_or(service.port);
    let listener = tokio::net::TcpListener::bind((bind.as_str(), port)).await?;
    info!("resound-ss listening on http://{}:{}", bind, port);
    info!("Health check: http://{}:{}/health", bind, port);

    axum::serve(listener, app).await?;

    Ok(())
}
