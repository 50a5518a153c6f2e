//! resound-rs (Resource Service)
//!
//! Accepts MP3 uploads, stores the bytes in SQLite and forwards extracted
//! song metadata to resound-ss.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use resound_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use resound_rs::catalog::{CatalogPropagator, HttpCatalogClient};
use resound_rs::db::{init_database_pool, ResourceStore, DATABASE_FILE};
use resound_rs::pipeline::ResourcePipeline;
use resound_rs::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "resound-rs", version, about = "Audio resource service")]
struct Args {
    /// Root folder holding the resource database
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "RESOUND_RS_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(long, env = "RESOUND_RS_PORT")]
    port: Option<u16>,

    /// Base URL of the song service
    #[arg(long, env = "RESOUND_CATALOG_URL")]
    catalog_url: Option<String>,
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
        "Starting Resound resource service (resound-rs) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let root_folder = RootFolderResolver::new("resource-service")
        .with_toml(&config)
        .resolve(args.root_folder.as_deref());
    let initializer = RootFolderInitializer::new(root_folder);
    initializer.ensure_directory_exists()?;

    let db_path = initializer.database_path(DATABASE_FILE);
    info!("Database: {}", db_path.display());
    let pool = init_database_pool(&db_path).await?;

    let service = &config.resource_service;
    let catalog_url = args.catalog_url.unwrap_or_else(|| service.catalog_url.clone());
    let catalog = HttpCatalogClient::new(
        &catalog_url,
        Duration::from_secs(service.catalog_timeout_secs),
    )?;
    info!(
        "Catalog: {} (timeout {}s)",
        catalog_url, service.catalog_timeout_secs
    );

    let pipeline = ResourcePipeline::new(
        ResourceStore::new(pool),
        CatalogPropagator::new(Arc::new(catalog)),
    );
    let app = build_router(AppState::new(pipeline, service.max_upload_bytes));

    let bind = args.bind.unwrap_or_else(|| service.bind_address.clone());
    let port = args.port.unwrap_or(service.port);
    let listener = tokio::net::TcpListener::bind((bind.as_str(), port)).await?;
    info!("resound-rs listening on http://{}:{}", bind, port);
    info!("Health check: http://{}:{}/health", bind, port);

    axum::serve(listener, app).await?;

    Ok(())
}
