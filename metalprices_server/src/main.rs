mod error;
mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metalprices_lib::goldapi_client::Client;
use metalprices_lib::{Config, GoldApiSource, PriceAggregator, StatusStore, UnitConverter};

use crate::routes::{build_router, AppState};

#[derive(Parser)]
#[command(name = "metalprices")]
#[command(about = "Serve precious metal spot prices in INR per gram")]
struct Cli {
    /// Address to listen on (overrides METALPRICES_LISTEN)
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// SQLite database for status checks (overrides METALPRICES_DB; in-memory if unset)
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("metalprices=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(listen) = cli.listen {
        config.listen = listen;
    }
    if let Some(db) = cli.db {
        config.database_path = Some(db);
    }

    if config.api_key.is_empty() {
        tracing::warn!("GOLDAPI_KEY is not set; all prices will come from fallback data");
    }

    let client = Client::with_base_url(
        &config.base_url,
        config.api_key.clone(),
        config.request_timeout,
    )?;
    let aggregator = PriceAggregator::new(
        Arc::new(GoldApiSource::new(client)),
        UnitConverter::new(config.usd_to_inr_rate),
    );

    let status = match &config.database_path {
        Some(path) => StatusStore::open(path)
            .with_context(|| format!("open status database {}", path.display()))?,
        None => StatusStore::open_in_memory()?,
    };
    status.init()?;

    let app = build_router(AppState {
        aggregator,
        status: Arc::new(status),
    });

    tracing::info!(
        listen = %config.listen,
        upstream = %config.base_url,
        usd_to_inr_rate = config.usd_to_inr_rate,
        "metal prices server starting"
    );
    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("bind {}", config.listen))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
