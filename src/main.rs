use std::sync::Arc;

use smartflow::api::router::create_router;
use smartflow::config::AppConfig;
use smartflow::ingestion::load_snapshot;
use smartflow::metrics::init_metrics;
use smartflow::store::Store;
use smartflow::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = config.bind_addr();
    let metrics_handle = init_metrics();

    let store = Arc::new(Store::new());

    // --- Seed from the indexer export, if one is configured ---
    match &config.snapshot_path {
        Some(path) => {
            let (snapshot, summary) = load_snapshot(path).await?;
            store.apply_snapshot(snapshot).await;
            tracing::info!(
                wallets = summary.wallets.accepted,
                flows = summary.flows.accepted,
                trades = summary.trades.accepted,
                rejected = summary.wallets.rejected + summary.flows.rejected + summary.trades.rejected,
                "Store seeded from snapshot"
            );
        }
        None => {
            tracing::warn!("SNAPSHOT_PATH is not set, store starts empty until the indexer pushes data");
        }
    }

    if config.api_token.is_none() {
        tracing::warn!("API_TOKEN is not set, /api routes are unauthenticated");
    }

    let state = AppState {
        store,
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("smartflow=info,tower_http=info"));

    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
