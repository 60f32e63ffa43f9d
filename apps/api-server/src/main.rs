use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use api_server::config::{AppConfig, HTTP_PORT};
use api_server::server::cors::cors_layer;
use api_server::server::router::{create_router, AppState};
use infrastructure::contact_store::SqliteContactStore;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // 0. .env があれば読み込む
    dotenvy::dotenv().ok();

    // 1. Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load configuration
    let cfg = AppConfig::load()?;

    // 3. Connect the contact store (init-before-serve: 開けなければ起動中止)
    let store = match SqliteContactStore::new(&cfg.database_path).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to open contact store at {}: {e}", cfg.database_path);
            return Err(e.into());
        }
    };
    info!("Contact store ready ({})", cfg.database_path);

    // 4. Build router with injected store
    let state = Arc::new(AppState {
        store: store.clone(),
    });
    let app = create_router(state, cors_layer(&cfg));

    // 5. Serve (ポートは 5000 固定)
    let addr = SocketAddr::from(([0, 0, 0, 0], HTTP_PORT));
    info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 6. Teardown
    store.close().await;
    info!("Contact store closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    } else {
        info!("Shutdown signal received");
    }
}
