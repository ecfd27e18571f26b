#![recursion_limit = "512"]

pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export service types
pub use logic::{InventoryReport, ItemOperations, ServiceError, ServiceResult};

// Export all model types
pub use model::*;

// Export seed module
pub use seed::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store};

use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve the inventory API over `store` on an already bound listener.
pub async fn serve<S: Store + 'static>(
    listener: TcpListener,
    store: Arc<S>,
    config: &config::AppConfig,
) -> anyhow::Result<()> {
    let app = api::routes::create_app(store, &config.cors);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Load configuration from the environment and run until shutdown.
pub async fn run_server() -> anyhow::Result<()> {
    use log::info;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let config = config::AppConfig::load()?;
    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!("Inventory API listening on http://{}", bind_address);

    if config.database.in_memory {
        let store = Arc::new(MemoryStore::new());
        load_seed_data_if_requested(&*store).await?;
        return serve(listener, store, &config).await;
    }

    let postgres_store =
        PostgresStore::new(&config.database_url()?, config.max_connections()).await?;
    postgres_store.migrate().await?;

    let store = Arc::new(postgres_store);
    load_seed_data_if_requested(&*store).await?;
    serve(listener, store, &config).await
}

async fn load_seed_data_if_requested<S: Store>(store: &S) -> anyhow::Result<()> {
    if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        log::info!("Loading seed data...");
        seed::load_seed_data(store).await?;
    }
    Ok(())
}
