use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use log::warn;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::api::{handlers, item_handlers, summary_handlers};
use crate::config::CorsConfig;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/", get(handlers::root))
        // Health check
        .route("/health", get(handlers::health_check))
        // API Documentation
        .route("/docs", get(handlers::get_api_docs))
        .route("/docs/openapi.json", get(handlers::get_openapi_spec))
        // Item catalog
        .route("/api/items", get(item_handlers::list_items::<S>))
        .route("/api/items", post(item_handlers::create_item::<S>))
        .route(
            "/api/items/:id",
            get(item_handlers::get_item::<S>)
                .put(item_handlers::update_item::<S>)
                .delete(item_handlers::delete_item::<S>),
        )
        // Stock ledger
        .route(
            "/api/items/:id/transactions",
            get(item_handlers::list_transactions::<S>),
        )
        .route(
            "/api/items/:id/transactions",
            post(item_handlers::record_transaction::<S>),
        )
        .route(
            "/api/items/:id/transactions/:transaction_id",
            get(item_handlers::get_transaction::<S>),
        )
        // Reports
        .route(
            "/api/inventory/summary",
            get(summary_handlers::get_inventory_summary::<S>),
        )
}

/// Allow the browser client's origins to call the API.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Router with state and middleware applied, ready to serve.
pub fn create_app<S: Store + 'static>(store: Arc<S>, cors: &CorsConfig) -> Router {
    create_router::<S>()
        .layer(cors_layer(cors))
        .with_state(store)
}
