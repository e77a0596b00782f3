use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::analytics::DashboardCache;
use crate::config::Config;
use crate::store::StoreHandle;

use super::analytics::export_aggregate;
use super::handlers::{get_dashboard, get_filters, health_check, reload, AppState};
use super::upload::{get_upload, upload_table};

pub fn create_api_router(store: Arc<StoreHandle>, config: &Config) -> Router {
    let state = Arc::new(AppState {
        store,
        cache: DashboardCache::new(&config.cache),
        upload: RwLock::new(None),
    });

    let api_routes = Router::new()
        .route("/filters", get(get_filters))
        .route("/dashboard", get(get_dashboard))
        .route("/export/{kind}", get(export_aggregate))
        .route(
            "/upload",
            post(upload_table)
                .get(get_upload)
                .layer(DefaultBodyLimit::max(config.upload.max_bytes)),
        )
        .route("/reload", post(reload))
        .with_state(state);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}
