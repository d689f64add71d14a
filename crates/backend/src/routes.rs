use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::shared::app_state::AppState;
use crate::shared::request_log::request_logger;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let max_upload = state.config.upload.max_bytes;

    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/enrich",
            post(handlers::u601_enrich_companies::enrich),
        )
        .route("/api/webhook/stripe", post(handlers::webhook::stripe))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}
