pub mod accounts;
pub mod auth;
pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;

pub const BASE_PATH: &str = "/quotedesk";

/// Full application router under `BASE_PATH`.
pub fn build_app(state: AppState) -> Router {
    let api = routes::create_router(&state)
        .route("/", get(|| async { "QuoteDesk API" }))
        .route("/health", get(health_check));

    Router::new()
        .nest(BASE_PATH, api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
