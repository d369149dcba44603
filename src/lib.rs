use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use routes::{
    health::health_check,
    metrics::{cheapest_book, count_by_author, mean_units_sold},
};
use services::metrics::MetricsService;

pub fn build_router(metrics: MetricsService) -> Router {
    Router::new()
        .route("/status", get(health_check))
        .route("/books/mean-units-sold", get(mean_units_sold))
        .route("/books/cheapest", get(cheapest_book))
        .route("/books/count-by-author/:author", get(count_by_author))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(metrics)
}
