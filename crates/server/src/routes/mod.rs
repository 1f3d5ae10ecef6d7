mod analytics;
mod summary;

pub mod health;
pub mod metrics;

use axum::{Router, routing::get};
use deadpool_postgres::Pool;

/// Build the clinical insight API routes
pub fn api_routes() -> Router<Pool> {
    Router::new()
        .route("/summary", get(summary::get))
        .route("/analytics", get(analytics::get))
}
