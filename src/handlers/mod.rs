pub mod categories;
pub mod stats;
pub mod transactions;

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;

use crate::error::ErrorBody;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        // Transaction CRUD
        .route(
            "/api/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/api/transactions/:id",
            get(transactions::show)
                .put(transactions::update)
                .delete(transactions::delete),
        )
        // Statistics
        .route("/api/transactions/stats/summary", get(stats::summary))
        .route("/api/transactions/stats/charts", get(stats::charts))
        .route("/api/categories", get(categories::index))
        // Health check
        .route("/health", get(health))
        .fallback(fallback)
}

async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Personal Finance Tracker API" }))
}

async fn health() -> &'static str {
    "OK"
}

async fn fallback(uri: Uri) -> impl IntoResponse {
    tracing::debug!(path = %uri.path(), "No route matched");
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: format!("Not found - {}", uri.path()),
        }),
    )
}
