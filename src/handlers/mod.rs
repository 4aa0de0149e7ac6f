pub mod analytics;
pub mod transactions;

use axum::http::Uri;
use axum::routing::get;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let api = api_routes();

    Router::new()
        .merge(api.clone())
        // The mobile client uses an `/api` base path.
        .nest("/api", api)
        .route("/health", get(health))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(transactions::list).post(transactions::create))
        .route("/transactions/:id", get(transactions::show).delete(transactions::delete))
        .route("/analytics/monthly-trends", get(analytics::monthly_trends))
}

async fn health() -> &'static str {
    "OK"
}

pub async fn fallback(uri: Uri) -> AppError {
    tracing::debug!(%uri, "No route matched");
    AppError::NotFound("Not found".into())
}
