//! Readiness endpoint

use axum::{Router, extract::State, response::Response, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> Response {
    let store: HealthCheckFuture<'_> = Box::pin(async {
        state
            .products
            .count_products()
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    });

    run_health_checks(vec![("store", store)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
