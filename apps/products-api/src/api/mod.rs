//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes served under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// The complete application: documented API plus liveness and readiness
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state), &state.config.cors)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone())))
}
