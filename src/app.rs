use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{assets, health, prices, snapshots, transactions};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/assets", assets::router())
        .nest("/api", transactions::router())
        .nest("/api/snapshots", snapshots::router())
        .nest("/api/prices", prices::router())
        // The dashboard is served from a different origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
