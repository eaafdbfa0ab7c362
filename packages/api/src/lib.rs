use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state};
use middleware::auth::auth_middleware;
use state::State;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use axum;
pub use sea_orm;

/// Assembles the full HTTP surface. Everything except the health
/// probes sits behind the API key layer; no route is implicitly
/// exempt.
pub fn construct_router(state: Arc<State>) -> Router {
    let protected = Router::new()
        .nest("/admin", routes::admin::routes())
        .nest("/activity", routes::activity::routes())
        .layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(routes::health::routes())
        .merge(protected)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
