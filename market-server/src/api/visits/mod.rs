//! Visit Request API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/visits", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/my", get(handler::my_visits))
        .route("/vendor", get(handler::vendor_visits))
        .layer(middleware::from_fn(require_permission("visits:read")));

    let create_routes = Router::new()
        .route("/", post(handler::submit))
        .layer(middleware::from_fn(require_permission("visits:create")));

    let accept_routes = Router::new()
        .route("/{id}/accept", post(handler::accept))
        .layer(middleware::from_fn(require_permission("visits:accept")));

    read_routes.merge(create_routes).merge(accept_routes)
}
