//! Reservation API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    // 档期查询与列表：需要 bookings:read
    let read_routes = Router::new()
        .route("/availability", get(handler::availability))
        .route("/booked-dates", get(handler::booked_dates))
        .route("/my", get(handler::my_bookings))
        .route("/vendor", get(handler::vendor_bookings))
        .layer(middleware::from_fn(require_permission("bookings:read")));

    // 预订写入
    let create_routes = Router::new()
        .route("/", post(handler::book))
        .layer(middleware::from_fn(require_permission("bookings:create")));

    let cancel_routes = Router::new()
        .route("/{id}/cancel", post(handler::cancel))
        .layer(middleware::from_fn(require_permission("bookings:cancel")));

    read_routes.merge(create_routes).merge(cancel_routes)
}
