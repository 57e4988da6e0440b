use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, system};

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user),
        )
        // Orders
        .route("/api/orders", get(handlers::orders::list))
        .route("/api/orders/:id", get(handlers::orders::get_by_id))
        .route(
            "/api/orders/:id/status",
            put(handlers::orders::update_status),
        )
        // Payments
        .route("/api/payments", get(handlers::payments::list))
        .route("/api/payments/:id", get(handlers::payments::get_by_id))
        .route(
            "/api/payments/:id/refund",
            post(handlers::payments::refund),
        )
}
