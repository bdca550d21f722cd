use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings",
            post(handlers::booking::create_booking).get(handlers::booking::list_bookings),
        )
        .route("/api/bookings/stats", get(handlers::booking::booking_stats))
        .route(
            "/api/bookings/progress",
            get(handlers::booking::booking_progress),
        )
        .route(
            "/api/bookings/:id",
            get(handlers::booking::get_booking)
                .put(handlers::booking::update_booking)
                .delete(handlers::booking::delete_booking),
        )
        .route(
            "/api/bookings/:id/attendance",
            put(handlers::booking::set_attendance),
        )
}
