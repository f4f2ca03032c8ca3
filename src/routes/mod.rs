//! Route assembly
//!
//! - `/health`
//! - `/api` public intake: pricing, instant bookings, quotes, contact
//! - `/admin/api` staff console

pub mod health;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{admin, bookings, contacts, pricing, quotes, AppState};

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let api = Router::new()
        .nest("/pricing", pricing::router())
        .nest("/bookings", bookings::routes::public_router())
        .merge(quotes::routes::public_router())
        .merge(contacts::routes::public_router())
        .layer(cors);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .nest("/admin/api", admin::routes::router(state.clone()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
