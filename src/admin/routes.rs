//! Admin console API routes, mounted under `/admin/api`

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::AppState;
use crate::{bookings, contacts, quotes, service_bookings};

use super::{auth, dashboard};

/// Login and logout are open; everything else needs a session.
///
/// - `POST /login`, `POST /logout`
/// - `GET /session`, `GET /dashboard`
/// - `/bookings`, `/instant-bookings`, `/quotes`, `/contacts` list, get,
///   patch, delete
pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/session", get(auth::current_session))
        .route("/dashboard", get(dashboard::dashboard))
        .merge(service_bookings::routes::admin_router())
        .merge(bookings::routes::admin_router())
        .merge(quotes::routes::admin_router())
        .merge(contacts::routes::admin_router())
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin));

    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .merge(protected)
}
