//! Service booking route handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::admin::auth::AdminSession;
use crate::admin::filters::ListQuery;
use crate::bookings::BookingStatus;
use crate::error::Result;
use crate::AppState;

use super::models::ServiceBooking;
use super::queries;
use super::requests::UpdateServiceBookingRequest;

/// Staff routes, mounted under `/admin/api` behind the session layer
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list))
        .route("/bookings/:id", get(show).patch(update).delete(remove))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ServiceBooking>>> {
    query.check_status::<BookingStatus>()?;
    let bookings = queries::list_service_bookings(&state.db).await?;
    Ok(Json(query.apply(bookings)))
}

async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ServiceBooking>> {
    Ok(Json(queries::get_service_booking(&state.db, id).await?))
}

async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<AdminSession>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateServiceBookingRequest>,
) -> Result<Json<ServiceBooking>> {
    request.validate()?;

    let booking = queries::update_service_booking(&state.db, id, &request).await?;
    state.cache.invalidate_dashboard().await;

    info!(booking_id = %id, status = %booking.status, by = %session.email, "Booking updated");
    Ok(Json(booking))
}

async fn remove(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<AdminSession>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    queries::delete_service_booking(&state.db, id).await?;
    state.cache.invalidate_dashboard().await;

    info!(booking_id = %id, by = %session.email, "Booking deleted");
    Ok(StatusCode::NO_CONTENT)
}
