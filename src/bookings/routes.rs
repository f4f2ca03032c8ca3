//! Instant booking route handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::admin::auth::AdminSession;
use crate::admin::filters::ListQuery;
use crate::error::Result;
use crate::pricing::QuoteSelection;
use crate::AppState;

use super::models::{BookingStatus, InstantBooking};
use super::queries;
use super::requests::UpdateInstantBookingRequest;
use super::services::{self, BookingConfirmationResponse};

/// Public routes, mounted under `/api/bookings`
pub fn public_router() -> Router<AppState> {
    Router::new().route("/instant", post(submit))
}

/// Staff routes, mounted under `/admin/api` behind the session layer
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/instant-bookings", get(list))
        .route(
            "/instant-bookings/:id",
            get(show).patch(update).delete(remove),
        )
}

async fn submit(
    State(state): State<AppState>,
    Json(selection): Json<QuoteSelection>,
) -> Result<(StatusCode, Json<BookingConfirmationResponse>)> {
    let confirmation = services::submit_instant_booking(
        &state.catalog,
        state.bookings.as_ref(),
        state.notifier.as_ref(),
        &state.notify_email,
        &selection,
    )
    .await?;

    state.cache.invalidate_dashboard().await;

    Ok((
        StatusCode::CREATED,
        Json(BookingConfirmationResponse::new(
            &confirmation,
            &state.catalog.currency,
        )),
    ))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<InstantBooking>>> {
    query.check_status::<BookingStatus>()?;
    let bookings = queries::list_instant_bookings(&state.db).await?;
    Ok(Json(query.apply(bookings)))
}

async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<InstantBooking>> {
    Ok(Json(queries::get_instant_booking(&state.db, id).await?))
}

async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<AdminSession>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInstantBookingRequest>,
) -> Result<Json<InstantBooking>> {
    request.validate()?;

    let booking = queries::update_instant_booking(&state.db, id, &request).await?;
    state.cache.invalidate_dashboard().await;

    info!(booking_id = %id, status = %booking.status, by = %session.email, "Instant booking updated");
    Ok(Json(booking))
}

async fn remove(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<AdminSession>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    queries::delete_instant_booking(&state.db, id).await?;
    state.cache.invalidate_dashboard().await;

    info!(booking_id = %id, by = %session.email, "Instant booking deleted");
    Ok(StatusCode::NO_CONTENT)
}
