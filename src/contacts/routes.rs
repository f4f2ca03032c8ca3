//! Contact message route handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::admin::auth::AdminSession;
use crate::admin::filters::ListQuery;
use crate::error::Result;
use crate::notify;
use crate::AppState;

use super::models::{ContactMessage, ContactStatus};
use super::queries;
use super::requests::{CreateContactMessage, UpdateContactMessage};

/// Public routes, mounted under `/api`
pub fn public_router() -> Router<AppState> {
    Router::new().route("/contact", post(create))
}

/// Staff routes, mounted under `/admin/api` behind the session layer
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/contacts", get(list))
        .route("/contacts/:id", get(show).patch(update).delete(remove))
}

#[derive(Debug, Serialize)]
struct ContactReceived {
    id: Uuid,
    message: &'static str,
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateContactMessage>,
) -> Result<(StatusCode, Json<ContactReceived>)> {
    let request = request.normalized();
    request.validate()?;

    let contact = queries::insert_contact_message(&state.db, &request).await?;
    info!(contact_id = %contact.id, "Contact message stored");

    let notification = notify::contact_message_notification(&state.notify_email, &contact);
    notify::dispatch(state.notifier.as_ref(), notification).await;
    state.cache.invalidate_dashboard().await;

    Ok((
        StatusCode::CREATED,
        Json(ContactReceived {
            id: contact.id,
            message: "Thanks for getting in touch. We will reply shortly.",
        }),
    ))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ContactMessage>>> {
    query.check_status::<ContactStatus>()?;
    let messages = queries::list_contact_messages(&state.db).await?;
    Ok(Json(query.apply(messages)))
}

async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ContactMessage>> {
    Ok(Json(queries::get_contact_message(&state.db, id).await?))
}

async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<AdminSession>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateContactMessage>,
) -> Result<Json<ContactMessage>> {
    request.validate()?;

    let contact = queries::update_contact_message(&state.db, id, &request, &session.email).await?;
    state.cache.invalidate_dashboard().await;

    info!(contact_id = %id, status = %contact.status, by = %session.email, "Contact message updated");
    Ok(Json(contact))
}

async fn remove(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<AdminSession>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    queries::delete_contact_message(&state.db, id).await?;
    state.cache.invalidate_dashboard().await;

    info!(contact_id = %id, by = %session.email, "Contact message deleted");
    Ok(StatusCode::NO_CONTENT)
}
