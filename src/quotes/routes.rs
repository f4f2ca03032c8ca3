//! Quote request route handlers

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
use crate::notify;
use crate::AppState;

use super::models::{QuoteRequest, QuoteStatus};
use super::queries;
use super::requests::{CreateQuoteRequest, UpdateQuoteRequest};

/// Public routes, mounted under `/api`
pub fn public_router() -> Router<AppState> {
    Router::new().route("/quotes", post(create))
}

/// Staff routes, mounted under `/admin/api` behind the session layer
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/quotes", get(list))
        .route("/quotes/:id", get(show).patch(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<QuoteRequest>)> {
    let request = request.normalized();
    request.validate()?;

    let quote = queries::insert_quote(&state.db, &request).await?;
    info!(quote_id = %quote.id, services = quote.services.len(), "Quote request stored");

    let notification = notify::quote_request_notification(&state.notify_email, &quote);
    notify::dispatch(state.notifier.as_ref(), notification).await;
    state.cache.invalidate_dashboard().await;

    Ok((StatusCode::CREATED, Json(quote)))
}

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<QuoteRequest>>> {
    query.check_status::<QuoteStatus>()?;
    let quotes = queries::list_quotes(&state.db).await?;
    Ok(Json(query.apply(quotes)))
}

async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuoteRequest>> {
    Ok(Json(queries::get_quote(&state.db, id).await?))
}

async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<AdminSession>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuoteRequest>,
) -> Result<Json<QuoteRequest>> {
    request.check()?;

    let quote = queries::update_quote(&state.db, id, &request).await?;
    state.cache.invalidate_dashboard().await;

    info!(quote_id = %id, status = %quote.status, by = %session.email, "Quote request updated");
    Ok(Json(quote))
}

async fn remove(
    State(state): State<AppState>,
    Extension(session): Extension<Arc<AdminSession>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    queries::delete_quote(&state.db, id).await?;
    state.cache.invalidate_dashboard().await;

    info!(quote_id = %id, by = %session.email, "Quote request deleted");
    Ok(StatusCode::NO_CONTENT)
}
