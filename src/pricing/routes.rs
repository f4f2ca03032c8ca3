//! Pricing API routes.
//!
//! Only needs the catalog, so the router is generic over any state the
//! catalog can be pulled out of.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;

use super::calculators::calculate_total_price;
use super::catalog::Catalog;
use super::models::QuoteSelection;
use super::responses::{CatalogResponse, PricingResponse};

/// Pricing routes, mounted under `/api/pricing`
///
/// - `GET /catalog` - categories, extras and discount rules
/// - `POST /quote` - live price for a selection
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Arc<Catalog>: FromRef<S>,
{
    Router::new()
        .route("/catalog", get(catalog))
        .route("/quote", post(quote))
}

async fn catalog(State(catalog): State<Arc<Catalog>>) -> Json<CatalogResponse> {
    Json(CatalogResponse::from(catalog.as_ref()))
}

async fn quote(
    State(catalog): State<Arc<Catalog>>,
    Json(selection): Json<QuoteSelection>,
) -> Result<Json<PricingResponse>> {
    let result = calculate_total_price(&selection, &catalog)?;
    Ok(Json(PricingResponse::from_result(&result, &catalog.currency)))
}
