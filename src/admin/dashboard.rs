//! Admin dashboard statistics

use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::bookings::queries::{instant_booking_stats, InstantBookingStats};
use crate::cache::DASHBOARD_KEY;
use crate::contacts::queries::{contact_stats, ContactStats};
use crate::error::Result;
use crate::quotes::queries::{quote_stats, QuoteStats};
use crate::service_bookings::queries::{service_booking_stats, ServiceBookingStats};
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub bookings: ServiceBookingStats,
    pub instant_bookings: InstantBookingStats,
    pub quotes: QuoteStats,
    pub contacts: ContactStats,
    pub generated_at: DateTime<Utc>,
}

pub async fn load_dashboard_stats(db: &PgPool) -> Result<DashboardStats> {
    let (bookings, instant_bookings, quotes, contacts) = tokio::try_join!(
        service_booking_stats(db),
        instant_booking_stats(db),
        quote_stats(db),
        contact_stats(db)
    )?;

    Ok(DashboardStats {
        bookings,
        instant_bookings,
        quotes,
        contacts,
        generated_at: Utc::now(),
    })
}

/// `GET /admin/api/dashboard`
pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    if let Some(cached) = state.cache.dashboard.get(DASHBOARD_KEY).await {
        tracing::debug!("Cache HIT for dashboard stats");
        return Ok(Json(cached.as_ref().clone()));
    }

    tracing::debug!("Cache MISS for dashboard stats");
    let generation = state.cache.dashboard_generation();
    let stats = load_dashboard_stats(&state.db).await?;
    if !state
        .cache
        .store_dashboard(generation, Arc::new(stats.clone()))
        .await
    {
        tracing::debug!("Dashboard stats changed during load, not cached");
    }

    Ok(Json(stats))
}
