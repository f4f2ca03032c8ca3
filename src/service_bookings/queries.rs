//! Database queries for service bookings.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::ServiceBooking;
use super::requests::UpdateServiceBookingRequest;

/// All bookings, newest first
pub async fn list_service_bookings(pool: &PgPool) -> Result<Vec<ServiceBooking>> {
    let bookings = sqlx::query_as::<_, ServiceBooking>(
        r#"
        SELECT *
        FROM bookings
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_service_booking(pool: &PgPool, id: Uuid) -> Result<ServiceBooking> {
    sqlx::query_as::<_, ServiceBooking>("SELECT * FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

/// Apply the fields present in `update`, leaving the rest untouched
pub async fn update_service_booking(
    pool: &PgPool,
    id: Uuid,
    update: &UpdateServiceBookingRequest,
) -> Result<ServiceBooking> {
    sqlx::query_as::<_, ServiceBooking>(
        r#"
        UPDATE bookings
        SET status = COALESCE($2, status),
            admin_notes = COALESCE($3, admin_notes),
            assigned_to = COALESCE($4, assigned_to),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(update.status.map(|s| s.as_str()))
    .bind(&update.admin_notes)
    .bind(&update.assigned_to)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

pub async fn delete_service_booking(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

/// Service booking counters for the dashboard
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceBookingStats {
    pub total: i64,
    pub pending: i64,
    pub completed: i64,
}

pub async fn service_booking_stats(pool: &PgPool) -> Result<ServiceBookingStats> {
    let stats = sqlx::query_as::<_, ServiceBookingStats>(
        r#"
        SELECT
            COUNT(*) AS total,
            COUNT(*) FILTER (WHERE status = 'pending') AS pending,
            COUNT(*) FILTER (WHERE status = 'completed') AS completed
        FROM bookings
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}
