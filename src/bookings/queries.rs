//! Database queries for instant bookings.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::{InstantBooking, NewInstantBooking};
use super::requests::UpdateInstantBookingRequest;

/// Insert a new booking with status `pending`
pub async fn insert_instant_booking(pool: &PgPool, booking: &NewInstantBooking) -> Result<Uuid> {
    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO instant_bookings (
            id, service_type, service_name, bedrooms, bathrooms,
            property_type, furnished, selected_extras, bundle_selected,
            original_price, discount_amount, final_price, same_day_booking,
            preferred_date, preferred_time,
            first_name, last_name, email, phone, address, suburb, postcode,
            comments, status
        )
        VALUES (
            $1, $2, $3, $4, $5,
            $6, $7, $8, $9,
            $10, $11, $12, $13,
            $14, $15,
            $16, $17, $18, $19, $20, $21, $22,
            $23, 'pending'
        )
        RETURNING id
        "#,
    )
    .bind(booking.id)
    .bind(&booking.service_type)
    .bind(&booking.service_name)
    .bind(booking.bedrooms)
    .bind(booking.bathrooms)
    .bind(&booking.property_type)
    .bind(&booking.furnished)
    .bind(&booking.selected_extras)
    .bind(booking.bundle_selected)
    .bind(booking.original_price)
    .bind(booking.discount_amount)
    .bind(booking.final_price)
    .bind(booking.same_day_booking)
    .bind(booking.preferred_date)
    .bind(&booking.preferred_time)
    .bind(&booking.first_name)
    .bind(&booking.last_name)
    .bind(&booking.email)
    .bind(&booking.phone)
    .bind(&booking.address)
    .bind(&booking.suburb)
    .bind(&booking.postcode)
    .bind(&booking.comments)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// All bookings, newest first
pub async fn list_instant_bookings(pool: &PgPool) -> Result<Vec<InstantBooking>> {
    let bookings = sqlx::query_as::<_, InstantBooking>(
        r#"
        SELECT *
        FROM instant_bookings
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

pub async fn get_instant_booking(pool: &PgPool, id: Uuid) -> Result<InstantBooking> {
    sqlx::query_as::<_, InstantBooking>(
        r#"
        SELECT *
        FROM instant_bookings
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Apply the fields present in `update`, leaving the rest untouched
pub async fn update_instant_booking(
    pool: &PgPool,
    id: Uuid,
    update: &UpdateInstantBookingRequest,
) -> Result<InstantBooking> {
    sqlx::query_as::<_, InstantBooking>(
        r#"
        UPDATE instant_bookings
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

pub async fn delete_instant_booking(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM instant_bookings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

/// Instant booking counters for the dashboard
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InstantBookingStats {
    pub total: i64,
    pub pending: i64,
    pub completed: i64,
    pub revenue: Decimal,
}

pub async fn instant_booking_stats(pool: &PgPool) -> Result<InstantBookingStats> {
    let stats = sqlx::query_as::<_, InstantBookingStats>(
        r#"
        SELECT
            COUNT(*) AS total,
            COUNT(*) FILTER (WHERE status = 'pending') AS pending,
            COUNT(*) FILTER (WHERE status = 'completed') AS completed,
            COALESCE(SUM(final_price) FILTER (WHERE status <> 'cancelled'), 0) AS revenue
        FROM instant_bookings
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}
