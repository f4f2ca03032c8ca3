//! Database queries for quote requests.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::pricing::round_money;

use super::models::QuoteRequest;
use super::requests::{CreateQuoteRequest, UpdateQuoteRequest};

pub async fn insert_quote(pool: &PgPool, quote: &CreateQuoteRequest) -> Result<QuoteRequest> {
    let row = sqlx::query_as::<_, QuoteRequest>(
        r#"
        INSERT INTO quotes (
            id, name, address, city, postcode, phone1, phone2, email,
            property_type, services, preferred_date, job_description, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 'pending')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&quote.name)
    .bind(&quote.address)
    .bind(&quote.city)
    .bind(&quote.postcode)
    .bind(&quote.phone1)
    .bind(&quote.phone2)
    .bind(&quote.email)
    .bind(quote.property_type.map(|p| p.as_str()))
    .bind(&quote.services)
    .bind(quote.preferred_date)
    .bind(&quote.job_description)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// All quote requests, newest first
pub async fn list_quotes(pool: &PgPool) -> Result<Vec<QuoteRequest>> {
    let quotes = sqlx::query_as::<_, QuoteRequest>(
        r#"
        SELECT *
        FROM quotes
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(quotes)
}

pub async fn get_quote(pool: &PgPool, id: Uuid) -> Result<QuoteRequest> {
    sqlx::query_as::<_, QuoteRequest>("SELECT * FROM quotes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

pub async fn update_quote(
    pool: &PgPool,
    id: Uuid,
    update: &UpdateQuoteRequest,
) -> Result<QuoteRequest> {
    sqlx::query_as::<_, QuoteRequest>(
        r#"
        UPDATE quotes
        SET status = COALESCE($2, status),
            admin_notes = COALESCE($3, admin_notes),
            quote_amount = COALESCE($4, quote_amount),
            assigned_to = COALESCE($5, assigned_to),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(update.status.map(|s| s.as_str()))
    .bind(&update.admin_notes)
    .bind(update.quote_amount.map(|a| round_money(a, 2)))
    .bind(&update.assigned_to)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

pub async fn delete_quote(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM quotes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

/// Quote counters for the dashboard
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteStats {
    pub total: i64,
    pub pending: i64,
    /// Sum of every quoted amount, outside cancelled requests
    pub quoted_value: Decimal,
}

pub async fn quote_stats(pool: &PgPool) -> Result<QuoteStats> {
    let stats = sqlx::query_as::<_, QuoteStats>(
        r#"
        SELECT
            COUNT(*) AS total,
            COUNT(*) FILTER (WHERE status = 'pending') AS pending,
            COALESCE(SUM(quote_amount) FILTER (WHERE status <> 'cancelled'), 0) AS quoted_value
        FROM quotes
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}
