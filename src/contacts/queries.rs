//! Database queries for contact messages.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::ContactMessage;
use super::requests::{CreateContactMessage, UpdateContactMessage};

pub async fn insert_contact_message(
    pool: &PgPool,
    message: &CreateContactMessage,
) -> Result<ContactMessage> {
    let row = sqlx::query_as::<_, ContactMessage>(
        r#"
        INSERT INTO contact_messages (id, name, email, phone, subject, message, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'unread')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&message.name)
    .bind(&message.email)
    .bind(&message.phone)
    .bind(&message.subject)
    .bind(&message.message)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// All messages, newest first
pub async fn list_contact_messages(pool: &PgPool) -> Result<Vec<ContactMessage>> {
    let messages = sqlx::query_as::<_, ContactMessage>(
        "SELECT * FROM contact_messages ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

pub async fn get_contact_message(pool: &PgPool, id: Uuid) -> Result<ContactMessage> {
    sqlx::query_as::<_, ContactMessage>("SELECT * FROM contact_messages WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound)
}

/// Apply an admin update. Moving to `replied` records `staff_email` and the
/// reply time.
pub async fn update_contact_message(
    pool: &PgPool,
    id: Uuid,
    update: &UpdateContactMessage,
    staff_email: &str,
) -> Result<ContactMessage> {
    sqlx::query_as::<_, ContactMessage>(
        r#"
        UPDATE contact_messages
        SET status = COALESCE($2, status),
            admin_notes = COALESCE($3, admin_notes),
            replied_by = CASE WHEN $4 THEN $5 ELSE replied_by END,
            reply_sent_at = CASE WHEN $4 THEN NOW() ELSE reply_sent_at END,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(update.status.map(|s| s.as_str()))
    .bind(&update.admin_notes)
    .bind(update.marks_replied())
    .bind(staff_email)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

pub async fn delete_contact_message(pool: &PgPool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}

/// Message counters for the dashboard
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactStats {
    pub total: i64,
    pub unread: i64,
}

pub async fn contact_stats(pool: &PgPool) -> Result<ContactStats> {
    let stats = sqlx::query_as::<_, ContactStats>(
        r#"
        SELECT
            COUNT(*) AS total,
            COUNT(*) FILTER (WHERE status = 'unread') AS unread
        FROM contact_messages
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(stats)
}
