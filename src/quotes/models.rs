//! Quote request records.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::admin::filters::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Pending,
    Contacted,
    Quoted,
    Accepted,
    Completed,
    Cancelled,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Contacted => "contacted",
            QuoteStatus::Quoted => "quoted",
            QuoteStatus::Accepted => "accepted",
            QuoteStatus::Completed => "completed",
            QuoteStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(QuoteStatus::Pending),
            "contacted" => Ok(QuoteStatus::Contacted),
            "quoted" => Ok(QuoteStatus::Quoted),
            "accepted" => Ok(QuoteStatus::Accepted),
            "completed" => Ok(QuoteStatus::Completed),
            "cancelled" => Ok(QuoteStatus::Cancelled),
            other => Err(format!("unknown quote status '{}'", other)),
        }
    }
}

/// Quote request from the quotes table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuoteRequest {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub phone1: String,
    pub phone2: Option<String>,
    pub email: String,
    pub property_type: Option<String>,
    pub services: Vec<String>,
    pub preferred_date: Option<NaiveDate>,
    pub job_description: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub quote_amount: Option<Decimal>,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for QuoteRequest {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.email.clone(), self.address.clone()]
    }

    fn status(&self) -> &str {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            QuoteStatus::Pending,
            QuoteStatus::Contacted,
            QuoteStatus::Quoted,
            QuoteStatus::Accepted,
            QuoteStatus::Completed,
            QuoteStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<QuoteStatus>(), Ok(status));
        }
        assert!("declined".parse::<QuoteStatus>().is_err());
    }

    #[test]
    fn test_status_deserializes_snake_case() {
        let status: QuoteStatus = serde_json::from_str("\"contacted\"").unwrap();
        assert_eq!(status, QuoteStatus::Contacted);
    }
}
