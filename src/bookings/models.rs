//! Instant booking records.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::admin::filters::Searchable;
use crate::pricing::models::LineKind;
use crate::pricing::{PricingResult, QuoteSelection};

/// Lifecycle of an instant or service booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "in_progress" => Ok(BookingStatus::InProgress),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

/// Instant booking from the instant_bookings table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InstantBooking {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub service_type: String,
    pub service_name: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub property_type: Option<String>,
    pub furnished: Option<String>,
    pub selected_extras: serde_json::Value,
    pub bundle_selected: bool,
    pub original_price: Decimal,
    pub discount_amount: Decimal,
    pub final_price: Decimal,
    pub same_day_booking: bool,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub suburb: String,
    pub postcode: String,
    pub comments: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub assigned_to: Option<String>,
}

impl Searchable for InstantBooking {
    fn search_fields(&self) -> Vec<String> {
        vec![
            format!("{} {}", self.first_name, self.last_name),
            self.email.clone(),
            self.address.clone(),
            self.service_name.clone(),
        ]
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn service(&self) -> Option<&str> {
        Some(&self.service_type)
    }
}

/// Booking row about to be inserted.
///
/// Carries the selection as submitted plus the three pricing fields copied
/// from the calculator result.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInstantBooking {
    pub id: Uuid,
    pub service_type: String,
    pub service_name: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub property_type: Option<String>,
    pub furnished: Option<String>,
    /// Extra id -> quantity, only extras actually booked
    pub selected_extras: serde_json::Value,
    pub bundle_selected: bool,
    pub original_price: Decimal,
    pub discount_amount: Decimal,
    pub final_price: Decimal,
    pub same_day_booking: bool,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_time: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub suburb: String,
    pub postcode: String,
    pub comments: Option<String>,
}

impl NewInstantBooking {
    pub fn from_selection(
        selection: &QuoteSelection,
        service_name: &str,
        pricing: &PricingResult,
    ) -> Self {
        let selected_extras = pricing
            .lines
            .iter()
            .filter(|line| line.kind == LineKind::Extra)
            .map(|line| (line.id.clone(), serde_json::Value::from(line.quantity)))
            .collect::<serde_json::Map<_, _>>();

        let contact = &selection.contact;

        Self {
            id: Uuid::new_v4(),
            service_type: selection.service.clone(),
            service_name: service_name.to_string(),
            bedrooms: i32::try_from(selection.bedrooms).unwrap_or(i32::MAX),
            bathrooms: i32::try_from(selection.bathrooms).unwrap_or(i32::MAX),
            property_type: selection.property_type.map(|p| p.as_str().to_string()),
            furnished: selection.furnished.map(|f| f.as_str().to_string()),
            selected_extras: serde_json::Value::Object(selected_extras),
            bundle_selected: selection.bundle_selected,
            original_price: pricing.original_total,
            discount_amount: pricing.total_savings,
            final_price: pricing.total,
            same_day_booking: selection.same_day,
            preferred_date: selection.preferred_date,
            preferred_time: selection.preferred_time.clone(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            address: contact.address.clone(),
            suburb: contact.suburb.clone(),
            postcode: contact.postcode.clone(),
            comments: contact.comments.clone(),
        }
    }

    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
