//! Service booking records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::admin::filters::Searchable;

/// Booking from the bookings table.
///
/// `status` holds a [`crate::bookings::BookingStatus`] value.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceBooking {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub address: String,
    pub service_date: NaiveDate,
    pub service_time: String,
    pub special_instructions: Option<String>,
    pub status: String,
    pub admin_notes: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Searchable for ServiceBooking {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.address.clone(),
        ]
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn service(&self) -> Option<&str> {
        Some(&self.service)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::filters::ListQuery;

    fn booking(name: &str, phone: &str, status: &str) -> ServiceBooking {
        ServiceBooking {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: phone.to_string(),
            service: "Carpet Cleaning".to_string(),
            address: "4 Ocean St, Coogee".to_string(),
            service_date: NaiveDate::from_ymd_opt(2026, 11, 9).unwrap(),
            service_time: "09:00".to_string(),
            special_instructions: None,
            status: status.to_string(),
            admin_notes: None,
            assigned_to: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_search_covers_phone_and_address() {
        let bookings = vec![
            booking("Lena", "0411 222 333", "pending"),
            booking("Omar", "0499 888 777", "completed"),
        ];

        let by_phone = ListQuery {
            search: Some("0499".to_string()),
            ..Default::default()
        };
        let found = by_phone.apply(bookings.clone());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Omar");

        let by_address = ListQuery {
            search: Some("coogee".to_string()),
            status: Some("pending".to_string()),
            ..Default::default()
        };
        let found = by_address.apply(bookings);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Lena");
    }
}
