//! Request DTOs for instant booking endpoints.

use serde::Deserialize;
use validator::Validate;

use super::models::BookingStatus;

/// Admin update of an instant booking. Absent fields are left as they are.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateInstantBookingRequest {
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub admin_notes: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub assigned_to: Option<String>,
}
