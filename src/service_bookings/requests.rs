//! Request DTOs for service booking endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::bookings::BookingStatus;

/// Admin update of a service booking. Absent fields are left as they are.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateServiceBookingRequest {
    #[serde(default)]
    pub status: Option<BookingStatus>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub admin_notes: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub assigned_to: Option<String>,
}
