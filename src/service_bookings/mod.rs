//! Scheduled service bookings managed from the admin console.
//!
//! These predate instant bookings and carry a free-text service with a date
//! and time slot rather than a calculated price.

pub mod models;
pub mod queries;
pub mod requests;
pub mod routes;

pub use models::ServiceBooking;
