//! Instant bookings: priced submissions from the quote form and their
//! management in the admin console.

pub mod models;
pub mod queries;
pub mod requests;
pub mod routes;
pub mod services;

pub use models::{BookingStatus, InstantBooking, NewInstantBooking};
pub use services::{submit_instant_booking, BookingStore, PgBookingStore};
