//! Contact form messages and their read/replied lifecycle.

pub mod models;
pub mod queries;
pub mod requests;
pub mod routes;

pub use models::{ContactMessage, ContactStatus};
