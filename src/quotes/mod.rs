//! Free-form quote requests for jobs the instant calculator does not cover.

pub mod models;
pub mod queries;
pub mod requests;
pub mod routes;

pub use models::{QuoteRequest, QuoteStatus};
