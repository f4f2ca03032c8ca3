//! Instant-quote pricing engine.
//!
//! The catalog holds the price tables, the calculator turns a customer's
//! selection into an itemized total, and the routes expose both to the
//! intake form.

pub mod calculators;
pub mod catalog;
pub mod errors;
pub mod models;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{calculate_total_price, round_money};
pub use catalog::{BundleDiscount, Catalog, Discount, ExtraServiceItem, Promotion, ServiceCategory};
pub use errors::{PricingError, SelectionIssue};
pub use models::{ContactDetails, PricingResult, QuoteSelection};
pub use routes::router;
