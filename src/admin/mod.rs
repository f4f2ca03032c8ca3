//! Staff-only admin console API.

pub mod auth;
pub mod dashboard;
pub mod filters;
pub mod routes;

pub use auth::{hash_password, AdminAuth, AdminSession};
pub use filters::{ListQuery, Searchable};
