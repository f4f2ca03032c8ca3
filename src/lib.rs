//! # Fresh Plus Cleaning web backend
//!
//! Intake and admin API for a cleaning business.
//!
//! - [`pricing`] - catalog and the instant-quote price calculator
//! - [`bookings`] - instant bookings priced by the calculator
//! - [`service_bookings`] - scheduled bookings managed by staff
//! - [`quotes`] - free-form quote requests
//! - [`contacts`] - contact form messages
//! - [`admin`] - staff login, sessions and dashboard
//! - [`notify`] - staff notifications

pub mod admin;
pub mod bookings;
pub mod cache;
pub mod config;
pub mod contacts;
pub mod db;
pub mod error;
pub mod notify;
pub mod pricing;
pub mod quotes;
pub mod routes;
pub mod service_bookings;

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::admin::AdminAuth;
use crate::bookings::BookingStore;
use crate::cache::AppCache;
use crate::notify::Notifier;
use crate::pricing::Catalog;

pub use error::AppError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub catalog: Arc<Catalog>,
    pub bookings: Arc<dyn BookingStore>,
    pub notifier: Arc<dyn Notifier>,
    pub auth: Arc<AdminAuth>,
    /// Inbox for staff notifications
    pub notify_email: String,
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}
