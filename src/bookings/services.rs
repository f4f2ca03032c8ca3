//! Instant booking submission.
//!
//! The flow is validate, price, store, notify. Pricing always comes from the
//! server-side calculator, so the stored amounts cannot disagree with what
//! the catalog says for the submitted selection.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::notify::{self, Notifier};
use crate::pricing::responses::PricingResponse;
use crate::pricing::{calculate_total_price, Catalog, PricingResult, QuoteSelection};

use super::models::NewInstantBooking;
use super::queries;

/// Persistence seam for new instant bookings
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert_instant_booking(&self, booking: &NewInstantBooking) -> Result<Uuid>;
}

/// Postgres-backed booking store
#[derive(Clone)]
pub struct PgBookingStore {
    pool: PgPool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn insert_instant_booking(&self, booking: &NewInstantBooking) -> Result<Uuid> {
        queries::insert_instant_booking(&self.pool, booking).await
    }
}

/// Returned to the customer once the booking is stored
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub id: Uuid,
    pub pricing: PricingResult,
}

#[derive(Debug, Serialize)]
pub struct BookingConfirmationResponse {
    pub id: Uuid,
    pub pricing: PricingResponse,
}

impl BookingConfirmationResponse {
    pub fn new(confirmation: &BookingConfirmation, currency: &str) -> Self {
        Self {
            id: confirmation.id,
            pricing: PricingResponse::from_result(&confirmation.pricing, currency),
        }
    }
}

/// Price, store and announce an instant booking.
///
/// Contact fields are trimmed before validation, so whitespace-only values
/// count as missing. Nothing is stored when validation or pricing fails. A
/// notification failure after the insert is logged and does not fail the
/// booking.
pub async fn submit_instant_booking(
    catalog: &Catalog,
    store: &dyn BookingStore,
    notifier: &dyn Notifier,
    notify_to: &str,
    selection: &QuoteSelection,
) -> Result<BookingConfirmation> {
    let selection = selection.normalized();
    selection.validate()?;

    let pricing = calculate_total_price(&selection, catalog)?;
    let service_name = catalog
        .category(&selection.service)
        .map(|c| c.name.as_str())
        .unwrap_or(selection.service.as_str());

    let booking = NewInstantBooking::from_selection(&selection, service_name, &pricing);
    let id = store.insert_instant_booking(&booking).await?;

    info!(
        booking_id = %id,
        service = %booking.service_type,
        total = %pricing.total,
        "Instant booking stored"
    );

    let notification =
        notify::instant_booking_notification(notify_to, &booking, &pricing, &catalog.currency);
    notify::dispatch(notifier, notification).await;

    Ok(BookingConfirmation { id, pricing })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::notify::{Notification, NotificationKind, NotifyError};
    use crate::pricing::PricingError;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<NewInstantBooking>>,
    }

    #[async_trait]
    impl BookingStore for MemoryStore {
        async fn insert_instant_booking(&self, booking: &NewInstantBooking) -> Result<Uuid> {
            self.rows.lock().unwrap().push(booking.clone());
            Ok(booking.id)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, notification: Notification) -> std::result::Result<(), NotifyError> {
            self.sent.lock().unwrap().push(notification);
            Ok(())
        }
    }

    struct BrokenNotifier;

    #[async_trait]
    impl Notifier for BrokenNotifier {
        async fn notify(&self, _: Notification) -> std::result::Result<(), NotifyError> {
            Err(NotifyError::Dispatch("mail relay unreachable".to_string()))
        }
    }

    fn selection() -> QuoteSelection {
        let mut selection = QuoteSelection {
            service: "residential".to_string(),
            bedrooms: 3,
            bathrooms: 2,
            bundle_selected: true,
            extras: [("oven-clean".to_string(), 1), ("fridge-clean".to_string(), 0)]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        selection.contact.first_name = "Priya".to_string();
        selection.contact.last_name = "Sharma".to_string();
        selection.contact.email = "priya@example.com".to_string();
        selection.contact.phone = "0400 123 456".to_string();
        selection.contact.address = "12 Beach Rd".to_string();
        selection.contact.suburb = "Bondi".to_string();
        selection.contact.postcode = "2026".to_string();
        selection
    }

    #[tokio::test]
    async fn test_submit_stores_calculated_prices_and_notifies() {
        let catalog = Catalog::default();
        let store = MemoryStore::default();
        let notifier = RecordingNotifier::default();

        let confirmation =
            submit_instant_booking(&catalog, &store, &notifier, "office@example.com", &selection())
                .await
                .unwrap();

        assert_eq!(confirmation.pricing.total, dec!(171));

        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, confirmation.id);
        assert_eq!(rows[0].service_name, "Residential Cleaning");
        assert_eq!(rows[0].original_price, dec!(190));
        assert_eq!(rows[0].discount_amount, dec!(19));
        assert_eq!(rows[0].final_price, dec!(171));

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, NotificationKind::InstantBooking);
        assert_eq!(sent[0].to, "office@example.com");
    }

    #[tokio::test]
    async fn test_notification_failure_keeps_booking() {
        let catalog = Catalog::default();
        let store = MemoryStore::default();

        let result =
            submit_instant_booking(&catalog, &store, &BrokenNotifier, "office@example.com", &selection())
                .await;

        assert!(result.is_ok());
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_service_stores_nothing() {
        let catalog = Catalog::default();
        let store = MemoryStore::default();
        let notifier = RecordingNotifier::default();
        let mut selection = selection();
        selection.service = "window-washing".to_string();

        let err = submit_instant_booking(&catalog, &store, &notifier, "office@example.com", &selection)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Pricing(PricingError::InvalidSelection(_))));
        assert!(store.rows.lock().unwrap().is_empty());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_contact_is_rejected_before_pricing() {
        let catalog = Catalog::default();
        let store = MemoryStore::default();
        let notifier = RecordingNotifier::default();
        let mut selection = selection();
        selection.contact.email = "not-an-email".to_string();

        let err = submit_instant_booking(&catalog, &store, &notifier, "office@example.com", &selection)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert!(store.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_only_contact_fields_are_rejected() {
        let catalog = Catalog::default();
        let store = MemoryStore::default();
        let notifier = RecordingNotifier::default();
        let mut selection = selection();
        selection.contact.first_name = "   ".to_string();
        selection.contact.suburb = "   ".to_string();

        let err = submit_instant_booking(&catalog, &store, &notifier, "office@example.com", &selection)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert!(store.rows.lock().unwrap().is_empty());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stored_contact_fields_are_trimmed() {
        let catalog = Catalog::default();
        let store = MemoryStore::default();
        let notifier = RecordingNotifier::default();
        let mut selection = selection();
        selection.contact.first_name = "  Priya ".to_string();
        selection.contact.comments = Some("  ".to_string());

        submit_instant_booking(&catalog, &store, &notifier, "office@example.com", &selection)
            .await
            .unwrap();

        let rows = store.rows.lock().unwrap();
        assert_eq!(rows[0].first_name, "Priya");
        assert_eq!(rows[0].comments, None);
    }
}
