//! Staff notifications for new bookings, quote requests and messages.
//!
//! Messages are rendered from askama text templates and handed to a
//! [`Notifier`]. Rendering and delivery happen after the record is stored, so
//! callers use [`dispatch`], which logs either failure instead of returning it.

use askama::Template;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::bookings::models::NewInstantBooking;
use crate::contacts::models::ContactMessage;
use crate::pricing::models::PriceLine;
use crate::pricing::PricingResult;
use crate::quotes::models::QuoteRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    InstantBooking,
    QuoteRequest,
    ContactMessage,
}

/// A rendered staff notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification dispatch failed: {0}")]
    Dispatch(String),
}

/// Delivers notifications to staff
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the application log
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(
            kind = ?notification.kind,
            to = %notification.to,
            reply_to = notification.reply_to.as_deref().unwrap_or(""),
            "{}\n{}",
            notification.subject,
            notification.body
        );
        Ok(())
    }
}

/// Send a rendered notification, logging and swallowing any failure.
///
/// The record it describes is already stored; a template error or a lost
/// notification is not retried here.
pub async fn dispatch(notifier: &dyn Notifier, rendered: Result<Notification, askama::Error>) {
    let notification = match rendered {
        Ok(notification) => notification,
        Err(e) => {
            warn!("Notification not rendered: {}", e);
            return;
        }
    };

    let kind = notification.kind;
    if let Err(e) = notifier.notify(notification).await {
        warn!(?kind, "Notification not delivered: {}", e);
    }
}

#[derive(Template)]
#[template(path = "notifications/instant_booking.txt")]
struct InstantBookingTemplate {
    booking_id: Uuid,
    customer_name: String,
    email: String,
    phone: String,
    address: String,
    service_name: String,
    property: String,
    bedrooms: i32,
    bathrooms: i32,
    lines: Vec<PriceLine>,
    original_total: Decimal,
    total_savings: Decimal,
    total: Decimal,
    currency: String,
    preferred_date: String,
    preferred_time: String,
    same_day: bool,
    comments: String,
}

pub fn instant_booking_notification(
    to: &str,
    booking: &NewInstantBooking,
    pricing: &PricingResult,
    currency: &str,
) -> Result<Notification, askama::Error> {
    let property = match (&booking.property_type, &booking.furnished) {
        (Some(p), Some(f)) => format!("{} ({})", p, f),
        (Some(p), None) => p.clone(),
        (None, Some(f)) => f.clone(),
        (None, None) => "Not specified".to_string(),
    };

    let body = InstantBookingTemplate {
        booking_id: booking.id,
        customer_name: booking.customer_name(),
        email: booking.email.clone(),
        phone: booking.phone.clone(),
        address: format!("{}, {} {}", booking.address, booking.suburb, booking.postcode),
        service_name: booking.service_name.clone(),
        property,
        bedrooms: booking.bedrooms,
        bathrooms: booking.bathrooms,
        lines: pricing.lines.clone(),
        original_total: pricing.original_total,
        total_savings: pricing.total_savings,
        total: pricing.total,
        currency: currency.to_string(),
        preferred_date: booking
            .preferred_date
            .map(|d| d.format("%A %-d %B %Y").to_string())
            .unwrap_or_else(|| "Not specified".to_string()),
        preferred_time: booking
            .preferred_time
            .clone()
            .unwrap_or_else(|| "Not specified".to_string()),
        same_day: booking.same_day_booking,
        comments: booking.comments.clone().unwrap_or_default(),
    }
    .render()?;

    Ok(Notification {
        kind: NotificationKind::InstantBooking,
        to: to.to_string(),
        reply_to: Some(booking.email.clone()),
        subject: format!(
            "New instant booking - {} - {} {}",
            booking.customer_name(),
            pricing.total,
            currency
        ),
        body,
    })
}

#[derive(Template)]
#[template(path = "notifications/quote_request.txt")]
struct QuoteRequestTemplate {
    name: String,
    email: String,
    phone1: String,
    phone2: String,
    address: String,
    city: String,
    postcode: String,
    services: String,
    preferred_date: String,
    job_description: String,
}

pub fn quote_request_notification(
    to: &str,
    quote: &QuoteRequest,
) -> Result<Notification, askama::Error> {
    let body = QuoteRequestTemplate {
        name: quote.name.clone(),
        email: quote.email.clone(),
        phone1: quote.phone1.clone(),
        phone2: quote.phone2.clone().unwrap_or_default(),
        address: quote.address.clone(),
        city: quote.city.clone(),
        postcode: quote.postcode.clone(),
        services: quote.services.join(", "),
        preferred_date: quote
            .preferred_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "Not specified".to_string()),
        job_description: quote.job_description.clone().unwrap_or_default(),
    }
    .render()?;

    Ok(Notification {
        kind: NotificationKind::QuoteRequest,
        to: to.to_string(),
        reply_to: Some(quote.email.clone()),
        subject: format!("New quote request - {}", quote.name),
        body,
    })
}

#[derive(Template)]
#[template(path = "notifications/contact_message.txt")]
struct ContactMessageTemplate {
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
}

pub fn contact_message_notification(
    to: &str,
    contact: &ContactMessage,
) -> Result<Notification, askama::Error> {
    let subject = contact
        .subject
        .clone()
        .unwrap_or_else(|| "(no subject)".to_string());

    let body = ContactMessageTemplate {
        name: contact.name.clone(),
        email: contact.email.clone(),
        phone: contact
            .phone
            .clone()
            .unwrap_or_else(|| "Not provided".to_string()),
        subject: subject.clone(),
        message: contact.message.clone(),
    }
    .render()?;

    Ok(Notification {
        kind: NotificationKind::ContactMessage,
        to: to.to_string(),
        reply_to: Some(contact.email.clone()),
        subject: format!("New contact message - {}", subject),
        body,
    })
}
