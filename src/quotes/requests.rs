//! Request DTOs for quote endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::pricing::models::PropertyType;

use super::models::QuoteStatus;

/// Public quote request form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 20))]
    pub phone1: String,
    #[serde(default)]
    #[validate(length(min = 6, max = 20))]
    pub phone2: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 3, max = 10))]
    pub postcode: String,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[validate(length(min = 1, max = 20))]
    pub services: Vec<String>,
    #[serde(default)]
    pub preferred_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub job_description: Option<String>,
}

impl CreateQuoteRequest {
    /// Trimmed copy with blank optional fields and service names dropped
    pub fn normalized(&self) -> Self {
        let optional = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone1: self.phone1.trim().to_string(),
            phone2: optional(&self.phone2),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            postcode: self.postcode.trim().to_string(),
            property_type: self.property_type,
            services: self
                .services
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            preferred_date: self.preferred_date,
            job_description: optional(&self.job_description),
        }
    }
}

/// Admin update of a quote request. Absent fields are left as they are.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateQuoteRequest {
    #[serde(default)]
    pub status: Option<QuoteStatus>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub admin_notes: Option<String>,
    #[serde(default)]
    pub quote_amount: Option<Decimal>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub assigned_to: Option<String>,
}

impl UpdateQuoteRequest {
    /// Field validation plus the quote amount, which must not be negative
    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if let Some(amount) = self.quote_amount {
            if amount < Decimal::ZERO {
                return Err(AppError::validation("quote_amount must not be negative"));
            }
        }

        Ok(())
    }
}
