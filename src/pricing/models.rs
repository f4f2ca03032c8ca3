//! Quote selection and pricing result types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Apartment,
    Townhouse,
    Unit,
    Other,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Townhouse => "townhouse",
            PropertyType::Unit => "unit",
            PropertyType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Furnished {
    Furnished,
    Empty,
}

impl Furnished {
    pub fn as_str(&self) -> &'static str {
        match self {
            Furnished::Furnished => "furnished",
            Furnished::Empty => "empty",
        }
    }
}

/// Customer contact fields collected on the last form step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactDetails {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 20))]
    pub phone: String,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(length(min = 1, max = 100))]
    pub suburb: String,
    #[validate(length(min = 3, max = 10))]
    pub postcode: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comments: Option<String>,
}

impl ContactDetails {
    /// Trimmed copy; blank comments become `None`
    pub fn normalized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            suburb: self.suburb.trim().to_string(),
            postcode: self.postcode.trim().to_string(),
            comments: self
                .comments
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        }
    }
}

/// A customer's instant-quote form state.
///
/// The live pricing endpoint only needs the service fields; contact and
/// schedule fields default to empty there and are validated on submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuoteSelection {
    pub service: String,
    pub bedrooms: u32,
    #[serde(default)]
    #[validate(range(max = 20))]
    pub bathrooms: u32,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub furnished: Option<Furnished>,
    /// Extra id -> requested quantity. Signed so negative input is rejected
    /// by the calculator instead of failing deserialization.
    #[serde(default)]
    pub extras: BTreeMap<String, i32>,
    #[serde(default)]
    pub bundle_selected: bool,
    #[serde(default)]
    pub same_day: bool,
    #[serde(default)]
    pub preferred_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub preferred_time: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub contact: ContactDetails,
}

impl QuoteSelection {
    /// Copy with the contact fields normalized, ready for validation
    pub fn normalized(&self) -> Self {
        Self {
            contact: self.contact.normalized(),
            preferred_time: self
                .preferred_time
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Base,
    Extra,
}

/// One itemized line of a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceLine {
    pub kind: LineKind,
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub amount: Decimal,
}

/// A discount rule that was applied to a quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedDiscount {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
}

/// Output of the price calculator.
///
/// `total == original_total - total_savings` and all three are non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingResult {
    pub lines: Vec<PriceLine>,
    pub discounts: Vec<AppliedDiscount>,
    pub original_total: Decimal,
    pub total_savings: Decimal,
    pub total: Decimal,
}
