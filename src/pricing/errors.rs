//! Pricing error types.

/// Why a selection could not be priced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionIssue {
    #[error("unknown service category '{0}'")]
    UnknownCategory(String),

    #[error("service '{category}' has no price for {bedrooms} bedroom(s)")]
    MissingBedroomTier { category: String, bedrooms: u32 },

    #[error("unknown extra service '{0}'")]
    UnknownExtra(String),

    #[error("quantity for '{extra}' cannot be negative (got {quantity})")]
    NegativeQuantity { extra: String, quantity: i32 },

    #[error("quantity for '{extra}' exceeds the maximum of {cap} (got {quantity})")]
    QuantityOverCap { extra: String, quantity: u32, cap: u32 },
}

impl SelectionIssue {
    /// Selection field the issue refers to, for client-side highlighting
    pub fn field(&self) -> &'static str {
        match self {
            SelectionIssue::UnknownCategory(_) => "service",
            SelectionIssue::MissingBedroomTier { .. } => "bedrooms",
            SelectionIssue::UnknownExtra(_)
            | SelectionIssue::NegativeQuantity { .. }
            | SelectionIssue::QuantityOverCap { .. } => "extras",
        }
    }
}

/// Pricing calculation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(#[from] SelectionIssue),
}
