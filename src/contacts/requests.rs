//! Request DTOs for contact endpoints.

use serde::Deserialize;
use validator::Validate;

use super::models::ContactStatus;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContactMessage {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

impl CreateContactMessage {
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
            phone: optional(&self.phone),
            subject: optional(&self.subject),
            message: self.message.trim().to_string(),
        }
    }
}

/// Admin update of a message. Absent fields are left as they are.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateContactMessage {
    #[serde(default)]
    pub status: Option<ContactStatus>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub admin_notes: Option<String>,
}

impl UpdateContactMessage {
    pub fn marks_replied(&self) -> bool {
        self.status == Some(ContactStatus::Replied)
    }
}
