//! Search and status filtering for admin list views.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Query parameters shared by the admin list endpoints
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
}

/// A record that can be filtered by the admin list endpoints
pub trait Searchable {
    /// Text fields matched by the free-text search
    fn search_fields(&self) -> Vec<String>;

    fn status(&self) -> &str;

    /// Service type, for records that have one
    fn service(&self) -> Option<&str> {
        None
    }
}

/// "all" and empty both mean no filter
fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

impl ListQuery {
    /// Reject a status filter that is not a status of `S`
    pub fn check_status<S>(&self) -> Result<()>
    where
        S: FromStr<Err = String>,
    {
        match active(&self.status) {
            Some(status) => status.parse::<S>().map(|_| ()).map_err(AppError::validation),
            None => Ok(()),
        }
    }

    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        if let Some(term) = active(&self.search) {
            let term = term.to_lowercase();
            if !record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            {
                return false;
            }
        }

        if let Some(status) = active(&self.status) {
            if record.status() != status {
                return false;
            }
        }

        if let Some(service) = active(&self.service) {
            if record.service() != Some(service) {
                return false;
            }
        }

        true
    }

    /// Keep the records matching every active filter, preserving order
    pub fn apply<T: Searchable>(&self, records: Vec<T>) -> Vec<T> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
