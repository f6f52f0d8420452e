//! User snapshot as served by `/admin/users`.

use serde::{Deserialize, Serialize};

/// A registered user of the tracker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    /// Date of birth (`YYYY-MM-DD`)
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Height in centimeters
    #[serde(default)]
    pub height: Option<f64>,
    /// Weight in kilograms
    #[serde(default)]
    pub weight: Option<f64>,
    pub email: String,
    #[serde(default)]
    pub email_verified_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// Only present on list endpoints that aggregate per-user counts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities_count: Option<u64>,
}

impl User {
    /// Whether the user confirmed their email address
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }

    /// Case-insensitive match against name, surname or email
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [self.name.as_deref(), self.surname.as_deref(), Some(self.email.as_str())]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&query))
    }
}
