use std::fmt;

use serde::{Deserialize, Serialize};

/// A person occupying a room.
///
/// Tenants are plain values. A room owns its tenant outright, and
/// reassigning the tenant replaces the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// The tenant's given name.
    #[serde(rename = "imie")]
    pub first_name: String,
    /// The tenant's family name.
    #[serde(rename = "nazwisko")]
    pub last_name: String,
    /// Contact email address.
    pub email: String,
}

impl Tenant {
    /// Construct a new [`Tenant`].
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
