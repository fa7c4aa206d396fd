use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a room is.
///
/// Two schemas are in use: a pair of map coordinates, or a postal address.
/// Which one a data file uses is decided by whoever writes it; both forms
/// can appear side by side in one document.
///
/// Coordinates serialize as a two-element array (`[x, y]`), addresses as an
/// object with `miasto`, `ulica` and `numer_domu` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    /// Map coordinates.
    Coordinates(f64, f64),
    /// A postal address.
    Address(Address),
}

impl Default for Location {
    fn default() -> Self {
        Self::Coordinates(0.0, 0.0)
    }
}

impl Location {
    /// Shorthand for [`Location::Coordinates`].
    #[must_use]
    pub const fn coordinates(x: f64, y: f64) -> Self {
        Self::Coordinates(x, y)
    }

    /// Shorthand for [`Location::Address`].
    #[must_use]
    pub fn address(
        city: impl Into<String>,
        street: impl Into<String>,
        house_number: impl Into<String>,
    ) -> Self {
        Self::Address(Address {
            city: city.into(),
            street: street.into(),
            house_number: house_number.into(),
        })
    }

    /// Whether the location can be written out and read back unchanged.
    ///
    /// JSON has no encoding for NaN or infinite numbers, so coordinates must
    /// be finite. Addresses always qualify.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        match self {
            Self::Coordinates(x, y) => x.is_finite() && y.is_finite(),
            Self::Address(_) => true,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates(x, y) => write!(f, "({x}, {y})"),
            Self::Address(address) => fmt::Display::fmt(address, f),
        }
    }
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// City name.
    #[serde(rename = "miasto")]
    pub city: String,
    /// Street name.
    #[serde(rename = "ulica")]
    pub street: String,
    /// House number, kept as text since it may carry a suffix (e.g. `12A`).
    #[serde(rename = "numer_domu")]
    pub house_number: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", self.street, self.house_number, self.city)
    }
}
