use std::{fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};

/// A validated monthly rent.
///
/// Rent is always strictly positive and finite. Every constructor goes
/// through [`Rent::new`], so a `Rent` in hand is known to be valid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rent(f64);

impl Rent {
    /// Creates a new `Rent` from a raw amount.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRentError`] if the amount is zero, negative, NaN or
    /// infinite.
    pub fn new(amount: f64) -> Result<Self, InvalidRentError> {
        if amount.is_finite() && amount > 0.0 {
            Ok(Self(amount))
        } else {
            Err(InvalidRentError(amount))
        }
    }

    /// Returns the raw amount.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Rent {
    type Error = InvalidRentError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rent> for f64 {
    fn from(rent: Rent) -> Self {
        rent.0
    }
}

impl Deref for Rent {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Rent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Rent {
    type Err = ParseRentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = s
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseRentError::NotANumber(s.to_string()))?;
        Ok(Self::new(amount)?)
    }
}

/// Error returned when a rent amount is not strictly positive and finite.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq)]
#[error("Invalid rent {0}: rent must be a positive amount")]
pub struct InvalidRentError(pub f64);

/// Error returned when parsing a rent from text.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ParseRentError {
    /// The text was not a number.
    #[error("'{0}' is not a valid amount")]
    NotANumber(String),
    /// The text was a number, but not a valid rent.
    #[error(transparent)]
    Invalid(#[from] InvalidRentError),
}
