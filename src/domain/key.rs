//! Uniqueness keys for rooms.
//!
//! Data files in the wild disagree on what makes a room unique: some treat
//! the room number as the primary key, others allow the same number at
//! different locations. The [`KeyPolicy`] is chosen once, when an
//! [`Inventory`](crate::Inventory) is constructed, and every duplicate check
//! and lookup goes through it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Location, location::Address};

/// How duplicate rooms are detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KeyPolicy {
    /// The room number alone identifies a room.
    #[default]
    Number,
    /// The pair (number, location) identifies a room.
    NumberAndLocation,
}

impl KeyPolicy {
    /// Whether the policy needs a location to identify a room.
    #[must_use]
    pub const fn needs_location(self) -> bool {
        matches!(self, Self::NumberAndLocation)
    }

    /// The key of a room with the given number and location.
    #[must_use]
    pub fn key(self, number: u32, location: &Location) -> RoomKey {
        match self {
            Self::Number => RoomKey {
                number,
                location: None,
            },
            Self::NumberAndLocation => RoomKey {
                number,
                location: Some(LocationKey::from(location)),
            },
        }
    }

    /// The key used to look a room up.
    ///
    /// Under [`KeyPolicy::Number`] the location is ignored. Under
    /// [`KeyPolicy::NumberAndLocation`] it is required, and `None` is
    /// returned when it is missing.
    #[must_use]
    pub fn lookup_key(self, number: u32, location: Option<&Location>) -> Option<RoomKey> {
        match (self, location) {
            (Self::Number, _) => Some(RoomKey {
                number,
                location: None,
            }),
            (Self::NumberAndLocation, Some(location)) => Some(self.key(number, location)),
            (Self::NumberAndLocation, None) => None,
        }
    }
}

impl fmt::Display for KeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::NumberAndLocation => write!(f, "number-and-location"),
        }
    }
}

/// The identity of a room under some [`KeyPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomKey {
    number: u32,
    location: Option<LocationKey>,
}

impl RoomKey {
    /// The room number part of the key.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            None => write!(f, "{}", self.number),
            Some(location) => write!(f, "{} at {location}", self.number),
        }
    }
}

/// A hashable form of [`Location`].
///
/// Coordinates are compared by bit pattern, with `-0.0` folded into `0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LocationKey {
    Coordinates(u64, u64),
    Address(Address),
}

fn coordinate_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl From<&Location> for LocationKey {
    fn from(location: &Location) -> Self {
        match location {
            Location::Coordinates(x, y) => Self::Coordinates(coordinate_bits(*x), coordinate_bits(*y)),
            Location::Address(address) => Self::Address(address.clone()),
        }
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates(x, y) => {
                write!(f, "({}, {})", f64::from_bits(*x), f64::from_bits(*y))
            }
            Self::Address(address) => write!(f, "{address}"),
        }
    }
}
