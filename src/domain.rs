//! Domain models for the room inventory.
//!
//! This module contains the core domain types: rooms and their tenants and
//! locations, the uniqueness policy, configuration, and the [`Inventory`]
//! that ties them together.

mod config;
pub use config::Config;

mod histogram;
pub use histogram::{Bin, RentHistogram};

/// The in-memory room collection and its operations.
pub mod inventory;
pub use inventory::{DataError, Error, Inventory, NewRoom, RoomUpdate, ValidationError};

pub mod key;
pub use key::{KeyPolicy, RoomKey};

/// Room locations.
pub mod location;
pub use location::{Address, Location};

/// Validated rent amounts.
pub mod rent;
pub use rent::{InvalidRentError, ParseRentError, Rent};

/// Rooms and their variants.
pub mod room;
pub use room::{Room, RoomKind};

/// Tenants.
pub mod tenant;
pub use tenant::Tenant;
