//! Room Rental Inventory
//!
//! Rooms, their tenants and amenities are kept in a single JSON document.

pub mod domain;
pub use domain::{
    Config, Error, Inventory, KeyPolicy, Location, NewRoom, Room, RoomKind, RoomUpdate, Tenant,
};

/// File persistence for the room document.
pub mod storage;
pub use storage::{Document, JsonFile, LoadOutcome};

mod timing;
