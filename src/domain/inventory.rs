//! The authoritative collection of rooms.
//!
//! An [`Inventory`] keeps rooms in insertion order alongside an index from
//! [`RoomKey`] to position. The index is a cache: it is rebuilt whenever
//! rooms are loaded and extended on every successful add. Mutation requires
//! `&mut self`, so the list and the index are never observed out of step.

use std::{collections::HashMap, num::NonZeroUsize};

use serde::Deserialize;
use serde_json::Value;

use crate::{
    domain::{
        Config, KeyPolicy, Location, Room, RoomKey, Tenant,
        histogram::RentHistogram,
        rent::{InvalidRentError, Rent},
        room::RoomKind,
    },
    storage::{Document, JsonFile, LoadOutcome, SaveError},
    timing::ScopedTimer,
};

/// Errors returned by [`Inventory`] operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The supplied values break a room invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A room with the same key already exists.
    #[error("Room {0} already exists")]
    DuplicateKey(RoomKey),

    /// No room has the given key.
    #[error("Room {0} does not exist")]
    NotFound(RoomKey),

    /// The operation is only supported by premium rooms.
    #[error("Room {0} is not a premium room and has no amenities")]
    NotPremium(RoomKey),

    /// The persisted document does not describe a valid set of rooms.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The document could not be written.
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Invalid input to an add or edit.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// The rent is not strictly positive.
    #[error(transparent)]
    Rent(#[from] InvalidRentError),

    /// A coordinate is NaN or infinite and could not be saved.
    #[error("Invalid location {0}: coordinates must be finite numbers")]
    Location(Location),

    /// The key policy identifies rooms by location, but none was given.
    #[error("A location is required to identify room {0}")]
    LocationRequired(u32),
}

impl From<InvalidRentError> for Error {
    fn from(error: InvalidRentError) -> Self {
        Self::Validation(error.into())
    }
}

/// Problems with the rooms stored in a document.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The `pokoje` value is not an array.
    #[error("Expected '{}' to be an array", Document::ROOMS_KEY)]
    NotAnArray,

    /// A room entry is missing fields or has invalid values.
    #[error("Room entry {index} is invalid: {source}")]
    InvalidEntry {
        /// Position of the entry in the array.
        index: usize,
        /// What was wrong with it.
        source: serde_json::Error,
    },

    /// Two entries share a key.
    #[error("Room entry {index} duplicates room {key}")]
    Duplicate {
        /// Position of the later entry in the array.
        index: usize,
        /// The shared key.
        key: RoomKey,
    },
}

/// The values needed to add a room.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    /// The room number.
    pub number: u32,
    /// The monthly rent. Must be strictly positive.
    pub rent: f64,
    /// The tenant, if the room is occupied.
    pub tenant: Option<Tenant>,
    /// Where the room is.
    pub location: Location,
    /// Amenities for a premium room. `None` adds a standard room.
    pub amenities: Option<Vec<String>>,
}

impl NewRoom {
    /// A vacant standard room.
    #[must_use]
    pub fn new(number: u32, rent: f64, location: Location) -> Self {
        Self {
            number,
            rent,
            tenant: None,
            location,
            amenities: None,
        }
    }

    /// Set the tenant.
    #[must_use]
    pub fn with_tenant(mut self, tenant: Tenant) -> Self {
        self.tenant = Some(tenant);
        self
    }

    /// Make this a premium room with the given amenities.
    #[must_use]
    pub fn premium(mut self, amenities: Vec<String>) -> Self {
        self.amenities = Some(amenities);
        self
    }
}

/// A partial update to an existing room.
///
/// Fields left as `None` are not touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomUpdate {
    /// New rent.
    pub rent: Option<f64>,
    /// New tenant. `Some(None)` marks the room vacant.
    pub tenant: Option<Option<Tenant>>,
    /// New amenity list. Only valid for premium rooms.
    pub amenities: Option<Vec<String>>,
}

impl RoomUpdate {
    /// Change the rent.
    #[must_use]
    pub fn rent(mut self, rent: f64) -> Self {
        self.rent = Some(rent);
        self
    }

    /// Replace the tenant.
    #[must_use]
    pub fn tenant(mut self, tenant: Tenant) -> Self {
        self.tenant = Some(Some(tenant));
        self
    }

    /// Remove the tenant.
    #[must_use]
    pub fn vacate(mut self) -> Self {
        self.tenant = Some(None);
        self
    }

    /// Replace the amenity list.
    #[must_use]
    pub fn amenities(mut self, amenities: Vec<String>) -> Self {
        self.amenities = Some(amenities);
        self
    }

    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rent.is_none() && self.tenant.is_none() && self.amenities.is_none()
    }
}

/// The authoritative set of rooms, bound to the file it persists to.
#[derive(Debug)]
pub struct Inventory {
    store: JsonFile,
    document: Document,
    outcome: LoadOutcome,
    policy: KeyPolicy,
    rooms: Vec<Room>,
    index: HashMap<RoomKey, usize>,
}

impl Inventory {
    /// An empty inventory that will save to `store`.
    ///
    /// Nothing is read from disk.
    #[must_use]
    pub fn new(store: JsonFile, policy: KeyPolicy) -> Self {
        Self {
            store,
            document: Document::new(),
            outcome: LoadOutcome::Missing,
            policy,
            rooms: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Open the inventory described by `config`.
    ///
    /// # Errors
    ///
    /// See [`Inventory::load`].
    pub fn open(config: &Config) -> Result<Self, Error> {
        Self::load(JsonFile::new(config.data_file()), config.unique_key)
    }

    /// Load rooms from `store`.
    ///
    /// A missing or malformed file gives an empty inventory (see
    /// [`Inventory::load_outcome`]). A readable document whose rooms are
    /// invalid is rejected as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Data`] if the rooms array is not an array, if any
    /// entry is invalid, or if two entries share a key under `policy`.
    pub fn load(store: JsonFile, policy: KeyPolicy) -> Result<Self, Error> {
        let _timer = ScopedTimer::start("load inventory", store.path().display().to_string());

        let loaded = store.load();
        let rooms = parse_rooms(loaded.document.rooms())?;

        let mut inventory = Self {
            store,
            document: loaded.document,
            outcome: loaded.outcome,
            policy,
            rooms: Vec::with_capacity(rooms.len()),
            index: HashMap::with_capacity(rooms.len()),
        };
        for (index, room) in rooms.into_iter().enumerate() {
            let key = inventory.key_of(&room);
            if inventory.index.contains_key(&key) {
                return Err(DataError::Duplicate { index, key }.into());
            }
            inventory.insert(key, room);
        }

        tracing::debug!(
            "Loaded {} rooms from {}",
            inventory.rooms.len(),
            inventory.store.path().display()
        );
        Ok(inventory)
    }

    /// How the underlying document was obtained.
    #[must_use]
    pub const fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// The key policy in force.
    #[must_use]
    pub const fn policy(&self) -> KeyPolicy {
        self.policy
    }

    /// The file this inventory persists to.
    #[must_use]
    pub const fn store(&self) -> &JsonFile {
        &self.store
    }

    /// The raw document, including passthrough keys.
    ///
    /// The rooms array reflects the last load or save, not unsaved edits.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// All rooms, in insertion order.
    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether there are no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Look up a room.
    ///
    /// `location` is only consulted when the key policy needs it; without
    /// it such a lookup finds nothing.
    #[must_use]
    pub fn get(&self, number: u32, location: Option<&Location>) -> Option<&Room> {
        let key = self.policy.lookup_key(number, location)?;
        self.index.get(&key).map(|&i| &self.rooms[i])
    }

    /// Look up a room, reporting why it could not be found.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the key policy needs a location and none
    ///   was given
    /// - [`Error::NotFound`] if no room matches
    pub fn find(&self, number: u32, location: Option<&Location>) -> Result<&Room, Error> {
        let (position, _) = self.position(number, location)?;
        Ok(&self.rooms[position])
    }

    /// Add a new room.
    ///
    /// A rejected add leaves the inventory unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateKey`] if a room with the same key exists
    /// - [`Error::Validation`] if the rent is not strictly positive or a
    ///   coordinate is not finite
    pub fn add(&mut self, new: NewRoom) -> Result<&Room, Error> {
        let key = self.policy.key(new.number, &new.location);
        if self.index.contains_key(&key) {
            return Err(Error::DuplicateKey(key));
        }

        let rent = Rent::new(new.rent)?;
        if !new.location.is_finite() {
            return Err(ValidationError::Location(new.location).into());
        }
        let kind = new
            .amenities
            .map_or(RoomKind::Standard, |amenities| RoomKind::Premium { amenities });
        let room = Room::with_kind(new.number, rent, new.tenant, new.location, kind);

        tracing::info!("Added {} room {key}", room.kind().name());
        let position = self.insert(key, room);
        Ok(&self.rooms[position])
    }

    /// Apply a partial update to an existing room.
    ///
    /// Everything is validated before anything is written, so a failed edit
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the key policy needs a location and none
    ///   was given, or the new rent is not strictly positive
    /// - [`Error::NotFound`] if no room matches
    /// - [`Error::NotPremium`] if amenities are supplied for a standard room
    pub fn edit(
        &mut self,
        number: u32,
        location: Option<&Location>,
        update: RoomUpdate,
    ) -> Result<&Room, Error> {
        let (position, key) = self.position(number, location)?;

        let rent = update.rent.map(Rent::new).transpose()?;
        let room = &mut self.rooms[position];

        if update.amenities.is_some() && !room.is_premium() {
            return Err(Error::NotPremium(key));
        }

        if let Some(rent) = rent {
            room.set_rent(rent);
        }
        if let Some(tenant) = update.tenant {
            room.set_tenant(tenant);
        }
        if let (Some(amenities), Some(current)) = (update.amenities, room.amenities_mut()) {
            *current = amenities;
        }

        tracing::info!("Updated room {key}");
        Ok(&self.rooms[position])
    }

    /// Rooms whose rent does not exceed `limit`, in insertion order.
    pub fn filter_by_max_rent(&self, limit: f64) -> impl Iterator<Item = &Room> + '_ {
        self.rooms
            .iter()
            .filter(move |room| room.rent().amount() <= limit)
    }

    /// Number of rooms without a tenant.
    #[must_use]
    pub fn count_vacant(&self) -> usize {
        self.rooms
            .iter()
            .fold(0, |count, room| count + usize::from(room.is_vacant()))
    }

    /// Apply `transform` to every rent and sum the results, left to right in
    /// insertion order.
    pub fn aggregate_rents<F>(&self, transform: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        self.rooms
            .iter()
            .fold(0.0, |total, room| total + transform(room.rent().amount()))
    }

    /// Distribution of rents over `bins` equal-width bins.
    #[must_use]
    pub fn rent_histogram(&self, bins: NonZeroUsize) -> RentHistogram {
        RentHistogram::new(self.rooms.iter().map(|room| room.rent().amount()), bins)
    }

    /// Write every room back to the document and persist it.
    ///
    /// Top-level keys other than the rooms array are preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if a room cannot be encoded or the file cannot be
    /// written. The in-memory state is unaffected either way.
    pub fn save(&mut self) -> Result<(), Error> {
        let _timer = ScopedTimer::start("save inventory", self.store.path().display().to_string());

        let rooms = self
            .rooms
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(SaveError::from)?;

        self.document.set_rooms(rooms);
        self.store.save(&self.document)?;

        tracing::info!(
            "Saved {} rooms to {}",
            self.rooms.len(),
            self.store.path().display()
        );
        Ok(())
    }

    fn position(&self, number: u32, location: Option<&Location>) -> Result<(usize, RoomKey), Error> {
        let key = self
            .policy
            .lookup_key(number, location)
            .ok_or(ValidationError::LocationRequired(number))?;
        match self.index.get(&key) {
            Some(&position) => Ok((position, key)),
            None => Err(Error::NotFound(key)),
        }
    }

    fn key_of(&self, room: &Room) -> RoomKey {
        self.policy.key(room.number(), room.location())
    }

    fn insert(&mut self, key: RoomKey, room: Room) -> usize {
        let position = self.rooms.len();
        self.rooms.push(room);
        self.index.insert(key, position);
        position
    }
}

fn parse_rooms(raw: Option<&Value>) -> Result<Vec<Room>, DataError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    let entries = raw.as_array().ok_or(DataError::NotAnArray)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Room::deserialize(entry).map_err(|source| DataError::InvalidEntry { index, source })
        })
        .collect()
}
