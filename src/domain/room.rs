use serde::{Deserialize, Serialize};

use crate::domain::{
    location::Location,
    rent::{InvalidRentError, Rent},
    tenant::Tenant,
};

/// A rentable room.
///
/// Every room carries the same base fields (number, rent, tenant, location).
/// Premium rooms additionally carry an ordered list of amenities, held in the
/// [`RoomKind`] payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoomRecord", into = "RoomRecord")]
pub struct Room {
    number: u32,
    rent: Rent,
    tenant: Option<Tenant>,
    location: Location,
    kind: RoomKind,
}

/// The variant of a room.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoomKind {
    /// A plain room.
    #[default]
    Standard,
    /// A premium room with extra amenities.
    ///
    /// Amenity order is preserved for display. Duplicates are allowed.
    Premium {
        /// The amenities on offer, e.g. `WiFi`, `TV`.
        amenities: Vec<String>,
    },
}

impl RoomKind {
    /// A short, human-readable name for the variant.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium { .. } => "premium",
        }
    }
}

impl Room {
    /// Construct a standard room.
    ///
    /// # Errors
    ///
    /// Returns an error if `rent` is not strictly positive.
    pub fn new(
        number: u32,
        rent: f64,
        tenant: Option<Tenant>,
        location: Location,
    ) -> Result<Self, InvalidRentError> {
        Ok(Self::with_kind(
            number,
            Rent::new(rent)?,
            tenant,
            location,
            RoomKind::Standard,
        ))
    }

    /// Construct a premium room with the given amenities.
    ///
    /// # Errors
    ///
    /// Returns an error if `rent` is not strictly positive.
    pub fn premium(
        number: u32,
        rent: f64,
        tenant: Option<Tenant>,
        location: Location,
        amenities: Vec<String>,
    ) -> Result<Self, InvalidRentError> {
        Ok(Self::with_kind(
            number,
            Rent::new(rent)?,
            tenant,
            location,
            RoomKind::Premium { amenities },
        ))
    }

    pub(crate) const fn with_kind(
        number: u32,
        rent: Rent,
        tenant: Option<Tenant>,
        location: Location,
        kind: RoomKind,
    ) -> Self {
        Self {
            number,
            rent,
            tenant,
            location,
            kind,
        }
    }

    /// The room number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// The monthly rent.
    #[must_use]
    pub const fn rent(&self) -> Rent {
        self.rent
    }

    /// The current tenant, if the room is occupied.
    #[must_use]
    pub const fn tenant(&self) -> Option<&Tenant> {
        self.tenant.as_ref()
    }

    /// Where the room is.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// The room variant.
    #[must_use]
    pub const fn kind(&self) -> &RoomKind {
        &self.kind
    }

    /// The amenities of a premium room, or `None` for a standard room.
    #[must_use]
    pub fn amenities(&self) -> Option<&[String]> {
        match &self.kind {
            RoomKind::Standard => None,
            RoomKind::Premium { amenities } => Some(amenities),
        }
    }

    /// Whether the room has no tenant.
    #[must_use]
    pub const fn is_vacant(&self) -> bool {
        self.tenant.is_none()
    }

    /// Whether this is a premium room.
    #[must_use]
    pub const fn is_premium(&self) -> bool {
        matches!(self.kind, RoomKind::Premium { .. })
    }

    pub(crate) fn set_rent(&mut self, rent: Rent) {
        self.rent = rent;
    }

    pub(crate) fn set_tenant(&mut self, tenant: Option<Tenant>) {
        self.tenant = tenant;
    }

    /// Mutable access to the amenity list, only available on premium rooms.
    pub(crate) fn amenities_mut(&mut self) -> Option<&mut Vec<String>> {
        match &mut self.kind {
            RoomKind::Standard => None,
            RoomKind::Premium { amenities } => Some(amenities),
        }
    }
}

/// The persisted shape of a room.
///
/// The base fields are written for every variant; premium rooms then add
/// `udogodnienia` on top of the base record. On read, a present and
/// non-empty `udogodnienia` selects the premium variant.
#[derive(Debug, Serialize, Deserialize)]
struct RoomRecord {
    numer: u32,
    czynsz: f64,
    #[serde(default)]
    najemca: Option<Tenant>,
    #[serde(default)]
    lokalizacja: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    udogodnienia: Option<Vec<String>>,
}

impl RoomRecord {
    fn base(number: u32, rent: Rent, tenant: Option<Tenant>, location: Location) -> Self {
        Self {
            numer: number,
            czynsz: rent.amount(),
            najemca: tenant,
            lokalizacja: location,
            udogodnienia: None,
        }
    }
}

impl From<Room> for RoomRecord {
    fn from(room: Room) -> Self {
        let Room {
            number,
            rent,
            tenant,
            location,
            kind,
        } = room;

        let mut record = Self::base(number, rent, tenant, location);
        if let RoomKind::Premium { amenities } = kind {
            record.udogodnienia = Some(amenities);
        }
        record
    }
}

impl TryFrom<RoomRecord> for Room {
    type Error = InvalidRentError;

    fn try_from(record: RoomRecord) -> Result<Self, Self::Error> {
        let RoomRecord {
            numer,
            czynsz,
            najemca,
            lokalizacja,
            udogodnienia,
        } = record;

        let kind = match udogodnienia {
            Some(amenities) if !amenities.is_empty() => RoomKind::Premium { amenities },
            _ => RoomKind::Standard,
        };

        Ok(Self::with_kind(
            numer,
            Rent::new(czynsz)?,
            najemca,
            lokalizacja,
            kind,
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn jan() -> Tenant {
        Tenant::new("Jan", "Kowalski", "jan@example.com")
    }

    #[test]
    fn standard_room_serialises_base_fields() {
        let room = Room::new(1, 1000.0, Some(jan()), Location::coordinates(10.0, 20.0)).unwrap();

        let expected = json!({
            "numer": 1,
            "czynsz": 1000.0,
            "najemca": {"imie": "Jan", "nazwisko": "Kowalski", "email": "jan@example.com"},
            "lokalizacja": [10.0, 20.0],
        });
        assert_eq!(serde_json::to_value(&room).unwrap(), expected);
    }

    #[test]
    fn vacant_room_serialises_null_tenant() {
        let room = Room::new(3, 800.0, None, Location::default()).unwrap();
        let value = serde_json::to_value(&room).unwrap();
        assert_eq!(value["najemca"], serde_json::Value::Null);
    }

    #[test]
    fn premium_room_extends_base_fields() {
        let standard = Room::new(2, 1500.0, None, Location::default()).unwrap();
        let premium = Room::premium(
            2,
            1500.0,
            None,
            Location::default(),
            vec!["WiFi".to_string(), "TV".to_string()],
        )
        .unwrap();

        let mut expected = serde_json::to_value(&standard).unwrap();
        expected["udogodnienia"] = json!(["WiFi", "TV"]);
        assert_eq!(serde_json::to_value(&premium).unwrap(), expected);
    }

    #[test]
    fn construction_rejects_non_positive_rent() {
        assert!(Room::new(3, -1000.0, None, Location::default()).is_err());
        assert!(Room::new(3, 0.0, None, Location::default()).is_err());
        assert!(Room::premium(3, 0.0, None, Location::default(), vec![]).is_err());
    }

    #[test]
    fn non_empty_amenities_select_premium_on_read() {
        let room: Room = serde_json::from_value(json!({
            "numer": 2,
            "czynsz": 1500,
            "najemca": null,
            "lokalizacja": [0, 0],
            "udogodnienia": ["WiFi", "TV", "WiFi"],
        }))
        .unwrap();

        assert!(room.is_premium());
        assert_eq!(
            room.amenities().unwrap(),
            ["WiFi".to_string(), "TV".to_string(), "WiFi".to_string()]
        );
        assert_eq!(room.kind().name(), "premium");
    }

    #[test]
    fn empty_amenities_read_as_standard() {
        let room: Room = serde_json::from_value(json!({
            "numer": 4,
            "czynsz": 900,
            "udogodnienia": [],
        }))
        .unwrap();

        assert!(!room.is_premium());
        assert_eq!(room.amenities(), None);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let room: Room = serde_json::from_value(json!({"numer": 5, "czynsz": 700})).unwrap();
        assert!(room.is_vacant());
        assert_eq!(room.location(), &Location::coordinates(0.0, 0.0));
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        assert!(serde_json::from_value::<Room>(json!({"czynsz": 700})).is_err());
        assert!(serde_json::from_value::<Room>(json!({"numer": 5})).is_err());
        assert!(serde_json::from_value::<Room>(json!({"numer": 5, "czynsz": -1})).is_err());
    }

    #[test]
    fn round_trips_both_variants() {
        let rooms = [
            Room::new(1, 1000.0, Some(jan()), Location::coordinates(10.0, 20.0)).unwrap(),
            Room::premium(
                2,
                1500.0,
                None,
                Location::address("Kraków", "Floriańska", "12A"),
                vec!["WiFi".to_string()],
            )
            .unwrap(),
        ];

        for room in rooms {
            let value = serde_json::to_value(&room).unwrap();
            let back: Room = serde_json::from_value(value.clone()).unwrap();
            assert_eq!(back, room);
            assert_eq!(serde_json::to_value(&back).unwrap(), value);
        }
    }
}
