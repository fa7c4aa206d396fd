use rental::{Config, Location, NewRoom};
use tracing::instrument;

use super::{LocationArgs, TenantArgs, terminal::Colorize};

/// Command arguments for `rooms add`.
#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The room number
    number: u32,

    /// Monthly rent (must be positive)
    #[arg(long, allow_hyphen_values = true)]
    rent: f64,

    /// Location of the room (defaults to the origin)
    #[command(flatten)]
    location: LocationArgs,

    /// Tenant, if the room is occupied
    #[command(flatten)]
    tenant: TenantArgs,

    /// Add a premium room
    #[arg(long)]
    premium: bool,

    /// Amenities of a premium room (comma-separated, implies --premium)
    #[arg(long, value_delimiter = ',', value_name = "AMENITY")]
    amenities: Vec<String>,
}

impl Command {
    /// Add the room and save the data file.
    #[instrument(skip(self))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut inventory = super::open_inventory(config)?;
        super::ensure_safe_to_save(&inventory)?;

        let new = self.into_new_room();
        let room = inventory.add(new)?;
        let message = format!("Added {} room {}.", room.kind().name(), room.number());

        inventory.save()?;
        println!("{}", message.success());
        Ok(())
    }

    /// The location given on the command line, defaulting to the origin.
    pub(super) fn location(&self) -> Location {
        self.location.clone().location().unwrap_or_default()
    }

    fn into_new_room(self) -> NewRoom {
        let location = self.location();
        let mut new = NewRoom::new(self.number, self.rent, location);

        if let Some(tenant) = self.tenant.tenant() {
            new = new.with_tenant(tenant);
        }

        let amenities: Vec<String> = self
            .amenities
            .iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if self.premium || !amenities.is_empty() {
            new = new.premium(amenities);
        }
        new
    }
}
