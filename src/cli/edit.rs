use rental::{Config, RoomUpdate};
use tracing::instrument;

use super::{LocationArgs, TenantArgs, parse_amenities, terminal::Colorize};

/// Command arguments for `rooms edit`.
#[derive(Debug, clap::Parser)]
pub struct Command {
    /// The number of the room to edit
    number: u32,

    /// Location of the room; only needed when rooms are keyed by number and
    /// location
    #[command(flatten)]
    location: LocationArgs,

    /// New monthly rent
    #[arg(long, allow_hyphen_values = true)]
    rent: Option<f64>,

    /// Replace the tenant
    #[command(flatten)]
    tenant: TenantArgs,

    /// Remove the tenant
    #[arg(long, conflicts_with_all = ["first_name", "last_name", "email"])]
    vacate: bool,

    /// Replace the amenities of a premium room (comma-separated)
    #[arg(long, value_name = "AMENITIES")]
    amenities: Option<String>,
}

impl Command {
    /// Apply the changes and save the data file.
    #[instrument(skip(self))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let number = self.number;
        let location = self.location.clone().location();
        let update = self.update();
        if update.is_empty() {
            anyhow::bail!("Nothing to change: pass --rent, a tenant, --vacate or --amenities");
        }

        let mut inventory = super::open_inventory(config)?;
        super::ensure_safe_to_save(&inventory)?;

        inventory.edit(number, location.as_ref(), update)?;
        inventory.save()?;

        println!("{}", format!("Updated room {number}.").success());
        Ok(())
    }

    fn update(self) -> RoomUpdate {
        let mut update = RoomUpdate {
            rent: self.rent,
            amenities: self.amenities.as_deref().map(parse_amenities),
            ..RoomUpdate::default()
        };
        if self.vacate {
            update = update.vacate();
        } else if let Some(tenant) = self.tenant.tenant() {
            update = update.tenant(tenant);
        }
        update
    }
}
