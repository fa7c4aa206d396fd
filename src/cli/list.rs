use clap::{Parser, ValueEnum};
use rental::{Config, Room};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Command arguments for `rooms list`.
#[derive(Debug, Parser)]
pub struct Command {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Command {
    /// Print every room.
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let inventory = super::open_inventory(config)?;

        match self.output {
            OutputFormat::Json => print_json(inventory.rooms())?,
            OutputFormat::Table if inventory.is_empty() => println!("No rooms in the system."),
            OutputFormat::Table => print_rooms(inventory.rooms()),
        }
        Ok(())
    }
}

/// Command arguments for `rooms filter`.
#[derive(Debug, Parser)]
pub struct Filter {
    /// Highest rent to include.
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    max_rent: f64,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Filter {
    /// Print the rooms within the rent limit.
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let inventory = super::open_inventory(config)?;
        let matching: Vec<&Room> = inventory.filter_by_max_rent(self.max_rent).collect();

        match self.output {
            OutputFormat::Json => print_json(matching)?,
            OutputFormat::Table if matching.is_empty() => {
                println!("No rooms within the given limit.");
            }
            OutputFormat::Table => print_rooms(matching),
        }
        Ok(())
    }
}

/// Print one block per room: number, rent and location, followed by
/// amenities and tenant when present.
pub fn print_rooms<'a>(rooms: impl IntoIterator<Item = &'a Room>) {
    let narrow = is_narrow();

    for room in rooms {
        if narrow {
            println!("Room {}", room.number());
            println!("  Rent: {} zł", room.rent());
            println!("  Location: {}", room.location());
        } else {
            println!(
                "Room {}, Rent: {} zł, Location: {}",
                room.number(),
                room.rent(),
                room.location()
            );
        }
        if let Some(amenities) = room.amenities() {
            println!("  Amenities: {}", amenities.join(", ").dim());
        }
        match room.tenant() {
            Some(tenant) => println!("  Tenant: {tenant} <{}>", tenant.email),
            None => println!("  {}", "Vacant".success()),
        }
    }
}

fn print_json<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> anyhow::Result<()> {
    let rooms: Vec<&Room> = rooms.into_iter().collect();
    println!("{}", serde_json::to_string_pretty(&rooms)?);
    Ok(())
}
