//! The interactive numbered menu.
//!
//! Every prompt lives here. The inventory only ever sees parsed values, and
//! any error it returns is shown to the user before the menu is redrawn.

use std::{fmt, num::NonZeroUsize};

use dialoguer::{Confirm, Input, Select};
use rental::{Config, Inventory, LoadOutcome, Location, NewRoom, RoomUpdate, Tenant};
use tracing::instrument;

use super::{histogram, list, parse_amenities, stats::Stats, terminal::Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    ShowRooms,
    FilterByRent,
    Save,
    Exit,
    AddRoom,
    EditRoom,
    Statistics,
    Visualization,
}

impl MenuItem {
    /// In display order; an item's number is its position plus one.
    const ALL: [Self; 8] = [
        Self::ShowRooms,
        Self::FilterByRent,
        Self::Save,
        Self::Exit,
        Self::AddRoom,
        Self::EditRoom,
        Self::Statistics,
        Self::Visualization,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::ShowRooms => "Show rooms",
            Self::FilterByRent => "Filter rooms by rent",
            Self::Save => "Save data",
            Self::Exit => "Exit",
            Self::AddRoom => "Add room",
            Self::EditRoom => "Edit room",
            Self::Statistics => "Show statistics",
            Self::Visualization => "Show rent distribution",
        }
    }

    fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|&item| item == self)
            .map_or(0, |index| index + 1)
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Run the menu until the user chooses to exit.
///
/// # Errors
///
/// Errors from the inventory are reported and the menu carries on. Terminal
/// errors end the session.
#[instrument(level = "debug", skip(config))]
pub fn run(config: &Config) -> anyhow::Result<()> {
    let mut session = Session {
        inventory: super::open_inventory(config)?,
        bins: config.histogram_bins(),
        dirty: false,
    };

    loop {
        let choice = Select::new()
            .with_prompt("Choose an option")
            .items(&MenuItem::ALL)
            .default(0)
            .interact()?;
        let item = MenuItem::ALL[choice];
        tracing::debug!("Menu choice: {item}");

        let result = match item {
            MenuItem::Exit => match session.exit() {
                Ok(true) => break,
                other => other.map(|_| ()),
            },
            item => session.handle(item),
        };

        match result {
            Ok(()) => {}
            Err(error) if error.is::<rental::Error>() => {
                eprintln!("{}", format!("Error: {error}").warning());
            }
            Err(error) => return Err(error),
        }
    }

    Ok(())
}

struct Session {
    inventory: Inventory,
    bins: NonZeroUsize,
    dirty: bool,
}

impl Session {
    fn handle(&mut self, item: MenuItem) -> anyhow::Result<()> {
        match item {
            MenuItem::ShowRooms => self.show_rooms(),
            MenuItem::FilterByRent => self.filter_by_rent()?,
            MenuItem::Save => self.save()?,
            MenuItem::AddRoom => self.add_room()?,
            MenuItem::EditRoom => self.edit_room()?,
            MenuItem::Statistics => Stats::of(&self.inventory).print(),
            MenuItem::Visualization => histogram::print_histogram(&self.inventory, self.bins),
            MenuItem::Exit => {}
        }
        Ok(())
    }

    fn show_rooms(&self) {
        if self.inventory.is_empty() {
            println!("No rooms in the system.");
        } else {
            list::print_rooms(self.inventory.rooms());
        }
    }

    fn filter_by_rent(&self) -> anyhow::Result<()> {
        let limit: f64 = Input::new().with_prompt("Maximum rent").interact_text()?;

        let mut matching = self.inventory.filter_by_max_rent(limit).peekable();
        if matching.peek().is_none() {
            println!("No rooms within the given limit.");
        } else {
            list::print_rooms(matching);
        }
        Ok(())
    }

    fn add_room(&mut self) -> anyhow::Result<()> {
        let number: u32 = Input::new().with_prompt("Room number").interact_text()?;
        let rent: f64 = Input::new().with_prompt("Monthly rent").interact_text()?;
        let location = prompt_location()?;

        let mut new = NewRoom::new(number, rent, location);
        if Confirm::new()
            .with_prompt("Is the room occupied?")
            .default(false)
            .interact()?
        {
            new = new.with_tenant(prompt_tenant()?);
        }
        if Confirm::new()
            .with_prompt("Is this a premium room?")
            .default(false)
            .interact()?
        {
            new = new.premium(prompt_amenities("Amenities (comma-separated)")?.unwrap_or_default());
        }

        let room = self.inventory.add(new)?;
        println!(
            "{}",
            format!("Added {} room {}.", room.kind().name(), room.number()).success()
        );
        self.dirty = true;
        Ok(())
    }

    fn edit_room(&mut self) -> anyhow::Result<()> {
        let number: u32 = Input::new().with_prompt("Room number").interact_text()?;
        let location = if self.inventory.policy().needs_location() {
            Some(prompt_location()?)
        } else {
            None
        };

        let room = self.inventory.find(number, location.as_ref())?;
        let current_rent = room.rent();
        let premium = room.is_premium();
        list::print_rooms([room]);

        let mut update = RoomUpdate::default();

        let rent: String = Input::new()
            .with_prompt(format!("New rent (blank keeps {current_rent})"))
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), &str> {
                let input = input.trim();
                if input.is_empty() || input.parse::<f64>().is_ok() {
                    Ok(())
                } else {
                    Err("Enter a number")
                }
            })
            .interact_text()?;
        if let Ok(rent) = rent.trim().parse() {
            update = update.rent(rent);
        }

        let tenant = Select::new()
            .with_prompt("Tenant")
            .items(&["Keep", "Replace", "Mark vacant"])
            .default(0)
            .interact()?;
        match tenant {
            1 => update = update.tenant(prompt_tenant()?),
            2 => update = update.vacate(),
            _ => {}
        }

        if premium {
            if let Some(amenities) = prompt_amenities("New amenities (blank keeps current)")? {
                update = update.amenities(amenities);
            }
        }

        if update.is_empty() {
            println!("{}", "Nothing changed.".dim());
            return Ok(());
        }

        self.inventory.edit(number, location.as_ref(), update)?;
        println!("{}", format!("Updated room {number}.").success());
        self.dirty = true;
        Ok(())
    }

    fn save(&mut self) -> anyhow::Result<()> {
        if matches!(
            self.inventory.load_outcome(),
            LoadOutcome::Unreadable | LoadOutcome::Malformed
        ) && !Confirm::new()
            .with_prompt(format!(
                "{} could not be loaded. Overwrite it?",
                self.inventory.store().path().display()
            ))
            .default(false)
            .interact()?
        {
            return Ok(());
        }

        self.inventory.save()?;
        self.dirty = false;
        println!(
            "{}",
            format!("Saved to {}.", self.inventory.store().path().display()).success()
        );
        Ok(())
    }

    /// Returns `true` once it is fine to leave.
    fn exit(&mut self) -> anyhow::Result<bool> {
        if self.dirty
            && Confirm::new()
                .with_prompt("Save changes before exiting?")
                .default(true)
                .interact()?
        {
            self.save()?;
            return Ok(!self.dirty);
        }
        Ok(true)
    }
}

fn prompt_location() -> anyhow::Result<Location> {
    let form = Select::new()
        .with_prompt("Location")
        .items(&["Coordinates", "Address"])
        .default(0)
        .interact()?;

    if form == 0 {
        let x = prompt_coordinate("X")?;
        let y = prompt_coordinate("Y")?;
        Ok(Location::coordinates(x, y))
    } else {
        let city = prompt_text("City")?;
        let street = prompt_text("Street")?;
        let house_number = prompt_text("House number")?;
        Ok(Location::address(city, street, house_number))
    }
}

fn prompt_coordinate(prompt: &str) -> anyhow::Result<f64> {
    Ok(Input::new()
        .with_prompt(prompt)
        .default(0.0)
        .validate_with(|value: &f64| -> Result<(), &str> {
            if value.is_finite() {
                Ok(())
            } else {
                Err("Enter a finite number")
            }
        })
        .interact_text()?)
}

fn prompt_tenant() -> anyhow::Result<Tenant> {
    let first_name = prompt_text("First name")?;
    let last_name = prompt_text("Last name")?;
    let email = prompt_text("Email")?;
    Ok(Tenant::new(first_name, last_name, email))
}

/// `None` when the user leaves the list blank.
fn prompt_amenities(prompt: &str) -> anyhow::Result<Option<Vec<String>>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let amenities = parse_amenities(&input);
    Ok((!amenities.is_empty()).then_some(amenities))
}

fn prompt_text(prompt: &str) -> anyhow::Result<String> {
    let text: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(text.trim().to_string())
}
