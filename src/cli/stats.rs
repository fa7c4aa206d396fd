use clap::Parser;
use rental::{Config, Inventory};
use tracing::instrument;

use super::terminal::Colorize;

/// Command arguments for `rooms stats`.
#[derive(Debug, Parser, Default)]
pub struct Command {
    /// Print one `key=value` line per figure, for scripting
    #[arg(long)]
    quiet: bool,
}

impl Command {
    /// Print the statistics for the configured inventory.
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let inventory = super::open_inventory(config)?;
        let stats = Stats::of(&inventory);

        if self.quiet {
            stats.print_quiet();
        } else {
            stats.print();
        }
        Ok(())
    }
}

/// Occupancy and income figures for an inventory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    rooms: usize,
    vacant: usize,
    premium: usize,
    monthly: f64,
    yearly: f64,
}

impl Stats {
    /// Compute the figures for `inventory`.
    pub fn of(inventory: &Inventory) -> Self {
        Self {
            rooms: inventory.len(),
            vacant: inventory.count_vacant(),
            premium: inventory.rooms().iter().filter(|room| room.is_premium()).count(),
            monthly: inventory.aggregate_rents(|rent| rent),
            yearly: inventory.aggregate_rents(|rent| rent * 12.0),
        }
    }

    fn average(&self) -> Option<f64> {
        #[allow(clippy::cast_precision_loss)]
        (self.rooms > 0).then(|| self.monthly / self.rooms as f64)
    }

    /// Print the figures as a short report.
    pub fn print(&self) {
        println!("{}", "Statistics".info());
        println!("{}", "──────────".dim());
        println!("Rooms: {}", self.rooms);
        println!("  Occupied: {}", self.rooms - self.vacant);
        if self.vacant == 0 {
            println!("  Vacant: {}", self.vacant);
        } else {
            println!("  Vacant: {}", self.vacant.to_string().success());
        }
        println!("  Premium: {}", self.premium);
        println!();
        println!("Monthly rent: {:.2} zł", self.monthly);
        match self.average() {
            Some(average) => println!("Average rent: {average:.2} zł"),
            None => println!("Average rent: {}", "n/a".dim()),
        }
        println!("Yearly income: {:.2} zł", self.yearly);
    }

    fn print_quiet(&self) {
        println!(
            "rooms={} vacant={} premium={} monthly={:.2} yearly={:.2}",
            self.rooms, self.vacant, self.premium, self.monthly, self.yearly
        );
    }
}
