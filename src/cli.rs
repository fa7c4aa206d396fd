use std::path::{Path, PathBuf};

mod add;
mod config;
mod edit;
mod histogram;
mod list;
mod menu;
mod stats;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use rental::{Config, Inventory, LoadOutcome, Location, Tenant};
use terminal::Colorize;

/// Command-line interface of the `rooms` binary.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = "rooms.toml", global = true)]
    config: PathBuf,

    /// The JSON data file (overrides the configured one)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// What to do (the interactive menu if omitted)
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    /// Set up logging and configuration, then run the chosen command.
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let mut config = Config::load_or_default(&self.config);
        if let Some(data) = self.data {
            config.set_data_file(data);
        }

        self.command
            .unwrap_or(Command::Menu)
            .run(&self.config, config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// The subcommands of `rooms`.
#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Interactive menu (default)
    Menu,

    /// Show all rooms
    List(list::Command),

    /// Show rooms whose rent does not exceed a limit
    Filter(list::Filter),

    /// Add a new room
    Add(add::Command),

    /// Edit an existing room
    ///
    /// Only the fields given on the command line are changed.
    Edit(edit::Command),

    /// Show occupancy and rent statistics
    Stats(stats::Command),

    /// Show the distribution of rents as a histogram
    Histogram(histogram::Command),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, config_path: &Path, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Menu => menu::run(&config)?,
            Self::List(command) => command.run(&config)?,
            Self::Filter(command) => command.run(&config)?,
            Self::Add(command) => command.run(&config)?,
            Self::Edit(command) => command.run(&config)?,
            Self::Stats(command) => command.run(&config)?,
            Self::Histogram(command) => command.run(&config)?,
            Self::Config(command) => command.run(config_path)?,
        }
        Ok(())
    }
}

/// Open the configured inventory, telling the user if it started empty.
fn open_inventory(config: &Config) -> anyhow::Result<Inventory> {
    let inventory = Inventory::open(config).with_context(|| {
        format!(
            "Failed to load rooms from {}",
            config.data_file().display()
        )
    })?;

    let path = config.data_file().display();
    match inventory.load_outcome() {
        LoadOutcome::Read => {}
        LoadOutcome::Missing => {
            eprintln!(
                "{}",
                format!("Data file {path} does not exist, starting with no rooms.").dim()
            );
        }
        LoadOutcome::Unreadable | LoadOutcome::Malformed => {
            eprintln!(
                "{}",
                format!("Data file {path} could not be read, starting with no rooms.").warning()
            );
        }
    }

    Ok(inventory)
}

/// Refuse to overwrite a data file that exists but could not be loaded.
fn ensure_safe_to_save(inventory: &Inventory) -> anyhow::Result<()> {
    match inventory.load_outcome() {
        LoadOutcome::Read | LoadOutcome::Missing => Ok(()),
        LoadOutcome::Unreadable | LoadOutcome::Malformed => anyhow::bail!(
            "Refusing to overwrite {}: the existing file could not be loaded",
            inventory.store().path().display()
        ),
    }
}

/// Where a room is, given either as coordinates or as an address.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LocationArgs {
    /// X coordinate
    #[arg(
        long,
        allow_hyphen_values = true,
        value_parser = parse_coordinate,
        requires = "y",
        conflicts_with_all = ["city", "street", "house_number"]
    )]
    x: Option<f64>,

    /// Y coordinate
    #[arg(
        long,
        allow_hyphen_values = true,
        value_parser = parse_coordinate,
        requires = "x"
    )]
    y: Option<f64>,

    /// City (address form)
    #[arg(long, requires_all = ["street", "house_number"])]
    city: Option<String>,

    /// Street (address form)
    #[arg(long, requires_all = ["city", "house_number"])]
    street: Option<String>,

    /// House number (address form)
    #[arg(long, requires_all = ["city", "street"])]
    house_number: Option<String>,
}

impl LocationArgs {
    /// The location, if one was given.
    fn location(self) -> Option<Location> {
        match self {
            Self {
                x: Some(x),
                y: Some(y),
                ..
            } => Some(Location::coordinates(x, y)),
            Self {
                city: Some(city),
                street: Some(street),
                house_number: Some(house_number),
                ..
            } => Some(Location::address(city, street, house_number)),
            _ => None,
        }
    }
}

/// Parse a coordinate, refusing values that cannot be stored as JSON.
fn parse_coordinate(input: &str) -> Result<f64, String> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{input}' is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{input}' is not a finite number"))
    }
}

/// A tenant, given as three names that must appear together.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TenantArgs {
    /// Tenant's first name
    #[arg(long, requires_all = ["last_name", "email"])]
    first_name: Option<String>,

    /// Tenant's last name
    #[arg(long, requires_all = ["first_name", "email"])]
    last_name: Option<String>,

    /// Tenant's email address
    #[arg(long, requires_all = ["first_name", "last_name"])]
    email: Option<String>,
}

impl TenantArgs {
    fn tenant(self) -> Option<Tenant> {
        match (self.first_name, self.last_name, self.email) {
            (Some(first_name), Some(last_name), Some(email)) => {
                Some(Tenant::new(first_name, last_name, email))
            }
            _ => None,
        }
    }
}

/// Split a comma-separated amenity list, dropping blank entries.
fn parse_amenities(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}
