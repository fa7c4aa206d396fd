use std::{num::NonZeroUsize, path::Path};

use clap::ValueEnum;
use rental::{Config, KeyPolicy};
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
/// Show or modify configuration
///
/// Available configuration keys:
///   `data_file`       JSON file rooms are stored in (default: data.json)
///   `unique_key`      What identifies a room: number, number-and-location
///   `histogram_bins`  Number of bins in the rent histogram (default: 10)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   rooms config set `unique_key` number-and-location
    ///   rooms config set `histogram_bins` 20
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Command {
    /// Run the config subcommand against the file at `config_path`.
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => Self::show_config(config_path),
            ConfigCommand::Get { key } => Self::get_config(config_path, &key),
            ConfigCommand::Set { key, value } => Self::set_config(config_path, &key, &value),
        }
    }

    fn load(config_path: &Path) -> anyhow::Result<Config> {
        if config_path.exists() {
            Config::load(config_path).map_err(|e| anyhow::anyhow!("{e}"))
        } else {
            Ok(Config::default())
        }
    }

    fn show_config(config_path: &Path) -> anyhow::Result<()> {
        let config = Self::load(config_path)?;

        println!("Configuration:");
        if !config_path.exists() {
            println!("  {}", format!("({} not found, using defaults)", config_path.display()).dim());
        }
        println!("  data_file: {}", config.data_file().display());
        println!(
            "  unique_key: {} ({})",
            config.unique_key,
            if config.unique_key.needs_location() {
                "number and location".dim()
            } else {
                "number only".dim()
            }
        );
        println!("  histogram_bins: {}", config.histogram_bins());
        Ok(())
    }

    fn get_config(config_path: &Path, key: &str) -> anyhow::Result<()> {
        let config = Self::load(config_path)?;

        match key {
            "data_file" => println!("{}", config.data_file().display()),
            "unique_key" => println!("{}", config.unique_key),
            "histogram_bins" => println!("{}", config.histogram_bins()),
            _ => unknown_key(key)?,
        }
        Ok(())
    }

    fn set_config(config_path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
        let mut config = Self::load(config_path)?;

        match key {
            "data_file" => config.set_data_file(value),
            "unique_key" => {
                config.unique_key = KeyPolicy::from_str(value, true).map_err(|_| {
                    anyhow::anyhow!("Value must be 'number' or 'number-and-location'")
                })?;
            }
            "histogram_bins" => {
                let bins = value
                    .parse::<NonZeroUsize>()
                    .map_err(|_| anyhow::anyhow!("Value must be a positive integer"))?;
                config.set_histogram_bins(bins);
            }
            _ => unknown_key(key)?,
        }

        config
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        println!("{}", format!("Set {key} = {value}").success());
        Ok(())
    }
}

fn unknown_key(key: &str) -> anyhow::Result<()> {
    anyhow::bail!(
        "Unknown configuration key: '{key}'\n\nAvailable keys:\n  data_file\n  unique_key\n  \
         histogram_bins"
    )
}
