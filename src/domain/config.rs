use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::domain::KeyPolicy;

/// Configuration for the room inventory.
///
/// Settings are read from a TOML file. A missing file means defaults, so a
/// fresh installation needs no configuration at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The JSON file rooms are loaded from and saved to.
    data_file: PathBuf,

    /// Which fields identify a room when checking for duplicates.
    ///
    /// Defaults to the room number alone.
    pub unique_key: KeyPolicy,

    /// Number of bins in the rent histogram.
    histogram_bins: NonZeroUsize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            unique_key: KeyPolicy::default(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration, falling back to defaults when the file does
    /// not exist or cannot be used.
    ///
    /// A missing file is normal and only logged at debug level. A file that
    /// exists but cannot be read or parsed is logged as a warning, since the
    /// defaults may point at a different data file.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "No configuration file at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}, using defaults: {e}", path.display());
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The JSON data file.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Point the configuration at a different data file.
    pub fn set_data_file(&mut self, path: impl Into<PathBuf>) {
        self.data_file = path.into();
    }

    /// Number of bins in the rent histogram.
    #[must_use]
    pub const fn histogram_bins(&self) -> NonZeroUsize {
        self.histogram_bins
    }

    /// Sets the number of histogram bins.
    pub const fn set_histogram_bins(&mut self, bins: NonZeroUsize) {
        self.histogram_bins = bins;
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data.json")
}

const DEFAULT_HISTOGRAM_BINS: NonZeroUsize = NonZeroUsize::new(10).unwrap();

const fn default_histogram_bins() -> NonZeroUsize {
    DEFAULT_HISTOGRAM_BINS
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_data_file")]
        data_file: PathBuf,

        #[serde(default)]
        unique_key: KeyPolicy,

        #[serde(default = "default_histogram_bins")]
        histogram_bins: NonZeroUsize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                data_file,
                unique_key,
                histogram_bins,
            } => Self {
                data_file,
                unique_key,
                histogram_bins,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            data_file: config.data_file,
            unique_key: config.unique_key,
            histogram_bins: config.histogram_bins,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\ndata_file = \"rooms.json\"\nunique_key = \"number-and-location\"\nhistogram_bins = 5\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.data_file(), Path::new("rooms.json"));
        assert_eq!(config.unique_key, KeyPolicy::NumberAndLocation);
        assert_eq!(config.histogram_bins().get(), 5);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nhistogram_bins = 0\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&tmp.path().join("missing.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_or_default_falls_back_on_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nunique_key = \"room-number\"\n")
            .unwrap();

        assert!(Config::load(file.path()).is_err());
        assert_eq!(Config::load_or_default(file.path()), Config::default());
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rooms.toml");

        let mut config = Config::default();
        config.unique_key = KeyPolicy::NumberAndLocation;
        config.set_data_file("elsewhere.json");
        config.set_histogram_bins(NonZeroUsize::new(4).unwrap());
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
