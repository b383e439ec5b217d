//! Configuration management for rocketstar.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::roster::{DuplicatePolicy, NameMatching};
use crate::store::{DirectoryStore, EmbeddedStore, ResourceStore};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "rocketstar";

/// Environment variable prefix.
const ENV_PREFIX: &str = "ROCKETSTAR_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROCKETSTAR_`, sections split on `__`)
/// 2. TOML config file at `~/.config/rocketstar/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the catalog documents come from.
    pub resources: ResourceConfig,
    /// How the catalog is decoded and validated.
    pub catalog: CatalogConfig,
    /// How derived strings are rendered.
    pub display: DisplayConfig,
}

/// Resource location configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Directory holding the documents.
    /// Defaults to the data set compiled into the binary.
    pub dir: Option<PathBuf>,
    /// Roster resource name.
    pub astronauts: String,
    /// Mission list resource name.
    pub missions: String,
}

/// Catalog decoding and validation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// What to do when the roster repeats a key.
    pub duplicate_policy: DuplicatePolicy,
    /// How crew names are matched to roster keys.
    pub name_matching: NameMatching,
    /// Resolve every mission's crew at load time.
    pub validate_crew: bool,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono strftime pattern for launch dates.
    pub date_format: String,
    /// Text shown when a mission has no launch date.
    pub date_placeholder: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            dir: None,
            astronauts: "astronauts.json".to_string(),
            missions: "missions.json".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::LastWins,
            name_matching: NameMatching::Exact,
            validate_crew: true,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%b %-d, %Y".to_string(),
            date_placeholder: "N/A".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let resources = &self.resources;
        for (field, value) in [
            ("astronauts", &resources.astronauts),
            ("missions", &resources.missions),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config_validation(format!(
                    "resources.{field} must not be empty"
                )));
            }
        }

        if resources.astronauts == resources.missions {
            return Err(Error::config_validation(format!(
                "resources.astronauts and resources.missions both name '{}'",
                resources.missions
            )));
        }

        self.display.validate()
    }

    /// Build the resource store this configuration points at.
    #[must_use]
    pub fn store(&self) -> Box<dyn ResourceStore> {
        match &self.resources.dir {
            Some(dir) => Box::new(DirectoryStore::new(dir)),
            None => Box::new(EmbeddedStore::builtin()),
        }
    }
}

impl DisplayConfig {
    /// Validate the display settings.
    ///
    /// The date format must be renderable for a plain calendar date, so
    /// time and zone specifiers are rejected along with malformed ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the placeholder is empty or the format is unusable.
    pub fn validate(&self) -> Result<()> {
        if self.date_placeholder.trim().is_empty() {
            return Err(Error::config_validation(
                "display.date_placeholder must not be empty",
            ));
        }

        if self.date_format.trim().is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(Error::config_validation(format!(
                "invalid date format: {}",
                self.date_format
            )));
        }

        let probe = NaiveDate::from_ymd_opt(1969, 7, 16).unwrap_or_default();
        let mut rendered = String::new();
        if write!(rendered, "{}", probe.format(&self.date_format)).is_err() {
            return Err(Error::config_validation(format!(
                "date format '{}' needs more than a calendar date",
                self.date_format
            )));
        }

        Ok(())
    }
}
