use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    CountryCode,
    HolidayClient,
    HolidayStore,
    client::DEFAULT_BASE_URL,
};

pub const API_URL_VAR: &str = "HOLIDAYS_API_URL";
pub const DATABASE_VAR: &str = "HOLIDAYS_DATABASE";
pub const COUNTRY_VAR: &str = "HOLIDAYS_COUNTRY";
pub const SUBDIVISION_VAR: &str = "HOLIDAYS_SUBDIVISION";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config{
    pub api_base_url:  String,
    pub database_path: PathBuf,
    pub country:       CountryCode,
    /// Subdivision whose days off are of interest, e.g. `CA-BC`
    pub subdivision:   Option<String>,
}

impl Default for Config{
    fn default() -> Self {
        Config{
            api_base_url:  DEFAULT_BASE_URL.into(),
            database_path: "holidays.db".into(),
            country:       CountryCode::from_static("CA"),
            subdivision:   None,
        }
    }
}

impl Config{
    /// Reads the `HOLIDAYS_*` environment variables, falling back to defaults
    ///
    /// # Errors
    /// Returns an error if `HOLIDAYS_COUNTRY` is not a valid country code
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    /// Returns an error if the country is not a valid country code
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let country = match lookup(COUNTRY_VAR) {
            Some(code) => code.parse::<CountryCode>().with_context(|| format!("{COUNTRY_VAR} is invalid"))?,
            None => defaults.country,
        };

        Ok(Config{
            api_base_url:  lookup(API_URL_VAR).unwrap_or(defaults.api_base_url),
            database_path: lookup(DATABASE_VAR).map_or(defaults.database_path, PathBuf::from),
            country,
            subdivision:   lookup(SUBDIVISION_VAR).filter(|s| !s.is_empty()),
        })
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be initialized
    pub fn client(&self) -> Result<HolidayClient> {
        HolidayClient::with_base_url(&self.api_base_url)
    }

    /// Opens the configured database, creating it if it does not exist yet
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or created
    pub fn open_store(&self) -> Result<HolidayStore> {
        if self.database_path.exists() {
            HolidayStore::new(&self.database_path)
        } else {
            HolidayStore::create_new_database(&self.database_path)
        }
    }
}
