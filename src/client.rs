use anyhow::{
    bail,
    Context,
    Result,
};

use futures::future::try_join_all;

use log::{debug, info};

use crate::{
    CountryCode,
    PublicHoliday,
};

pub const DEFAULT_BASE_URL: &str = "https://date.nager.at/api/v3";

/// Fetches holiday records from a public holiday REST API
#[derive(Clone, Debug)]
pub struct HolidayClient{
    http: reqwest::Client,
    base_url: String,
}

impl HolidayClient{
    /// # Errors
    /// Returns an error if the HTTP client cannot be initialized
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be initialized
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self{
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use] pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use] pub fn public_holidays_url(&self, year: i32, country: &CountryCode) -> String {
        format!("{}/PublicHolidays/{year}/{country}", self.base_url)
    }

    #[must_use] pub fn next_public_holidays_url(&self, country: &CountryCode) -> String {
        format!("{}/NextPublicHolidays/{country}", self.base_url)
    }

    /// All holidays of a country in a year
    ///
    /// # Errors
    /// Returns an error if the request fails, the server does not answer with
    /// a success status or any record in the body is invalid
    pub async fn public_holidays(&self, year: i32, country: &CountryCode) -> Result<Vec<PublicHoliday>> {
        let holidays = self.fetch(&self.public_holidays_url(year, country)).await?;
        info!("Fetched {} holidays for {country} in {year}", holidays.len());
        Ok(holidays)
    }

    /// Holidays of a country in the next 365 days
    ///
    /// # Errors
    /// See [`HolidayClient::public_holidays`]
    pub async fn next_public_holidays(&self, country: &CountryCode) -> Result<Vec<PublicHoliday>> {
        self.fetch(&self.next_public_holidays_url(country)).await
    }

    /// Fetches several years at once, returned in the order of `years`
    ///
    /// # Errors
    /// Fails if any single year fails
    pub async fn public_holidays_for_years(&self, years: &[i32], country: &CountryCode) -> Result<Vec<PublicHoliday>> {
        let per_year = try_join_all(
            years.iter().map(|year| self.public_holidays(*year, country))
        ).await?;

        Ok(per_year.into_iter().flatten().collect())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<PublicHoliday>> {
        debug!("GET {url}");

        let response = self.http.get(url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("{url} answered with status {status}");
        }

        parse_holidays(&response.text().await?)
    }
}

/// Parses an API response body, validating every record
///
/// # Errors
/// Returns an error if the body is not a JSON array of valid holidays
pub fn parse_holidays(body: &str) -> Result<Vec<PublicHoliday>> {
    serde_json::from_str(body).context("Response is not a list of valid holidays")
}
