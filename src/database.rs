use std::path::Path;

use anyhow::{
    anyhow,
    Result,
};

use tokio::runtime::Runtime;

use sqlx::sqlite::{
    SqlitePool,
    SqliteRow,
    SqliteConnectOptions,
};
use sqlx::{
    Row,
    ConnectOptions,
};

use chrono::NaiveDate;

use log::{debug, info};

use crate::{
    CountryCode,
    HolidayCalendar,
    HolidayClient,
    HolidayType,
    PublicHoliday,
    utils::{format_date, is_four_digit_year, parse_date},
};

const SCHEMA: &str = include_str!("../resources/schema.sql");

impl TryFrom<SqliteRow> for PublicHoliday{
    type Error = anyhow::Error;

    fn try_from(row: SqliteRow) -> Result<Self, Self::Error> {
        let counties = row.try_get::<Option<String>, &str>("Counties")?
            .map(|c| serde_json::from_str::<Vec<String>>(&c))
            .transpose()?;
        let types = serde_json::from_str::<Vec<HolidayType>>(&row.try_get::<String, &str>("Types")?)?;

        Ok(PublicHoliday::new(
            parse_date(&row.try_get::<String, &str>("Date")?)?,
            row.try_get::<String, &str>("LocalName")?,
            row.try_get::<String, &str>("Name")?,
            row.try_get::<String, &str>("CountryCode")?.try_into()?,
            types,
        )?
            .fixed(row.try_get::<bool, &str>("Fixed")?)
            .global(row.try_get::<bool, &str>("Global")?)
            .counties(counties)
            .with_launch_year(row.try_get::<Option<u32>, &str>("LaunchYear")?)?)
    }
}

/// Local sqlite cache of fetched holidays
///
/// All methods block on an internal runtime, so they must not be called from
/// inside another async runtime.
pub struct HolidayStore{
    pool: SqlitePool,
    rt: Runtime,
}

impl HolidayStore{
    /// Opens an existing database
    ///
    /// # Errors
    /// Returns an error if the runtime cannot start or the database cannot be opened
    pub fn new(database_path: impl AsRef<Path>) -> Result<Self>{
        Self::connect(database_path.as_ref(), false)
    }

    /// Creates the database file if needed and sets up the schema
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or the schema cannot be applied
    pub fn create_new_database(database_path: impl AsRef<Path>) -> Result<Self>{
        let store = Self::connect(database_path.as_ref(), true)?;

        store.rt.block_on(async{
            sqlx::query(SCHEMA)
                .execute(&store.pool)
                .await
        })?;
        info!("Created holiday database at {}", database_path.as_ref().display());

        Ok(store)
    }

    fn connect(database_path: &Path, create: bool) -> Result<Self>{
        let rt = Runtime::new()?;
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(create)
            .disable_statement_logging();

        Ok(Self{
            pool: rt.block_on(SqlitePool::connect_with(options))?,
            rt,
        })
    }

    /// Stores the holidays, replacing any with the same country, date and name
    ///
    /// # Errors
    /// Returns an error if any row cannot be written; nothing is stored in that case
    pub fn insert_holidays(&self, holidays: &[PublicHoliday]) -> Result<()>{
        self.rt.block_on(async{
            let mut tx = self.pool.begin().await?;

            for holiday in holidays{
                let counties = holiday.raw_counties()
                    .map(serde_json::to_string)
                    .transpose()?;

                sqlx::query("
                    INSERT OR REPLACE INTO holidays
                        (
                            Date,
                            LocalName,
                            Name,
                            CountryCode,
                            Fixed,
                            Global,
                            Counties,
                            LaunchYear,
                            Types
                        )
                    VALUES
                        (
                            ?,
                            ?,
                            ?,
                            ?,
                            ?,
                            ?,
                            ?,
                            ?,
                            ?
                        )
                ")
                    .bind(format_date(holiday.date()))
                    .bind(holiday.local_name())
                    .bind(holiday.name())
                    .bind(holiday.country_code().as_str())
                    .bind(holiday.is_fixed())
                    .bind(holiday.is_global())
                    .bind(counties)
                    .bind(holiday.launch_year())
                    .bind(serde_json::to_string(holiday.types())?)
                    .execute(&mut *tx)
                    .await?;
            }

            tx.commit().await?;
            debug!("Stored {} holidays", holidays.len());
            Ok::<(), anyhow::Error>(())
        })
    }

    /// Holidays of a country in a year, ordered by date
    ///
    /// # Errors
    /// Returns an error if the query fails or a stored row is invalid
    pub fn get_holidays(&self, country: &CountryCode, year: i32) -> Result<Vec<PublicHoliday>>{
        let (first, last) = year_bounds(year)?;

        self.rt.block_on(async{
            sqlx::query("
                SELECT *
                FROM holidays
                WHERE CountryCode == ? AND Date >= ? AND Date <= ?
                ORDER BY Date, Name
            ")
                .bind(country.as_str())
                .bind(first)
                .bind(last)
                .fetch_all(&self.pool)
                .await
        })?
            .into_iter()
            .map(PublicHoliday::try_from)
            .collect()
    }

    /// # Errors
    /// Returns an error if the query fails
    pub fn has_holidays_for(&self, country: &CountryCode, year: i32) -> Result<bool>{
        let (first, last) = year_bounds(year)?;

        let count = self.rt.block_on(async{
            sqlx::query_scalar::<_, i64>("
                SELECT COUNT(*)
                FROM holidays
                WHERE CountryCode == ? AND Date >= ? AND Date <= ?
            ")
                .bind(country.as_str())
                .bind(first)
                .bind(last)
                .fetch_one(&self.pool)
                .await
        })?;

        Ok(count > 0)
    }

    /// Returns the number of holidays deleted
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn delete_holidays(&self, country: &CountryCode, year: i32) -> Result<u64>{
        let (first, last) = year_bounds(year)?;

        let result = self.rt.block_on(async{
            sqlx::query("
                DELETE
                FROM holidays
                WHERE CountryCode == ? AND Date >= ? AND Date <= ?
            ")
                .bind(country.as_str())
                .bind(first)
                .bind(last)
                .execute(&self.pool)
                .await
        })?;

        Ok(result.rows_affected())
    }

    /// Fetches and stores the holidays of a year unless they are already cached.
    /// Returns the number of holidays stored.
    ///
    /// # Errors
    /// Returns an error if fetching or storing fails
    pub fn try_update_holidays(&self, client: &HolidayClient, country: &CountryCode, year: i32) -> Result<usize>{
        if self.has_holidays_for(country, year)? {
            debug!("Holidays for {country} in {year} already cached");
            return Ok(0)
        }

        let holidays = self.rt.block_on(client.public_holidays(year, country))?;
        self.insert_holidays(&holidays)?;

        Ok(holidays.len())
    }

    /// Dates of the cached public holidays observed in the subdivision
    ///
    /// # Errors
    /// Returns an error if the holidays cannot be read
    pub fn get_days_off(&self, country: &CountryCode, year: i32, subdivision: &str) -> Result<Vec<NaiveDate>>{
        Ok(HolidayCalendar::new(self.get_holidays(country, year)?).days_off(subdivision))
    }
}

/// First and last day of the year as stored, i.e. in `YYYY-MM-DD` form
fn year_bounds(year: i32) -> Result<(String, String)> {
    let bounds = NaiveDate::from_ymd_opt(year, 1, 1)
        .zip(NaiveDate::from_ymd_opt(year, 12, 31))
        .filter(|(first, _)| is_four_digit_year(*first));

    match bounds {
        Some((first, last)) => Ok((format_date(first), format_date(last))),
        None => Err(anyhow!("Year {year} cannot be written as YYYY")),
    }
}
