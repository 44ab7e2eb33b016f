use std::fs::{File, OpenOptions,};
use std::path::Path;

use anyhow::{Context, Result};

use csv::Writer;

use log::info;

use crate::PublicHoliday;
use crate::utils::format_date;

const HEADER: [&str; 9] = [
    "Date",
    "Local Name",
    "Name",
    "Country",
    "Fixed",
    "Global",
    "Counties",
    "Launch Year",
    "Types",
];

#[derive(Debug)]
pub struct HolidaySheet {
    writer: Writer<File>,
}

impl HolidaySheet {
    /// Impure (writes to file)
    /// # Errors
    /// Returns an error if:
    /// 1. A file already exists at the passed path
    /// 2. A file cannot be created at the passed path, or
    /// 3. The headers cannot be writen to the opened file
    pub fn new_sheet(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .with_context(|| format!("Cannot create a holiday sheet at: {}", path.display()))?;

        let mut sheet = Self {writer: Writer::from_writer(file)};

        sheet.writer.write_record(HEADER)?;
        info!("Created holiday sheet at {}", path.display());

        Ok(sheet)
    }

    /// Impure (opens file)
    /// # Errors
    /// Returns an error if the path cannot be opened for writing
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            writer: Writer::from_writer(
                OpenOptions::new()
                    .append(true)
                    .open(path)?
            )
        })
    }

    /// Impure (writes to file)
    /// # Errors
    /// Returns an error if the holiday cannot be written to file
    pub fn write_holiday(&mut self, holiday: &PublicHoliday) -> Result<()> {
        let types: Vec<&str> = holiday.types().iter().map(|t| t.as_str()).collect();

        Ok(self.writer.write_record([
            format_date(holiday.date()),
            holiday.local_name().to_string(),
            holiday.name().to_string(),
            holiday.country_code().to_string(),
            holiday.is_fixed().to_string(),
            holiday.is_global().to_string(),
            holiday.raw_counties().map(|c| c.join(";")).unwrap_or_default(),
            holiday.launch_year().map(|y| y.to_string()).unwrap_or_default(),
            types.join(";"),
        ])?)
    }

    /// Impure (writes to file)
    /// # Errors
    /// Returns an error if buffered rows cannot be written
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.writer.flush()?)
    }
}
