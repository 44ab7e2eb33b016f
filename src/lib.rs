pub mod error;
pub use error::ValidationError;

pub mod holiday_type;
pub use holiday_type::HolidayType;

pub mod country_code;
pub use country_code::CountryCode;

pub mod holiday;
pub use holiday::PublicHoliday;

pub mod utils;

pub mod calendar;
pub use calendar::HolidayCalendar;

pub mod client;
pub use client::HolidayClient;

pub mod database;
pub use database::HolidayStore;

pub mod export;
pub use export::HolidaySheet;

pub mod config;
pub use config::Config;
