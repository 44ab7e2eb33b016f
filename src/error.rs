use thiserror::Error;

/// Reasons a holiday record breaks the data contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid country code {0:?}: expected two uppercase letters")]
    InvalidCountryCode(String),

    #[error("unknown holiday type {0:?}: expected \"Public\" or \"Optional\"")]
    UnknownHolidayType(String),

    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("holiday must have at least one type")]
    EmptyTypes,

    #[error("holiday field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("launch year must be positive")]
    InvalidLaunchYear,
}
