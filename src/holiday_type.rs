use std::str::FromStr;
use core::fmt::Display;

use serde::{
    Serialize,
    Deserialize,
};

use crate::ValidationError;

/// Classification tag of a holiday. The set is closed: anything other than
/// these two strings is rejected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum HolidayType{
    /// Statutory, legally recognized holiday
    Public,
    /// Discretionary observance
    Optional,
}

impl HolidayType{
    #[must_use] pub fn as_str(self) -> &'static str {
        match self{
            HolidayType::Public   => "Public",
            HolidayType::Optional => "Optional",
        }
    }
}

impl FromStr for HolidayType{
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s{
            "Public"   => Ok(HolidayType::Public),
            "Optional" => Ok(HolidayType::Optional),
            other      => Err(ValidationError::UnknownHolidayType(other.into())),
        }
    }
}

impl TryFrom<String> for HolidayType{
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HolidayType::from_str(&value)
    }
}

impl From<HolidayType> for &'static str{
    fn from(value: HolidayType) -> Self {
        value.as_str()
    }
}

impl Display for HolidayType{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
