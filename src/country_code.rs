use std::str::FromStr;
use core::fmt::Display;

use serde::{
    Serialize,
    Deserialize,
};

use crate::ValidationError;

/// ISO 3166-1 alpha-2 country code, e.g. `US`
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode{
    #[must_use] pub fn as_str(&self) -> &str {
        &self.0
    }

    /// For codes known to be valid at compile time
    pub(crate) fn from_static(code: &'static str) -> Self {
        debug_assert!(CountryCode::is_valid(code));
        CountryCode(code.into())
    }

    fn is_valid(code: &str) -> bool {
        code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
    }
}

impl FromStr for CountryCode{
    type Err = ValidationError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        if CountryCode::is_valid(code) {
            Ok(CountryCode(code.into()))
        } else {
            Err(ValidationError::InvalidCountryCode(code.into()))
        }
    }
}

impl TryFrom<String> for CountryCode{
    type Error = ValidationError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        if CountryCode::is_valid(&code) {
            Ok(CountryCode(code))
        } else {
            Err(ValidationError::InvalidCountryCode(code))
        }
    }
}

impl From<CountryCode> for String{
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

impl AsRef<str> for CountryCode{
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for CountryCode{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
