use chrono::{
    NaiveDate,
    Datelike,
};

use serde::{
    Serialize,
    Deserialize,
};

use crate::{
    CountryCode,
    HolidayType,
    ValidationError,
    utils::{format_date, is_four_digit_year, parse_date},
};

/// One public holiday occurrence for a country and date, in the shape the
/// holiday API returns it.
///
/// Values are validated when constructed or deserialized and are read-only
/// afterwards.
#[derive(Clone, PartialEq, Eq, Debug)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPublicHoliday")]
pub struct PublicHoliday{
    date:         NaiveDate,
    local_name:   String,
    name:         String,
    country_code: CountryCode,
    fixed:        bool,
    global:       bool,
    counties:     Option<Vec<String>>,
    launch_year:  Option<u32>,
    types:        Vec<HolidayType>,
}

/// Unchecked wire form, only used as the deserialization target
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPublicHoliday{
    date:         String,
    local_name:   String,
    name:         String,
    country_code: CountryCode,
    fixed:        bool,
    global:       bool,
    #[serde(default)]
    counties:     Option<Vec<String>>,
    #[serde(default)]
    launch_year:  Option<u32>,
    types:        Vec<HolidayType>,
}

impl TryFrom<RawPublicHoliday> for PublicHoliday{
    type Error = ValidationError;

    fn try_from(raw: RawPublicHoliday) -> Result<Self, Self::Error> {
        let holiday = PublicHoliday{
            date:         parse_date(&raw.date)?,
            local_name:   raw.local_name,
            name:         raw.name,
            country_code: raw.country_code,
            fixed:        raw.fixed,
            global:       raw.global,
            counties:     raw.counties,
            launch_year:  raw.launch_year,
            types:        raw.types,
        };
        holiday.validate()?;
        Ok(holiday)
    }
}

impl PublicHoliday{
    /// Creates a nationwide, movable holiday with no launch year
    ///
    /// # Errors
    /// Returns an error if either name is empty, `types` is empty or the
    /// date's year does not have four digits
    pub fn new(
        date: NaiveDate,
        local_name: impl Into<String>,
        name: impl Into<String>,
        country_code: CountryCode,
        types: Vec<HolidayType>,
    ) -> Result<Self, ValidationError> {
        let holiday = PublicHoliday{
            date,
            local_name: local_name.into(),
            name: name.into(),
            country_code,
            fixed: false,
            global: true,
            counties: None,
            launch_year: None,
            types,
        };
        holiday.validate()?;
        Ok(holiday)
    }

    #[must_use] pub fn fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    #[must_use] pub fn global(mut self, global: bool) -> Self {
        self.global = global;
        self
    }

    #[must_use] pub fn counties(mut self, counties: Option<Vec<String>>) -> Self {
        self.counties = counties;
        self
    }

    /// # Errors
    /// Returns an error for a launch year of zero
    pub fn with_launch_year(mut self, launch_year: Option<u32>) -> Result<Self, ValidationError> {
        self.launch_year = launch_year;
        self.validate()?;
        Ok(self)
    }

    /// Checks every field rule of the record
    ///
    /// # Errors
    /// Returns the first rule the record breaks
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_four_digit_year(self.date) {
            return Err(ValidationError::InvalidDate(format_date(self.date)));
        }
        if self.local_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("localName"));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if self.types.is_empty() {
            return Err(ValidationError::EmptyTypes);
        }
        if self.launch_year == Some(0) {
            return Err(ValidationError::InvalidLaunchYear);
        }
        Ok(())
    }

    #[must_use] pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use] pub fn local_name(&self) -> &str {
        &self.local_name
    }

    #[must_use] pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use] pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    #[must_use] pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[must_use] pub fn is_global(&self) -> bool {
        self.global
    }

    /// The subdivisions as they were received, regardless of `global`
    #[must_use] pub fn raw_counties(&self) -> Option<&[String]> {
        self.counties.as_deref()
    }

    /// The subdivisions the holiday is restricted to. Always `None` for a
    /// global holiday, whatever the producer sent.
    #[must_use] pub fn effective_counties(&self) -> Option<&[String]> {
        if self.global {
            None
        } else {
            self.raw_counties()
        }
    }

    #[must_use] pub fn launch_year(&self) -> Option<u32> {
        self.launch_year
    }

    #[must_use] pub fn types(&self) -> &[HolidayType] {
        &self.types
    }

    #[must_use] pub fn year(&self) -> i32 {
        self.date.year()
    }

    #[must_use] pub fn is_public(&self) -> bool {
        self.types.contains(&HolidayType::Public)
    }

    #[must_use] pub fn is_optional(&self) -> bool {
        self.types.contains(&HolidayType::Optional)
    }

    /// Whether the holiday is observed in the given subdivision
    #[must_use] pub fn applies_to(&self, subdivision: &str) -> bool {
        match self.effective_counties() {
            None => true,
            Some(counties) => counties.iter().any(|c| c == subdivision),
        }
    }
}

#[allow(clippy::zero_prefixed_literal)]
#[cfg(test)]
mod tests{
    use serde_json::{json, Value};

    use super::*;

    fn christmas() -> PublicHoliday {
        PublicHoliday::new(
            NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
            "Christmas Day",
            "Christmas Day",
            "US".parse().unwrap(),
            vec![HolidayType::Public],
        )
            .unwrap()
            .fixed(true)
    }

    fn round_trip(holiday: &PublicHoliday) -> PublicHoliday {
        serde_json::from_str(&serde_json::to_string(holiday).unwrap()).unwrap()
    }

    #[test]
    fn test_christmas_round_trip(){
        let holiday = christmas();

        let value = serde_json::to_value(&holiday).unwrap();
        assert_eq!(value, json!({
            "date": "2024-12-25",
            "localName": "Christmas Day",
            "name": "Christmas Day",
            "countryCode": "US",
            "fixed": true,
            "global": true,
            "counties": null,
            "launchYear": null,
            "types": ["Public"],
        }));

        assert_eq!(round_trip(&holiday), holiday);
    }

    #[test]
    fn test_counties_keep_order(){
        let holiday = christmas()
            .global(false)
            .counties(Some(vec!["CA".into(), "NY".into()]));

        let back = round_trip(&holiday);
        assert_eq!(back.raw_counties(), Some(&["CA".to_string(), "NY".to_string()][..]));
        assert!(!back.is_global());
    }

    #[test]
    fn test_types_keep_order(){
        let json = r#"{
            "date": "2024-11-11",
            "localName": "Veterans Day",
            "name": "Veterans Day",
            "countryCode": "US",
            "fixed": false,
            "global": true,
            "counties": null,
            "launchYear": null,
            "types": ["Public", "Optional"]
        }"#;

        let holiday: PublicHoliday = serde_json::from_str(json).unwrap();
        assert_eq!(holiday.types(), &[HolidayType::Public, HolidayType::Optional]);
        assert_eq!(round_trip(&holiday).types(), &[HolidayType::Public, HolidayType::Optional]);
    }

    #[test]
    fn test_unknown_type_is_rejected(){
        let mut value = serde_json::to_value(christmas()).unwrap();
        value["types"] = json!(["Public", "Bank"]);
        assert!(serde_json::from_value::<PublicHoliday>(value).is_err());
    }

    #[test]
    fn test_launch_year_is_an_integer(){
        let holiday = christmas().with_launch_year(Some(1776)).unwrap();
        let value = serde_json::to_value(&holiday).unwrap();
        assert_eq!(value["launchYear"], json!(1776));
        assert_eq!(round_trip(&holiday).launch_year(), Some(1776));

        let value = serde_json::to_value(christmas()).unwrap();
        assert_eq!(value["launchYear"], Value::Null);
        assert_eq!(round_trip(&christmas()).launch_year(), None);

        let mut value = serde_json::to_value(christmas()).unwrap();
        value["launchYear"] = json!("1776");
        assert!(serde_json::from_value::<PublicHoliday>(value).is_err());
    }

    #[test]
    fn test_zero_launch_year_is_rejected(){
        assert_eq!(christmas().with_launch_year(Some(0)), Err(ValidationError::InvalidLaunchYear));

        let mut value = serde_json::to_value(christmas()).unwrap();
        value["launchYear"] = json!(0);
        assert!(serde_json::from_value::<PublicHoliday>(value).is_err());
    }

    #[test]
    fn test_missing_optional_fields_are_none(){
        let mut value = serde_json::to_value(christmas()).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("counties");
        object.remove("launchYear");

        let holiday: PublicHoliday = serde_json::from_value(value).unwrap();
        assert_eq!(holiday.raw_counties(), None);
        assert_eq!(holiday.launch_year(), None);
    }

    #[test]
    fn test_bad_country_codes_are_rejected(){
        for code in ["us", "USA"]{
            let mut value = serde_json::to_value(christmas()).unwrap();
            value["countryCode"] = json!(code);
            assert!(serde_json::from_value::<PublicHoliday>(value).is_err());
        }
    }

    #[test]
    fn test_bad_dates_are_rejected(){
        for date in [
            "2024-02-30", "2024-13-01", "25/12/2024", "",
            "2024-1-5", " 2024-12-25", "2024-12-25 ", "+2024-12-25",
        ]{
            let mut value = serde_json::to_value(christmas()).unwrap();
            value["date"] = json!(date);
            assert!(serde_json::from_value::<PublicHoliday>(value).is_err());
        }
    }

    #[test]
    fn test_dates_need_four_digit_years(){
        let far = NaiveDate::from_ymd_opt(10000, 01, 01).unwrap();
        assert_eq!(
            PublicHoliday::new(far, "New Year", "New Year", "US".parse().unwrap(), vec![HolidayType::Public]),
            Err(ValidationError::InvalidDate("+10000-01-01".into()))
        );
    }

    #[test]
    fn test_empty_fields_are_rejected(){
        let date = NaiveDate::from_ymd_opt(2024, 07, 04).unwrap();
        let us: CountryCode = "US".parse().unwrap();

        assert_eq!(
            PublicHoliday::new(date, "", "Independence Day", us.clone(), vec![HolidayType::Public]),
            Err(ValidationError::EmptyField("localName"))
        );
        assert_eq!(
            PublicHoliday::new(date, "Independence Day", " ", us.clone(), vec![HolidayType::Public]),
            Err(ValidationError::EmptyField("name"))
        );
        assert_eq!(
            PublicHoliday::new(date, "Independence Day", "Independence Day", us, vec![]),
            Err(ValidationError::EmptyTypes)
        );

        let mut value = serde_json::to_value(christmas()).unwrap();
        value["types"] = json!([]);
        assert!(serde_json::from_value::<PublicHoliday>(value).is_err());
    }

    #[test]
    fn test_global_ignores_counties(){
        let holiday = christmas().counties(Some(vec!["CA".into()]));
        assert_eq!(holiday.effective_counties(), None);
        assert!(holiday.applies_to("TX"));

        let regional = holiday.global(false);
        assert_eq!(regional.effective_counties(), Some(&["CA".to_string()][..]));
        assert!(regional.applies_to("CA"));
        assert!(!regional.applies_to("TX"));
    }

    #[test]
    fn test_tags(){
        let holiday = christmas();
        assert!(holiday.is_public());
        assert!(!holiday.is_optional());
        assert_eq!(holiday.year(), 2024);
    }
}
