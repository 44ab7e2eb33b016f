use chrono::{
    NaiveDate,
    Datelike,
    Weekday,
};

use crate::{
    HolidayType,
    PublicHoliday,
};

/// Iterates over every date from `next` up to and including `last`
pub struct DateIterator{
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl DateIterator{
    #[must_use] pub fn new(start: NaiveDate, end: NaiveDate) -> Self{
        DateIterator{
            next: Some(start),
            last: end,
        }
    }
}

impl Iterator for DateIterator{
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.filter(|d| *d <= self.last)?;
        self.next = current.succ_opt();
        Some(current)
    }
}

/// A set of holidays, kept sorted by date
#[derive(Clone, Default, Debug)]
pub struct HolidayCalendar{
    holidays: Vec<PublicHoliday>,
}

impl HolidayCalendar{
    #[must_use] pub fn new(mut holidays: Vec<PublicHoliday>) -> Self{
        holidays.sort_by_key(PublicHoliday::date);
        HolidayCalendar{ holidays }
    }

    #[must_use] pub fn holidays(&self) -> &[PublicHoliday] {
        &self.holidays
    }

    #[must_use] pub fn len(&self) -> usize {
        self.holidays.len()
    }

    #[must_use] pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Every holiday falling on the date, of any type and in any subdivision
    pub fn holidays_on(&self, date: NaiveDate) -> impl Iterator<Item = &PublicHoliday> + '_ {
        self.holidays.iter().filter(move |h| h.date() == date)
    }

    pub fn for_subdivision<'a>(&'a self, subdivision: &'a str) -> impl Iterator<Item = &'a PublicHoliday> + 'a {
        self.holidays.iter().filter(move |h| h.applies_to(subdivision))
    }

    pub fn of_type(&self, holiday_type: HolidayType) -> impl Iterator<Item = &PublicHoliday> + '_ {
        self.holidays.iter().filter(move |h| h.types().contains(&holiday_type))
    }

    /// The first holiday strictly after the date
    #[must_use] pub fn next_after(&self, date: NaiveDate) -> Option<&PublicHoliday> {
        self.holidays.iter().find(|h| h.date() > date)
    }

    /// Whether a public (not merely optional) holiday is observed in the
    /// subdivision on the date
    #[must_use] pub fn is_holiday(&self, date: NaiveDate, subdivision: &str) -> bool {
        self.holidays_on(date)
            .any(|h| h.is_public() && h.applies_to(subdivision))
    }

    /// Dates of the public holidays observed in the subdivision, without duplicates
    #[must_use] pub fn days_off(&self, subdivision: &str) -> Vec<NaiveDate> {
        let mut days: Vec<NaiveDate> = self.for_subdivision(subdivision)
            .filter(|h| h.is_public())
            .map(PublicHoliday::date)
            .collect();
        days.dedup();
        days
    }

    #[must_use] pub fn is_work_day(&self, date: NaiveDate, subdivision: &str) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
            && !self.is_holiday(date, subdivision)
    }

    /// Counts the work days between two dates, including both ends
    #[must_use] pub fn work_days_between(&self, start: NaiveDate, end: NaiveDate, subdivision: &str) -> usize {
        DateIterator::new(start, end)
            .filter(|d| self.is_work_day(*d, subdivision))
            .count()
    }
}
