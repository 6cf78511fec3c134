use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    CIVIL_EPOCH_SHIFT, DATE_SEPARATOR, DAYS_PER_GREGORIAN_CYCLE, DECEMBER, JANUARY, MAX_YEAR,
    MIN_DAY, MIN_YEAR, MONTHS_PER_YEAR, UNIX_EPOCH_ORDINAL, WEEK_MARKER,
};
use crate::prelude::*;
use crate::types::{Day, Month, Weekday, Year, days_in_month};
use crate::{CalendarRange, Error, IsoWeekDate, ParseError, RangeError};

/// A concrete proleptic Gregorian date between 0001-01-01 and 9999-12-31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct Date {
    year:  Year,
    month: Month,
    day:   Day,
}

impl Date {
    /// 0001-01-01
    pub const MIN: Self = Self::from_parts_unchecked(MIN_YEAR, JANUARY, MIN_DAY);
    /// 9999-12-31
    pub const MAX: Self = Self::from_parts_unchecked(MAX_YEAR, DECEMBER, 31);

    /// Creates a date from raw components.
    ///
    /// # Errors
    /// Returns `ParseError` if any component is invalid for the calendar.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from already validated components
    pub const fn from_parts(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    const fn from_parts_unchecked(year: u16, month: u8, day: u8) -> Self {
        Self {
            year:  Year::new_unchecked(year),
            month: Month::new_unchecked(month),
            day:   Day::new_unchecked(day),
        }
    }

    /// Returns the year component
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day-of-month component
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the Year type
    pub const fn year_typed(&self) -> Year {
        self.year
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Returns the Day type
    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Days since 0001-01-01.
    pub const fn ordinal(&self) -> i32 {
        days_from_civil(self.year.get(), self.month.get(), self.day.get()) + UNIX_EPOCH_ORDINAL
    }

    /// Creates a date from its day ordinal (days since 0001-01-01).
    ///
    /// # Errors
    /// Returns `RangeError::DateOutOfRange` outside the calendar range.
    pub fn from_ordinal(ordinal: i64) -> Result<Self, RangeError> {
        let ordinal = CalendarRange::check_ordinal(ordinal)?;
        let (year, month, day) = civil_from_days(ordinal - UNIX_EPOCH_ORDINAL);
        Ok(Self::from_parts_unchecked(year, month, day))
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::from_ordinal(self.ordinal())
    }

    /// 1-based day of the year
    pub const fn day_of_year(&self) -> u16 {
        let jan_first = days_from_civil(self.year.get(), JANUARY, MIN_DAY);
        // At most 366.
        (days_from_civil(self.year.get(), self.month.get(), self.day.get()) - jan_first + 1) as u16
    }

    /// Signed number of days from `self` to `other`
    pub const fn days_until(&self, other: Self) -> i32 {
        other.ordinal() - self.ordinal()
    }

    /// Adds a signed number of days.
    ///
    /// # Errors
    /// Returns `RangeError::DateOutOfRange` if the result leaves the calendar range.
    pub fn checked_add_days(self, days: i64) -> Result<Self, RangeError> {
        let ordinal = i64::from(self.ordinal()).checked_add(days).ok_or(RangeError::DateOutOfRange)?;
        Self::from_ordinal(ordinal)
    }

    /// Adds a signed number of months, clamping the day to the end of the
    /// target month when that month is shorter.
    ///
    /// # Errors
    /// Returns `RangeError::DateOutOfRange` if the result leaves the calendar range.
    pub fn checked_add_months(self, months: i64) -> Result<Self, RangeError> {
        if months == 0 {
            return Ok(self);
        }

        let index = i64::from(self.year.get()) * i64::from(MONTHS_PER_YEAR) + i64::from(self.month.get() - 1);
        let target = index.checked_add(months).ok_or(RangeError::DateOutOfRange)?;
        let year = Year::from_i64(target.div_euclid(i64::from(MONTHS_PER_YEAR))).ok_or_else(|| {
            debug!("adding {months} months to {self} leaves the calendar range");
            RangeError::DateOutOfRange
        })?;
        // rem_euclid yields 0..12
        let month = Month::new_unchecked(target.rem_euclid(i64::from(MONTHS_PER_YEAR)) as u8 + 1);
        let day = if self.day.get() > days_in_month(year.get(), month.get()) {
            Day::last_of(year, month)
        } else {
            self.day
        };
        Ok(Self { year, month, day })
    }

    /// Renders this date as an ISO week date
    pub fn to_iso_week_date(self) -> IsoWeekDate {
        IsoWeekDate::from(self)
    }

    fn parse_component<T: FromStr>(s: &str) -> Result<T, ParseError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        s.parse::<T>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_iso_date(s: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = s.split(DATE_SEPARATOR).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD: {s}"
            )));
        }
        let year = Self::parse_component::<u16>(parts[0])?;
        let month = Self::parse_component::<u8>(parts[1])?;
        let day = Self::parse_component::<u8>(parts[2])?;
        Self::new(year, month, day)
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::MIN
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parses `YYYY-MM-DD`, or the ISO week date form `YYYY-Www-D`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }
        let is_week_date = trimmed
            .split(DATE_SEPARATOR)
            .nth(1)
            .is_some_and(|part| part.starts_with([WEEK_MARKER, WEEK_MARKER.to_ascii_lowercase()]));
        if is_week_date {
            return Ok(trimmed.parse::<IsoWeekDate>()?.date());
        }
        Ok(Self::parse_iso_date(trimmed)?)
    }
}

impl From<IsoWeekDate> for Date {
    fn from(week_date: IsoWeekDate) -> Self {
        week_date.date()
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Civil day number conversions, counted from 1970-01-01. Years are shifted
// to start on March 1st so the leap day is the last day of the shifted year.

const fn days_from_civil(year: u16, month: u8, day: u8) -> i32 {
    let month = month as i32;
    let year = if month <= 2 { year as i32 - 1 } else { year as i32 };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day as i32 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_GREGORIAN_CYCLE + day_of_era - CIVIL_EPOCH_SHIFT
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn civil_from_days(days: i32) -> (u16, u8, u8) {
    let shifted = days + CIVIL_EPOCH_SHIFT;
    let era = shifted.div_euclid(DAYS_PER_GREGORIAN_CYCLE);
    let day_of_era = shifted - era * DAYS_PER_GREGORIAN_CYCLE;
    let year_of_era = (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 { shifted_month + 3 } else { shifted_month - 9 };
    let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };
    (year as u16, month as u8, day as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_new_validates() {
        assert!(Date::new(2024, 2, 29).is_ok());
        assert!(matches!(Date::new(2023, 2, 29), Err(ParseError::InvalidDay { .. })));
        assert!(matches!(Date::new(0, 1, 1), Err(ParseError::InvalidYear(0))));
        assert!(matches!(Date::new(2023, 13, 1), Err(ParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(Date::MIN, date(1, 1, 1));
        assert_eq!(Date::MAX, date(9999, 12, 31));
        assert_eq!(Date::MIN.ordinal(), 0);
        assert_eq!(Date::MAX.ordinal(), 3_652_058);
        assert_eq!(Date::default(), Date::MIN);
    }

    #[test]
    fn test_ordinal_round_trip() {
        for d in [
            date(1, 1, 1),
            date(1, 3, 1),
            date(1600, 2, 29),
            date(1970, 1, 1),
            date(1999, 12, 31),
            date(2000, 2, 29),
            date(2000, 3, 1),
            date(9999, 12, 31),
        ] {
            assert_eq!(Date::from_ordinal(i64::from(d.ordinal())).unwrap(), d, "{d}");
        }
        assert_eq!(date(1970, 1, 1).ordinal(), 719_162);
        assert!(Date::from_ordinal(-1).is_err());
        assert!(Date::from_ordinal(3_652_059).is_err());
    }

    #[test]
    fn test_weekday() {
        assert_eq!(date(1, 1, 1).weekday(), Weekday::Monday);
        assert_eq!(date(1970, 1, 1).weekday(), Weekday::Thursday);
        assert_eq!(date(2000, 1, 1).weekday(), Weekday::Saturday);
        assert_eq!(date(2024, 10, 17).weekday(), Weekday::Thursday);
        assert_eq!(date(9999, 12, 31).weekday(), Weekday::Friday);
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(date(2023, 1, 1).day_of_year(), 1);
        assert_eq!(date(2023, 12, 31).day_of_year(), 365);
        assert_eq!(date(2024, 12, 31).day_of_year(), 366);
        assert_eq!(date(2024, 3, 1).day_of_year(), 61);
    }

    #[test]
    fn test_checked_add_days() {
        assert_eq!(date(1999, 1, 30).checked_add_days(-1).unwrap(), date(1999, 1, 29));
        assert_eq!(date(1999, 12, 31).checked_add_days(1).unwrap(), date(2000, 1, 1));
        assert_eq!(date(2000, 2, 28).checked_add_days(1).unwrap(), date(2000, 2, 29));
        assert_eq!(Date::MAX.checked_add_days(1), Err(RangeError::DateOutOfRange));
        assert_eq!(Date::MIN.checked_add_days(-1), Err(RangeError::DateOutOfRange));
        assert_eq!(Date::MIN.checked_add_days(i64::MAX), Err(RangeError::DateOutOfRange));
    }

    #[test]
    fn test_checked_add_months_clamps() {
        struct TestCase {
            start:    Date,
            months:   i64,
            expected: Date,
        }

        let cases = [
            TestCase {
                start:    date(1999, 1, 30),
                months:   1,
                expected: date(1999, 2, 28),
            },
            TestCase {
                start:    date(2000, 1, 31),
                months:   1,
                expected: date(2000, 2, 29),
            },
            TestCase {
                start:    date(2000, 3, 31),
                months:   -1,
                expected: date(2000, 2, 29),
            },
            TestCase {
                start:    date(2000, 5, 31),
                months:   -13,
                expected: date(1999, 4, 30),
            },
            TestCase {
                start:    date(2019, 12, 15),
                months:   1,
                expected: date(2020, 1, 15),
            },
            TestCase {
                start:    date(2020, 1, 15),
                months:   -1,
                expected: date(2019, 12, 15),
            },
        ];

        for case in &cases {
            assert_eq!(
                case.start.checked_add_months(case.months).unwrap(),
                case.expected,
                "{} + {} months",
                case.start,
                case.months
            );
        }
    }

    #[test]
    fn test_checked_add_months_out_of_range() {
        assert_eq!(Date::MAX.checked_add_months(1), Err(RangeError::DateOutOfRange));
        assert_eq!(Date::MIN.checked_add_months(-1), Err(RangeError::DateOutOfRange));
        assert_eq!(Date::MIN.checked_add_months(119_987).unwrap(), date(9999, 12, 1));
    }

    #[test]
    fn test_parse_and_display() {
        let d: Date = "1991-08-15".parse().unwrap();
        assert_eq!(d, date(1991, 8, 15));
        assert_eq!(d.to_string(), "1991-08-15");
        assert_eq!(date(33, 1, 2).to_string(), "0033-01-02");

        assert_eq!(" 2024-02-29 ".parse::<Date>().unwrap(), date(2024, 2, 29));
        assert!("2023-02-29".parse::<Date>().is_err());
        assert!("2023-02".parse::<Date>().is_err());
        assert!("2023-+2-01".parse::<Date>().is_err());
        assert_eq!("".parse::<Date>(), Err(Error::Parse(ParseError::EmptyInput)));
    }

    #[test]
    fn test_parse_week_date_form() {
        assert_eq!("2009-W53-7".parse::<Date>().unwrap(), date(2010, 1, 3));
        assert_eq!("2008-w01-1".parse::<Date>().unwrap(), date(2007, 12, 31));
        assert!("2000-W53-7".parse::<Date>().is_err());
    }

    #[test]
    fn test_serde() {
        let d = date(2024, 2, 29);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#""2024-02-29""#);
        assert_eq!(serde_json::from_str::<Date>(&json).unwrap(), d);
        assert!(serde_json::from_str::<Date>(r#""2023-02-29""#).is_err());
    }
}
