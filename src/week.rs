use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DATE_SEPARATOR, DAYS_PER_WEEK, JANUARY, WEEK_MARKER};
use crate::types::{Day, Month, Weekday, Year};
use crate::{Date, Error, ParseError};

/// A date in the ISO 8601 week calendar: ISO year, week 1..=53 and weekday.
///
/// Week 1 of an ISO year is the week (Monday to Sunday) that contains the
/// year's first Thursday, so the ISO year of a date near January 1st can
/// differ from its calendar year. The value is stored as the Gregorian
/// [`Date`] it denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct IsoWeekDate {
    date: Date,
}

impl IsoWeekDate {
    /// 0001-W01-1, which is 0001-01-01
    pub const MIN: Self = Self { date: Date::MIN };
    /// 9999-W52-5, which is 9999-12-31
    pub const MAX: Self = Self { date: Date::MAX };

    /// Creates a week date from its components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidWeek` for week 0, weeks above 53, and week
    /// 53 in years with 52 weeks; `RangeError::DateOutOfRange` when the date
    /// falls outside the calendar range.
    pub fn new(year: u16, week: u8, weekday: Weekday) -> Result<Self, Error> {
        let iso_year = Year::new(year)?;
        if week == 0 || week > weeks_in_year(iso_year) {
            return Err(ParseError::InvalidWeek { year, week }.into());
        }
        let offset = (i64::from(week) - 1) * i64::from(DAYS_PER_WEEK) + i64::from(weekday.number()) - 1;
        let ordinal = i64::from(week_one_monday(iso_year)) + offset;
        Ok(Self {
            date: Date::from_ordinal(ordinal)?,
        })
    }

    /// The ISO year, which differs from the calendar year for some dates in
    /// the first and last week of a year
    pub fn year(&self) -> u16 {
        self.thursday().year()
    }

    /// Week of the ISO year, 1..=53
    pub fn week(&self) -> u8 {
        let thursday = self.thursday();
        // day_of_year is at most 366, so the week is at most 53.
        ((thursday.day_of_year() - 1) / DAYS_PER_WEEK as u16 + 1) as u8
    }

    /// Day of the week, Monday = 1
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// The Gregorian date
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Formats the week date. `"w"` writes a two-digit week (`2009-W05-3`),
    /// `"W"` writes the week without padding (`2009-W5-3`); `""` is `"w"`.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownFormat` for any other format string.
    pub fn format_with(&self, format: &str) -> Result<String, ParseError> {
        let (year, week, weekday) = (self.year(), self.week(), self.weekday().number());
        match format {
            "" | "w" => Ok(format!("{year:04}-{WEEK_MARKER}{week:02}-{weekday}")),
            "W" => Ok(format!("{year:04}-{WEEK_MARKER}{week}-{weekday}")),
            other => Err(ParseError::UnknownFormat(other.to_owned())),
        }
    }

    /// Thursday of the same ISO week; its calendar year is the ISO year.
    fn thursday(&self) -> Date {
        let offset = i64::from(Weekday::Thursday.number()) - i64::from(self.weekday().number());
        // Days before Thursday in week 1 of year 1, and after it in the last
        // week of 9999, are still inside the calendar.
        self.date.checked_add_days(offset).unwrap_or(self.date)
    }
}

/// Number of ISO weeks in a year: 53 when January 1st is a Thursday, or a
/// Wednesday in a leap year; 52 otherwise.
pub fn weeks_in_year(year: Year) -> u8 {
    let jan_first = Date::from_parts(year, Month::new_unchecked(JANUARY), Day::new_unchecked(1));
    match jan_first.weekday() {
        Weekday::Thursday => 53,
        Weekday::Wednesday if year.is_leap() => 53,
        _ => 52,
    }
}

/// Ordinal of the Monday of ISO week 1, the week containing January 4th.
fn week_one_monday(year: Year) -> i32 {
    let jan_fourth = Date::from_parts(year, Month::new_unchecked(JANUARY), Day::new_unchecked(4));
    jan_fourth.ordinal() - i32::from(jan_fourth.weekday().number()) + 1
}

impl From<Date> for IsoWeekDate {
    fn from(date: Date) -> Self {
        Self { date }
    }
}

impl fmt::Display for IsoWeekDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{WEEK_MARKER}{:02}-{}",
            self.year(),
            self.week(),
            self.weekday().number()
        )
    }
}

impl FromStr for IsoWeekDate {
    type Err = Error;

    /// Parses `YYYY-Www-D`; the `W` is optional and case-insensitive, and the
    /// week may have one or two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }
        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, week, weekday] = parts[..] else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}{WEEK_MARKER}ww{DATE_SEPARATOR}D: {s}"
            ))
            .into());
        };
        let week = week
            .strip_prefix([WEEK_MARKER, WEEK_MARKER.to_ascii_lowercase()])
            .unwrap_or(week);

        let year = parse_digits::<u16>(year, 4)?;
        let week = parse_digits::<u8>(week, 2)?;
        let weekday = Weekday::from_number(parse_digits::<u8>(weekday, 1)?)?;
        Self::new(year, week, weekday)
    }
}

fn parse_digits<T: FromStr>(s: &str, max_len: usize) -> Result<T, ParseError> {
    if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(s.to_owned()));
    }
    s.parse::<T>().map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

impl Serialize for IsoWeekDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IsoWeekDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
