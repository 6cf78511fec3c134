//! Immutable calendar span value objects.
//!
//! - [`MonthSpan`]: a signed number of months.
//! - [`DateSpan`]: a signed (months, days) pair, ordered by approximate
//!   duration.
//! - [`IsoWeekDate`]: an ISO 8601 week date, convertible to and from [`Date`].
//!
//! Spans can be added to a [`Date`] or [`DateTime`] through [`CalendarAdd`],
//! with end-of-month clamping and a selectable [`AddOrder`]. Every value lives
//! inside the [`CalendarRange`] (0001-01-01 to 9999-12-31).
//!
//! Text conversions that depend on cultural conventions take an explicit
//! [`Locale`]; `Display` and `FromStr` use [`Locale::INVARIANT`].

#[macro_use]
mod logging;

mod calendar;
mod consts;
mod date;
mod date_span;
mod datetime;
mod grammar;
mod locale;
mod month_span;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;
mod value;
mod week;

pub use calendar::{AddOrder, CalendarAdd};
pub use consts::*;
pub use date::Date;
pub use date_span::DateSpan;
pub use datetime::{DateTime, Time};
pub use locale::Locale;
pub use month_span::MonthSpan;
pub use range::{CalendarRange, RangeError};
pub use types::{Day, Month, Weekday, Year, days_in_month, days_in_year, is_leap_year};
pub use value::SingleValueObject;
pub use week::{IsoWeekDate, weeks_in_year};

use crate::prelude::*;

/// Text that does not match the expected grammar.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid week {week} for ISO year {year}")]
    InvalidWeek { year: u16, week: u8 },
    #[display(fmt = "Invalid weekday: {_0} (must be 1-7)")]
    InvalidWeekday(u8),
    #[display(fmt = "Invalid time: {_0}")]
    InvalidTime(String),
    #[display(fmt = "Invalid locale: {_0}")]
    InvalidLocale(String),
    #[display(fmt = "Unknown format string: {_0:?}")]
    UnknownFormat(String),
    #[display(fmt = "Empty input string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Any failure of a value object operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The text does not match the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The value falls outside the representable range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// An operation received a value of an incompatible type.
    #[error("Invalid argument: expected a value of type {expected}")]
    InvalidArgument { expected: &'static str },
}

impl Error {
    /// Returns true for errors caused by text that does not match the grammar
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Returns true for errors caused by values outside the representable range
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::Range(_))
    }
}
