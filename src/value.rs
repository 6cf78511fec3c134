//! The contract shared by every value type of the crate.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Date, DateSpan, Error, IsoWeekDate, Locale, MonthSpan, ParseError};

/// An immutable value wrapping a single concept, with a text form, a total
/// order and a string serialization.
///
/// Generic code can rely on every implementor to round-trip through
/// `Display`/`FromStr` and through serde, and to compare against values of
/// unknown type with [`compare_to_any`](Self::compare_to_any).
pub trait SingleValueObject:
    Copy
    + Eq
    + Ord
    + Hash
    + Default
    + Debug
    + Display
    + FromStr<Err = Error>
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Name used in error messages
    const TYPE_NAME: &'static str;

    /// Parses text written with the conventions of `locale`.
    ///
    /// # Errors
    /// Returns `Error::Parse` for malformed text and `Error::Range` for values
    /// outside the representable range.
    fn parse_with(text: &str, locale: &Locale) -> Result<Self, Error>;

    /// Like [`parse_with`](Self::parse_with), discarding the failure reason
    fn try_parse_with(text: &str, locale: &Locale) -> Option<Self> {
        Self::parse_with(text, locale).ok()
    }

    /// Formats with a format string and the conventions of `locale`. The
    /// empty format string always gives the `Display` text.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownFormat` for format strings the type does
    /// not support.
    fn format_with(&self, format: &str, locale: &Locale) -> Result<String, Error>;

    /// Compares with a value of unknown type.
    ///
    /// # Errors
    /// Returns `Error::InvalidArgument` unless `other` is a `Self`.
    fn compare_to_any(&self, other: &dyn Any) -> Result<Ordering, Error> {
        other
            .downcast_ref::<Self>()
            .map(|other| self.cmp(other))
            .ok_or(Error::InvalidArgument {
                expected: Self::TYPE_NAME,
            })
    }
}

impl SingleValueObject for MonthSpan {
    const TYPE_NAME: &'static str = "MonthSpan";

    fn parse_with(text: &str, locale: &Locale) -> Result<Self, Error> {
        Self::parse_with(text, locale)
    }

    fn format_with(&self, format: &str, locale: &Locale) -> Result<String, Error> {
        Ok(Self::format_with(*self, format, locale)?)
    }
}

impl SingleValueObject for DateSpan {
    const TYPE_NAME: &'static str = "DateSpan";

    fn parse_with(text: &str, locale: &Locale) -> Result<Self, Error> {
        Self::parse_with(text, locale)
    }

    fn format_with(&self, format: &str, locale: &Locale) -> Result<String, Error> {
        Ok(Self::format_with(self, format, locale)?)
    }
}

impl SingleValueObject for Date {
    const TYPE_NAME: &'static str = "Date";

    /// Dates have no locale-dependent text.
    fn parse_with(text: &str, _locale: &Locale) -> Result<Self, Error> {
        text.parse()
    }

    /// `""`, `"G"`, `"g"` and `"d"` give `YYYY-MM-DD`; `"w"` and `"W"` give
    /// the ISO week date with a padded or unpadded week.
    fn format_with(&self, format: &str, _locale: &Locale) -> Result<String, Error> {
        match format {
            "" | "G" | "g" | "d" => Ok(self.to_string()),
            "w" | "W" => Ok(self.to_iso_week_date().format_with(format)?),
            other => Err(ParseError::UnknownFormat(other.to_owned()).into()),
        }
    }
}

impl SingleValueObject for IsoWeekDate {
    const TYPE_NAME: &'static str = "IsoWeekDate";

    /// Week dates have no locale-dependent text.
    fn parse_with(text: &str, _locale: &Locale) -> Result<Self, Error> {
        text.parse()
    }

    fn format_with(&self, format: &str, _locale: &Locale) -> Result<String, Error> {
        Ok(Self::format_with(self, format)?)
    }
}
