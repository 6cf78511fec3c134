use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DATE_TIME_SEPARATOR, TIME_SEPARATOR};
use crate::prelude::*;
use crate::{Date, Error, ParseError};

const MAX_HOUR: u8 = 23;
const MAX_MINUTE: u8 = 59;
const MAX_SECOND: u8 = 59;

/// Wall-clock time of day with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display)]
#[display(fmt = "{hour:02}:{minute:02}:{second:02}")]
pub struct Time {
    hour:   u8,
    minute: u8,
    second: u8,
}

impl Time {
    /// 00:00:00
    pub const MIDNIGHT: Self = Self {
        hour:   0,
        minute: 0,
        second: 0,
    };

    /// Creates a time of day.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidTime` if a component is out of range.
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ParseError> {
        if hour > MAX_HOUR || minute > MAX_MINUTE || second > MAX_SECOND {
            return Err(ParseError::InvalidTime(format!("{hour:02}:{minute:02}:{second:02}")));
        }
        Ok(Self { hour, minute, second })
    }

    /// Hour of the day, 0..=23
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }
}

impl FromStr for Time {
    type Err = ParseError;

    /// Parses `HH:MM` or `HH:MM:SS` with two-digit components.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidTime(s.to_owned());
        let mut components = [0u8; 3];
        let mut count = 0;
        for part in s.split(TIME_SEPARATOR) {
            let slot = components.get_mut(count).ok_or_else(invalid)?;
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
            count += 1;
        }
        if count < 2 {
            return Err(invalid());
        }
        let [hour, minute, second] = components;
        Self::new(hour, minute, second)
    }
}

/// A [`Date`] together with a wall-clock [`Time`].
///
/// Calendar arithmetic on a date-time only ever moves the date; the time of
/// day is carried over unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display)]
#[display(fmt = "{date}T{time}")]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// Combines a date and a time of day
    pub const fn new(date: Date, time: Time) -> Self {
        Self { date, time }
    }

    /// The date at midnight
    pub const fn at_midnight(date: Date) -> Self {
        Self::new(date, Time::MIDNIGHT)
    }

    pub const fn date(&self) -> Date {
        self.date
    }

    pub const fn time(&self) -> Time {
        self.time
    }

    /// Replaces the date, keeping the time of day
    pub const fn with_date(self, date: Date) -> Self {
        Self { date, ..self }
    }
}

impl From<Date> for DateTime {
    fn from(date: Date) -> Self {
        Self::at_midnight(date)
    }
}

impl FromStr for DateTime {
    type Err = Error;

    /// Parses `YYYY-MM-DDTHH:MM[:SS]`; a space may replace the `T`. A bare
    /// date is read as midnight.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }
        let Some((date, time)) = trimmed.split_once([DATE_TIME_SEPARATOR, ' ']) else {
            return Ok(Self::at_midnight(trimmed.parse()?));
        };
        Ok(Self::new(date.parse()?, time.parse()?))
    }
}

impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
