use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{
    AVERAGE_DAYS_PER_MONTH, AVERAGE_MONTH_DENOMINATOR, AVERAGE_MONTH_NUMERATOR, MAX_SPAN_DAYS,
    MAX_SPAN_MONTHS, MONTHS_PER_YEAR,
};
use crate::grammar::{self, Parsed, SpanText, Unit};
use crate::month_span::whole_months_between;
use crate::{Date, Error, Locale, MonthSpan, ParseError, RangeError};

/// A signed calendar span of months and days.
///
/// Years are folded into the month total on construction; the month total and
/// the day total each carry their own sign. Two spans are equal only when both
/// totals are equal, but they are *ordered* by approximate duration,
/// `months × 30.436875 + days`, so 14 months sort before 500 days even though
/// they have more months:
///
/// ```
/// use date_span::DateSpan;
///
/// let fourteen_months = DateSpan::new(1, 2, 0).unwrap();
/// let days = DateSpan::from_days(500).unwrap();
/// assert!(fourteen_months < days);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateSpan {
    months: i32,
    days:   i32,
}

impl DateSpan {
    pub const ZERO: Self = Self { months: 0, days: 0 };
    /// The span from 0001-01-01 to 9999-12-31
    pub const MAX: Self = Self {
        months: MAX_SPAN_MONTHS,
        days:   30,
    };
    /// The span from 9999-12-31 to 0001-01-01
    pub const MIN: Self = Self {
        months: -MAX_SPAN_MONTHS,
        days:   -30,
    };

    /// Creates a span of years, months and days; years are folded into the
    /// month total.
    ///
    /// # Errors
    /// Returns `RangeError::SpanOutOfRange` if the span is not representable.
    pub fn new(years: i32, months: i32, days: i32) -> Result<Self, RangeError> {
        let total = i64::from(years) * i64::from(MONTHS_PER_YEAR) + i64::from(months);
        Self::checked(total, i64::from(days))
    }

    /// Creates a span from a month total and a day total.
    ///
    /// # Errors
    /// Returns `RangeError::SpanOutOfRange` if the span is not representable.
    pub fn from_parts(months: i32, days: i32) -> Result<Self, RangeError> {
        Self::checked(i64::from(months), i64::from(days))
    }

    /// Creates a span of days only.
    ///
    /// # Errors
    /// Returns `RangeError::SpanOutOfRange` if the span is not representable.
    pub fn from_days(days: i32) -> Result<Self, RangeError> {
        Self::from_parts(0, days)
    }

    /// Creates a span of months only.
    ///
    /// # Errors
    /// Returns `RangeError::SpanOutOfRange` if the span is not representable.
    pub fn from_months(months: i32) -> Result<Self, RangeError> {
        Self::from_parts(months, 0)
    }

    /// Creates a span of whole years, stored as months.
    ///
    /// # Errors
    /// Returns `RangeError::SpanOutOfRange` if the span is not representable.
    pub fn from_years(years: i32) -> Result<Self, RangeError> {
        Self::new(years, 0, 0)
    }

    fn checked(months: i64, days: i64) -> Result<Self, RangeError> {
        let max_months = i64::from(MAX_SPAN_MONTHS);
        let max_days = i64::from(MAX_SPAN_DAYS);
        if !(-max_months..=max_months).contains(&months) {
            return Err(RangeError::SpanOutOfRange {
                unit: "Months",
                value: months,
                max: max_months,
            });
        }
        if !(-max_days..=max_days).contains(&days) {
            return Err(RangeError::SpanOutOfRange {
                unit: "Days",
                value: days,
                max: max_days,
            });
        }
        let span = Self {
            // Both bounded above.
            months: i32::try_from(months).map_err(|_| RangeError::Overflow)?,
            days:   i32::try_from(days).map_err(|_| RangeError::Overflow)?,
        };
        if span.duration_key().abs() > Self::MAX.duration_key() {
            return Err(RangeError::Overflow);
        }
        Ok(span)
    }

    /// Like `checked`, reporting every failure as an overflow of the
    /// resulting duration.
    fn mutate(months: i64, days: i64) -> Result<Self, RangeError> {
        Self::checked(months, days).map_err(|_| {
            debug!("span of {months} months and {days} days overflows");
            RangeError::Overflow
        })
    }

    /// Whole years of the month total, truncated toward zero
    pub const fn years(&self) -> i32 {
        self.months / MONTHS_PER_YEAR
    }

    /// Months left after the whole years, carrying the month total's sign
    pub const fn months(&self) -> i32 {
        self.months % MONTHS_PER_YEAR
    }

    /// The day total, independent of the months
    pub const fn days(&self) -> i32 {
        self.days
    }

    /// The month total, years included
    pub const fn total_months(&self) -> i32 {
        self.months
    }

    /// Approximate length in days, counting months at their mean length
    pub fn total_days(&self) -> f64 {
        f64::from(self.months).mul_add(AVERAGE_DAYS_PER_MONTH, f64::from(self.days))
    }

    /// The month part as a [`MonthSpan`]
    pub const fn month_span(&self) -> MonthSpan {
        MonthSpan::new_unchecked(self.months)
    }

    /// Returns true when both totals are zero
    pub const fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0
    }

    /// Approximate duration scaled to an integer:
    /// `months × 3_652_425 + days × 120_000`.
    const fn duration_key(&self) -> i64 {
        self.months as i64 * AVERAGE_MONTH_NUMERATOR + self.days as i64 * AVERAGE_MONTH_DENOMINATOR
    }

    /// # Errors
    /// Returns `RangeError::Overflow` if the resulting duration is too long.
    pub fn add_days(self, days: i32) -> Result<Self, RangeError> {
        Self::mutate(i64::from(self.months), i64::from(self.days) + i64::from(days))
    }

    /// # Errors
    /// Returns `RangeError::Overflow` if the resulting duration is too long.
    pub fn add_months(self, months: i32) -> Result<Self, RangeError> {
        Self::mutate(i64::from(self.months) + i64::from(months), i64::from(self.days))
    }

    /// # Errors
    /// Returns `RangeError::Overflow` if the resulting duration is too long.
    pub fn add_years(self, years: i32) -> Result<Self, RangeError> {
        let months = i64::from(years) * i64::from(MONTHS_PER_YEAR);
        Self::mutate(i64::from(self.months) + months, i64::from(self.days))
    }

    /// Adds month totals and day totals.
    ///
    /// # Errors
    /// Returns `RangeError::Overflow` if the resulting duration is too long.
    pub fn checked_add(self, other: Self) -> Result<Self, RangeError> {
        Self::mutate(
            i64::from(self.months) + i64::from(other.months),
            i64::from(self.days) + i64::from(other.days),
        )
    }

    /// # Errors
    /// Returns `RangeError::Overflow` if the resulting duration is too long.
    pub fn checked_sub(self, other: Self) -> Result<Self, RangeError> {
        self.checked_add(-other)
    }

    /// The span from `start` to `end`: whole months first, then the remaining
    /// days, so that adding the result to `start` months-first gives `end`.
    ///
    /// # Errors
    /// Returns `RangeError::DateOutOfRange` if an intermediate date leaves the
    /// calendar range.
    pub fn subtract(end: Date, start: Date) -> Result<Self, RangeError> {
        let months = whole_months_between(start, end);
        let anchor = start.checked_add_months(i64::from(months))?;
        Self::checked(i64::from(months), i64::from(anchor.days_until(end)))
    }

    /// Parses with the conventions of `locale`.
    ///
    /// Accepts `[±]{Y}Y{±}{M}M{±}{D}D` with any unit omitted; a bare number is
    /// ambiguous and rejected.
    ///
    /// # Errors
    /// Returns `Error::Parse` for malformed text and `Error::Range` for spans
    /// that are not representable.
    pub fn parse_with(text: &str, locale: &Locale) -> Result<Self, Error> {
        match grammar::parse(text, locale, &[Unit::Years, Unit::Months, Unit::Days])? {
            Parsed::Total(_) => Err(ParseError::InvalidFormat(format!(
                "A date span needs unit markers: {text:?}"
            ))
            .into()),
            Parsed::Components(components) => Ok(Self::checked(components.total_months(), components.days)?),
        }
    }

    /// Parses with the conventions of `locale`, discarding the failure reason
    pub fn try_parse_with(text: &str, locale: &Locale) -> Option<Self> {
        Self::parse_with(text, locale).ok()
    }

    /// Formats with the conventions of `locale`. `""`, `"G"` and `"g"` give the
    /// canonical `{Y}Y{±}{M}M{±}{D}D`.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownFormat` for any other format string.
    pub fn format_with(&self, format: &str, locale: &Locale) -> Result<String, ParseError> {
        match format {
            "" | "G" | "g" => Ok(self.text(locale).to_string()),
            other => Err(ParseError::UnknownFormat(other.to_owned())),
        }
    }

    fn text<'a>(&self, locale: &'a Locale) -> SpanText<'a> {
        SpanText {
            total_months: i64::from(self.months),
            days: Some(i64::from(self.days)),
            locale,
        }
    }
}

impl PartialOrd for DateSpan {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateSpan {
    fn cmp(&self, other: &Self) -> Ordering {
        // Equal approximate durations of different pairs fall back to the
        // totals, so only equal spans compare equal.
        self.duration_key()
            .cmp(&other.duration_key())
            .then(self.months.cmp(&other.months))
            .then(self.days.cmp(&other.days))
    }
}

impl Neg for DateSpan {
    type Output = Self;

    fn neg(self) -> Self::Output {
        // All bounds are symmetric.
        Self {
            months: -self.months,
            days:   -self.days,
        }
    }
}

impl From<MonthSpan> for DateSpan {
    fn from(span: MonthSpan) -> Self {
        Self {
            months: span.total_months(),
            days:   0,
        }
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.text(&Locale::INVARIANT), f)
    }
}

impl FromStr for DateSpan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &Locale::INVARIANT)
    }
}

impl Serialize for DateSpan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
