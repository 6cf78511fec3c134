//! Text grammar shared by [`MonthSpan`](crate::MonthSpan) and
//! [`DateSpan`](crate::DateSpan).
//!
//! ```text
//! span  := [sign] value unit (sign value unit)*
//! total := [sign] value
//! unit  := 'Y' | 'M' | 'D'        (case-insensitive, in this order)
//! ```
//!
//! Every unit is optional but each appears at most once, and every token after
//! the first carries an explicit sign.

use std::fmt;

use crate::consts::{DAY_MARKER, MONTHS_PER_YEAR, MONTH_MARKER, YEAR_MARKER};
use crate::{Locale, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Unit {
    Years,
    Months,
    Days,
}

impl Unit {
    const fn marker(self) -> char {
        match self {
            Self::Years => YEAR_MARKER,
            Self::Months => MONTH_MARKER,
            Self::Days => DAY_MARKER,
        }
    }
}

/// Signed values of the units present in the text; absent units are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Components {
    pub years:  i64,
    pub months: i64,
    pub days:   i64,
}

impl Components {
    /// Years folded into the month total, saturating at the `i64` bounds
    pub fn total_months(&self) -> i64 {
        self.years
            .saturating_mul(i64::from(MONTHS_PER_YEAR))
            .saturating_add(self.months)
    }

    fn set(&mut self, unit: Unit, value: i64) {
        match unit {
            Unit::Years => self.years = value,
            Unit::Months => self.months = value,
            Unit::Days => self.days = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Parsed {
    /// A bare signed integer without unit marker
    Total(i64),
    Components(Components),
}

/// Parses `input`, accepting only `units` (in that order).
pub(crate) fn parse(input: &str, locale: &Locale, units: &[Unit]) -> Result<Parsed, ParseError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut parser = Parser {
        input,
        rest: text,
        locale,
    };
    let mut components = Components::default();
    let mut next_unit = 0;
    let mut first = true;

    while !parser.rest.is_empty() {
        let sign = parser.parse_sign(first)?;
        let value = parser.parse_value()? * sign;
        let Some(marker) = parser.take_char() else {
            if first {
                return Ok(Parsed::Total(value));
            }
            return Err(parser.error("missing unit marker"));
        };
        let offset = units[next_unit..]
            .iter()
            .position(|unit| unit.marker().eq_ignore_ascii_case(&marker))
            .ok_or_else(|| parser.error(&format!("unexpected unit marker '{marker}'")))?;
        let unit = units[next_unit + offset];
        components.set(unit, value);
        next_unit += offset + 1;
        first = false;
    }

    Ok(Parsed::Components(components))
}

struct Parser<'a> {
    input:  &'a str,
    rest:   &'a str,
    locale: &'a Locale,
}

impl Parser<'_> {
    fn error(&self, reason: &str) -> ParseError {
        trace!("span text {:?} rejected: {reason}", self.input);
        ParseError::InvalidFormat(format!("{reason} in {:?}", self.input))
    }

    fn take_char(&mut self) -> Option<char> {
        let mut chars = self.rest.chars();
        let c = chars.next()?;
        self.rest = chars.as_str();
        Some(c)
    }

    /// The sign is optional on the first token only
    fn parse_sign(&mut self, optional: bool) -> Result<i64, ParseError> {
        let sign = self.rest.chars().next().and_then(|c| self.locale.parse_sign(c));
        match sign {
            Some(sign) => {
                self.take_char();
                Ok(sign)
            }
            None if optional => Ok(1),
            None => Err(self.error("missing sign")),
        }
    }

    fn parse_value(&mut self) -> Result<i64, ParseError> {
        let end = self.rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(self.rest.len());
        if end == 0 {
            return Err(self.error("missing number"));
        }
        let (digits, rest) = self.rest.split_at(end);
        self.rest = rest;
        // All digits, so parsing only fails past i64::MAX. Such magnitudes
        // exceed every span bound and are rejected there as range errors.
        Ok(digits.parse::<i64>().unwrap_or(i64::MAX))
    }
}

/// Canonical text of a span: `{Y}Y{±}{M}M` followed by `{±}{D}D` when days
/// are given. The year keeps its natural sign; month and day signs are
/// always written.
pub(crate) struct SpanText<'a> {
    pub total_months: i64,
    pub days:         Option<i64>,
    pub locale:       &'a Locale,
}

impl fmt::Display for SpanText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let per_year = i64::from(MONTHS_PER_YEAR);
        let years = self.total_months / per_year;
        let months = self.total_months % per_year;
        if years < 0 {
            write!(f, "{}", self.locale.negative_sign())?;
        }
        write!(
            f,
            "{}{YEAR_MARKER}{}{}{MONTH_MARKER}",
            years.unsigned_abs(),
            self.locale.sign_of(months),
            months.unsigned_abs()
        )?;
        if let Some(days) = self.days {
            write!(f, "{}{}{DAY_MARKER}", self.locale.sign_of(days), days.unsigned_abs())?;
        }
        Ok(())
    }
}
