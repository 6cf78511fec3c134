use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SPAN_MONTHS, MONTHS_PER_YEAR};
use crate::grammar::{self, Parsed, SpanText, Unit};
use crate::prelude::*;
use crate::{Date, Error, Locale, ParseError, RangeError};

/// A signed number of months.
///
/// Bounded by the number of whole months in the calendar range
/// (`-MAX_SPAN_MONTHS..=MAX_SPAN_MONTHS`). Ordering and equality are those of
/// the month count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Into)]
pub struct MonthSpan(i32);

impl MonthSpan {
    pub const ZERO: Self = Self(0);
    /// The whole months from 0001-01-01 to 9999-12-31
    pub const MAX: Self = Self(MAX_SPAN_MONTHS);
    pub const MIN: Self = Self(-MAX_SPAN_MONTHS);

    /// Creates a span of `years` years plus `months` months.
    ///
    /// # Errors
    /// Returns `RangeError::SpanOutOfRange` if the total is not representable.
    pub fn new(years: i32, months: i32) -> Result<Self, RangeError> {
        let total = i64::from(years) * i64::from(MONTHS_PER_YEAR) + i64::from(months);
        Self::checked(total)
    }

    /// Creates a span of whole years.
    ///
    /// # Errors
    /// Returns `RangeError::SpanOutOfRange` if the total is not representable.
    pub fn from_years(years: i32) -> Result<Self, RangeError> {
        Self::new(years, 0)
    }

    /// # Errors
    /// Returns `RangeError::SpanOutOfRange` if the total is not representable.
    pub fn from_months(months: i32) -> Result<Self, RangeError> {
        Self::checked(i64::from(months))
    }

    /// Wraps a month total already known to be within
    /// `-MAX_SPAN_MONTHS..=MAX_SPAN_MONTHS`
    pub(crate) const fn new_unchecked(total: i32) -> Self {
        debug_assert!(-MAX_SPAN_MONTHS <= total && total <= MAX_SPAN_MONTHS);
        Self(total)
    }

    pub(crate) fn checked(total: i64) -> Result<Self, RangeError> {
        let max = i64::from(MAX_SPAN_MONTHS);
        if !(-max..=max).contains(&total) {
            return Err(RangeError::SpanOutOfRange {
                unit: "Months",
                value: total,
                max,
            });
        }
        // Bounded by MAX_SPAN_MONTHS above.
        i32::try_from(total).map(Self).map_err(|_| RangeError::Overflow)
    }

    /// The signed number of months
    pub const fn total_months(self) -> i32 {
        self.0
    }

    /// Whole years, truncated toward zero
    pub const fn years(self) -> i32 {
        self.0 / MONTHS_PER_YEAR
    }

    /// Months left after the whole years, carrying the span's sign
    pub const fn months(self) -> i32 {
        self.0 % MONTHS_PER_YEAR
    }

    /// Returns true for the zero span
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// # Errors
    /// Returns `RangeError::Overflow` if the sum is not representable.
    pub fn checked_add(self, other: Self) -> Result<Self, RangeError> {
        Self::checked(i64::from(self.0) + i64::from(other.0)).map_err(|_| RangeError::Overflow)
    }

    /// # Errors
    /// Returns `RangeError::Overflow` if the difference is not representable.
    pub fn checked_sub(self, other: Self) -> Result<Self, RangeError> {
        self.checked_add(-other)
    }

    /// Whole months from `start` to `end`.
    ///
    /// Counts the months that can be added to the earlier date (with
    /// end-of-month clamping) without passing the later one, so
    /// `subtract(2020-01-01, 2019-01-02)` is 11 months and not 12. The result
    /// is negative when `end` is before `start`, and
    /// `subtract(a, b) == -subtract(b, a)`.
    pub fn subtract(end: Date, start: Date) -> Self {
        Self(whole_months_between(start, end))
    }

    /// Parses with the conventions of `locale`.
    ///
    /// Accepts a bare signed integer (total months) or `{Y}Y{±}{M}M`.
    ///
    /// # Errors
    /// Returns `Error::Parse` for malformed text and `Error::Range` for totals
    /// outside the representable range.
    pub fn parse_with(text: &str, locale: &Locale) -> Result<Self, Error> {
        let total = match grammar::parse(text, locale, &[Unit::Years, Unit::Months])? {
            Parsed::Total(total) => total,
            Parsed::Components(components) => components.total_months(),
        };
        Ok(Self::checked(total)?)
    }

    /// Parses with the conventions of `locale`, discarding the failure reason
    pub fn try_parse_with(text: &str, locale: &Locale) -> Option<Self> {
        Self::parse_with(text, locale).ok()
    }

    /// Formats with the conventions of `locale`.
    ///
    /// `""`, `"G"` and `"g"` give `{Y}Y{±}{M}M`; `"M"` and `"m"` give the
    /// total number of months.
    ///
    /// # Errors
    /// Returns `ParseError::UnknownFormat` for any other format string.
    pub fn format_with(self, format: &str, locale: &Locale) -> Result<String, ParseError> {
        match format {
            "" | "G" | "g" => Ok(self.text(locale).to_string()),
            "M" | "m" => {
                let total = i64::from(self.0);
                if total < 0 {
                    Ok(format!("{}{}", locale.negative_sign(), total.unsigned_abs()))
                } else {
                    Ok(total.to_string())
                }
            }
            other => Err(ParseError::UnknownFormat(other.to_owned())),
        }
    }

    fn text(self, locale: &Locale) -> SpanText<'_> {
        SpanText {
            total_months: i64::from(self.0),
            days: None,
            locale,
        }
    }
}

/// Signed count of whole months from `start` to `end`, counted forward from
/// the earlier of the two so that swapping them only flips the sign. Adding
/// the count to the earlier date never passes the later one.
pub(crate) fn whole_months_between(start: Date, end: Date) -> i32 {
    if end < start {
        return -whole_months_between(end, start);
    }
    let months = (i32::from(end.year()) - i32::from(start.year())) * MONTHS_PER_YEAR
        + (i32::from(end.month()) - i32::from(start.month()));
    let overshoots = match start.checked_add_months(i64::from(months)) {
        Ok(moved) => moved > end,
        Err(_) => true,
    };
    if months > 0 && overshoots { months - 1 } else { months }
}

impl Neg for MonthSpan {
    type Output = Self;

    fn neg(self) -> Self::Output {
        // The range is symmetric.
        Self(-self.0)
    }
}

impl TryFrom<i32> for MonthSpan {
    type Error = RangeError;

    fn try_from(months: i32) -> Result<Self, Self::Error> {
        Self::from_months(months)
    }
}

impl fmt::Display for MonthSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.text(&Locale::INVARIANT), f)
    }
}

impl FromStr for MonthSpan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &Locale::INVARIANT)
    }
}

impl PartialEq<i32> for MonthSpan {
    fn eq(&self, other: &i32) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<i32> for MonthSpan {
    fn partial_cmp(&self, other: &i32) -> Option<Ordering> {
        Some(self.0.cmp(other))
    }
}

impl Serialize for MonthSpan {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthSpan {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(MonthSpanVisitor)
    }
}

/// Accepts the text form or an integer number of months.
struct MonthSpanVisitor;

impl Visitor<'_> for MonthSpanVisitor {
    type Value = MonthSpan;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a month span string or an integer number of months")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        MonthSpan::checked(value).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        let value = i64::try_from(value).map_err(E::custom)?;
        self.visit_i64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, minus_sign_locale, months};

    #[test]
    fn test_factories() {
        assert_eq!(MonthSpan::from_years(2).unwrap().total_months(), 24);
        assert_eq!(MonthSpan::from_months(-7).unwrap().total_months(), -7);
        assert_eq!(MonthSpan::new(1, 7).unwrap().total_months(), 19);
        assert_eq!(MonthSpan::new(-1, 5).unwrap().total_months(), -7);
        assert_eq!(MonthSpan::default(), MonthSpan::ZERO);
        assert!(MonthSpan::ZERO.is_zero());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(MonthSpan::from_months(119_987).unwrap(), MonthSpan::MAX);
        assert_eq!(MonthSpan::from_months(-119_987).unwrap(), MonthSpan::MIN);
        assert!(matches!(
            MonthSpan::from_months(119_988),
            Err(RangeError::SpanOutOfRange { value: 119_988, .. })
        ));
        assert!(MonthSpan::from_years(10_000).is_err());
        assert!(MonthSpan::new(i32::MAX, i32::MAX).is_err());
        assert!(MonthSpan::try_from(i32::MIN).is_err());
    }

    #[test]
    fn test_decomposition() {
        let span = months(-19);
        assert_eq!(span.years(), -1);
        assert_eq!(span.months(), -7);
        assert_eq!(months(19).years(), 1);
        assert_eq!(months(19).months(), 7);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(months(5).checked_add(months(7)).unwrap(), months(12));
        assert_eq!(months(5).checked_sub(months(7)).unwrap(), months(-2));
        assert_eq!(-months(5), months(-5));
        assert_eq!(MonthSpan::MAX.checked_add(months(1)), Err(RangeError::Overflow));
        assert_eq!(MonthSpan::MIN.checked_sub(months(1)), Err(RangeError::Overflow));
        assert_eq!(-MonthSpan::MAX, MonthSpan::MIN);
    }

    #[test]
    fn test_integer_casts() {
        let span = MonthSpan::try_from(42).unwrap();
        let back: i32 = span.into();
        assert_eq!(back, 42);
        assert!(span == 42);
        assert!(span > 41);
    }

    #[test]
    fn test_ordering() {
        let mut spans = vec![months(3), months(-12), months(0), months(1)];
        spans.sort();
        assert_eq!(spans, vec![months(-12), months(0), months(1), months(3)]);
    }

    #[test]
    fn test_parse() {
        struct TestCase {
            input:    &'static str,
            expected: i32,
        }

        let cases = [
            TestCase {
                input:    "19",
                expected: 19,
            },
            TestCase {
                input:    "-19",
                expected: -19,
            },
            TestCase {
                input:    "1Y+7M",
                expected: 19,
            },
            TestCase {
                input:    "1y+7m",
                expected: 19,
            },
            TestCase {
                input:    "-1Y-7M",
                expected: -19,
            },
            TestCase {
                input:    "-1Y+5M",
                expected: -7,
            },
            TestCase {
                input:    "3Y",
                expected: 36,
            },
            TestCase {
                input:    "-14M",
                expected: -14,
            },
        ];

        for case in &cases {
            let span: MonthSpan = case.input.parse().unwrap();
            assert_eq!(span.total_months(), case.expected, "{}", case.input);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!("1Y+2M+3D".parse::<MonthSpan>().unwrap_err().is_format());
        assert!("twelve".parse::<MonthSpan>().unwrap_err().is_format());
        assert!("".parse::<MonthSpan>().unwrap_err().is_format());
        assert!("119988".parse::<MonthSpan>().unwrap_err().is_range());
        assert!("10000Y".parse::<MonthSpan>().unwrap_err().is_range());
        assert!("999999999999999999Y".parse::<MonthSpan>().unwrap_err().is_range());
        assert!("99999999999999999999".parse::<MonthSpan>().unwrap_err().is_range());
        assert!("1Y-99999999999999999999M".parse::<MonthSpan>().unwrap_err().is_range());
        assert_eq!(MonthSpan::try_parse_with("1Y+2M+3D", &Locale::INVARIANT), None);
        assert_eq!(MonthSpan::try_parse_with("14", &Locale::INVARIANT), Some(months(14)));
    }

    #[test]
    fn test_display_round_trip() {
        for total in [0, 1, -1, 11, 12, -12, 19, -19, 119_987, -119_987] {
            let span = months(total);
            let text = span.to_string();
            assert_eq!(text.parse::<MonthSpan>().unwrap(), span, "{text}");
        }
        assert_eq!(months(19).to_string(), "1Y+7M");
        assert_eq!(months(-19).to_string(), "-1Y-7M");
        assert_eq!(months(0).to_string(), "0Y+0M");
    }

    #[test]
    fn test_format_with() {
        let locale = minus_sign_locale();
        assert_eq!(months(-19).format_with("", &locale).unwrap(), "\u{2212}1Y\u{2212}7M");
        assert_eq!(months(-19).format_with("M", &locale).unwrap(), "\u{2212}19");
        assert_eq!(months(19).format_with("m", &Locale::INVARIANT).unwrap(), "19");
        assert_eq!(
            months(19).format_with("X", &Locale::INVARIANT),
            Err(ParseError::UnknownFormat("X".to_owned()))
        );
        assert_eq!(MonthSpan::parse_with("\u{2212}1Y\u{2212}7M", &locale).unwrap(), months(-19));
    }

    #[test]
    fn test_subtract_dates() {
        struct TestCase {
            end:      Date,
            start:    Date,
            expected: i32,
        }

        let cases = [
            TestCase {
                end:      date(2020, 1, 1),
                start:    date(2019, 1, 2),
                expected: 11,
            },
            TestCase {
                end:      date(2020, 1, 1),
                start:    date(2019, 3, 13),
                expected: 9,
            },
            TestCase {
                end:      date(2020, 1, 1),
                start:    date(2019, 1, 1),
                expected: 12,
            },
            TestCase {
                end:      date(2020, 2, 29),
                start:    date(2020, 1, 31),
                expected: 1,
            },
            TestCase {
                end:      date(2020, 1, 1),
                start:    date(2020, 4, 30),
                expected: -3,
            },
            TestCase {
                end:      date(2020, 1, 1),
                start:    date(2020, 4, 1),
                expected: -3,
            },
            TestCase {
                end:      date(2020, 1, 2),
                start:    date(2020, 4, 1),
                expected: -2,
            },
            TestCase {
                end:      date(2020, 1, 15),
                start:    date(2020, 1, 1),
                expected: 0,
            },
        ];

        for case in &cases {
            assert_eq!(
                MonthSpan::subtract(case.end, case.start).total_months(),
                case.expected,
                "{} - {}",
                case.end,
                case.start
            );
        }
    }

    #[test]
    fn test_subtract_is_antisymmetric() {
        struct TestCase {
            later:    Date,
            earlier:  Date,
            expected: i32,
        }

        let cases = [
            TestCase {
                later:    date(2019, 2, 28),
                earlier:  date(2019, 1, 30),
                expected: 1,
            },
            TestCase {
                later:    date(2020, 3, 30),
                earlier:  date(2020, 1, 31),
                expected: 1,
            },
            TestCase {
                later:    date(2020, 1, 1),
                earlier:  date(2019, 1, 2),
                expected: 11,
            },
            TestCase {
                later:    date(2024, 10, 17),
                earlier:  date(2024, 10, 17),
                expected: 0,
            },
        ];

        for case in &cases {
            assert_eq!(MonthSpan::subtract(case.later, case.earlier), months(case.expected));
            assert_eq!(MonthSpan::subtract(case.earlier, case.later), months(-case.expected));
        }
    }

    #[test]
    fn test_subtract_extremes() {
        assert_eq!(MonthSpan::subtract(Date::MAX, Date::MIN), MonthSpan::MAX);
        assert_eq!(MonthSpan::subtract(Date::MIN, Date::MAX), MonthSpan::MIN);
    }

    #[test]
    fn test_serde() {
        let span = months(-19);
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, r#""-1Y-7M""#);
        assert_eq!(serde_json::from_str::<MonthSpan>(&json).unwrap(), span);
        assert_eq!(serde_json::from_str::<MonthSpan>("-19").unwrap(), span);
        assert_eq!(serde_json::from_str::<MonthSpan>("19").unwrap(), months(19));
        assert!(serde_json::from_str::<MonthSpan>("200000").is_err());
        assert!(serde_json::from_str::<MonthSpan>("1.5").is_err());
    }
}
