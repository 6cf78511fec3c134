//! Constructors for test fixtures.

use crate::{Date, DateSpan, DateTime, Locale, MonthSpan, Time};

pub fn date(year: u16, month: u8, day: u8) -> Date {
    Date::new(year, month, day).unwrap_or_else(|e| panic!("invalid test date {year}-{month}-{day}: {e}"))
}

pub fn datetime(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> DateTime {
    let time = Time::new(hour, minute, second).unwrap_or_else(|e| panic!("invalid test time: {e}"));
    DateTime::new(date(year, month, day), time)
}

pub fn span(years: i32, months: i32, days: i32) -> DateSpan {
    DateSpan::new(years, months, days).unwrap_or_else(|e| panic!("invalid test span: {e}"))
}

pub fn months(total: i32) -> MonthSpan {
    MonthSpan::from_months(total).unwrap_or_else(|e| panic!("invalid test month span: {e}"))
}

/// ASCII plus with U+2212 MINUS SIGN as the negative sign
pub fn minus_sign_locale() -> Locale {
    Locale::new('+', '\u{2212}').unwrap_or_else(|e| panic!("invalid test locale: {e}"))
}
