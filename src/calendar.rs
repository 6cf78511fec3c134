//! Adding spans to concrete dates.

use crate::{Date, DateSpan, DateTime, MonthSpan, RangeError};

/// Order in which the two parts of a [`DateSpan`] are applied to a date.
///
/// The order matters when the month step clamps the day of month:
/// 1999-01-30 plus one month and minus one day is 1999-02-27 when months go
/// first (01-30 → 02-28 → 02-27), but 1999-02-28 when days go first
/// (01-30 → 01-29 → 02-28).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddOrder {
    #[default]
    MonthsFirst,
    DaysFirst,
}

impl From<bool> for AddOrder {
    /// `true` selects [`AddOrder::DaysFirst`]
    fn from(days_first: bool) -> Self {
        if days_first { Self::DaysFirst } else { Self::MonthsFirst }
    }
}

/// Calendar arithmetic with spans.
///
/// Month steps clamp the day to the end of a shorter target month. Every
/// intermediate result must stay inside the
/// [`CalendarRange`](crate::CalendarRange).
pub trait CalendarAdd: Sized {
    /// Adds the months and days of `span` in the given order.
    ///
    /// # Errors
    /// Returns `RangeError::DateOutOfRange` if a step leaves the calendar range.
    fn checked_add_date_span(self, span: DateSpan, order: AddOrder) -> Result<Self, RangeError>;

    /// Adds a number of months.
    ///
    /// # Errors
    /// Returns `RangeError::DateOutOfRange` if the result leaves the calendar range.
    fn checked_add_month_span(self, span: MonthSpan) -> Result<Self, RangeError>;

    /// Adds the negation of `span`, in the given order.
    ///
    /// # Errors
    /// Returns `RangeError::DateOutOfRange` if a step leaves the calendar range.
    fn checked_sub_date_span(self, span: DateSpan, order: AddOrder) -> Result<Self, RangeError> {
        self.checked_add_date_span(-span, order)
    }

    /// Subtracts a number of months.
    ///
    /// # Errors
    /// Returns `RangeError::DateOutOfRange` if the result leaves the calendar range.
    fn checked_sub_month_span(self, span: MonthSpan) -> Result<Self, RangeError> {
        self.checked_add_month_span(-span)
    }
}

impl CalendarAdd for Date {
    fn checked_add_date_span(self, span: DateSpan, order: AddOrder) -> Result<Self, RangeError> {
        let months = i64::from(span.total_months());
        let days = i64::from(span.days());
        let result = match order {
            AddOrder::MonthsFirst => self.checked_add_months(months)?.checked_add_days(days),
            AddOrder::DaysFirst => self.checked_add_days(days)?.checked_add_months(months),
        };
        result.inspect_err(|_| {
            debug!("{self} + {span} ({order:?}) leaves the calendar range");
        })
    }

    fn checked_add_month_span(self, span: MonthSpan) -> Result<Self, RangeError> {
        self.checked_add_months(i64::from(span.total_months()))
    }
}

impl CalendarAdd for DateTime {
    fn checked_add_date_span(self, span: DateSpan, order: AddOrder) -> Result<Self, RangeError> {
        let date = self.date().checked_add_date_span(span, order)?;
        Ok(self.with_date(date))
    }

    fn checked_add_month_span(self, span: MonthSpan) -> Result<Self, RangeError> {
        let date = self.date().checked_add_month_span(span)?;
        Ok(self.with_date(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime, months, span};

    #[test]
    fn test_add_order_from_bool() {
        assert_eq!(AddOrder::from(true), AddOrder::DaysFirst);
        assert_eq!(AddOrder::from(false), AddOrder::MonthsFirst);
        assert_eq!(AddOrder::default(), AddOrder::MonthsFirst);
    }

    #[test]
    fn test_add_date_span() {
        struct TestCase {
            start:    Date,
            span:     DateSpan,
            order:    AddOrder,
            expected: Date,
        }

        let cases = [
            TestCase {
                start:    date(1999, 1, 30),
                span:     span(0, 1, -1),
                order:    AddOrder::MonthsFirst,
                expected: date(1999, 2, 27),
            },
            TestCase {
                start:    date(1999, 1, 30),
                span:     span(0, 1, -1),
                order:    AddOrder::DaysFirst,
                expected: date(1999, 2, 28),
            },
            TestCase {
                start:    date(2024, 2, 29),
                span:     span(1, 0, 0),
                order:    AddOrder::MonthsFirst,
                expected: date(2025, 2, 28),
            },
            TestCase {
                start:    date(2020, 3, 31),
                span:     span(0, -1, -1),
                order:    AddOrder::MonthsFirst,
                expected: date(2020, 2, 28),
            },
            TestCase {
                start:    date(2020, 3, 31),
                span:     span(0, -1, -1),
                order:    AddOrder::DaysFirst,
                expected: date(2020, 2, 29),
            },
            TestCase {
                start:    date(2000, 1, 1),
                span:     DateSpan::ZERO,
                order:    AddOrder::DaysFirst,
                expected: date(2000, 1, 1),
            },
            TestCase {
                start:    Date::MIN,
                span:     DateSpan::MAX,
                order:    AddOrder::MonthsFirst,
                expected: Date::MAX,
            },
            TestCase {
                start:    Date::MAX,
                span:     DateSpan::MIN,
                order:    AddOrder::MonthsFirst,
                expected: date(1, 1, 1),
            },
        ];

        for case in &cases {
            assert_eq!(
                case.start.checked_add_date_span(case.span, case.order),
                Ok(case.expected),
                "{} + {} ({:?})",
                case.start,
                case.span,
                case.order
            );
        }
    }

    #[test]
    fn test_sub_date_span() {
        let start = date(1999, 3, 30);
        assert_eq!(start.checked_sub_date_span(span(0, 1, 1), AddOrder::MonthsFirst), Ok(date(1999, 2, 27)));
        assert_eq!(start.checked_sub_date_span(span(0, 1, 1), AddOrder::DaysFirst), Ok(date(1999, 2, 28)));
    }

    #[test]
    fn test_month_span() {
        assert_eq!(date(2019, 8, 31).checked_add_month_span(months(6)), Ok(date(2020, 2, 29)));
        assert_eq!(date(2019, 8, 31).checked_sub_month_span(months(6)), Ok(date(2019, 2, 28)));
        assert_eq!(date(2019, 8, 31).checked_add_month_span(MonthSpan::ZERO), Ok(date(2019, 8, 31)));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            Date::MAX.checked_add_date_span(span(0, 0, 1), AddOrder::MonthsFirst),
            Err(RangeError::DateOutOfRange)
        );
        assert_eq!(Date::MIN.checked_sub_month_span(months(1)), Err(RangeError::DateOutOfRange));
        // The intermediate day step leaves the range even though the final
        // result would not.
        assert_eq!(
            Date::MAX.checked_add_date_span(span(0, -1, 1), AddOrder::DaysFirst),
            Err(RangeError::DateOutOfRange)
        );
        assert_eq!(
            Date::MAX.checked_add_date_span(span(0, -1, 1), AddOrder::MonthsFirst),
            Ok(date(9999, 12, 1))
        );
    }

    #[test]
    fn test_date_time_keeps_time() {
        let start = datetime(1999, 1, 30, 13, 45, 30);
        assert_eq!(
            start.checked_add_date_span(span(0, 1, -1), AddOrder::MonthsFirst),
            Ok(datetime(1999, 2, 27, 13, 45, 30))
        );
        assert_eq!(
            start.checked_add_date_span(span(0, 1, -1), AddOrder::DaysFirst),
            Ok(datetime(1999, 2, 28, 13, 45, 30))
        );
        assert_eq!(start.checked_sub_month_span(months(1)), Ok(datetime(1998, 12, 30, 13, 45, 30)));
        assert_eq!(
            datetime(9999, 12, 31, 0, 0, 0).checked_add_month_span(months(1)),
            Err(RangeError::DateOutOfRange)
        );
    }
}
