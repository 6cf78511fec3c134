use crate::Date;

/// The representable calendar, 0001-01-01 through 9999-12-31.
///
/// Every [`Date`], and every result of span arithmetic, lies within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarRange;

/// Error type for values outside the representable range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// A date computation left the calendar range.
    #[error("Date is outside the calendar range {min}/{max}", min = Date::MIN, max = Date::MAX)]
    DateOutOfRange,

    /// A span component cannot be represented.
    #[error("{unit} value {value} is out of range (must be between -{max} and {max})")]
    SpanOutOfRange { unit: &'static str, value: i64, max: i64 },

    /// Span arithmetic produced an unrepresentable duration.
    #[error("The resulting duration is too long")]
    Overflow,
}

impl CalendarRange {
    /// Earliest representable date, 0001-01-01
    pub const MIN: Date = Date::MIN;
    /// Latest representable date, 9999-12-31
    pub const MAX: Date = Date::MAX;

    /// Validates a day ordinal (days since 0001-01-01) against the calendar.
    ///
    /// # Errors
    /// Returns `RangeError::DateOutOfRange` for ordinals before `MIN` or after `MAX`.
    pub(crate) fn check_ordinal(ordinal: i64) -> Result<i32, RangeError> {
        let min = i64::from(Self::MIN.ordinal());
        let max = i64::from(Self::MAX.ordinal());
        if ordinal < min || ordinal > max {
            trace!("day ordinal {ordinal} is outside {min}..={max}");
            return Err(RangeError::DateOutOfRange);
        }
        // Bounded by MAX.ordinal() above.
        i32::try_from(ordinal).map_err(|_| RangeError::DateOutOfRange)
    }
}
