/// Minimum valid year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

pub const MONTHS_PER_YEAR: i32 = 12;
pub const DAYS_PER_WEEK: i32 = 7;

/// Days in a full 400 year Gregorian cycle
pub(crate) const DAYS_PER_GREGORIAN_CYCLE: i32 = 146_097;

/// Days from 0000-03-01 to 1970-01-01, the shift used by the civil day
/// number conversions.
pub(crate) const CIVIL_EPOCH_SHIFT: i32 = 719_468;

/// Days from 0001-01-01 to 1970-01-01.
pub(crate) const UNIX_EPOCH_ORDINAL: i32 = 719_162;

/// Whole months between 0001-01-01 and 9999-12-31.
pub const MAX_SPAN_MONTHS: i32 = (MAX_YEAR as i32 - MIN_YEAR as i32) * MONTHS_PER_YEAR + (DECEMBER as i32 - JANUARY as i32);

/// Days between 0001-01-01 and 9999-12-31.
pub const MAX_SPAN_DAYS: i32 = 3_652_058;

/// Numerator of the mean Gregorian month length, 365.2425 / 12 days.
pub const AVERAGE_MONTH_NUMERATOR: i64 = 3_652_425;
/// Denominator of the mean Gregorian month length.
pub const AVERAGE_MONTH_DENOMINATOR: i64 = 120_000;
/// The mean Gregorian month length in days (30.436875).
pub const AVERAGE_DAYS_PER_MONTH: f64 = 365.2425 / 12.0;

/// Year marker of the span grammar
pub const YEAR_MARKER: char = 'Y';
/// Month marker of the span grammar
pub const MONTH_MARKER: char = 'M';
/// Day marker of the span grammar
pub const DAY_MARKER: char = 'D';
/// Week designator of the ISO week date text form
pub const WEEK_MARKER: char = 'W';

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Separator between the date and time of a date-time
pub const DATE_TIME_SEPARATOR: char = 'T';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';
