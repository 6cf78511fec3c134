use serde::{Deserialize, Serialize};

use crate::ParseError;
use crate::consts::{DAY_MARKER, MONTH_MARKER, WEEK_MARKER, YEAR_MARKER};

/// Cultural conventions for parsing and formatting value objects.
///
/// A locale is always passed explicitly; nothing in this crate reads an
/// ambient "current" locale. `Display` and `FromStr` implementations use
/// [`Locale::INVARIANT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Signs")]
pub struct Locale {
    positive_sign: char,
    negative_sign: char,
}

impl Locale {
    /// ASCII `+` and `-`
    pub const INVARIANT: Self = Self {
        positive_sign: '+',
        negative_sign: '-',
    };

    /// Creates a locale with the given sign characters.
    ///
    /// The ASCII signs are always understood when parsing, so the positive
    /// sign may not be `-` and the negative sign may not be `+`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidLocale` if the signs are equal, or if
    /// either is a digit, whitespace, or a unit marker of the span grammar.
    pub fn new(positive_sign: char, negative_sign: char) -> Result<Self, ParseError> {
        for sign in [positive_sign, negative_sign] {
            if is_reserved(sign) {
                return Err(ParseError::InvalidLocale(format!("{sign:?} cannot be used as a sign")));
            }
        }
        if positive_sign == negative_sign {
            return Err(ParseError::InvalidLocale(format!(
                "positive and negative sign are both {positive_sign:?}"
            )));
        }
        if positive_sign == INVARIANT_NEGATIVE || negative_sign == INVARIANT_POSITIVE {
            return Err(ParseError::InvalidLocale(format!(
                "signs {positive_sign:?} and {negative_sign:?} contradict the ASCII signs"
            )));
        }
        Ok(Self {
            positive_sign,
            negative_sign,
        })
    }

    /// The sign written before positive (and zero) components
    pub const fn positive_sign(&self) -> char {
        self.positive_sign
    }

    /// The sign written before negative components
    pub const fn negative_sign(&self) -> char {
        self.negative_sign
    }

    /// Sign character for a value, `+` for zero
    pub(crate) const fn sign_of(&self, value: i64) -> char {
        if value < 0 { self.negative_sign } else { self.positive_sign }
    }

    /// Interprets a sign character as -1 or 1. The ASCII signs are always
    /// understood, in addition to the locale's own.
    pub(crate) fn parse_sign(&self, c: char) -> Option<i64> {
        if c == self.negative_sign || c == INVARIANT_NEGATIVE {
            Some(-1)
        } else if c == self.positive_sign || c == INVARIANT_POSITIVE {
            Some(1)
        } else {
            None
        }
    }
}

const INVARIANT_POSITIVE: char = Locale::INVARIANT.positive_sign;
const INVARIANT_NEGATIVE: char = Locale::INVARIANT.negative_sign;

/// Characters the span grammar already gives a meaning to
fn is_reserved(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_whitespace()
        || [YEAR_MARKER, MONTH_MARKER, DAY_MARKER, WEEK_MARKER]
            .iter()
            .any(|marker| marker.eq_ignore_ascii_case(&c))
}

impl Default for Locale {
    fn default() -> Self {
        Self::INVARIANT
    }
}

/// Unvalidated form of [`Locale`] read from configuration; missing signs
/// fall back to the invariant ones.
#[derive(Deserialize)]
#[serde(default)]
struct Signs {
    positive_sign: char,
    negative_sign: char,
}

impl Default for Signs {
    fn default() -> Self {
        Self {
            positive_sign: INVARIANT_POSITIVE,
            negative_sign: INVARIANT_NEGATIVE,
        }
    }
}

impl TryFrom<Signs> for Locale {
    type Error = ParseError;

    fn try_from(signs: Signs) -> Result<Self, Self::Error> {
        Self::new(signs.positive_sign, signs.negative_sign)
    }
}
