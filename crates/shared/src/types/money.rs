//! Whole-rupiah amounts and the thousands-separated notation used on the form.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Rupiah has no fractional subunit in practice, so amounts are plain integers.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest amount accepted from user input.
pub const MAX_AMOUNT: i64 = 999_999_999_999_999;

/// Largest number of custom rows read per section.
///
/// Together with [`MAX_AMOUNT`] this keeps a section total of parsed input
/// well inside `i64`; arithmetic on [`Rupiah`] saturates beyond that.
pub const MAX_ROWS: usize = 1_000;

/// A signed amount of whole rupiah.
///
/// Inputs are never negative; only derived balances (closing balance) can be.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupiah(i64);

impl Rupiah {
    /// Zero rupiah.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from a whole-rupiah value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw whole-rupiah value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

// Saturating: amounts built directly (not parsed) are not bounded by MAX_AMOUNT.
impl Add for Rupiah {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Rupiah {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Rupiah {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Rupiah> for Rupiah {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for Rupiah {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_currency(self.0))
    }
}

/// How strictly user-entered numbers are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Anything that is not a plain digit string after removing separators counts as zero.
    #[default]
    Lenient,
    /// Anything that is not a plain digit string after removing separators is rejected.
    Strict,
}

/// Error returned by strict number parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The input is not a whole non-negative number.
    #[error("Not a whole rupiah amount: {0:?}")]
    Unparsable(String),
}

impl ParseMode {
    /// Parses a thousands-separated rupiah amount such as `4.113.000`.
    ///
    /// Literal `.` and `,` are removed, not interpreted. Blank input is zero.
    pub fn parse_amount(self, raw: &str) -> Result<Rupiah, AmountError> {
        self.parse_digits(raw)
            .map(|value| value.map_or(Rupiah::ZERO, Rupiah))
    }

    /// Parses an occurrence count (how many Fridays, how many payments).
    pub fn parse_count(self, raw: &str) -> Result<u32, AmountError> {
        let value = self.parse_digits(raw)?.unwrap_or(0);
        match u32::try_from(value) {
            Ok(count) => Ok(count),
            Err(_) if self == Self::Lenient => Ok(0),
            Err(_) => Err(AmountError::Unparsable(raw.trim().to_string())),
        }
    }

    fn parse_digits(self, raw: &str) -> Result<Option<i64>, AmountError> {
        let digits = strip_separators(raw);
        if digits.is_empty() {
            return Ok(None);
        }

        let parsed = digits
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| digits.parse::<i64>().ok())
            .flatten()
            .filter(|value| *value <= MAX_AMOUNT);

        match (parsed, self) {
            (Some(value), _) => Ok(Some(value)),
            (None, Self::Lenient) => Ok(None),
            (None, Self::Strict) => Err(AmountError::Unparsable(raw.trim().to_string())),
        }
    }
}

fn strip_separators(raw: &str) -> String {
    raw.trim().chars().filter(|c| !matches!(c, '.' | ',')).collect()
}

/// Parses a rupiah amount the way the paper form is filled in, coercing garbage to zero.
#[must_use]
pub fn parse_currency(raw: &str) -> Rupiah {
    ParseMode::Lenient.parse_amount(raw).unwrap_or_default()
}

/// Formats a whole-rupiah value with Indonesian digit grouping (`1.316.000`).
#[must_use]
pub fn format_currency(value: i64) -> String {
    value.to_formatted_string(&Locale::id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("4.113.000", 4_113_000)]
    #[case("1,316,000", 1_316_000)]
    #[case(" 100.000 ", 100_000)]
    #[case("", 0)]
    #[case("   ", 0)]
    #[case("0", 0)]
    #[case("Rp 100.000", 0)]
    #[case("12a", 0)]
    #[case("-5.000", 0)]
    #[case("1 000", 0)]
    #[case("99999999999999999999", 0)]
    fn test_parse_currency_lenient(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_currency(raw), Rupiah::new(expected));
    }

    #[rstest]
    #[case("Rp 100.000")]
    #[case("12a")]
    #[case("-5.000")]
    #[case("1 000")]
    #[case("99999999999999999999")]
    fn test_parse_amount_strict_rejects(#[case] raw: &str) {
        assert_eq!(
            ParseMode::Strict.parse_amount(raw),
            Err(AmountError::Unparsable(raw.trim().to_string()))
        );
    }

    #[test]
    fn test_parse_amount_strict_accepts_separators_and_blank() {
        assert_eq!(
            ParseMode::Strict.parse_amount("1.250.000"),
            Ok(Rupiah::new(1_250_000))
        );
        assert_eq!(ParseMode::Strict.parse_amount(""), Ok(Rupiah::ZERO));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(ParseMode::Lenient.parse_count("5"), Ok(5));
        assert_eq!(ParseMode::Lenient.parse_count(""), Ok(0));
        assert_eq!(ParseMode::Lenient.parse_count("lima"), Ok(0));
        assert_eq!(ParseMode::Lenient.parse_count("99999999999"), Ok(0));
        assert!(ParseMode::Strict.parse_count("lima").is_err());
        assert!(ParseMode::Strict.parse_count("99999999999").is_err());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "0");
        assert_eq!(format_currency(176_000), "176.000");
        assert_eq!(format_currency(4_429_000), "4.429.000");
        assert_eq!(format_currency(-250_000), "-250.000");
    }

    #[test]
    fn test_rupiah_arithmetic() {
        let items = [Rupiah::new(1_000), Rupiah::new(2_500)];
        let total: Rupiah = items.iter().sum();
        assert_eq!(total, Rupiah::new(3_500));
        assert_eq!(total - Rupiah::new(4_000), Rupiah::new(-500));
        assert!(total.is_positive());
        assert!(Rupiah::ZERO.is_zero());
        assert_eq!(total.to_string(), "3.500");
    }

    #[test]
    fn test_rupiah_arithmetic_saturates() {
        let max = Rupiah::new(i64::MAX);
        let min = Rupiah::new(i64::MIN);

        assert_eq!(max + Rupiah::new(1), max);
        assert_eq!(min - Rupiah::new(1), min);
        assert_eq!(Rupiah::ZERO - max - Rupiah::new(5), min);
        let total: Rupiah = [max, max, Rupiah::new(-1)].iter().sum();
        assert_eq!(total, Rupiah::new(i64::MAX - 1));
    }

    #[test]
    fn test_row_cap_keeps_sums_in_range() {
        let rows = i64::try_from(MAX_ROWS).unwrap();
        assert!(MAX_AMOUNT.checked_mul(rows + 100).is_some());
    }

    proptest! {
        /// Formatting then parsing returns the original amount.
        #[test]
        fn prop_parse_inverts_format(n in 0i64..=MAX_AMOUNT) {
            prop_assert_eq!(parse_currency(&format_currency(n)), Rupiah::new(n));
            prop_assert_eq!(
                ParseMode::Strict.parse_amount(&format_currency(n)),
                Ok(Rupiah::new(n))
            );
        }
    }
}
