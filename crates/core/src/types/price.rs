//! Integer prices in Vietnamese dong.
//!
//! Prices are whole amounts of the smallest unit the store sells in; there is
//! no fractional part, so no rounding happens anywhere.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Currency glyph appended after the number, with no separating space.
pub const CURRENCY_SUFFIX: char = '₫';

/// Thousands separator used by the `vi-VN` locale.
const GROUP_SEPARATOR: char = '.';

/// A non-negative price in whole dong.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Add two prices, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Format for display (e.g. `34.990.000₫`).
    #[must_use]
    pub fn display(self) -> String {
        format_vnd(self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_vnd(self.0))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

/// Format an amount the way `Intl.NumberFormat('vi-VN')` does, followed by `₫`.
///
/// ```
/// use technest_core::format_vnd;
///
/// assert_eq!(format_vnd(0), "0₫");
/// assert_eq!(format_vnd(34_990_000), "34.990.000₫");
/// ```
#[must_use]
pub fn format_vnd(amount: u64) -> String {
    let digits = amount.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 + CURRENCY_SUFFIX.len_utf8());

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }

    out.push(CURRENCY_SUFFIX);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_amounts() {
        assert_eq!(format_vnd(0), "0₫");
        assert_eq!(format_vnd(7), "7₫");
        assert_eq!(format_vnd(999), "999₫");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_vnd(1_000), "1.000₫");
        assert_eq!(format_vnd(250_000), "250.000₫");
        assert_eq!(format_vnd(6_490_000), "6.490.000₫");
        assert_eq!(format_vnd(34_990_000), "34.990.000₫");
    }

    #[test]
    fn test_format_max() {
        assert_eq!(format_vnd(u64::MAX), "18.446.744.073.709.551.615₫");
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Price::new(100).times(3), Price::new(300));
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }

    #[test]
    fn test_display_matches_formatter() {
        assert_eq!(Price::new(1_990_000).to_string(), "1.990.000₫");
        assert_eq!(Price::new(1_990_000).display(), "1.990.000₫");
    }
}
