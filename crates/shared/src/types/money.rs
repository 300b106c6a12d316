//! Integer minor-unit money.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All ledger amounts are carried as `i64` minor currency units (paise,
//! cents). `rust_decimal::Decimal` is used only at the display boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in minor currency units (e.g. paise).
///
/// Wraps an `i64` so arithmetic stays exact and overflow-checked helpers
/// are available where sums of many lines are involved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MinorUnits(pub i64);

impl MinorUnits {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from raw minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw minor-unit value.
    #[must_use]
    pub const fn into_inner(self) -> i64 {
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

    /// Checked addition across many lines.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Saturating subtraction, clamped at zero for headroom math.
    #[must_use]
    pub const fn saturating_sub_floor_zero(self, other: Self) -> Self {
        let v = self.0 - other.0;
        if v < 0 {
            Self(0)
        } else {
            Self(v)
        }
    }

    /// Converts to a `Decimal` with two fractional digits for display.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }
}

impl std::fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl std::ops::Add for MinorUnits {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for MinorUnits {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl std::iter::Sum for MinorUnits {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, std::ops::Add::add)
    }
}

impl From<i64> for MinorUnits {
    fn from(minor: i64) -> Self {
        Self(minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero() {
        assert!(MinorUnits::ZERO.is_zero());
        assert!(!MinorUnits::new(1).is_zero());
    }

    #[test]
    fn test_positive() {
        assert!(MinorUnits::new(1).is_positive());
        assert!(!MinorUnits::ZERO.is_positive());
        assert!(!MinorUnits::new(-1).is_positive());
    }

    #[test]
    fn test_arithmetic() {
        let a = MinorUnits::new(100_000);
        let b = MinorUnits::new(1);
        assert_eq!(a + b, MinorUnits::new(100_001));
        assert_eq!(a - b, MinorUnits::new(99_999));
    }

    #[test]
    fn test_sum() {
        let total: MinorUnits = [100, 200, 300].into_iter().map(MinorUnits::new).sum();
        assert_eq!(total, MinorUnits::new(600));
    }

    #[test]
    fn test_saturating_sub_floor_zero() {
        let a = MinorUnits::new(50);
        let b = MinorUnits::new(80);
        assert_eq!(a.saturating_sub_floor_zero(b), MinorUnits::ZERO);
        assert_eq!(b.saturating_sub_floor_zero(a), MinorUnits::new(30));
    }

    #[test]
    fn test_to_decimal_display() {
        // 1000.01 rupees is 100001 paise
        assert_eq!(MinorUnits::new(100_001).to_decimal(), dec!(1000.01));
        assert_eq!(MinorUnits::new(100_001).to_string(), "1000.01");
    }

    #[test]
    fn test_checked_add_overflow() {
        assert!(MinorUnits::new(i64::MAX)
            .checked_add(MinorUnits::new(1))
            .is_none());
    }
}
