//! # Money Module
//!
//! Monetary values as integer minor units (cents / paise). Every amount in
//! the system flows through [`Money`]; only renderers convert to a decimal
//! string for display.
//!
//! ## Usage
//! ```rust
//! use atrium_core::money::Money;
//!
//! let price = Money::from_cents(15000); // 150.00
//! let line = price * 2;                 // 300.00
//! assert_eq!(line.cents(), 30000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// Signed so that discounts and corrections can go negative; a single-field
/// tuple struct, so it costs nothing over a bare `i64`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a value from minor units.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a value from major units (whole rupees/dollars).
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major-unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Tax on this amount at the given rate.
    ///
    /// Integer math: `(cents × bps + 5000) / 10000`, i.e. rounded to the
    /// nearest cent, half away from zero. Intermediate math is i128 so large
    /// amounts cannot overflow.
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// The portion of this amount at `bps` basis points, rounded like
    /// [`Money::calculate_tax`]. Used for whole-order percentage discounts.
    pub fn percentage(&self, bps: u32) -> Money {
        let part = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(part as i64)
    }

    /// Multiplies by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as a plain decimal string (`337.50`, `-5.50`). Currency symbols
/// are the renderer's business, not the amount's.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_cents_round_trip() {
        let m = Money::from_cents(15050);
        assert_eq!(m.cents(), 15050);
        assert_eq!(m.major(), 150);
        assert_eq!(m.minor_part(), 50);
    }

    #[test]
    fn display_plain_decimal() {
        assert_eq!(Money::from_cents(33750).to_string(), "337.50");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn tax_exact_and_rounded() {
        // 300.00 at 5% = 15.00 exactly
        let line = Money::from_cents(30000);
        assert_eq!(line.calculate_tax(TaxRate::from_bps(500)).cents(), 1500);

        // 10.00 at 8.25% = 0.825 → rounds to 0.83
        let amount = Money::from_cents(1000);
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(825)).cents(), 83);
    }

    #[test]
    fn percentage_portion() {
        // 10% of 375.00 = 37.50
        let gross = Money::from_cents(37500);
        assert_eq!(gross.percentage(1000).cents(), 3750);
        assert_eq!(gross.percentage(0).cents(), 0);
    }

    #[test]
    fn multiply_quantity() {
        let unit = Money::from_cents(299);
        assert_eq!(unit.multiply_quantity(3).cents(), 897);
    }
}
