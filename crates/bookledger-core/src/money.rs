//! # Money Module
//!
//! Provides the `Money` type for book prices and sale totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    15.50 × 3 × 0.9 = 41.849999999999994                                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1550 × 3 = 4650 cents, discount rounded once per unit               │
//! │    Every total is exact to the cent                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookledger_core::money::Money;
//!
//! let price = Money::from_major_minor(20, 0);                 // $20.00
//! let gross = price.checked_multiply_quantity(3).unwrap();    // $60.00
//! assert_eq!(gross.cents(), 6000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// Basis points in 100%.
const FULL_BPS: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// Signed so that intermediate differences never wrap; book prices
/// themselves are always positive (see [`crate::validation::validate_price`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use bookledger_core::money::Money;
    ///
    /// let price = Money::from_cents(1550);
    /// assert_eq!(price.to_string(), "$15.50");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, or `None` if the product overflows.
    ///
    /// ```rust
    /// use bookledger_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1875); // $18.75
    /// assert_eq!(unit_price.checked_multiply_quantity(4).unwrap().cents(), 7500);
    /// assert!(Money::from_cents(i64::MAX).checked_multiply_quantity(2).is_none());
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, pinning the result at the `i64` limits instead of
    /// wrapping.
    #[inline]
    pub const fn saturating_add(&self, other: Money) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Returns `bps` basis points of this amount, rounded half up to the cent.
    ///
    /// ```rust
    /// use bookledger_core::money::Money;
    ///
    /// // 12.5% of $10.99 = $1.37375 → $1.37
    /// assert_eq!(Money::from_cents(1099).percentage(1250).cents(), 137);
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 keeps large amounts from overflowing before the division
        let share = (self.0 as i128 * bps as i128 + FULL_BPS / 2) / FULL_BPS;
        Money::from_cents(share as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ```rust
    /// use bookledger_core::money::Money;
    ///
    /// let price = Money::from_cents(2000); // $20.00
    /// assert_eq!(price.apply_percentage_discount(1000).cents(), 1800); // 10% off
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        *self - self.percentage(discount_bps)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$D.CC`. Currency and locale are fixed.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let text = format!("{}${}.{:02}", sign, self.dollars().abs(), self.cents_part());
        // pad() so callers can align columns with `{:<10}`
        f.pad(&text)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
