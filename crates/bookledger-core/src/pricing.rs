//! # Sale Pricing
//!
//! Discount resolution and the per-sale money math.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  requested discount (%)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  resolve_discount() ── outside 0..=100? ──► 0% + DiscountAdvisory       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  discount_amount      = unit_price × bps / 10000   (rounded to cent)    │
//! │  price_after_discount = unit_price − discount_amount                    │
//! │  gross_total          = unit_price × quantity       (checked)           │
//! │  net_total            = price_after_discount × quantity  (checked)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::DiscountRate;
use crate::validation::ValidationResult;

/// Non-fatal signal returned alongside a sale whose requested discount was
/// replaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DiscountAdvisory {
    /// The requested percentage was outside 0-100 and 0% was applied.
    Clamped { requested: f64 },
}

impl fmt::Display for DiscountAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountAdvisory::Clamped { requested } => write!(
                f,
                "Discount percentage must be between 0 and 100 (got {}); 0% applied",
                requested
            ),
        }
    }
}

/// Turns a requested percentage into the rate that will actually be applied.
///
/// Out-of-range input is corrected to zero rather than rejected.
///
/// ```rust
/// use bookledger_core::pricing::{resolve_discount, DiscountAdvisory};
///
/// let (rate, advisory) = resolve_discount(10.0);
/// assert_eq!(rate.bps(), 1000);
/// assert!(advisory.is_none());
///
/// let (rate, advisory) = resolve_discount(150.0);
/// assert!(rate.is_zero());
/// assert_eq!(advisory, Some(DiscountAdvisory::Clamped { requested: 150.0 }));
/// ```
pub fn resolve_discount(requested_pct: f64) -> (DiscountRate, Option<DiscountAdvisory>) {
    match DiscountRate::checked_from_percentage(requested_pct) {
        Some(rate) => (rate, None),
        None => (
            DiscountRate::zero(),
            Some(DiscountAdvisory::Clamped {
                requested: requested_pct,
            }),
        ),
    }
}

/// Derived money values for one sale line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTotals {
    pub unit_price: Money,
    pub discount_amount: Money,
    pub price_after_discount: Money,
    pub gross_total: Money,
    pub net_total: Money,
}

impl SaleTotals {
    /// Computes the totals for `quantity` units at `unit_price`.
    ///
    /// The discount is rounded once per unit, then multiplied, so
    /// `net_total` is always an exact multiple of `price_after_discount`.
    ///
    /// ## Errors
    /// `OutOfRange` if a total does not fit in `i64` cents. Catalog bounds
    /// (see [`crate::validation::MAX_PRICE_CENTS`]) keep stored books well
    /// clear of this.
    pub fn compute(
        unit_price: Money,
        quantity: i64,
        discount: DiscountRate,
    ) -> ValidationResult<Self> {
        let price_after_discount = unit_price.apply_percentage_discount(discount.bps());
        let discount_amount = unit_price - price_after_discount;

        let overflow = || ValidationError::OutOfRange {
            field: "sale total".to_string(),
            min: 0,
            max: i64::MAX,
        };
        let gross_total = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(overflow)?;
        let net_total = price_after_discount
            .checked_multiply_quantity(quantity)
            .ok_or_else(overflow)?;

        Ok(SaleTotals {
            unit_price,
            discount_amount,
            price_after_discount,
            gross_total,
            net_total,
        })
    }
}
