//! # Domain Types
//!
//! Core domain types used throughout Bookledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │     Book        │   │        Sale          │   │  DiscountRate   │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  id (B001)      │◄──│  book_id             │   │  bps (u32)      │  │
//! │  │  title          │   │  title_snapshot      │   │  1000 = 10%     │  │
//! │  │  author         │   │  unit_price          │   └─────────────────┘  │
//! │  │  category       │   │  discount            │                        │
//! │  │  price          │   │  gross / net totals  │                        │
//! │  │  quantity       │   │  sold_at             │                        │
//! │  └─────────────────┘   └──────────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A [`Sale`] copies the title and price of its book at sale time. Later
//! edits to the book, or its deletion, never change a recorded sale.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::pricing::SaleTotals;

/// Timestamp layout used on invoices and sales listings.
pub const SALE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a sale timestamp in the given zone.
pub fn format_sale_timestamp<Tz: TimeZone>(at: &DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    at.with_timezone(zone).format(SALE_TIMESTAMP_FORMAT).to_string()
}

// =============================================================================
// Book Id
// =============================================================================

/// Sequential book identifier: `B` followed by a counter padded to at least
/// three digits (`B001`, `B042`, `B1000`).
///
/// Internally only the counter is stored; the text form is always the
/// canonical rendering of it, so `B1` and `B0001` are not aliases of `B001`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookId(u64);

impl BookId {
    /// Leading letter of every book id.
    pub const PREFIX: char = 'B';

    /// Builds the id for the given counter value.
    #[inline]
    pub const fn from_sequence(sequence: u64) -> Self {
        BookId(sequence)
    }

    /// The counter value behind this id.
    #[inline]
    pub const fn sequence(&self) -> u64 {
        self.0
    }

    /// Parses user-supplied text into a book id.
    ///
    /// Surrounding whitespace is ignored and the prefix is case-insensitive.
    ///
    /// ```rust
    /// use bookledger_core::types::BookId;
    ///
    /// assert_eq!(BookId::parse(" b007 ").unwrap().to_string(), "B007");
    /// assert_eq!(BookId::parse("B1000").unwrap().sequence(), 1000);
    /// assert!(BookId::parse("B7").is_err());
    /// assert!(BookId::parse("X001").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(ValidationError::Required {
                field: "book id".to_string(),
            });
        }

        let invalid = || ValidationError::InvalidFormat {
            field: "book id".to_string(),
            reason: format!("'{}' is not of the form B001", normalized),
        };

        let digits = normalized.strip_prefix(Self::PREFIX).ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let sequence: u64 = digits.parse().map_err(|_| invalid())?;

        let id = BookId(sequence);
        if id.to_string() != normalized {
            return Err(invalid());
        }
        Ok(id)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{}{:03}", Self::PREFIX, self.0);
        f.pad(&text)
    }
}

impl FromStr for BookId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookId::parse(s)
    }
}

impl TryFrom<String> for BookId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BookId::parse(&value)
    }
}

impl From<BookId> for String {
    fn from(id: BookId) -> Self {
        id.to_string()
    }
}

// =============================================================================
// Book
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Assigned by the catalog at registration, never reassigned.
    pub id: BookId,

    pub title: String,

    pub author: String,

    /// Free-text category ("Fantasy", "Classics", ...).
    pub category: String,

    /// Unit price, always positive.
    pub price: Money,

    /// Units in stock, never negative.
    pub quantity: i64,
}

impl Book {
    /// Checks whether `quantity` units can be sold in one sale.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity >= 1 && quantity <= self.quantity
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount represented in basis points (1 bps = 0.01%).
///
/// 1000 bps = 10%. Percentages with more than two decimals are rounded to
/// the nearest basis point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100%.
    pub const MAX_BPS: u32 = 10_000;

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Converts a percentage in `[0, 100]`; anything else (including NaN)
    /// yields `None`.
    ///
    /// ```rust
    /// use bookledger_core::types::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::checked_from_percentage(12.5).unwrap().bps(), 1250);
    /// assert!(DiscountRate::checked_from_percentage(150.0).is_none());
    /// assert!(DiscountRate::checked_from_percentage(-1.0).is_none());
    /// ```
    pub fn checked_from_percentage(pct: f64) -> Option<Self> {
        if !(0.0..=100.0).contains(&pct) {
            return None;
        }
        Some(DiscountRate((pct * 100.0).round() as u32))
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Renders as `12.50%`.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{}.{:02}%", self.0 / 100, self.0 % 100);
        f.pad(&text)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One completed sale. Never mutated once it is in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub client_name: String,
    pub book_id: BookId,
    /// Book title at time of sale (frozen).
    pub title_snapshot: String,
    pub quantity: i64,
    /// Book price at time of sale (frozen).
    pub unit_price: Money,
    pub discount: DiscountRate,
    pub price_after_discount: Money,
    /// unit_price × quantity
    pub gross_total: Money,
    /// price_after_discount × quantity
    pub net_total: Money,
    pub sold_at: DateTime<Utc>,
}

impl Sale {
    /// Builds a sale of `quantity` units of `book`, snapshotting its title and
    /// price.
    ///
    /// No stock checks happen here; the ledger performs them before calling
    /// this. Fails only if the totals overflow.
    pub fn from_book(
        book: &Book,
        client_name: impl Into<String>,
        quantity: i64,
        discount: DiscountRate,
        sold_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let totals = SaleTotals::compute(book.price, quantity, discount)?;
        Ok(Sale {
            client_name: client_name.into(),
            book_id: book.id,
            title_snapshot: book.title.clone(),
            quantity,
            unit_price: totals.unit_price,
            discount,
            price_after_discount: totals.price_after_discount,
            gross_total: totals.gross_total,
            net_total: totals.net_total,
            sold_at,
        })
    }

    /// Sale timestamp in the machine's local zone, as shown on invoices and
    /// listings. `sold_at` itself stays in UTC.
    pub fn sold_at_display(&self) -> String {
        format_sale_timestamp(&self.sold_at, &Local)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_book(price_cents: i64, quantity: i64) -> Book {
        Book {
            id: BookId::from_sequence(1),
            title: "The Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            category: "Fantasy".to_string(),
            price: Money::from_cents(price_cents),
            quantity,
        }
    }

    #[test]
    fn test_book_id_display_pads_and_widens() {
        assert_eq!(BookId::from_sequence(1).to_string(), "B001");
        assert_eq!(BookId::from_sequence(42).to_string(), "B042");
        assert_eq!(BookId::from_sequence(999).to_string(), "B999");
        assert_eq!(BookId::from_sequence(1000).to_string(), "B1000");
        assert_eq!(BookId::from_sequence(123456).to_string(), "B123456");
    }

    #[test]
    fn test_book_id_parse() {
        assert_eq!(BookId::parse("B001").unwrap(), BookId::from_sequence(1));
        assert_eq!(BookId::parse("b001").unwrap(), BookId::from_sequence(1));
        assert_eq!(BookId::parse("  B1000\n").unwrap(), BookId::from_sequence(1000));

        assert!(matches!(
            BookId::parse("   "),
            Err(ValidationError::Required { .. })
        ));
        for bad in ["B", "B1", "B0001", "001", "BX01", "B-01", "B99999999999999999999999"] {
            assert!(
                matches!(BookId::parse(bad), Err(ValidationError::InvalidFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_book_id_orders_by_sequence() {
        assert!(BookId::from_sequence(999) < BookId::from_sequence(1000));
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        assert_eq!(DiscountRate::checked_from_percentage(0.0), Some(DiscountRate::zero()));
        assert_eq!(DiscountRate::checked_from_percentage(100.0).unwrap().bps(), 10_000);
        assert_eq!(DiscountRate::checked_from_percentage(10.0).unwrap().bps(), 1000);
        assert!(DiscountRate::checked_from_percentage(100.01).is_none());
        assert!(DiscountRate::checked_from_percentage(f64::NAN).is_none());
        assert!(DiscountRate::checked_from_percentage(f64::INFINITY).is_none());
    }

    #[test]
    fn test_discount_rate_display() {
        assert_eq!(DiscountRate::from_bps(1000).to_string(), "10.00%");
        assert_eq!(DiscountRate::from_bps(1250).to_string(), "12.50%");
        assert_eq!(DiscountRate::zero().to_string(), "0.00%");
    }

    #[test]
    fn test_book_can_sell() {
        let book = test_book(2000, 10);
        assert!(book.can_sell(1));
        assert!(book.can_sell(10));
        assert!(!book.can_sell(11));
        assert!(!book.can_sell(0));
        assert!(!book.can_sell(-3));
    }

    #[test]
    fn test_sale_from_book_snapshots_book() {
        let mut book = test_book(2000, 10);
        let sold_at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        let sale = Sale::from_book(&book, "Ana", 3, DiscountRate::from_bps(1000), sold_at).unwrap();

        book.title = "Renamed".to_string();
        book.price = Money::from_cents(9900);

        assert_eq!(sale.title_snapshot, "The Hobbit");
        assert_eq!(sale.unit_price.cents(), 2000);
        assert_eq!(sale.price_after_discount.cents(), 1800);
        assert_eq!(sale.gross_total.cents(), 6000);
        assert_eq!(sale.net_total.cents(), 5400);
        assert_eq!(format_sale_timestamp(&sale.sold_at, &Utc), "2024-03-09 14:05:00");
        assert_eq!(
            sale.sold_at_display(),
            sold_at.with_timezone(&Local).format(SALE_TIMESTAMP_FORMAT).to_string()
        );
    }

    #[test]
    fn test_sale_from_book_rejects_overflowing_totals() {
        let book = test_book(4_000_000_000_000_000_000, 5);
        let sold_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let err = Sale::from_book(&book, "Ana", 3, DiscountRate::zero(), sold_at).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
    }

    #[test]
    fn test_sale_serializes_book_id_as_text() {
        let sold_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let sale = Sale::from_book(&test_book(1000, 5), "Ana", 1, DiscountRate::zero(), sold_at).unwrap();

        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["book_id"], "B001");

        let back: Sale = serde_json::from_value(json).unwrap();
        assert_eq!(back, sale);
    }
}
