//! # Validation Module
//!
//! Input validation for values handed to the catalog and the ledger.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Interactive front end (not part of this workspace)           │
//! │  ├── Re-prompts until a positive number / non-empty string is typed    │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Re-checks positivity and emptiness regardless of layer 1          │
//! │  └── Returns ValidationError, never panics                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookledger_core::money::Money;
//! use bookledger_core::validation::{validate_price, validate_quantity, validate_text};
//!
//! assert!(validate_text("title", "Dune").is_ok());
//! assert!(validate_price(Money::from_cents(1299)).is_ok());
//! assert!(validate_quantity("quantity", 0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Highest accepted unit price: $1,000,000.00.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Highest accepted unit count, for stock and for a single sale.
///
/// Together with [`MAX_PRICE_CENTS`] this keeps one sale's total below
/// 10^14 cents, far inside `i64`.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Validates a required free-text field and returns it trimmed.
pub fn validate_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a book price.
///
/// ## Rules
/// - Must be positive (zero is not a valid price)
/// - Must not exceed [`MAX_PRICE_CENTS`]
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 1,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a unit count (stock on registration/update, or units sold).
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed [`MAX_QUANTITY`]
pub fn validate_quantity(field: &str, qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

/// The five mutable fields of a book, validated together.
///
/// Used by both registration and full update, which share the same rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: Money,
    pub quantity: i64,
}

impl BookFields {
    /// Checks every field and trims the text ones.
    pub fn validate(
        title: &str,
        author: &str,
        category: &str,
        price: Money,
        quantity: i64,
    ) -> ValidationResult<Self> {
        let title = validate_text("title", title)?;
        let author = validate_text("author", author)?;
        let category = validate_text("category", category)?;
        validate_price(price)?;
        validate_quantity("quantity", quantity)?;

        Ok(BookFields {
            title,
            author,
            category,
            price,
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text() {
        assert_eq!(validate_text("title", "  Dune ").unwrap(), "Dune");
        assert_eq!(
            validate_text("author", "   "),
            Err(ValidationError::Required {
                field: "author".to_string()
            })
        );
        assert!(validate_text("category", "").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::from_cents(2500)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());

        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert_eq!(
            validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 1,
                max: MAX_PRICE_CENTS
            })
        );
        assert!(validate_price(Money::from_cents(4_000_000_000_000_000_000)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity("quantity", 1).is_ok());
        assert!(validate_quantity("quantity", 1_000_000).is_ok());
        assert!(validate_quantity("quantity", 0).is_err());
        assert!(validate_quantity("quantity", -1).is_err());

        assert!(matches!(
            validate_quantity("quantity", MAX_QUANTITY + 1),
            Err(ValidationError::OutOfRange { max: MAX_QUANTITY, .. })
        ));
        assert!(validate_quantity("quantity", i64::MAX).is_err());
    }

    #[test]
    fn test_book_fields_validate() {
        let fields = BookFields::validate(" 1984 ", "George Orwell", "Dystopian", Money::from_cents(1200), 120)
            .unwrap();
        assert_eq!(fields.title, "1984");
        assert_eq!(fields.quantity, 120);

        let err = BookFields::validate("1984", "", "Dystopian", Money::from_cents(1200), 120).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "author".to_string()
            }
        );

        let err = BookFields::validate("1984", "Orwell", "Dystopian", Money::zero(), 120).unwrap_err();
        assert!(matches!(err, ValidationError::MustBePositive { ref field } if field == "price"));

        let err = BookFields::validate("1984", "Orwell", "Dystopian", Money::from_cents(1), 0).unwrap_err();
        assert!(matches!(err, ValidationError::MustBePositive { ref field } if field == "quantity"));
    }
}
