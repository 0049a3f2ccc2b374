//! # bookledger-core: Pure Business Logic for Bookledger
//!
//! This crate contains the domain types and calculations of the bookshop
//! ledger as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookledger Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Front end (menus, prompts - not in this workspace)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ already-typed values                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bookledger-store                             │   │
//! │  │    CatalogStore, SalesLedger, ReportingEngine, Bookstore        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ bookledger-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ │   │
//! │  │   │  types  │ │  money  │ │ pricing │ │validation│ │ invoice │ │   │
//! │  │   │  Book   │ │  Money  │ │ Totals  │ │  rules   │ │ receipt │ │   │
//! │  │   │  Sale   │ │         │ │Advisory │ │          │ │  text   │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (BookId, Book, Sale, DiscountRate)
//! - [`money`] - Money type with integer arithmetic
//! - [`pricing`] - Discount resolution and sale totals
//! - [`validation`] - Input rules shared by catalog and ledger
//! - [`invoice`] - Receipt rendering
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bookledger_core::money::Money;
//! use bookledger_core::pricing::{resolve_discount, SaleTotals};
//!
//! let (discount, advisory) = resolve_discount(10.0);
//! assert!(advisory.is_none());
//!
//! let totals = SaleTotals::compute(Money::from_cents(2000), 3, discount).unwrap();
//! assert_eq!(totals.price_after_discount.cents(), 1800);
//! assert_eq!(totals.net_total.cents(), 5400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::InvoiceFormatter;
pub use money::Money;
pub use pricing::{DiscountAdvisory, SaleTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Title shown in reports for a book that has since been deleted.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Number of rows in the best-sellers report unless configured otherwise.
pub const DEFAULT_TOP_SELLERS: usize = 3;
