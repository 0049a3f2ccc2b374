//! # Sales Ledger
//!
//! Records sales against the catalog and keeps them in an append-only list.
//!
//! ## Sale Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       record_sale()                                     │
//! │                                                                         │
//! │  1. RESOLVE     book id ──► catalog            (BookNotFound)          │
//! │  2. VALIDATE    client name, 1 <= qty <= stock (Validation,            │
//! │                                                 InsufficientStock)     │
//! │  3. DISCOUNT    outside 0..=100 ──► 0% + advisory (never an error)     │
//! │  4. PRICE       SaleTotals::compute            (Validation: overflow)  │
//! │  ─────────────────────── nothing can fail below ─────────────────────  │
//! │  5. COMMIT      stock -= qty  AND  sales.push(sale)                    │
//! │  6. RETURN      RecordedSale { sale, advisory }                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both steps of the commit take `&mut` borrows, so with a single owner no
//! other operation can observe the catalog between them.

use bookledger_core::pricing::resolve_discount;
use bookledger_core::validation::{validate_quantity, validate_text};
use bookledger_core::{CoreError, CoreResult, DiscountAdvisory, Sale};
use chrono::Utc;
use tracing::{debug, warn};

use crate::catalog::CatalogStore;

/// Outcome of a successful [`SalesLedger::record_sale`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSale {
    /// Copy of the sale as stored in the ledger.
    pub sale: Sale,

    /// Set when the requested discount was replaced by 0%.
    pub advisory: Option<DiscountAdvisory>,

    /// Stock left after this sale.
    pub remaining_stock: i64,
}

/// Append-only list of completed sales.
#[derive(Debug, Default)]
pub struct SalesLedger {
    sales: Vec<Sale>,
}

impl SalesLedger {
    pub fn new() -> Self {
        SalesLedger { sales: Vec::new() }
    }

    /// Sells `quantity` units of a book to `client_name`.
    ///
    /// ## Errors
    /// - `BookNotFound` if `book_id` is not in `catalog`
    /// - `Validation` if the client name is empty or `quantity < 1`
    /// - `InsufficientStock` if `quantity` exceeds the stock (nothing is sold)
    ///
    /// An out-of-range discount is not an error: 0% is applied and
    /// [`RecordedSale::advisory`] says so.
    pub fn record_sale(
        &mut self,
        catalog: &mut CatalogStore,
        book_id: &str,
        client_name: &str,
        quantity: i64,
        discount_percentage: f64,
    ) -> CoreResult<RecordedSale> {
        let book = catalog
            .get_by_id(book_id)
            .ok_or_else(|| CoreError::BookNotFound(book_id.trim().to_uppercase()))?;

        let client_name = validate_text("client name", client_name)?;
        validate_quantity("quantity", quantity)?;

        if !book.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                book_id: book.id.to_string(),
                available: book.quantity,
                requested: quantity,
            });
        }

        let (discount, advisory) = resolve_discount(discount_percentage);
        if let Some(advisory) = &advisory {
            warn!(book_id = %book.id, requested = discount_percentage, "{}", advisory);
        }

        let sale = Sale::from_book(book, client_name, quantity, discount, Utc::now())?;

        // Every check above has passed; stock is known to cover `quantity`.
        let remaining_stock = catalog.withdraw_stock(sale.book_id, quantity)?;
        self.sales.push(sale.clone());

        debug!(
            book_id = %sale.book_id,
            client = %sale.client_name,
            quantity,
            net_total = %sale.net_total,
            remaining_stock,
            "Recorded sale"
        );

        Ok(RecordedSale {
            sale,
            advisory,
            remaining_stock,
        })
    }

    /// All sales in the order they were recorded.
    ///
    /// Display numbering (`1.`, `2.`, ...) is positional only; a sale has no
    /// identity of its own.
    pub fn list_sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}
