//! # Reporting Engine
//!
//! Read-only aggregations over the ledger, joined with the catalog as it is
//! *now* (not as it was when each sale happened).
//!
//! ## Reports
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  top_sold_books(n)                                                      │
//! │    sales ──group by book id (first-seen order)──► Σ quantity            │
//! │          ──stable sort desc──► take n ──► title from catalog            │
//! │                                           ("Unknown" if deleted)       │
//! │                                                                         │
//! │  sales_by_author()                                                      │
//! │    sales ──book still in catalog?──┬── yes ──► group by current author  │
//! │                                    │           Σ qty, Σ gross, Σ net    │
//! │                                    └── no ───► ReportWarning, skipped   │
//! │          ──► rows ordered by author (ordinal, case-sensitive)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use bookledger_core::{BookId, Money, UNKNOWN_TITLE};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::CatalogStore;
use crate::ledger::SalesLedger;

// =============================================================================
// Report Rows
// =============================================================================

/// One line of the best-sellers report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSellerRow {
    /// 1-based position.
    pub rank: usize,
    pub book_id: BookId,
    /// Current catalog title, or [`UNKNOWN_TITLE`] if the book was deleted.
    pub title: String,
    pub quantity_sold: i64,
}

/// Accumulated sales for one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSalesRow {
    pub author: String,
    pub quantity_sold: i64,
    pub gross_total: Money,
    pub net_total: Money,
}

/// Something the author report had to leave out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportWarning {
    /// The sale's book is no longer in the catalog, so it has no author.
    MissingBook {
        /// 1-based position of the sale in the ledger.
        sale_number: usize,
        book_id: BookId,
    },
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::MissingBook {
                sale_number,
                book_id,
            } => write!(
                f,
                "Book ID '{}' in sale #{} not found in current book inventory; sale left out of author totals",
                book_id, sale_number
            ),
        }
    }
}

/// Result of [`ReportingEngine::sales_by_author`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorReport {
    pub rows: Vec<AuthorSalesRow>,
    pub warnings: Vec<ReportWarning>,
}

impl AuthorReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Borrowed view over a catalog and a ledger.
#[derive(Debug, Clone, Copy)]
pub struct ReportingEngine<'a> {
    catalog: &'a CatalogStore,
    ledger: &'a SalesLedger,
}

impl<'a> ReportingEngine<'a> {
    pub fn new(catalog: &'a CatalogStore, ledger: &'a SalesLedger) -> Self {
        ReportingEngine { catalog, ledger }
    }

    /// The `n` books with the most units sold.
    ///
    /// Books with equal totals keep the order in which they first appear in
    /// the ledger. No sales (or `n == 0`) gives an empty list.
    pub fn top_sold_books(&self, n: usize) -> Vec<TopSellerRow> {
        let mut totals: Vec<(BookId, i64)> = Vec::new();
        let mut slot: HashMap<BookId, usize> = HashMap::new();

        for sale in self.ledger.list_sales() {
            match slot.get(&sale.book_id) {
                Some(&i) => totals[i].1 = totals[i].1.saturating_add(sale.quantity),
                None => {
                    slot.insert(sale.book_id, totals.len());
                    totals.push((sale.book_id, sale.quantity));
                }
            }
        }

        // sort_by is stable: ties stay in first-seen order
        totals.sort_by(|a, b| b.1.cmp(&a.1));

        totals
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, (book_id, quantity_sold))| TopSellerRow {
                rank: i + 1,
                book_id,
                title: self
                    .catalog
                    .get(book_id)
                    .map(|book| book.title.clone())
                    .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
                quantity_sold,
            })
            .collect()
    }

    /// Quantity, gross and net per author, sorted by author name.
    ///
    /// The author is looked up at report time. Sales whose book has been
    /// deleted are skipped and listed in [`AuthorReport::warnings`].
    /// Sums saturate at the `i64` limit rather than overflow.
    pub fn sales_by_author(&self) -> AuthorReport {
        let mut by_author: BTreeMap<String, AuthorSalesRow> = BTreeMap::new();
        let mut warnings = Vec::new();

        for (i, sale) in self.ledger.list_sales().iter().enumerate() {
            let Some(book) = self.catalog.get(sale.book_id) else {
                let warning = ReportWarning::MissingBook {
                    sale_number: i + 1,
                    book_id: sale.book_id,
                };
                warn!(book_id = %sale.book_id, sale_number = i + 1, "{}", warning);
                warnings.push(warning);
                continue;
            };

            let row = by_author
                .entry(book.author.clone())
                .or_insert_with(|| AuthorSalesRow {
                    author: book.author.clone(),
                    quantity_sold: 0,
                    gross_total: Money::zero(),
                    net_total: Money::zero(),
                });
            row.quantity_sold = row.quantity_sold.saturating_add(sale.quantity);
            row.gross_total = row.gross_total.saturating_add(sale.gross_total);
            row.net_total = row.net_total.saturating_add(sale.net_total);
        }

        AuthorReport {
            rows: by_author.into_values().collect(),
            warnings,
        }
    }
}
