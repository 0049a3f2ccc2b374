//! # Bookstore Context
//!
//! The single owner of all runtime state.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bookstore                                       │
//! │                                                                         │
//! │   ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐   │
//! │   │  CatalogStore    │   │   SalesLedger    │   │   StoreConfig    │   │
//! │   │  books + counter │◄──│   Vec<Sale>      │   │   read-only      │   │
//! │   └──────────────────┘   └──────────────────┘   └──────────────────┘   │
//! │            ▲                      ▲                                     │
//! │            └────── ReportingEngine (borrows both, read-only) ──────     │
//! │                                                                         │
//! │   Dropped at process exit. Nothing is persisted.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! `Bookstore` itself is single-owner: mutation needs `&mut self`, which is
//! what keeps "decrement stock" and "append sale" together. Callers that
//! need to share one store across threads use [`SharedBookstore`], which
//! puts the whole context behind one `Mutex`.

use std::sync::{Arc, Mutex, PoisonError};

use bookledger_core::{CoreResult, Sale};
use tracing::info;

use crate::catalog::CatalogStore;
use crate::config::StoreConfig;
use crate::ledger::{RecordedSale, SalesLedger};
use crate::preload::load_starter_books;
use crate::report::{AuthorReport, ReportingEngine, TopSellerRow};

/// Catalog, ledger and configuration for one run.
///
/// ## Example
/// ```rust
/// use bookledger_core::Money;
/// use bookledger_store::{Bookstore, StoreConfig};
///
/// let mut store = Bookstore::new(StoreConfig::default().preload_catalog(false)).unwrap();
/// let id = store
///     .catalog_mut()
///     .create("Dune", "Frank Herbert", "Sci-Fi", Money::from_cents(2000), 10)
///     .unwrap();
///
/// let recorded = store.record_sale(&id.to_string(), "Ana", 3, 10.0).unwrap();
/// assert_eq!(recorded.sale.net_total.cents(), 5400);
/// assert_eq!(store.catalog().get(id).unwrap().quantity, 7);
/// ```
#[derive(Debug)]
pub struct Bookstore {
    catalog: CatalogStore,
    ledger: SalesLedger,
    config: StoreConfig,
}

impl Bookstore {
    /// Creates a store, registering the starter books if configured to.
    pub fn new(config: StoreConfig) -> CoreResult<Self> {
        let mut catalog = CatalogStore::new();
        if config.preload_catalog {
            load_starter_books(&mut catalog)?;
        }

        info!(
            store_name = %config.store_name,
            books = catalog.len(),
            "Bookstore ready"
        );

        Ok(Bookstore {
            catalog,
            ledger: SalesLedger::new(),
            config,
        })
    }

    /// Creates a store with an empty catalog and default settings.
    pub fn empty() -> Self {
        Bookstore {
            catalog: CatalogStore::new(),
            ledger: SalesLedger::new(),
            config: StoreConfig::default().preload_catalog(false),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Catalog access for create / update / delete.
    pub fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    /// Records a sale against this store's catalog.
    ///
    /// See [`SalesLedger::record_sale`] for the rules.
    pub fn record_sale(
        &mut self,
        book_id: &str,
        client_name: &str,
        quantity: i64,
        discount_percentage: f64,
    ) -> CoreResult<RecordedSale> {
        self.ledger.record_sale(
            &mut self.catalog,
            book_id,
            client_name,
            quantity,
            discount_percentage,
        )
    }

    /// All sales in the order they were recorded.
    pub fn list_sales(&self) -> &[Sale] {
        self.ledger.list_sales()
    }

    pub fn reports(&self) -> ReportingEngine<'_> {
        ReportingEngine::new(&self.catalog, &self.ledger)
    }

    /// Best sellers using the configured row count.
    pub fn top_sold_books(&self) -> Vec<TopSellerRow> {
        self.reports().top_sold_books(self.config.top_sellers_limit)
    }

    pub fn sales_by_author(&self) -> AuthorReport {
        self.reports().sales_by_author()
    }

    /// Renders an invoice at the configured width.
    pub fn render_invoice(&self, sale: &Sale) -> String {
        self.config.invoice_formatter().render(sale)
    }
}

impl Default for Bookstore {
    fn default() -> Self {
        Self::empty()
    }
}

/// A [`Bookstore`] that can be shared between threads.
///
/// Every closure runs with the lock held, so a sale's stock decrement and
/// ledger append form one critical section.
#[derive(Debug, Clone)]
pub struct SharedBookstore {
    inner: Arc<Mutex<Bookstore>>,
}

impl SharedBookstore {
    pub fn new(store: Bookstore) -> Self {
        SharedBookstore {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust
    /// use bookledger_store::{Bookstore, SharedBookstore};
    ///
    /// let shared = SharedBookstore::new(Bookstore::empty());
    /// let count = shared.with_store(|store| store.list_sales().len());
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Bookstore) -> R,
    {
        // record_sale has no panic point between its two writes
        let store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Bookstore) -> R,
    {
        let mut store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookledger_core::{CoreError, Money};
    use std::thread;

    #[test]
    fn test_new_preloads_by_default() {
        let store = Bookstore::new(StoreConfig::default()).unwrap();
        assert_eq!(store.catalog().len(), 6);
        assert!(store.list_sales().is_empty());
        assert_eq!(
            store.catalog().get_by_id("B006").unwrap().title,
            "A Game of Thrones"
        );
    }

    #[test]
    fn test_new_without_preload_is_empty() {
        let store = Bookstore::new(StoreConfig::default().preload_catalog(false)).unwrap();
        assert!(store.catalog().is_empty());
        assert!(Bookstore::empty().catalog().is_empty());
    }

    #[test]
    fn test_record_sale_reference_scenario() {
        let mut store = Bookstore::empty();
        let id = store
            .catalog_mut()
            .create("Dune", "Frank Herbert", "Sci-Fi", Money::from_cents(2000), 10)
            .unwrap();

        let recorded = store.record_sale("b001", "Ana", 3, 10.0).unwrap();
        assert_eq!(recorded.sale.unit_price.cents(), 2000);
        assert_eq!(recorded.sale.price_after_discount.cents(), 1800);
        assert_eq!(recorded.sale.gross_total.cents(), 6000);
        assert_eq!(recorded.sale.net_total.cents(), 5400);
        assert_eq!(store.catalog().get(id).unwrap().quantity, 7);

        let err = store.record_sale("B001", "Ben", 8, 0.0).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { available: 7, .. }));
        assert_eq!(store.catalog().get(id).unwrap().quantity, 7);
        assert_eq!(store.list_sales().len(), 1);
    }

    #[test]
    fn test_reports_use_configured_limit() {
        let mut store = Bookstore::new(StoreConfig::default().top_sellers_limit(2)).unwrap();
        store.record_sale("B001", "Ana", 5, 0.0).unwrap();
        store.record_sale("B002", "Ana", 9, 0.0).unwrap();
        store.record_sale("B003", "Ana", 2, 0.0).unwrap();
        store.record_sale("B001", "Ana", 1, 0.0).unwrap();

        let top = store.top_sold_books();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].title, "Pride and Prejudice");
        assert_eq!(top[0].quantity_sold, 9);
        assert_eq!(top[1].title, "The Lord of the Rings");
        assert_eq!(top[1].quantity_sold, 6);

        // full report is still reachable through the engine
        assert_eq!(store.reports().top_sold_books(3)[2].quantity_sold, 2);
    }

    #[test]
    fn test_author_report_after_delete() {
        let mut store = Bookstore::new(StoreConfig::default()).unwrap();
        store.record_sale("B003", "Ana", 2, 0.0).unwrap();
        store.record_sale("B005", "Ben", 1, 0.0).unwrap();
        store.catalog_mut().delete("B005").unwrap();

        let report = store.sales_by_author();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].author, "George Orwell");
        assert_eq!(report.rows[0].gross_total.cents(), 2400);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(store.list_sales().len(), 2);
    }

    #[test]
    fn test_render_invoice_uses_configured_width() {
        let mut store = Bookstore::new(StoreConfig::default().invoice_width(60)).unwrap();
        let sale = store.record_sale("B001", "Ana", 1, 0.0).unwrap().sale;

        let text = store.render_invoice(&sale);
        assert_eq!(text.lines().next().unwrap(), "=".repeat(60));
        assert!(text.contains("Product: The Lord of the Rings"));
    }

    #[test]
    fn test_shared_store_keeps_stock_consistent() {
        let mut store = Bookstore::empty();
        store
            .catalog_mut()
            .create("Dune", "Frank Herbert", "Sci-Fi", Money::from_cents(1000), 100)
            .unwrap();
        let shared = SharedBookstore::new(store);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let mut sold = 0;
                    for _ in 0..20 {
                        let result = shared
                            .with_store_mut(|store| store.record_sale("B001", &format!("client-{i}"), 1, 0.0));
                        if result.is_ok() {
                            sold += 1;
                        }
                    }
                    sold
                })
            })
            .collect();

        let sold: i64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(sold, 100);
        shared.with_store(|store| {
            assert_eq!(store.catalog().get_by_id("B001").unwrap().quantity, 0);
            assert_eq!(store.list_sales().len(), 100);
        });
    }
}
