//! # bookledger-store: In-Memory State for Bookledger
//!
//! This crate owns the catalog and the sales ledger for the lifetime of one
//! process and builds reports over them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookledger Data Flow                             │
//! │                                                                         │
//! │  Caller (menu layer / binary)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 bookledger-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Bookstore    │    │  catalog.rs   │    │  report.rs   │  │   │
//! │  │   │ (context)     │───►│  ledger.rs    │◄───│  (read-only) │  │   │
//! │  │   │ config.rs     │    │  preload.rs   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bookledger-core: Money, Book, Sale, pricing, invoice                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - Book registration, lookup, update, delete
//! - [`ledger`] - Sale commit and the append-only sales list
//! - [`report`] - Best sellers and sales by author
//! - [`bookstore`] - Owning context and its thread-shareable wrapper
//! - [`config`] - Runtime settings
//! - [`preload`] - Starter catalog
//!
//! ## Usage
//!
//! ```rust
//! use bookledger_store::{Bookstore, StoreConfig};
//!
//! let mut store = Bookstore::new(StoreConfig::default()).unwrap();
//! store.record_sale("B003", "Ana", 2, 0.0).unwrap();
//!
//! let top = store.top_sold_books();
//! assert_eq!(top[0].title, "1984");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bookstore;
pub mod catalog;
pub mod config;
pub mod ledger;
pub mod preload;
pub mod report;

// =============================================================================
// Re-exports
// =============================================================================

pub use bookstore::{Bookstore, SharedBookstore};
pub use catalog::CatalogStore;
pub use config::StoreConfig;
pub use ledger::{RecordedSale, SalesLedger};
pub use report::{AuthorReport, AuthorSalesRow, ReportWarning, ReportingEngine, TopSellerRow};
