//! # Catalog Store
//!
//! The inventory of record: every registered book, keyed by its id.
//!
//! ## Book Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Book Lifecycle                                    │
//! │                                                                         │
//! │  1. REGISTER                                                           │
//! │     └── create() → B001, B002, ... (counter never rewinds)             │
//! │                                                                         │
//! │  2. READ                                                               │
//! │     └── get_by_id() / find_by_title_substring() / list()               │
//! │                                                                         │
//! │  3. CHANGE                                                             │
//! │     └── update() → full replace of title/author/category/price/qty     │
//! │     └── (sales decrement quantity through the ledger)                  │
//! │                                                                         │
//! │  4. DELETE                                                             │
//! │     └── delete() → gone for good; its id is never handed out again     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Books are stored in a `BTreeMap` keyed by id. Ids are allocated from a
//! monotonic counter, so key order is registration order.

use std::collections::BTreeMap;

use bookledger_core::validation::{validate_quantity, BookFields};
use bookledger_core::{Book, BookId, CoreError, CoreResult, Money};
use tracing::debug;

/// Owns every [`Book`] and the id counter.
///
/// Other components only ever receive shared references; the one stock
/// mutation outside of `update` is [`CatalogStore::withdraw_stock`], which is
/// crate-private and used by the sales ledger.
#[derive(Debug)]
pub struct CatalogStore {
    books: BTreeMap<BookId, Book>,
    next_sequence: u64,
}

impl CatalogStore {
    /// Creates an empty catalog whose first id will be `B001`.
    pub fn new() -> Self {
        CatalogStore {
            books: BTreeMap::new(),
            next_sequence: 1,
        }
    }

    /// Registers a new book and returns its id.
    ///
    /// ## Rules
    /// - title, author and category must be non-empty (they are trimmed)
    /// - price must be positive
    /// - quantity must be at least 1
    ///
    /// The counter only advances when the book is actually stored.
    pub fn create(
        &mut self,
        title: &str,
        author: &str,
        category: &str,
        price: Money,
        quantity: i64,
    ) -> CoreResult<BookId> {
        let fields = BookFields::validate(title, author, category, price, quantity)?;

        let id = BookId::from_sequence(self.next_sequence);
        self.next_sequence += 1;

        debug!(book_id = %id, title = %fields.title, quantity = fields.quantity, "Registering book");

        self.books.insert(
            id,
            Book {
                id,
                title: fields.title,
                author: fields.author,
                category: fields.category,
                price: fields.price,
                quantity: fields.quantity,
            },
        );

        Ok(id)
    }

    /// Looks a book up by id. The letter prefix is case-insensitive.
    ///
    /// Text that is not a well-formed id simply finds nothing.
    pub fn get_by_id(&self, id: &str) -> Option<&Book> {
        let id = BookId::parse(id).ok()?;
        self.get(id)
    }

    /// Looks a book up by an already-parsed id.
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    /// Returns every book whose title contains `query`, ignoring case, in
    /// registration order.
    pub fn find_by_title_substring(&self, query: &str) -> Vec<&Book> {
        let needle = query.trim().to_lowercase();
        self.books
            .values()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Replaces all five mutable fields of a book.
    ///
    /// ## Errors
    /// - `NotFound` if the id is absent
    /// - `Validation` under the same rules as [`CatalogStore::create`]
    pub fn update(
        &mut self,
        id: &str,
        title: &str,
        author: &str,
        category: &str,
        price: Money,
        quantity: i64,
    ) -> CoreResult<&Book> {
        let key = self.resolve(id)?;
        let fields = BookFields::validate(title, author, category, price, quantity)?;

        let book = self
            .books
            .get_mut(&key)
            .ok_or_else(|| CoreError::NotFound(key.to_string()))?;

        debug!(book_id = %key, title = %fields.title, "Updating book");

        book.title = fields.title;
        book.author = fields.author;
        book.category = fields.category;
        book.price = fields.price;
        book.quantity = fields.quantity;

        Ok(book)
    }

    /// Removes a book permanently and returns it.
    ///
    /// There is no undo. Sales that reference the book stay in the ledger.
    pub fn delete(&mut self, id: &str) -> CoreResult<Book> {
        let key = self.resolve(id)?;
        let book = self
            .books
            .remove(&key)
            .ok_or_else(|| CoreError::NotFound(key.to_string()))?;

        debug!(book_id = %key, title = %book.title, "Deleted book");
        Ok(book)
    }

    /// All books in registration order.
    pub fn list(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Takes `quantity` units out of stock.
    ///
    /// Callers must have checked availability first; this re-checks and
    /// refuses rather than letting stock go negative.
    pub(crate) fn withdraw_stock(&mut self, id: BookId, quantity: i64) -> CoreResult<i64> {
        validate_quantity("quantity", quantity)?;

        let book = self
            .books
            .get_mut(&id)
            .ok_or_else(|| CoreError::BookNotFound(id.to_string()))?;

        if !book.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                book_id: id.to_string(),
                available: book.quantity,
                requested: quantity,
            });
        }

        book.quantity -= quantity;
        Ok(book.quantity)
    }

    /// Maps caller text to a stored key, or `NotFound`.
    fn resolve(&self, id: &str) -> CoreResult<BookId> {
        let normalized = id.trim().to_uppercase();
        match BookId::parse(&normalized) {
            Ok(key) if self.books.contains_key(&key) => Ok(key),
            _ => Err(CoreError::NotFound(normalized)),
        }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
