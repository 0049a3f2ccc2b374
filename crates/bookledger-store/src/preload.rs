//! # Starter Catalog
//!
//! Books registered on startup when [`crate::StoreConfig::preload_catalog`]
//! is set. They go through [`CatalogStore::create`] like any other book, so
//! on an empty catalog they receive `B001`..`B006`.

use bookledger_core::{BookId, CoreResult, Money};
use tracing::info;

use crate::catalog::CatalogStore;

/// (title, author, category, price, quantity)
pub const STARTER_BOOKS: &[(&str, &str, &str, Money, i64)] = &[
    ("The Lord of the Rings", "J.R.R. Tolkien", "Fantasy", Money::from_major_minor(25, 0), 100),
    ("Pride and Prejudice", "Jane Austen", "Romance", Money::from_major_minor(15, 50), 75),
    ("1984", "George Orwell", "Dystopian", Money::from_major_minor(12, 0), 120),
    ("To Kill a Mockingbird", "Harper Lee", "Fiction", Money::from_major_minor(18, 75), 90),
    ("The Great Gatsby", "F. Scott Fitzgerald", "Classics", Money::from_major_minor(10, 0), 80),
    ("A Game of Thrones", "George R.R. Martin", "Fantasy", Money::from_major_minor(30, 0), 150),
];

/// Registers every starter book and returns the assigned ids.
pub fn load_starter_books(catalog: &mut CatalogStore) -> CoreResult<Vec<BookId>> {
    let ids = STARTER_BOOKS
        .iter()
        .map(|(title, author, category, price, quantity)| {
            catalog.create(title, author, category, *price, *quantity)
        })
        .collect::<CoreResult<Vec<_>>>()?;

    info!(count = ids.len(), "Starter catalog loaded");
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_starter_books() {
        let mut catalog = CatalogStore::new();
        let ids = load_starter_books(&mut catalog).unwrap();

        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(ids, vec!["B001", "B002", "B003", "B004", "B005", "B006"]);

        let got = catalog.get_by_id("B006").unwrap();
        assert_eq!(got.title, "A Game of Thrones");
        assert_eq!(got.price.cents(), 3000);
        assert_eq!(got.quantity, 150);

        assert_eq!(catalog.get_by_id("b002").unwrap().price.cents(), 1550);
    }

    #[test]
    fn test_starter_books_continue_existing_sequence() {
        let mut catalog = CatalogStore::new();
        catalog
            .create("Dune", "Frank Herbert", "Sci-Fi", Money::from_cents(1999), 4)
            .unwrap();

        let ids = load_starter_books(&mut catalog).unwrap();
        assert_eq!(ids[0].to_string(), "B002");
        assert_eq!(catalog.len(), 7);
    }
}
