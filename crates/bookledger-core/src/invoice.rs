//! # Invoice Rendering
//!
//! Turns a completed [`Sale`] into receipt text.
//!
//! ## Layout (width 50)
//! ```text
//! ==================================================
//!                   SALES INVOICE
//! ==================================================
//! Invoice ID: 3F9A1C07
//! Date: 2024-03-09 14:05:00
//! Client Name: Ana
//! --------------------------------------------------
//! Product: The Hobbit
//! Product ID: B001
//! Quantity: 3
//! Unit Price: $20.00
//! Discount: 10.00%
//! Price per Unit (after discount): $18.00
//! --------------------------------------------------
//! Gross Total: $60.00
//! Net Total (after discount): $54.00
//! ==================================================
//!            THANK YOU FOR YOUR PURCHASE!
//! ==================================================
//! ```
//!
//! The invoice id is random and display-only: it is not stored anywhere and
//! nothing looks sales up by it. The date is shown in the local time zone.

use std::fmt::Write;

use uuid::Uuid;

use crate::types::Sale;

/// Renders sales as fixed-width receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceFormatter {
    width: usize,
}

impl InvoiceFormatter {
    pub const DEFAULT_WIDTH: usize = 50;

    const HEADING: &'static str = "SALES INVOICE";
    const FOOTER: &'static str = "THANK YOU FOR YOUR PURCHASE!";

    /// Creates a formatter whose rules are `width` characters wide.
    ///
    /// Widths narrower than the footer are widened to fit it.
    pub fn new(width: usize) -> Self {
        InvoiceFormatter {
            width: width.max(Self::FOOTER.len()),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Renders `sale` with a freshly generated invoice number.
    pub fn render(&self, sale: &Sale) -> String {
        self.render_with_number(sale, &generate_invoice_number())
    }

    /// Renders `sale` with the given invoice number. Fully deterministic.
    pub fn render_with_number(&self, sale: &Sale, invoice_number: &str) -> String {
        let width = self.width;
        let double = "=".repeat(width);
        let single = "-".repeat(width);
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "{double}");
        let _ = writeln!(out, "{:^width$}", Self::HEADING);
        let _ = writeln!(out, "{double}");
        let _ = writeln!(out, "Invoice ID: {invoice_number}");
        let _ = writeln!(out, "Date: {}", sale.sold_at_display());
        let _ = writeln!(out, "Client Name: {}", sale.client_name);
        let _ = writeln!(out, "{single}");
        let _ = writeln!(out, "Product: {}", sale.title_snapshot);
        let _ = writeln!(out, "Product ID: {}", sale.book_id);
        let _ = writeln!(out, "Quantity: {}", sale.quantity);
        let _ = writeln!(out, "Unit Price: {}", sale.unit_price);
        let _ = writeln!(out, "Discount: {}", sale.discount);
        let _ = writeln!(
            out,
            "Price per Unit (after discount): {}",
            sale.price_after_discount
        );
        let _ = writeln!(out, "{single}");
        let _ = writeln!(out, "Gross Total: {}", sale.gross_total);
        let _ = writeln!(out, "Net Total (after discount): {}", sale.net_total);
        let _ = writeln!(out, "{double}");
        let _ = writeln!(out, "{:^width$}", Self::FOOTER);
        let _ = writeln!(out, "{double}");

        out
    }
}

impl Default for InvoiceFormatter {
    fn default() -> Self {
        InvoiceFormatter::new(Self::DEFAULT_WIDTH)
    }
}

/// Renders `sale` at the default width.
pub fn render(sale: &Sale) -> String {
    InvoiceFormatter::default().render(sale)
}

/// Eight uppercase hex characters taken from a random UUID v4.
pub fn generate_invoice_number() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    simple[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Book, BookId, DiscountRate};
    use chrono::{TimeZone, Utc};

    fn test_sale() -> Sale {
        let book = Book {
            id: BookId::from_sequence(1),
            title: "The Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            category: "Fantasy".to_string(),
            price: Money::from_cents(2000),
            quantity: 10,
        };
        let sold_at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        Sale::from_book(&book, "Ana", 3, DiscountRate::from_bps(1000), sold_at).unwrap()
    }

    #[test]
    fn test_render_with_number_contains_required_fields() {
        let sale = test_sale();
        let text = InvoiceFormatter::default().render_with_number(&sale, "ABCD1234");
        assert!(text.contains(&format!("Date: {}", sale.sold_at_display())));

        for expected in [
            "Invoice ID: ABCD1234",
            "Client Name: Ana",
            "Product: The Hobbit",
            "Product ID: B001",
            "Quantity: 3",
            "Unit Price: $20.00",
            "Discount: 10.00%",
            "Price per Unit (after discount): $18.00",
            "Gross Total: $60.00",
            "Net Total (after discount): $54.00",
        ] {
            assert!(text.contains(expected), "missing line: {expected}");
        }
    }

    #[test]
    fn test_render_with_number_is_deterministic() {
        let formatter = InvoiceFormatter::default();
        let sale = test_sale();
        assert_eq!(
            formatter.render_with_number(&sale, "00000000"),
            formatter.render_with_number(&sale, "00000000")
        );
    }

    #[test]
    fn test_rules_follow_width() {
        let text = InvoiceFormatter::new(40).render_with_number(&test_sale(), "X");
        let first = text.lines().next().unwrap();
        assert_eq!(first, "=".repeat(40));

        let heading = text.lines().nth(1).unwrap();
        assert_eq!(heading.len(), 40);
        assert_eq!(heading.trim(), "SALES INVOICE");
    }

    #[test]
    fn test_narrow_width_fits_footer() {
        let formatter = InvoiceFormatter::new(5);
        assert_eq!(formatter.width(), "THANK YOU FOR YOUR PURCHASE!".len());
    }

    #[test]
    fn test_invoice_number_shape() {
        let number = generate_invoice_number();
        assert_eq!(number.len(), 8);
        assert!(number
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));

        let text = render(&test_sale());
        assert!(text.starts_with(&"=".repeat(InvoiceFormatter::DEFAULT_WIDTH)));
    }
}
