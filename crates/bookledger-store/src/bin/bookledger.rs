//! # Bookledger
//!
//! Builds an in-memory store, optionally records sales given on the command
//! line, and prints the catalog, the sales list and both reports.
//!
//! ## Usage
//! ```bash
//! # Starter catalog and empty reports
//! cargo run -p bookledger-store --bin bookledger
//!
//! # Sell 3 × B001 at 10% off and 2 × B003 to "Ana", print as JSON
//! cargo run -p bookledger-store --bin bookledger -- \
//!     --client Ana --sell B001:3:10 --sell B003:2 --json
//! ```
//!
//! Nothing survives the process: every run starts from the configured
//! catalog.

use std::env;
use std::error::Error;
use std::fmt::Write as _;

use bookledger_store::{AuthorReport, Bookstore, StoreConfig, TopSellerRow};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// One `--sell ID:QTY[:DISCOUNT]` argument.
#[derive(Debug, Clone, PartialEq)]
struct SaleArg {
    book_id: String,
    quantity: i64,
    discount_pct: f64,
}

impl SaleArg {
    fn parse(raw: &str) -> Result<Self, String> {
        let mut parts = raw.split(':');
        let book_id = parts.next().unwrap_or_default().trim().to_string();
        let quantity = parts
            .next()
            .ok_or_else(|| format!("'{raw}': expected ID:QTY[:DISCOUNT]"))?
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("'{raw}': bad quantity ({e})"))?;
        let discount_pct = match parts.next() {
            Some(d) => d
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("'{raw}': bad discount ({e})"))?,
            None => 0.0,
        };
        if parts.next().is_some() {
            return Err(format!("'{raw}': expected ID:QTY[:DISCOUNT]"));
        }

        Ok(SaleArg {
            book_id,
            quantity,
            discount_pct,
        })
    }
}

#[derive(Debug, Default)]
struct Options {
    json: bool,
    no_preload: bool,
    top: Option<usize>,
    client: Option<String>,
    sales: Vec<SaleArg>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--json" => options.json = true,
            "--no-preload" => options.no_preload = true,
            "--top" | "-n" => {
                let value = args.get(i + 1).ok_or("--top needs a value")?;
                options.top = Some(value.parse().map_err(|_| format!("bad --top value '{value}'"))?);
                i += 1;
            }
            "--client" | "-c" => {
                let value = args.get(i + 1).ok_or("--client needs a value")?;
                options.client = Some(value.clone());
                i += 1;
            }
            "--sell" | "-s" => {
                let value = args.get(i + 1).ok_or("--sell needs a value")?;
                options.sales.push(SaleArg::parse(value)?);
                i += 1;
            }
            "--help" | "-h" => options.help = true,
            other => return Err(format!("unknown option '{other}'")),
        }
        i += 1;
    }

    Ok(options)
}

fn print_help() {
    println!("Bookledger - in-memory book inventory and sales ledger");
    println!();
    println!("Usage: bookledger [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --sell <ID:QTY[:DISCOUNT]>  Record a sale (repeatable)");
    println!("  -c, --client <NAME>             Client name for --sell (default: Walk-in)");
    println!("  -n, --top <N>                   Rows in the best-sellers report");
    println!("      --no-preload                Start with an empty catalog");
    println!("      --json                      Print everything as JSON");
    println!("  -h, --help                      Show this help message");
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, DEBUG for the store crate
///
/// Logs go to stderr so `--json` output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookledger_store=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    store_name: &'a str,
    books: Vec<&'a bookledger_core::Book>,
    sales: &'a [bookledger_core::Sale],
    advisories: Vec<String>,
    top_sold_books: Vec<TopSellerRow>,
    sales_by_author: AuthorReport,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args)?;
    if options.help {
        print_help();
        return Ok(());
    }

    init_tracing();

    let mut config = StoreConfig::from_env();
    if options.no_preload {
        config = config.preload_catalog(false);
    }
    if let Some(n) = options.top {
        config = config.top_sellers_limit(n);
    }

    let mut store = Bookstore::new(config)?;
    let client = options.client.as_deref().unwrap_or("Walk-in");

    let mut invoices = Vec::new();
    let mut advisories = Vec::new();
    for request in &options.sales {
        match store.record_sale(&request.book_id, client, request.quantity, request.discount_pct) {
            Ok(recorded) => {
                if let Some(advisory) = recorded.advisory {
                    advisories.push(advisory.to_string());
                }
                info!(
                    book_id = %recorded.sale.book_id,
                    remaining_stock = recorded.remaining_stock,
                    "Sale registered"
                );
                invoices.push(store.render_invoice(&recorded.sale));
            }
            Err(e) => warn!(book_id = %request.book_id, error = %e, "Sale rejected"),
        }
    }

    let top = store.top_sold_books();
    let by_author = store.sales_by_author();

    if options.json {
        let output = JsonOutput {
            store_name: &store.config().store_name,
            books: store.catalog().list().collect(),
            sales: store.list_sales(),
            advisories,
            top_sold_books: top,
            sales_by_author: by_author,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for invoice in &invoices {
        println!("{invoice}");
    }
    for advisory in &advisories {
        println!("Warning: {advisory}");
    }
    print!("{}", render_text(&store, &top, &by_author));

    Ok(())
}

fn render_text(store: &Bookstore, top: &[TopSellerRow], by_author: &AuthorReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "=== {} ===", store.config().store_name);
    let _ = writeln!(out);
    let _ = writeln!(out, "--- All Books in Inventory ---");
    if store.catalog().is_empty() {
        let _ = writeln!(out, "No books in inventory.");
    } else {
        let _ = writeln!(
            out,
            "{:<10} | {:<30} | {:<20} | {:<15} | {:<8} | {:<5}",
            "ID", "Title", "Author", "Category", "Price", "Stock"
        );
        let _ = writeln!(out, "{}", "-".repeat(100));
        for book in store.catalog().list() {
            let _ = writeln!(
                out,
                "{:<10} | {:<30} | {:<20} | {:<15} | {:<8} | {:<5}",
                book.id, book.title, book.author, book.category, book.price, book.quantity
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "--- All Registered Sales ---");
    if store.list_sales().is_empty() {
        let _ = writeln!(out, "No sales registered yet.");
    } else {
        let _ = writeln!(
            out,
            "{:<8} | {:<20} | {:<20} | {:<30} | {:<5} | {:<12} | {:<10}",
            "Sale #", "Date", "Client", "Product", "Qty", "Gross Total", "Net Total"
        );
        let _ = writeln!(out, "{}", "-".repeat(130));
        for (i, sale) in store.list_sales().iter().enumerate() {
            let _ = writeln!(
                out,
                "{:<8} | {:<20} | {:<20} | {:<30} | {:<5} | {:<12} | {:<10}",
                i + 1,
                sale.sold_at_display(),
                sale.client_name,
                sale.title_snapshot,
                sale.quantity,
                sale.gross_total,
                sale.net_total
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "--- Top {} Most Sold Books ---", store.config().top_sellers_limit);
    if top.is_empty() {
        let _ = writeln!(out, "No sales data available to determine top books.");
    } else {
        let _ = writeln!(
            out,
            "{:<6} | {:<10} | {:<30} | {:<15}",
            "Rank", "Book ID", "Title", "Quantity Sold"
        );
        let _ = writeln!(out, "{}", "-".repeat(70));
        for row in top {
            let _ = writeln!(
                out,
                "{:<6} | {:<10} | {:<30} | {:<15}",
                row.rank, row.book_id, row.title, row.quantity_sold
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "--- Sales Report by Author ---");
    for warning in &by_author.warnings {
        let _ = writeln!(out, "Warning: {warning}");
    }
    if by_author.is_empty() {
        let _ = writeln!(out, "No sales data available to generate report.");
    } else {
        let _ = writeln!(
            out,
            "{:<25} | {:<20} | {:<20} | {:<20}",
            "Author", "Total Quantity Sold", "Total Gross Income", "Total Net Income"
        );
        let _ = writeln!(out, "{}", "-".repeat(100));
        for row in &by_author.rows {
            let _ = writeln!(
                out,
                "{:<25} | {:<20} | {:<20} | {:<20}",
                row.author, row.quantity_sold, row.gross_total, row.net_total
            );
        }
    }

    out
}
