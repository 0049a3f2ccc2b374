//! # Store Configuration
//!
//! Runtime settings for a [`crate::Bookstore`].
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BOOKLEDGER_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read once at startup and never changes afterwards.

use bookledger_core::{InvoiceFormatter, DEFAULT_TOP_SELLERS};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const ENV_STORE_NAME: &str = "BOOKLEDGER_STORE_NAME";
pub const ENV_PRELOAD: &str = "BOOKLEDGER_PRELOAD";
pub const ENV_TOP_N: &str = "BOOKLEDGER_TOP_N";
pub const ENV_INVOICE_WIDTH: &str = "BOOKLEDGER_INVOICE_WIDTH";

/// Bookstore configuration.
///
/// ## Example
/// ```rust
/// use bookledger_store::StoreConfig;
///
/// let config = StoreConfig::default()
///     .preload_catalog(false)
///     .top_sellers_limit(5);
/// assert_eq!(config.top_sellers_limit, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Shown by the binary's banner.
    pub store_name: String,

    /// Register the starter books on construction.
    /// Default: true
    pub preload_catalog: bool,

    /// Rows in the best-sellers report.
    /// Default: 3
    pub top_sellers_limit: usize,

    /// Character width of rendered invoices.
    /// Default: 50
    pub invoice_width: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: "Bookledger".to_string(),
            preload_catalog: true,
            top_sellers_limit: DEFAULT_TOP_SELLERS,
            invoice_width: InvoiceFormatter::DEFAULT_WIDTH,
        }
    }
}

impl StoreConfig {
    /// Creates a StoreConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `BOOKLEDGER_STORE_NAME`: Override store name
    /// - `BOOKLEDGER_PRELOAD`: `true`/`false` (also `1`/`0`, `yes`/`no`)
    /// - `BOOKLEDGER_TOP_N`: Rows in the best-sellers report
    /// - `BOOKLEDGER_INVOICE_WIDTH`: Invoice width in characters
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an arbitrary variable source.
    ///
    /// Values that fail to parse are ignored and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StoreConfig::default();

        if let Some(name) = lookup(ENV_STORE_NAME) {
            let name = name.trim();
            if !name.is_empty() {
                config.store_name = name.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_PRELOAD) {
            match parse_flag(&raw) {
                Some(flag) => config.preload_catalog = flag,
                None => warn!(var = ENV_PRELOAD, value = %raw, "Ignoring unparseable flag"),
            }
        }

        if let Some(raw) = lookup(ENV_TOP_N) {
            match raw.trim().parse::<usize>() {
                Ok(n) => config.top_sellers_limit = n,
                Err(_) => warn!(var = ENV_TOP_N, value = %raw, "Ignoring unparseable number"),
            }
        }

        if let Some(raw) = lookup(ENV_INVOICE_WIDTH) {
            match raw.trim().parse::<usize>() {
                Ok(width) => config.invoice_width = width,
                Err(_) => warn!(var = ENV_INVOICE_WIDTH, value = %raw, "Ignoring unparseable number"),
            }
        }

        config
    }

    pub fn store_name(mut self, name: impl Into<String>) -> Self {
        self.store_name = name.into();
        self
    }

    pub fn preload_catalog(mut self, preload: bool) -> Self {
        self.preload_catalog = preload;
        self
    }

    pub fn top_sellers_limit(mut self, n: usize) -> Self {
        self.top_sellers_limit = n;
        self
    }

    pub fn invoice_width(mut self, width: usize) -> Self {
        self.invoice_width = width;
        self
    }

    /// Invoice formatter at the configured width.
    pub fn invoice_formatter(&self) -> InvoiceFormatter {
        InvoiceFormatter::new(self.invoice_width)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert!(config.preload_catalog);
        assert_eq!(config.top_sellers_limit, 3);
        assert_eq!(config.invoice_width, 50);
        assert_eq!(config.store_name, "Bookledger");
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (ENV_STORE_NAME, "Corner Books"),
            (ENV_PRELOAD, "no"),
            (ENV_TOP_N, " 5 "),
            (ENV_INVOICE_WIDTH, "60"),
        ]));

        assert_eq!(config.store_name, "Corner Books");
        assert!(!config.preload_catalog);
        assert_eq!(config.top_sellers_limit, 5);
        assert_eq!(config.invoice_width, 60);
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            (ENV_STORE_NAME, "   "),
            (ENV_PRELOAD, "maybe"),
            (ENV_TOP_N, "-1"),
            (ENV_INVOICE_WIDTH, "wide"),
        ]));

        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" False "), Some(false));
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_builder_and_serde() {
        let config = StoreConfig::default().store_name("Shelf").invoice_width(40);
        assert_eq!(config.invoice_formatter().width(), 40);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["storeName"], "Shelf");
        assert_eq!(json["topSellersLimit"], 3);
    }
}
