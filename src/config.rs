//! Run configuration: API key, output directory and tickers
//!
//! Values come from the environment (and `.env` with the `dotenvy` feature);
//! the binary layers its command-line flags on top with the `with_*` methods.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Environment variable holding the Alpha Vantage API key
pub const API_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";

/// Environment variable naming the directory CSV files are written to
pub const OUTPUT_DIR_VAR: &str = "FUNDAMENTALS_OUTPUT_DIR";

/// Tickers downloaded when none are given
pub const DEFAULT_TICKERS: [&str; 3] = ["META", "CEPU", "IBM"];

/// Settings for one download run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Alpha Vantage API key
    pub api_key: Option<String>,
    /// Directory CSV files are written to
    pub output_dir: PathBuf,
    /// Tickers to download, in order
    pub tickers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            output_dir: PathBuf::from("."),
            tickers: DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Config {
    /// Read [`API_KEY_VAR`] and [`OUTPUT_DIR_VAR`], loading `.env` first when available.
    pub fn from_env() -> Self {
        #[cfg(feature = "dotenvy")]
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self {
            api_key: get(API_KEY_VAR),
            ..Self::default()
        };
        if let Some(dir) = get(OUTPUT_DIR_VAR) {
            config.output_dir = PathBuf::from(dir);
        }
        config
    }

    /// Override the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Replace the ticker list; an empty list keeps the current one.
    /// Symbols are trimmed and upper-cased.
    pub fn with_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tickers: Vec<String> = tickers
            .into_iter()
            .map(|t| t.as_ref().trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        if !tickers.is_empty() {
            self.tickers = tickers;
        }
        self
    }

    /// The API key, or [`Error::MissingApiKey`]
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(Error::MissingApiKey)
    }
}
