//! Download Alpha Vantage financial statements to CSV
//!
//! A small Alpha Vantage client for the `BALANCE_SHEET`, `INCOME_STATEMENT`
//! and `CASH_FLOW` functions, and a [`Downloader`] that writes the annual and
//! quarterly reports of each ticker to `<ticker>_<statement>.csv` while
//! staying under the free-tier quota (5 calls a minute, 500 a day).
//!
//! # Quick Start
//!
//! ```no_run
//! use alphav_fundamentals::{AlphaVantage, Downloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AlphaVantage::default().with_key("your_api_key");
//!     let summary = Downloader::new(client, "data").run(&["META", "IBM"]).await;
//!     println!("{} files written", summary.written.len());
//!     Ok(())
//! }
//! ```
//!
//! # Endpoint API
//!
//! Each endpoint returns a request builder. Call `.get()` for the raw JSON,
//! or pick a period first to get a Polars DataFrame:
//!
//! ```no_run
//! use alphav_fundamentals::AlphaVantage;
//! use alphav_fundamentals::rest::fundamentals;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AlphaVantage::default().with_key("your_api_key");
//!
//! let json = fundamentals::income_statement(&client, "IBM").get().await?;
//! let quarterly = fundamentals::income_statement(&client, "IBM").quarterly().get().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **`hyper`** (default) - Uses [`hyper`](https://docs.rs/hyper) as the HTTP client.
//!
//! - **`reqwest`** - Alternative HTTP client using [`reqwest`](https://docs.rs/reqwest).
//!   To use reqwest instead: `default-features = false, features = ["reqwest", "dotenvy"]`.
//!
//! - **`dotenvy`** (default) - Loads `.env` before reading `ALPHAVANTAGE_API_KEY` and adds
//!   `AlphaVantage::new()`.

#![warn(missing_docs)]

#[cfg(not(any(feature = "reqwest", feature = "hyper")))]
compile_error!("enable the `hyper` or `reqwest` feature to choose an HTTP client");

pub mod client;
pub mod config;
pub mod downloader;
pub mod error;
pub mod execute;
pub mod fundamental_data;
pub mod processor;
pub mod request;
pub mod response;
pub mod rest;
pub mod throttle;

pub use client::{DEFAULT_BASE_URL, DefaultClient};
pub use config::Config;
pub use downloader::{Downloader, StatementKind, Summary, fetch_statement};
pub use error::{Error, Result};
pub use fundamental_data::FundamentalData;
pub use request::Request;
pub use response::Response;
pub use throttle::{FixedPause, Governed, Throttle, Unthrottled};

/// The Alpha Vantage client with the default HTTP client.
///
/// - With the `reqwest` feature: `reqwest::Client`
/// - Otherwise: [`HyperClient`](request::HyperClient)
///
/// Use [`client::AlphaVantage`] directly to plug in another [`Request`] implementation.
pub type AlphaVantage = client::AlphaVantage<DefaultClient>;
