//! The six statement retrievals the downloader depends on
//!
//! [`FundamentalData`] is implemented for [`AlphaVantage`]; tests and other
//! providers can implement it to stand in for the live API.

use std::future::Future;

use polars_core::frame::DataFrame;

use crate::client::AlphaVantage;
use crate::error::Result;
use crate::request::Request;
use crate::rest::fundamentals;

/// Annual and quarterly balance sheet, income statement and cash flow, one row per period.
pub trait FundamentalData {
    /// Annual balance sheets
    fn balance_sheet_annual(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>>;

    /// Quarterly balance sheets
    fn balance_sheet_quarterly(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>>;

    /// Annual income statements
    fn income_statement_annual(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>>;

    /// Quarterly income statements
    fn income_statement_quarterly(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>>;

    /// Annual cash flow statements
    fn cash_flow_annual(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>>;

    /// Quarterly cash flow statements
    fn cash_flow_quarterly(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>>;
}

impl<C: Request> FundamentalData for AlphaVantage<C> {
    async fn balance_sheet_annual(&self, symbol: &str) -> Result<DataFrame> {
        fundamentals::balance_sheet(self, symbol).annual().get().await
    }

    async fn balance_sheet_quarterly(&self, symbol: &str) -> Result<DataFrame> {
        fundamentals::balance_sheet(self, symbol).quarterly().get().await
    }

    async fn income_statement_annual(&self, symbol: &str) -> Result<DataFrame> {
        fundamentals::income_statement(self, symbol).annual().get().await
    }

    async fn income_statement_quarterly(&self, symbol: &str) -> Result<DataFrame> {
        fundamentals::income_statement(self, symbol).quarterly().get().await
    }

    async fn cash_flow_annual(&self, symbol: &str) -> Result<DataFrame> {
        fundamentals::cash_flow(self, symbol).annual().get().await
    }

    async fn cash_flow_quarterly(&self, symbol: &str) -> Result<DataFrame> {
        fundamentals::cash_flow(self, symbol).quarterly().get().await
    }
}

impl<T: FundamentalData> FundamentalData for &T {
    fn balance_sheet_annual(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>> {
        (**self).balance_sheet_annual(symbol)
    }

    fn balance_sheet_quarterly(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>> {
        (**self).balance_sheet_quarterly(symbol)
    }

    fn income_statement_annual(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>> {
        (**self).income_statement_annual(symbol)
    }

    fn income_statement_quarterly(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>> {
        (**self).income_statement_quarterly(symbol)
    }

    fn cash_flow_annual(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>> {
        (**self).cash_flow_annual(symbol)
    }

    fn cash_flow_quarterly(&self, symbol: &str) -> impl Future<Output = Result<DataFrame>> {
        (**self).cash_flow_quarterly(symbol)
    }
}
