use crate::client::AlphaVantage;
use crate::error::{Error, Result};
use crate::execute::Execute;
use crate::processor::{Processor, Raw, Table};
use crate::request::Request;
use crate::request::common::{Period, Statement, validate_symbol};

/// Request builder shared by the balance sheet, income statement and cash flow endpoints.
///
/// Alpha Vantage returns both annual and quarterly reports in one response;
/// [`annual`](Self::annual) and [`quarterly`](Self::quarterly) pick which
/// array becomes the resulting DataFrame.
pub struct FinancialStatement<'a, Client: Request, P: Processor = Raw> {
    client: &'a AlphaVantage<Client>,
    /// Stock symbol
    pub symbol: String,
    /// Which statement to request
    pub statement: Statement,
    processor: P,
}

impl<'a, C: Request> FinancialStatement<'a, C, Raw> {
    /// Create new statement request (returns raw JSON by default)
    pub fn new(client: &'a AlphaVantage<C>, statement: Statement, symbol: impl Into<String>) -> Self {
        Self {
            client,
            symbol: symbol.into(),
            statement,
            processor: Raw,
        }
    }
}

impl<'a, C: Request, P: Processor + 'a> FinancialStatement<'a, C, P> {
    /// Execute the request and return the result
    pub fn get(self) -> impl std::future::Future<Output = Result<P::Output>> + 'a {
        Execute::get(self)
    }

    /// Return the reports for `period` as a Polars DataFrame
    pub fn reports(self, period: Period) -> FinancialStatement<'a, C, Table> {
        FinancialStatement {
            client: self.client,
            symbol: self.symbol,
            statement: self.statement,
            processor: Table::new(period),
        }
    }

    /// Return the annual reports as a DataFrame
    pub fn annual(self) -> FinancialStatement<'a, C, Table> {
        self.reports(Period::Annual)
    }

    /// Return the quarterly reports as a DataFrame
    pub fn quarterly(self) -> FinancialStatement<'a, C, Table> {
        self.reports(Period::Quarterly)
    }

    /// Full query URL, including the API key
    pub fn url(&self) -> Result<String> {
        let api_key = self.client.api_key().ok_or(Error::MissingApiKey)?;
        let symbol = validate_symbol(&self.symbol)?;

        let params = [
            format!("function={}", self.statement.function()),
            format!("symbol={symbol}"),
            format!("apikey={api_key}"),
        ];

        Ok(format!("{}?{}", self.client.base_url(), params.join("&")))
    }
}

impl<'a, C: Request, P: Processor + 'a> Execute for FinancialStatement<'a, C, P> {
    type Output = P::Output;

    #[allow(refining_impl_trait_reachable)]
    async fn get(self) -> Result<P::Output> {
        let url = self.url()?;
        tracing::debug!(function = self.statement.function(), symbol = %self.symbol, "requesting");

        let response = self.client.client().get(&url).await;

        self.processor.process(response)
    }
}
