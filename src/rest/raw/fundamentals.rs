//! Financial statement endpoints

use crate::client::AlphaVantage;
use crate::processor::Raw;
use crate::request::Request;
use crate::request::common::Statement;
use crate::request::fundamentals::FinancialStatement;

/// Get the balance sheet for a stock
///
/// Returns a request builder that will return results as raw JSON string.
///
/// # Example
/// ```no_run
/// # use alphav_fundamentals::AlphaVantage;
/// # async fn example() -> alphav_fundamentals::Result<()> {
/// # let client = AlphaVantage::default().with_key("api-key");
/// let quarterly = alphav_fundamentals::rest::fundamentals::balance_sheet(&client, "IBM")
///     .quarterly()
///     .get()
///     .await?;
/// println!("{quarterly}");
/// # Ok(())
/// # }
/// ```
pub fn balance_sheet<'a, Client: Request>(
    client: &'a AlphaVantage<Client>,
    symbol: impl Into<String>,
) -> FinancialStatement<'a, Client, Raw> {
    FinancialStatement::new(client, Statement::BalanceSheet, symbol)
}

/// Get the income statement for a stock
pub fn income_statement<'a, Client: Request>(
    client: &'a AlphaVantage<Client>,
    symbol: impl Into<String>,
) -> FinancialStatement<'a, Client, Raw> {
    FinancialStatement::new(client, Statement::IncomeStatement, symbol)
}

/// Get the cash flow statement for a stock
pub fn cash_flow<'a, Client: Request>(
    client: &'a AlphaVantage<Client>,
    symbol: impl Into<String>,
) -> FinancialStatement<'a, Client, Raw> {
    FinancialStatement::new(client, Statement::CashFlow, symbol)
}

/// Get any of the three statements for a stock
pub fn statement<'a, Client: Request>(
    client: &'a AlphaVantage<Client>,
    statement: Statement,
    symbol: impl Into<String>,
) -> FinancialStatement<'a, Client, Raw> {
    FinancialStatement::new(client, statement, symbol)
}
