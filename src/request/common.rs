//! Statement and reporting-period types shared by the fundamentals endpoints
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Financial statement served by one Alpha Vantage function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statement {
    /// `BALANCE_SHEET`
    BalanceSheet,
    /// `INCOME_STATEMENT`
    IncomeStatement,
    /// `CASH_FLOW`
    CashFlow,
}

impl Statement {
    /// Value of the `function` query parameter
    pub fn function(self) -> &'static str {
        match self {
            Statement::BalanceSheet => "BALANCE_SHEET",
            Statement::IncomeStatement => "INCOME_STATEMENT",
            Statement::CashFlow => "CASH_FLOW",
        }
    }

    /// snake_case name used in file names
    pub fn name(self) -> &'static str {
        match self {
            Statement::BalanceSheet => "balance_sheet",
            Statement::IncomeStatement => "income_statement",
            Statement::CashFlow => "cash_flow",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statement {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "balance_sheet" | "bs" => Ok(Statement::BalanceSheet),
            "income_statement" | "is" => Ok(Statement::IncomeStatement),
            "cash_flow" | "cf" => Ok(Statement::CashFlow),
            _ => Err(Error::UnknownStatement(s.to_string())),
        }
    }
}

/// Reporting period of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Fiscal years
    Annual,
    /// Fiscal quarters
    Quarterly,
}

impl Period {
    /// Key of the report array in the JSON response
    pub fn report_key(self) -> &'static str {
        match self {
            Period::Annual => "annualReports",
            Period::Quarterly => "quarterlyReports",
        }
    }

    /// Lowercase name used in file names
    pub fn name(self) -> &'static str {
        match self {
            Period::Annual => "annual",
            Period::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Period {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "annual" | "a" => Ok(Period::Annual),
            "quarterly" | "q" => Ok(Period::Quarterly),
            _ => Err(Error::Custom(format!("Invalid period: {s}"))),
        }
    }
}

/// Check that `symbol` is a plain ticker: ASCII letters, digits, `.` and `-`.
///
/// Symbols go unescaped into the query string and into output file names.
pub fn validate_symbol(symbol: &str) -> Result<&str> {
    let valid = !symbol.is_empty() && symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    if valid && !symbol.starts_with('.') {
        Ok(symbol)
    } else {
        Err(Error::InvalidSymbol(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn functions_match_api_names() {
        assert_eq!(Statement::BalanceSheet.function(), "BALANCE_SHEET");
        assert_eq!(Statement::IncomeStatement.function(), "INCOME_STATEMENT");
        assert_eq!(Statement::CashFlow.function(), "CASH_FLOW");
    }

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("BS".parse::<Statement>().unwrap(), Statement::BalanceSheet);
        assert_eq!("cash_flow".parse::<Statement>().unwrap(), Statement::CashFlow);
        assert_eq!("q".parse::<Period>().unwrap(), Period::Quarterly);
        assert!(matches!(
            "dividends".parse::<Statement>(),
            Err(Error::UnknownStatement(name)) if name == "dividends"
        ));
    }

    #[test]
    fn symbols_are_plain_tickers() {
        for symbol in ["IBM", "BRK.B", "BF-B", "7203"] {
            assert_eq!(validate_symbol(symbol).unwrap(), symbol);
        }
        for symbol in ["", "../x", "A&function=X", "IB M", ".."] {
            assert!(matches!(validate_symbol(symbol), Err(Error::InvalidSymbol(s)) if s == symbol));
        }
    }
}
