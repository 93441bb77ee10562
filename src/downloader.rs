//! Statement downloader
//!
//! Walks tickers × [`StatementKind::ALL`], writes each statement to
//! `<output_dir>/<ticker>_<kind>.csv`, and keeps going when a call fails.

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use polars_core::frame::DataFrame;
use polars_io::prelude::*;

use crate::error::{Error, Result};
use crate::fundamental_data::FundamentalData;
use crate::request::common::{Period, Statement, validate_symbol};
use crate::throttle::{self, FixedPause, Throttle};

/// One of the six statements downloaded per ticker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    /// `q_BS`
    QuarterlyBalanceSheet,
    /// `q_IS`
    QuarterlyIncomeStatement,
    /// `q_CF`
    QuarterlyCashFlow,
    /// `a_BS`
    AnnualBalanceSheet,
    /// `a_IS`
    AnnualIncomeStatement,
    /// `a_CF`
    AnnualCashFlow,
}

impl StatementKind {
    /// Every kind, in download order
    pub const ALL: [StatementKind; 6] = [
        StatementKind::QuarterlyBalanceSheet,
        StatementKind::QuarterlyIncomeStatement,
        StatementKind::QuarterlyCashFlow,
        StatementKind::AnnualBalanceSheet,
        StatementKind::AnnualIncomeStatement,
        StatementKind::AnnualCashFlow,
    ];

    /// Build the kind for a statement and period
    pub fn new(statement: Statement, period: Period) -> Self {
        match (period, statement) {
            (Period::Quarterly, Statement::BalanceSheet) => StatementKind::QuarterlyBalanceSheet,
            (Period::Quarterly, Statement::IncomeStatement) => StatementKind::QuarterlyIncomeStatement,
            (Period::Quarterly, Statement::CashFlow) => StatementKind::QuarterlyCashFlow,
            (Period::Annual, Statement::BalanceSheet) => StatementKind::AnnualBalanceSheet,
            (Period::Annual, Statement::IncomeStatement) => StatementKind::AnnualIncomeStatement,
            (Period::Annual, Statement::CashFlow) => StatementKind::AnnualCashFlow,
        }
    }

    /// Statement half of the kind
    pub fn statement(self) -> Statement {
        match self {
            StatementKind::QuarterlyBalanceSheet | StatementKind::AnnualBalanceSheet => Statement::BalanceSheet,
            StatementKind::QuarterlyIncomeStatement | StatementKind::AnnualIncomeStatement => {
                Statement::IncomeStatement
            }
            StatementKind::QuarterlyCashFlow | StatementKind::AnnualCashFlow => Statement::CashFlow,
        }
    }

    /// Period half of the kind
    pub fn period(self) -> Period {
        match self {
            StatementKind::QuarterlyBalanceSheet
            | StatementKind::QuarterlyIncomeStatement
            | StatementKind::QuarterlyCashFlow => Period::Quarterly,
            StatementKind::AnnualBalanceSheet
            | StatementKind::AnnualIncomeStatement
            | StatementKind::AnnualCashFlow => Period::Annual,
        }
    }

    /// File name suffix, e.g. `quarterly_balance_sheet`
    pub fn file_suffix(self) -> &'static str {
        match self {
            StatementKind::QuarterlyBalanceSheet => "quarterly_balance_sheet",
            StatementKind::QuarterlyIncomeStatement => "quarterly_income_statement",
            StatementKind::QuarterlyCashFlow => "quarterly_cash_flow",
            StatementKind::AnnualBalanceSheet => "annual_balance_sheet",
            StatementKind::AnnualIncomeStatement => "annual_income_statement",
            StatementKind::AnnualCashFlow => "annual_cash_flow",
        }
    }

    /// Short code, e.g. `q_BS`
    pub fn code(self) -> &'static str {
        match self {
            StatementKind::QuarterlyBalanceSheet => "q_BS",
            StatementKind::QuarterlyIncomeStatement => "q_IS",
            StatementKind::QuarterlyCashFlow => "q_CF",
            StatementKind::AnnualBalanceSheet => "a_BS",
            StatementKind::AnnualIncomeStatement => "a_IS",
            StatementKind::AnnualCashFlow => "a_CF",
        }
    }

    /// `<ticker>_<suffix>.csv`
    pub fn file_name(self, ticker: &str) -> String {
        format!("{ticker}_{}.csv", self.file_suffix())
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_suffix())
    }
}

impl FromStr for StatementKind {
    type Err = Error;

    /// Accepts the short code (`q_BS`) or the file suffix (`quarterly_balance_sheet`).
    fn from_str(s: &str) -> Result<Self> {
        StatementKind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(s) || kind.file_suffix() == s)
            .ok_or_else(|| Error::UnknownStatement(s.to_string()))
    }
}

/// Fetch one statement and write it as CSV with a header row.
///
/// Returns the path written. Errors from the client or the filesystem are
/// returned unchanged; nothing is written when the fetch fails. A ticker that
/// is not a plain symbol is rejected before any call is made.
pub async fn fetch_statement<D: FundamentalData>(
    kind: StatementKind,
    ticker: &str,
    client: &D,
    output_dir: &Path,
) -> Result<PathBuf> {
    let ticker = validate_symbol(ticker)?;
    let mut df = match kind {
        StatementKind::QuarterlyBalanceSheet => client.balance_sheet_quarterly(ticker).await?,
        StatementKind::QuarterlyIncomeStatement => client.income_statement_quarterly(ticker).await?,
        StatementKind::QuarterlyCashFlow => client.cash_flow_quarterly(ticker).await?,
        StatementKind::AnnualBalanceSheet => client.balance_sheet_annual(ticker).await?,
        StatementKind::AnnualIncomeStatement => client.income_statement_annual(ticker).await?,
        StatementKind::AnnualCashFlow => client.cash_flow_annual(ticker).await?,
    };

    let path = output_dir.join(kind.file_name(ticker));
    write_csv(&mut df, &path)?;
    Ok(path)
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

/// A statement that could not be downloaded
#[derive(Debug)]
pub struct Failure {
    /// Ticker being downloaded
    pub ticker: String,
    /// Statement that failed
    pub kind: StatementKind,
    /// What went wrong
    pub error: Error,
}

/// Outcome of [`Downloader::run`]
#[derive(Debug, Default)]
pub struct Summary {
    /// Call attempts made, successful or not
    pub calls: u64,
    /// Files written, in download order
    pub written: Vec<PathBuf>,
    /// Failed downloads, in the order they happened
    pub failures: Vec<Failure>,
}

impl Summary {
    /// Distinct tickers with at least one failed statement, in first-failure order
    pub fn failed_tickers(&self) -> Vec<&str> {
        let mut tickers: Vec<&str> = Vec::new();
        for failure in &self.failures {
            if !tickers.contains(&failure.ticker.as_str()) {
                tickers.push(&failure.ticker);
            }
        }
        tickers
    }

    /// True when every statement was written
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for Summary {
    /// `incomplete downloads: ['A', 'B']`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self.failed_tickers().iter().map(|t| format!("'{t}'")).collect();
        write!(f, "incomplete downloads: [{}]", quoted.join(", "))
    }
}

/// Downloads every statement kind for a list of tickers, pacing calls with a [`Throttle`]
pub struct Downloader<D, T = FixedPause> {
    client: D,
    output_dir: PathBuf,
    throttle: T,
}

impl<D: FundamentalData> Downloader<D> {
    /// Downloader with the fixed 65 s pause after every 5th call
    pub fn new(client: D, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            throttle: FixedPause::default(),
        }
    }
}

impl<D: FundamentalData, T: Throttle> Downloader<D, T> {
    /// Replace the throttle
    pub fn with_throttle<U: Throttle>(self, throttle: U) -> Downloader<D, U> {
        Downloader {
            client: self.client,
            output_dir: self.output_dir,
            throttle,
        }
    }

    /// Directory CSV files are written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Download all six statements for each ticker, in order.
    ///
    /// A failed statement prints `<ticker> : <error>` and the run moves on to
    /// the next one without retrying. The throttle sees every attempt. Ends by
    /// printing the distinct tickers that had a failure.
    pub async fn run<S: AsRef<str>>(&mut self, tickers: &[S]) -> Summary {
        let planned = tickers.len() * StatementKind::ALL.len();
        if planned > throttle::CALLS_PER_DAY {
            tracing::warn!(
                planned,
                daily_limit = throttle::CALLS_PER_DAY,
                max_tickers = throttle::max_tickers_per_day(StatementKind::ALL.len()),
                "run exceeds the free-tier daily quota; later calls will be rejected"
            );
        }

        let mut summary = Summary::default();

        for (index, ticker) in tickers.iter().enumerate() {
            let ticker = ticker.as_ref();
            tracing::info!("[{}/{}] {ticker}", index + 1, tickers.len());

            for kind in StatementKind::ALL {
                match fetch_statement(kind, ticker, &self.client, &self.output_dir).await {
                    Ok(path) => {
                        tracing::debug!(path = %path.display(), "written");
                        summary.written.push(path);
                    }
                    Err(error) => {
                        println!("{ticker} : {error}");
                        tracing::warn!(ticker, kind = kind.code(), "download failed");
                        summary.failures.push(Failure {
                            ticker: ticker.to_string(),
                            kind,
                            error,
                        });
                    }
                }

                summary.calls += 1;
                self.throttle.after_call(summary.calls).await;
            }
        }

        println!("{summary}");
        summary
    }
}
