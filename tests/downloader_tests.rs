//! Downloader behaviour against an in-memory provider
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alphav_fundamentals::downloader::fetch_statement;
use alphav_fundamentals::{Downloader, Error, FundamentalData, Result, StatementKind, Unthrottled};
use polars_core::df;
use polars_core::frame::DataFrame;
use tokio::time::Instant;

/// Returns a two-row frame per call, or an error for the tickers in `failing`
#[derive(Default)]
struct FakeProvider {
    failing: Vec<&'static str>,
    calls: RefCell<Vec<String>>,
}

impl FakeProvider {
    fn failing(tickers: &[&'static str]) -> Self {
        Self {
            failing: tickers.to_vec(),
            ..Self::default()
        }
    }

    fn respond(&self, method: &str, symbol: &str) -> Result<DataFrame> {
        self.calls.borrow_mut().push(format!("{symbol}:{method}"));
        if self.failing.iter().any(|t| *t == symbol) {
            return Err(Error::Provider(format!("Invalid API call for {symbol}")));
        }
        Ok(df!(
            "fiscalDateEnding" => ["2024-12-31", "2023-12-31"],
            "reportedCurrency" => ["USD", "USD"],
            "source" => [method, method]
        )?)
    }
}

impl FundamentalData for FakeProvider {
    async fn balance_sheet_annual(&self, symbol: &str) -> Result<DataFrame> {
        self.respond("balance_sheet_annual", symbol)
    }

    async fn balance_sheet_quarterly(&self, symbol: &str) -> Result<DataFrame> {
        self.respond("balance_sheet_quarterly", symbol)
    }

    async fn income_statement_annual(&self, symbol: &str) -> Result<DataFrame> {
        self.respond("income_statement_annual", symbol)
    }

    async fn income_statement_quarterly(&self, symbol: &str) -> Result<DataFrame> {
        self.respond("income_statement_quarterly", symbol)
    }

    async fn cash_flow_annual(&self, symbol: &str) -> Result<DataFrame> {
        self.respond("cash_flow_annual", symbol)
    }

    async fn cash_flow_quarterly(&self, symbol: &str) -> Result<DataFrame> {
        self.respond("cash_flow_quarterly", symbol)
    }
}

fn csv_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".csv"))
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn writes_one_csv_per_statement() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FakeProvider::default();

    let summary = Downloader::new(&provider, dir.path())
        .with_throttle(Unthrottled)
        .run(&["META"])
        .await;

    assert_eq!(summary.calls, 6);
    assert!(summary.is_complete());
    assert_eq!(summary.written.len(), 6);
    assert_eq!(
        csv_files(dir.path()),
        [
            "META_annual_balance_sheet.csv",
            "META_annual_cash_flow.csv",
            "META_annual_income_statement.csv",
            "META_quarterly_balance_sheet.csv",
            "META_quarterly_cash_flow.csv",
            "META_quarterly_income_statement.csv",
        ]
    );
}

#[tokio::test]
async fn csv_has_header_and_no_index_column() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FakeProvider::default();

    let path = fetch_statement(StatementKind::QuarterlyCashFlow, "IBM", &provider, dir.path())
        .await
        .unwrap();

    assert_eq!(path, dir.path().join("IBM_quarterly_cash_flow.csv"));
    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "fiscalDateEnding,reportedCurrency,source",
            "2024-12-31,USD,cash_flow_quarterly",
            "2023-12-31,USD,cash_flow_quarterly",
        ]
    );
}

#[tokio::test]
async fn each_kind_dispatches_to_its_own_method() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FakeProvider::default();

    for kind in StatementKind::ALL {
        fetch_statement(kind, "IBM", &provider, dir.path()).await.unwrap();
    }

    assert_eq!(
        *provider.calls.borrow(),
        [
            "IBM:balance_sheet_quarterly",
            "IBM:income_statement_quarterly",
            "IBM:cash_flow_quarterly",
            "IBM:balance_sheet_annual",
            "IBM:income_statement_annual",
            "IBM:cash_flow_annual",
        ]
    );
}

#[tokio::test]
async fn failing_client_writes_nothing_and_reports_each_ticker_once() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FakeProvider::failing(&["A", "B"]);

    let summary = Downloader::new(&provider, dir.path())
        .with_throttle(Unthrottled)
        .run(&["A", "B"])
        .await;

    assert_eq!(summary.calls, 12);
    assert_eq!(summary.failures.len(), 12);
    assert!(summary.written.is_empty());
    assert_eq!(summary.failed_tickers(), ["A", "B"]);
    assert_eq!(summary.to_string(), "incomplete downloads: ['A', 'B']");
    assert!(csv_files(dir.path()).is_empty());
}

#[tokio::test]
async fn failure_does_not_stop_later_tickers() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FakeProvider::failing(&["CEPU"]);

    let summary = Downloader::new(&provider, dir.path())
        .with_throttle(Unthrottled)
        .run(&["META", "CEPU", "IBM"])
        .await;

    assert_eq!(summary.calls, 18);
    assert_eq!(summary.written.len(), 12);
    assert_eq!(summary.failed_tickers(), ["CEPU"]);
    assert!(summary.failures.iter().all(|f| f.ticker == "CEPU"));
    assert!(
        summary
            .failures
            .iter()
            .all(|f| matches!(f.error, Error::Provider(ref m) if m.contains("CEPU")))
    );
    assert!(!dir.path().join("CEPU_annual_cash_flow.csv").exists());
    assert!(dir.path().join("IBM_annual_cash_flow.csv").exists());
}

#[tokio::test]
async fn missing_output_dir_is_a_recorded_failure() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FakeProvider::default();
    let missing = dir.path().join("does-not-exist");

    let err = fetch_statement(StatementKind::AnnualBalanceSheet, "META", &provider, &missing)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));

    let summary = Downloader::new(&provider, &missing)
        .with_throttle(Unthrottled)
        .run(&["META"])
        .await;
    assert_eq!(summary.failed_tickers(), ["META"]);
}

#[tokio::test]
async fn unsafe_ticker_is_rejected_without_a_call() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    let provider = FakeProvider::default();

    let summary = Downloader::new(&provider, &out)
        .with_throttle(Unthrottled)
        .run(&["../x", "IBM"])
        .await;

    assert_eq!(summary.failed_tickers(), ["../x"]);
    assert!(summary.failures.iter().all(|f| matches!(f.error, Error::InvalidSymbol(_))));
    assert_eq!(summary.written.len(), 6);
    assert!(provider.calls.borrow().iter().all(|c| c.starts_with("IBM:")));
    assert!(csv_files(dir.path()).is_empty());
}

/// Log sink shared between the subscriber and the test
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

async fn run_logged(ticker_count: usize) -> String {
    let logs = Captured::default();
    let sink = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let dir = tempfile::tempdir().unwrap();
    let provider = FakeProvider::default();
    let tickers: Vec<String> = (0..ticker_count).map(|n| format!("T{n}")).collect();

    let summary = Downloader::new(&provider, dir.path())
        .with_throttle(Unthrottled)
        .run(&tickers)
        .await;
    assert_eq!(summary.calls as usize, ticker_count * StatementKind::ALL.len());

    logs.text()
}

#[tokio::test]
async fn warns_when_run_exceeds_daily_quota() {
    let logs = run_logged(84).await;
    let warning = logs
        .lines()
        .find(|line| line.contains("daily quota"))
        .unwrap_or_else(|| panic!("no quota warning in:\n{logs}"));
    assert!(warning.contains("WARN"), "{warning}");
    assert!(warning.contains("planned=504"), "{warning}");
    assert!(warning.contains("max_tickers=83"), "{warning}");
}

#[tokio::test]
async fn no_quota_warning_at_the_limit() {
    let logs = run_logged(83).await;
    assert!(logs.contains("[83/83] T82"), "{logs}");
    assert!(!logs.contains("daily quota"), "{logs}");
}

#[tokio::test(start_paused = true)]
async fn fixed_pause_fires_once_for_six_calls() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FakeProvider::default();
    let start = Instant::now();

    let summary = Downloader::new(&provider, dir.path()).run(&["META"]).await;

    assert_eq!(summary.calls, 6);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(65) && elapsed < Duration::from_secs(66), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn fixed_pause_counts_across_tickers() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FakeProvider::failing(&["B"]);
    let start = Instant::now();

    // 12 attempts, failed ones included: pauses after calls 5 and 10
    let summary = Downloader::new(&provider, dir.path()).run(&["A", "B"]).await;

    assert_eq!(summary.calls, 12);
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(130) && elapsed < Duration::from_secs(131), "{elapsed:?}");
}
