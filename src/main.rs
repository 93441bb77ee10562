//! Download balance sheets, income statements and cash flows from Alpha
//! Vantage into one CSV per ticker and statement.

use std::num::{NonZeroU32, NonZeroU64};
use std::path::PathBuf;
use std::time::Duration;

use alphav_fundamentals::throttle::{DEFAULT_EVERY, DEFAULT_PAUSE};
use alphav_fundamentals::{AlphaVantage, Config, Downloader, FixedPause, Governed, Throttle};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "alphav-fundamentals",
    about = "Download quarterly and annual financial statements from Alpha Vantage as CSV"
)]
struct Cli {
    /// Ticker symbols to download. Defaults to META CEPU IBM.
    tickers: Vec<String>,

    /// Directory for the CSV files. Defaults to $FUNDAMENTALS_OUTPUT_DIR, then the current directory.
    #[arg(long, short)]
    output_dir: Option<PathBuf>,

    /// API key. Defaults to $ALPHAVANTAGE_API_KEY (also read from .env).
    #[arg(long)]
    api_key: Option<String>,

    /// Pause after this many calls.
    #[arg(long, default_value_t = DEFAULT_EVERY)]
    calls_per_pause: NonZeroU64,

    /// Length of each pause in seconds.
    #[arg(long, default_value_t = DEFAULT_PAUSE.as_secs())]
    pause_secs: u64,

    /// Pace calls with a token bucket of --calls-per-pause calls per minute instead of fixed pauses.
    #[arg(long, default_value_t = false)]
    token_bucket: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("alphav_fundamentals=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().with_tickers(&cli.tickers);
    if let Some(key) = cli.api_key {
        config = config.with_api_key(key);
    }
    if let Some(dir) = cli.output_dir {
        config = config.with_output_dir(dir);
    }

    let api_key = config.require_api_key()?;
    std::fs::create_dir_all(&config.output_dir)?;

    let client = AlphaVantage::default().with_key(api_key);
    tracing::info!(
        tickers = config.tickers.len(),
        output_dir = %config.output_dir.display(),
        "starting download"
    );

    if cli.token_bucket {
        let per_minute = u32::try_from(cli.calls_per_pause.get())
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MIN);
        download(client, &config, Governed::per_minute(per_minute)).await;
    } else {
        let throttle = FixedPause::new(cli.calls_per_pause, Duration::from_secs(cli.pause_secs));
        download(client, &config, throttle).await;
    }

    Ok(())
}

async fn download<T: Throttle>(client: AlphaVantage, config: &Config, throttle: T) {
    let summary = Downloader::new(client, &config.output_dir)
        .with_throttle(throttle)
        .run(&config.tickers)
        .await;

    tracing::info!(
        calls = summary.calls,
        written = summary.written.len(),
        failed = summary.failures.len(),
        "done"
    );
}
