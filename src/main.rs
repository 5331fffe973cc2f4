//! Polymarket up/down quote finder entry point.

use clap::{Parser, Subcommand};
use time::OffsetDateTime;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use updown_quotes::config::Config;
use updown_quotes::market::MarketReference;
use updown_quotes::MarketFinder;

/// Print live best buy/sell prices for Polymarket up/down markets.
#[derive(Parser, Debug)]
#[command(name = "updown-quotes")]
#[command(about = "Find the current Polymarket up/down markets and print their quotes")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Asset and interval to report, e.g. `btc:15`. Repeatable; replaces the
    /// configured list.
    #[arg(short, long = "asset", value_name = "ASSET:MINUTES", global = true)]
    assets: Vec<MarketReference>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print quotes (default).
    Run,

    /// Check configuration validity and show the URLs that would be queried.
    CheckConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load()?;

    // Diagnostics go to stderr so stdout carries only the report.
    let filter = EnvFilter::new(config.log_directives(args.verbose));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    config.validate()?;

    let assets = if args.assets.is_empty() {
        config.assets()?
    } else {
        args.assets
    };
    debug!(count = assets.len(), "Assets to report");

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config, &assets),
        Some(Command::Run) | None => cmd_run(&config, &assets).await,
    }
}

/// Fetch and print one report block per asset.
async fn cmd_run(config: &Config, assets: &[MarketReference]) -> anyhow::Result<()> {
    let finder = MarketFinder::from_config(config)?;
    let mut stdout = std::io::stdout().lock();
    finder.run(assets, OffsetDateTime::now_utc(), &mut stdout).await?;
    Ok(())
}

/// Print the effective configuration without touching the network.
fn cmd_check_config(config: &Config, assets: &[MarketReference]) -> anyhow::Result<()> {
    let finder = MarketFinder::from_config(config)?;
    let now = OffsetDateTime::now_utc();

    println!("======================================================================");
    println!("UPDOWN QUOTES - CONFIGURATION CHECK");
    println!("======================================================================");
    println!("  Gamma API: {}", config.gamma_api_url);
    println!("  CLOB API: {}", config.clob_api_url);
    println!("  Event URL: {}", config.polymarket_event_url);
    match config.http_timeout_ms {
        Some(ms) => println!("  HTTP Timeout: {}ms", ms),
        None => println!("  HTTP Timeout: none"),
    }
    println!("----------------------------------------------------------------------");
    println!("Current markets:");
    for reference in assets {
        println!("  {}: {}", reference, finder.url_for(reference, now));
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
