//! Integration tests against a local mock of the Gamma and CLOB APIs.
//!
//! The live test at the bottom talks to the real Polymarket API.
//! Run it with: cargo test --test integration -- --ignored


use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use updown_quotes::config::{default_assets, Config};
use updown_quotes::market::{ClobClient, GammaClient, MarketIdentity, Quote, Side};
use updown_quotes::MarketFinder;

use support::{closed_port_url, now, MockApi};

const BTC_5M: &str = "btc-updown-5m-1700000100";
const BTC_15M: &str = "btc-updown-15m-1700000100";
const ETH_15M: &str = "eth-updown-15m-1700000100";

fn event_url(slug: &str) -> String {
    format!("https://polymarket.com/event/{}", slug)
}

#[tokio::test]
async fn resolve_returns_first_market_tokens() {
    let server = MockApi::new()
        .market(BTC_5M, "512340", &["up-1", "down-1"])
        .serve()
        .await;

    let identity = server.gamma().resolve(&event_url(BTC_5M)).await;

    assert_eq!(
        identity,
        Some(MarketIdentity {
            market_id: Some("512340".to_string()),
            up_token_id: Some("up-1".to_string()),
            down_token_id: Some("down-1".to_string()),
        })
    );
    assert_eq!(server.api.gamma_hits(), 1);
}

#[tokio::test]
async fn resolve_empty_markets_is_no_data() {
    let server = MockApi::new()
        .event(BTC_5M, StatusCode::OK, json!({"slug": BTC_5M, "markets": []}))
        .serve()
        .await;

    assert_eq!(server.gamma().resolve(&event_url(BTC_5M)).await, None);
}

#[tokio::test]
async fn resolve_http_error_is_no_data() {
    let server = MockApi::new()
        .event(BTC_5M, StatusCode::INTERNAL_SERVER_ERROR, json!({}))
        .serve()
        .await;

    let gamma = server.gamma();
    assert_eq!(gamma.resolve(&event_url(BTC_5M)).await, None);
    // Unknown slug: the mock answers 404.
    assert_eq!(gamma.resolve(&event_url(ETH_15M)).await, None);
    assert_eq!(server.api.gamma_hits(), 2);
}

#[tokio::test]
async fn resolve_network_error_is_no_data() {
    let gamma = GammaClient::new(reqwest::Client::new(), closed_port_url().await);
    assert_eq!(gamma.resolve(&event_url(BTC_5M)).await, None);
}

#[tokio::test]
async fn resolve_malformed_token_ids_keeps_market() {
    let server = MockApi::new()
        .event(
            BTC_5M,
            StatusCode::OK,
            json!({"markets": [{"id": "77", "clobTokenIds": "[oops"}]}),
        )
        .serve()
        .await;

    let identity = server.gamma().resolve(&event_url(BTC_5M)).await.unwrap();
    assert_eq!(identity.market_id.as_deref(), Some("77"));
    assert_eq!(identity.up_token_id, None);
    assert_eq!(identity.down_token_id, None);
}

#[tokio::test]
async fn resolve_without_slug_makes_no_request() {
    let server = MockApi::new().serve().await;

    assert_eq!(server.gamma().resolve("https://polymarket.com/").await, None);
    assert_eq!(server.api.gamma_hits(), 0);
}

#[tokio::test]
async fn quote_without_token_makes_no_request() {
    let server = MockApi::new().serve().await;

    assert_eq!(server.clob().quote(None).await, Quote::default());
    assert!(server.api.price_requests().is_empty());
}

#[tokio::test]
async fn quote_with_empty_token_makes_no_request() {
    let server = MockApi::new().serve().await;

    assert_eq!(server.clob().quote(Some("")).await, Quote::default());
    assert!(server.api.price_requests().is_empty());
}

#[tokio::test]
async fn quote_reads_both_sides() {
    let server = MockApi::new()
        .price("tok", "BUY", StatusCode::OK, json!({"price": "0.42"}))
        .price("tok", "SELL", StatusCode::OK, json!({"price": "0.44"}))
        .serve()
        .await;

    let quote = server.clob().quote(Some("tok")).await;

    assert_eq!(quote.price(Side::Buy), Some("0.42"));
    assert_eq!(quote.price(Side::Sell), Some("0.44"));
    assert_eq!(
        server.api.price_requests(),
        vec![
            ("tok".to_string(), "BUY".to_string()),
            ("tok".to_string(), "SELL".to_string()),
        ]
    );
}

#[tokio::test]
async fn quote_sides_fail_independently() {
    let server = MockApi::new()
        .price("a", "BUY", StatusCode::OK, json!({"price": "0.42"}))
        .price("a", "SELL", StatusCode::INTERNAL_SERVER_ERROR, json!({}))
        .price("b", "BUY", StatusCode::TOO_MANY_REQUESTS, json!({}))
        .price("b", "SELL", StatusCode::OK, json!({"price": "0.61"}))
        .serve()
        .await;
    let clob = server.clob();

    assert_eq!(
        clob.quote(Some("a")).await,
        Quote {
            buy_price: Some("0.42".to_string()),
            sell_price: None,
        }
    );
    assert_eq!(
        clob.quote(Some("b")).await,
        Quote {
            buy_price: None,
            sell_price: Some("0.61".to_string()),
        }
    );
    assert_eq!(server.api.price_requests().len(), 4);
}

#[tokio::test]
async fn best_price_reports_status() {
    let server = MockApi::new()
        .price("a", "SELL", StatusCode::INTERNAL_SERVER_ERROR, json!({}))
        .price("a", "BUY", StatusCode::OK, json!({"mid": "0.5"}))
        .serve()
        .await;
    let clob = server.clob();

    let err = clob.best_price("a", Side::Sell).await.unwrap_err();
    assert_eq!(err.to_string(), "SELL price request returned HTTP 500");

    // 200 without a price field.
    assert_eq!(clob.best_price("a", Side::Buy).await.unwrap(), None);
}

#[tokio::test]
async fn quote_network_error_is_empty() {
    let clob = ClobClient::new(reqwest::Client::new(), closed_port_url().await);
    assert_eq!(clob.quote(Some("tok")).await, Quote::default());
}

#[tokio::test]
async fn run_emits_one_block_per_asset() {
    let server = MockApi::new()
        .market(BTC_5M, "100", &["btc5-up", "btc5-down"])
        .price("btc5-up", "BUY", StatusCode::OK, json!({"price": "0.52"}))
        .price("btc5-up", "SELL", StatusCode::OK, json!({"price": "0.51"}))
        .price("btc5-down", "BUY", StatusCode::OK, json!({"price": "0.49"}))
        .price("btc5-down", "SELL", StatusCode::INTERNAL_SERVER_ERROR, json!({}))
        .event(BTC_15M, StatusCode::OK, json!({"markets": []}))
        .serve()
        .await;
    let finder = server.finder();
    let base = server.base_url();

    let mut out = Vec::new();
    finder.run(&default_assets(), now(), &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    let expected = format!(
        "--- Fetching Live Prices for Current Interval (UTC: 22:15:23) ---\n\
         \n\
         Asset: BTC 5m\n\
         URL: {base}/event/{BTC_5M}\n\
         Market ID: 100\n\
         UP Token ID: btc5-up\n  -> Best Buy: $0.52 | Best Sell: $0.51\n\
         DOWN Token ID: btc5-down\n  -> Best Buy: $0.49 | Best Sell: $None\n\
         \n\
         Asset: BTC 15m\n\
         URL: {base}/event/{BTC_15M}\n\
         Could not find market data.\n\
         \n\
         Asset: ETH 15m\n\
         URL: {base}/event/{ETH_15M}\n\
         Could not find market data.\n"
    );
    assert_eq!(text, expected);
    assert_eq!(text.matches("Asset: ").count(), 3);
    assert_eq!(server.api.gamma_hits(), 3);
    assert_eq!(server.api.price_requests().len(), 4);
}

#[tokio::test]
async fn report_with_missing_down_token_skips_its_requests() {
    let server = MockApi::new()
        .market(ETH_15M, "9", &["only-up"])
        .price("only-up", "BUY", StatusCode::OK, json!({"price": "0.3"}))
        .price("only-up", "SELL", StatusCode::OK, json!({"price": "0.29"}))
        .serve()
        .await;

    let reference = "eth:15".parse().unwrap();
    let report = server.finder().report(&reference, now()).await;
    let market = report.market.unwrap();

    assert_eq!(market.identity.down_token_id, None);
    assert_eq!(market.down, Quote::default());
    assert_eq!(market.up.buy_price.as_deref(), Some("0.3"));
    assert_eq!(server.api.price_requests().len(), 2);
}

#[tokio::test]
async fn report_without_market_id_still_quotes_tokens() {
    let server = MockApi::new()
        .event(
            BTC_5M,
            StatusCode::OK,
            json!({"markets": [{"id": null, "clobTokenIds": "[\"u\", \"d\"]"}]}),
        )
        .price("u", "BUY", StatusCode::OK, json!({"price": "0.55"}))
        .price("d", "SELL", StatusCode::OK, json!({"price": "0.44"}))
        .serve()
        .await;

    let reference = "btc:5".parse().unwrap();
    let report = server.finder().report(&reference, now()).await;
    let text = report.to_string();

    assert!(text.contains("Market ID: None\n"), "{text}");
    assert!(text.contains("UP Token ID: u\n  -> Best Buy: $0.55 | Best Sell: $None\n"), "{text}");
    assert!(text.contains("DOWN Token ID: d\n  -> Best Buy: $None | Best Sell: $0.44\n"), "{text}");
    assert!(!text.contains("Could not find market data."));
    assert_eq!(server.api.price_requests().len(), 4);
}

#[tokio::test]
async fn finder_from_config_uses_configured_endpoints() {
    let server = MockApi::new()
        .market(BTC_15M, "5", &["u", "d"])
        .serve()
        .await;
    let config = Config {
        gamma_api_url: server.base_url(),
        clob_api_url: server.base_url(),
        polymarket_event_url: "https://polymarket.com/event".to_string(),
        http_timeout_ms: Some(5_000),
        market_assets: Some("btc:15".to_string()),
        ..Config::default()
    };

    let finder = MarketFinder::from_config(&config).unwrap();
    let reports = finder.report_all(&config.assets().unwrap(), now()).await;

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].url, event_url(BTC_15M));
    assert_eq!(
        reports[0].market.as_ref().unwrap().identity.market_id.as_deref(),
        Some("5")
    );
    // Prices were requested but the mock has none: both sides unavailable.
    assert_eq!(server.api.price_requests().len(), 4);
}

/// Test the whole pipeline against the live API.
#[tokio::test]
#[ignore = "requires network access"]
async fn test_live_default_assets() {
    let finder = MarketFinder::from_config(&Config::default()).unwrap();

    let mut out = Vec::new();
    let run_at = time::OffsetDateTime::now_utc();
    finder.run(&default_assets(), run_at, &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();

    println!("{}", text);
    assert_eq!(text.matches("Asset: ").count(), 3);
}
