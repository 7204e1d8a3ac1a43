//! End-to-end checks over the public API: fetch cycle, portfolio persistence and export,
//! with the chart endpoint replaced by canned JSON bodies.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tickerboard::config::{AppConfig, BatchPolicy};
use tickerboard::external::chart_provider::{
    ChartProvider, ChartProviderError, ChartRange, ChartSeries,
};
use tickerboard::external::yahoo::parse_chart_body;
use tickerboard::services::{
    export_service, history_service, insight_service, portfolio_service, quote_service,
};
use tickerboard::state::AppState;
use tickerboard::store::{FileStore, KeyValueStore, MemoryStore, PortfolioStore, PORTFOLIO_KEY};

/// Replays raw endpoint bodies through the real response parser.
struct CannedEndpoint {
    bodies: HashMap<&'static str, &'static str>,
}

#[async_trait]
impl ChartProvider for CannedEndpoint {
    async fn fetch_series(
        &self,
        symbol: &str,
        _range: ChartRange,
    ) -> Result<ChartSeries, ChartProviderError> {
        match self.bodies.get(symbol) {
            Some(body) => parse_chart_body(body),
            None => Err(ChartProviderError::Status(404)),
        }
    }
}

fn endpoint() -> CannedEndpoint {
    let mut bodies = HashMap::new();
    bodies.insert(
        "THYAO.IS",
        r#"{"chart":{"result":[{"meta":{"symbol":"THYAO.IS","currency":"TRY"},
            "indicators":{"quote":[{"close":[280.0,null,294.5],"volume":[1,2,3]}]}}],"error":null}}"#,
    );
    bodies.insert(
        "AAPL",
        r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","currency":"USD","longName":"Apple Inc."},
            "indicators":{"quote":[{"close":[190.0,189.05]}]}}],"error":null}}"#,
    );
    bodies.insert(
        "GC=F",
        r#"{"chart":{"result":[{"meta":{"symbol":"GC=F"},
            "indicators":{"quote":[{"close":[2000.0,2010.0]}]}}],"error":null}}"#,
    );
    bodies.insert(
        "EMPTY.IS",
        r#"{"chart":{"result":[{"meta":{"symbol":"EMPTY.IS"},"indicators":{"quote":[{"close":[]}]}}],"error":null}}"#,
    );
    bodies.insert(
        "NVDA",
        r#"{"chart":{"result":[{"meta":{"symbol":"NVDA","shortName":"NVIDIA"},
            "timestamp":[1699833600,1700438400,1701043200],
            "indicators":{"quote":[{"open":[483.2,null,482.4],"high":[496.021,499.1,505.48],
            "low":[475.5,480.0,478.3],"close":[486.2,497.45,467.7]}]}}],"error":null}}"#,
    );
    bodies.insert("JUNK", "<html>rate limited</html>");
    CannedEndpoint { bodies }
}

fn symbols(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn fetch_cycle_degrades_to_partial_results() {
    let provider = endpoint();
    let list = symbols(&["THYAO.IS", "AAPL", "GC=F", "EMPTY.IS", "JUNK", "MISSING"]);

    let mut quotes = quote_service::fetch_quotes(
        &provider,
        &list,
        BatchPolicy::new(3, Duration::from_millis(5)),
    )
    .await;
    quotes.sort_by(|a, b| a.symbol.cmp(&b.symbol));

    let got: Vec<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();
    assert_eq!(got, vec!["AAPL", "GC=F", "THYAO.IS"]);

    let thyao = quotes.iter().find(|q| q.symbol == "THYAO.IS").unwrap();
    assert_eq!(thyao.price, 294.5);
    assert_eq!(thyao.change_pct, 5.18);
    assert_eq!(thyao.volume, Some(3));
    assert_eq!(thyao.name, "THYAO");

    let apple = quotes.iter().find(|q| q.symbol == "AAPL").unwrap();
    assert_eq!(apple.name, "Apple Inc.");
    assert_eq!(apple.change_pct, -0.5);
    assert!(!apple.is_favorable);

    let gold = quotes.iter().find(|q| q.symbol == "GC=F").unwrap();
    assert_eq!(gold.currency, "USD");
    assert_eq!(gold.name, "Gold");

    let picks: Vec<String> = insight_service::opportunities(&quotes)
        .into_iter()
        .map(|q| q.symbol)
        .collect();
    assert_eq!(picks, vec!["THYAO.IS", "GC=F"]);
}

#[tokio::test]
async fn portfolio_survives_restart_and_exports() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::from_lookup(|_| None).unwrap();

    {
        let mut state = AppState::new(
            config.clone(),
            Arc::new(endpoint()),
            Arc::new(FileStore::new(dir.path())),
        );
        assert!(portfolio_service::add(&mut state, "thyao").await.unwrap());
        assert!(portfolio_service::add(&mut state, "AAPL").await.unwrap());
        assert!(!portfolio_service::add(&mut state, "AAPL").await.unwrap());
        assert!(portfolio_service::add(&mut state, "MISSING").await.unwrap());
        assert!(portfolio_service::remove(&mut state, "missing").unwrap());
    }

    let state = AppState::new(config, Arc::new(endpoint()), Arc::new(FileStore::new(dir.path())));
    assert_eq!(state.portfolio.symbols(), vec!["THYAO.IS", "AAPL"]);
    assert!(portfolio_service::contains(&state, "THYAO"));

    let quotes = portfolio_service::refresh(&state).await;
    let mut buf = Vec::new();
    export_service::write_quotes_csv(&mut buf, &quotes).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("Apple Inc."));
}

#[tokio::test]
async fn weekly_history_skips_incomplete_bars() {
    let history = history_service::chart_history(&endpoint(), "NVDA", ChartRange::Year)
        .await
        .unwrap();

    assert_eq!(history.name, "NVIDIA");
    assert_eq!(history.period, "1y");
    let times: Vec<&str> = history.history.iter().map(|p| p.time.as_str()).collect();
    assert_eq!(times, vec!["2023-11-13", "2023-11-27"]);
    assert_eq!(history.history[0].high, 496.02);

    assert!(history_service::chart_history(&endpoint(), "JUNK", ChartRange::Day)
        .await
        .is_err());
}

#[test]
fn corrupt_portfolio_blob_starts_empty() {
    let storage = MemoryStore::new();
    storage.set(PORTFOLIO_KEY, "[{\"symbol\": 42}]").unwrap();

    let store = PortfolioStore::load(Arc::new(storage));
    assert!(store.list().is_empty());
}
