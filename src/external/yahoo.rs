use crate::config::AppConfig;
use crate::external::chart_provider::{
    ChartMeta, ChartProvider, ChartProviderError, ChartRange, ChartSeries,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub const DEFAULT_CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

pub struct YahooChartProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl YahooChartProvider {
    pub fn new(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ChartProviderError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| ChartProviderError::Network(e.to_string()))?;
        Ok(Self::new(client, config.chart_base_url.clone()))
    }

    /// `{base}/{symbol}?range=..&interval=..` with the symbol escaped as one path segment.
    pub fn chart_url(&self, symbol: &str, range: ChartRange) -> Result<Url, ChartProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ChartProviderError::InvalidRequest(format!("{} cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .push(symbol);
        url.query_pairs_mut()
            .clear()
            .append_pair("range", range.range())
            .append_pair("interval", range.interval());
        url.set_fragment(None);
        Ok(url)
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    meta: Option<YahooMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Option<YahooIndicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooMeta {
    symbol: Option<String>,
    currency: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    // volumes occasionally arrive as floats, so read them loosely
    #[serde(default)]
    volume: Option<Vec<Option<f64>>>,
}

/// Parse a chart endpoint body into a [`ChartSeries`].
///
/// Fails when the result set, metadata or quote block is missing. An empty close
/// array is returned as-is; deciding that it carries no price is the caller's job.
pub fn parse_chart_body(body: &str) -> Result<ChartSeries, ChartProviderError> {
    let response: YahooChartResponse =
        serde_json::from_str(body).map_err(|e| ChartProviderError::Parse(e.to_string()))?;

    if let Some(err) = response.chart.error.filter(|e| !e.is_null()) {
        return Err(ChartProviderError::BadResponse(err.to_string()));
    }

    let result = response
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
        .ok_or_else(|| ChartProviderError::BadResponse("missing result".into()))?;

    let meta = result
        .meta
        .ok_or_else(|| ChartProviderError::BadResponse("missing meta".into()))?;

    let quote = result
        .indicators
        .and_then(|mut i| if i.quote.is_empty() { None } else { Some(i.quote.swap_remove(0)) })
        .ok_or_else(|| ChartProviderError::BadResponse("missing quote".into()))?;

    let volumes = quote
        .volume
        .unwrap_or_default()
        .into_iter()
        .map(|v| v.filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
        .collect();

    Ok(ChartSeries {
        meta: ChartMeta {
            symbol: meta.symbol.unwrap_or_default(),
            currency: meta.currency.filter(|c| !c.is_empty()),
            long_name: meta.long_name.filter(|n| !n.is_empty()),
            short_name: meta.short_name.filter(|n| !n.is_empty()),
        },
        timestamps: result.timestamp,
        opens: quote.open,
        highs: quote.high,
        lows: quote.low,
        closes: quote.close,
        volumes,
    })
}

#[async_trait]
impl ChartProvider for YahooChartProvider {
    async fn fetch_series(
        &self,
        symbol: &str,
        range: ChartRange,
    ) -> Result<ChartSeries, ChartProviderError> {
        let url = self.chart_url(symbol, range)?;
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ChartProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ChartProviderError::Status(resp.status().as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ChartProviderError::Network(e.to_string()))?;

        parse_chart_body(&body)
    }
}
