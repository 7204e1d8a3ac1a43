use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::BatchPolicy;
use crate::external::chart_provider::{ChartProvider, ChartSeries};
use crate::models::{FetchOutcome, Quote};
use crate::services::indicators::round2;
use crate::services::insight_service::technicals;
use crate::services::symbols::{default_currency, display_name};

/// Reduce a daily series to a single quote.
///
/// Returns `None` when the series holds no non-null close.
pub fn derive_quote(symbol: &str, series: &ChartSeries) -> Option<Quote> {
    let points: Vec<(usize, f64)> = series
        .closes
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.filter(|v| v.is_finite()).map(|v| (i, v)))
        .collect();

    let &(last_idx, current) = points.last()?;
    let previous = if points.len() > 1 {
        points[points.len() - 2].1
    } else {
        current
    };

    let change_pct = if previous != 0.0 {
        round2((current - previous) / previous * 100.0)
    } else {
        0.0
    };

    let symbol = if series.meta.symbol.is_empty() {
        symbol.to_string()
    } else {
        series.meta.symbol.clone()
    };

    let name = series
        .meta
        .long_name
        .clone()
        .or_else(|| series.meta.short_name.clone())
        .unwrap_or_else(|| display_name(&symbol));

    let currency = series
        .meta
        .currency
        .clone()
        .unwrap_or_else(|| default_currency(&symbol).to_string());

    let volume = series.volumes.get(last_idx).copied().flatten();

    let closes: Vec<f64> = points.iter().map(|&(_, c)| c).collect();

    Some(Quote {
        name,
        price: round2(current),
        change_pct,
        currency,
        volume,
        is_favorable: change_pct > 0.0,
        technicals: technicals(&closes, change_pct),
        symbol,
    })
}

/// One best-effort attempt for one symbol. Never fails; problems become `Dropped`.
pub async fn fetch_one(provider: &dyn ChartProvider, symbol: &str) -> FetchOutcome {
    match provider.fetch_daily_series(symbol).await {
        Ok(series) => match derive_quote(symbol, &series) {
            Some(quote) => FetchOutcome::Fetched(quote),
            None => FetchOutcome::Dropped {
                symbol: symbol.to_string(),
                reason: "empty close series".to_string(),
            },
        },
        Err(e) => FetchOutcome::Dropped {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        },
    }
}

/// Fetch `symbols` in groups of `policy.size`, pausing `policy.pause` between groups.
///
/// Requests inside a group run concurrently and the whole group is awaited
/// before the next one starts. Symbols that differ only in padding or ASCII
/// case are fetched once, and a cycle never yields two quotes with the same
/// final symbol. Failed symbols are logged and left out, so the result may be
/// partial or empty.
pub async fn fetch_outcomes(
    provider: &dyn ChartProvider,
    symbols: &[String],
    policy: BatchPolicy,
) -> Vec<FetchOutcome> {
    let mut unique: Vec<&str> = Vec::with_capacity(symbols.len());
    for symbol in symbols.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if !unique.iter().any(|u| u.eq_ignore_ascii_case(symbol)) {
            unique.push(symbol);
        }
    }

    let batch_size = policy.size.max(1);
    let batch_count = unique.len().div_ceil(batch_size);
    let mut outcomes = Vec::with_capacity(unique.len());
    let mut seen: Vec<String> = Vec::with_capacity(unique.len());

    for (i, batch) in unique.chunks(batch_size).enumerate() {
        debug!("Fetching batch {}/{}: {:?}", i + 1, batch_count, batch);

        let results = join_all(batch.iter().map(|symbol| fetch_one(provider, symbol))).await;
        for outcome in results {
            let outcome = match outcome {
                FetchOutcome::Fetched(quote)
                    if seen.iter().any(|s| s.eq_ignore_ascii_case(&quote.symbol)) =>
                {
                    FetchOutcome::Dropped {
                        reason: format!("duplicate of {} in this cycle", quote.symbol),
                        symbol: quote.symbol,
                    }
                }
                other => other,
            };

            match &outcome {
                FetchOutcome::Fetched(_) => {
                    debug!("✓ Fetched {}", outcome.symbol());
                    seen.push(outcome.symbol().to_string());
                }
                FetchOutcome::Dropped { symbol, reason } => {
                    warn!("Dropping {} from this cycle: {}", symbol, reason)
                }
            }
            outcomes.push(outcome);
        }

        if i + 1 < batch_count && !policy.pause.is_zero() {
            sleep(policy.pause).await;
        }
    }

    outcomes
}

/// Quotes for every symbol that could be fetched this cycle.
pub async fn fetch_quotes(
    provider: &dyn ChartProvider,
    symbols: &[String],
    policy: BatchPolicy,
) -> Vec<Quote> {
    let outcomes = fetch_outcomes(provider, symbols, policy).await;
    let requested = outcomes.len();
    let quotes: Vec<Quote> = outcomes
        .into_iter()
        .filter_map(FetchOutcome::into_quote)
        .collect();

    info!("✓ Fetched {}/{} quotes", quotes.len(), requested);
    quotes
}
