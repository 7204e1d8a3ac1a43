use chrono::DateTime;
use tracing::{debug, warn};

use crate::external::chart_provider::{ChartProvider, ChartProviderError, ChartRange, ChartSeries};
use crate::models::{ChartHistory, ChartPoint};
use crate::services::indicators::round2;
use crate::services::symbols::display_name;

/// Fetch `symbol` over `range` and shape it into display bars.
///
/// Bars missing any of open/high/low/close are skipped. A series with no
/// complete bar is reported as `BadResponse`.
pub async fn chart_history(
    provider: &dyn ChartProvider,
    symbol: &str,
    range: ChartRange,
) -> Result<ChartHistory, ChartProviderError> {
    let series = provider.fetch_series(symbol, range).await.map_err(|e| {
        warn!("Chart fetch for {} ({}) failed: {}", symbol, range, e);
        e
    })?;

    let history = history_from_series(symbol, range, &series);
    if history.history.is_empty() {
        return Err(ChartProviderError::BadResponse(format!("no chart data for {symbol}")));
    }

    debug!("{} bars for {} over {}", history.history.len(), history.symbol, range);
    Ok(history)
}

pub fn history_from_series(symbol: &str, range: ChartRange, series: &ChartSeries) -> ChartHistory {
    let time_format = if range.is_intraday() {
        "%Y-%m-%d %H:%M"
    } else {
        "%Y-%m-%d"
    };
    let at = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten().filter(|v| v.is_finite());

    let history = series
        .timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let time = DateTime::from_timestamp(ts, 0)?;
            Some(ChartPoint {
                time: time.format(time_format).to_string(),
                open: round2(at(&series.opens, i)?),
                high: round2(at(&series.highs, i)?),
                low: round2(at(&series.lows, i)?),
                close: round2(at(&series.closes, i)?),
            })
        })
        .collect();

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

    ChartHistory {
        symbol,
        name,
        period: range.range().to_string(),
        history,
    }
}
