/// Trading days per year used to annualize daily volatility.
pub const TRADING_DAYS: f64 = 252.0;

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Simple Moving Average (SMA)
/// Returns a vector aligned with `values`:
/// - `None` until enough values exist
/// - `Some(avg)` after `window` values
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    // Running sum; subtract the value that falls out of the window.
    values
        .iter()
        .enumerate()
        .scan(0.0_f64, move |sum, (i, &v)| {
            *sum += v;
            if i >= window {
                *sum -= values[i - window];
            }

            let out = if i + 1 >= window {
                Some(*sum / window as f64)
            } else {
                None
            };

            Some(out)
        })
        .collect()
}

/// Mean of the trailing `window` values, or `None` if there are fewer.
pub fn latest_sma(values: &[f64], window: usize) -> Option<f64> {
    sma(values, window).last().copied().flatten()
}

/// Relative Strength Index over the trailing `period` price changes.
///
/// Gains and losses are averaged with a plain rolling mean:
/// RS = mean gain / mean loss, RSI = 100 - 100 / (1 + RS).
///
/// Needs `period + 1` prices. A window with gains but no losses is 100; a flat
/// window has no defined RSI and returns `None`.
pub fn latest_rsi(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }

    let tail = &prices[prices.len() - (period + 1)..];
    let (gain, loss) = tail
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((0.0_f64, 0.0_f64), |(g, l), c| {
            if c > 0.0 {
                (g + c, l)
            } else {
                (g, l - c)
            }
        });

    let avg_gain = gain / period as f64;
    let avg_loss = loss / period as f64;

    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { None } else { Some(100.0) };
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// Simple daily returns: `p[i] / p[i-1] - 1`. Pairs with a zero base are skipped.
pub fn daily_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| w[1] / w[0] - 1.0)
        .collect()
}

/// Annualized volatility in percent over the trailing `window` daily returns.
///
/// Sample standard deviation (n - 1) × √252 × 100. Needs at least two returns.
pub fn annualized_volatility(prices: &[f64], window: usize) -> Option<f64> {
    let returns = daily_returns(prices);
    let take = returns.len().min(window);
    if take < 2 {
        return None;
    }

    let recent = &returns[returns.len() - take..];
    let mean = recent.iter().sum::<f64>() / take as f64;
    let variance = recent.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (take - 1) as f64;

    Some(variance.sqrt() * TRADING_DAYS.sqrt() * 100.0)
}
