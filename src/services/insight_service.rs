use std::cmp::Ordering;

use crate::models::{Quote, Technicals, VolatilityBand};
use crate::services::indicators::{annualized_volatility, latest_rsi, latest_sma, round2};
use crate::services::symbols::{market_of, Market};

pub const MAX_OPPORTUNITIES: usize = 10;
const EQUITY_MIN_CHANGE_PCT: f64 = 0.5;
const COMMODITY_MIN_CHANGE_PCT: f64 = 0.3;

pub fn volatility_band(change_pct: f64) -> VolatilityBand {
    let magnitude = change_pct.abs();
    if magnitude > 5.0 {
        VolatilityBand::High
    } else if magnitude > 2.0 {
        VolatilityBand::Medium
    } else {
        VolatilityBand::Low
    }
}

/// One-line momentum read of the daily change, as shown on a quote card.
pub fn outlook(change_pct: f64) -> String {
    let shown = (change_pct * 10.0).round() / 10.0;
    if change_pct > 5.0 {
        format!("Strong momentum with +{shown}% gain")
    } else if change_pct > 2.0 {
        format!("Positive trend with +{shown}% gain")
    } else if change_pct > 0.0 {
        "Slight upward movement".to_string()
    } else if change_pct < -5.0 {
        format!("Strong decline with {shown}% loss")
    } else if change_pct < -2.0 {
        format!("Downward trend with {shown}% loss")
    } else {
        "Stable price action".to_string()
    }
}

/// Indicators for a close series (oldest first, gaps already removed).
pub fn technicals(closes: &[f64], change_pct: f64) -> Technicals {
    Technicals {
        ma_5: latest_sma(closes, 5).map(round2),
        ma_20: latest_sma(closes, 20).map(round2),
        rsi_14: latest_rsi(closes, 14).map(round2),
        volatility_pct: annualized_volatility(closes, 20).map(round2),
        band: volatility_band(change_pct),
        outlook: outlook(change_pct),
    }
}

/// Favorable movers above the market's threshold, best first, at most ten.
pub fn opportunities(quotes: &[Quote]) -> Vec<Quote> {
    let mut picks: Vec<Quote> = quotes
        .iter()
        .filter(|q| {
            let threshold = match market_of(&q.symbol) {
                Market::Commodity => COMMODITY_MIN_CHANGE_PCT,
                Market::Istanbul | Market::Global => EQUITY_MIN_CHANGE_PCT,
            };
            q.is_favorable && q.change_pct > threshold
        })
        .cloned()
        .collect();

    picks.sort_by(|a, b| {
        b.change_pct
            .partial_cmp(&a.change_pct)
            .unwrap_or(Ordering::Equal)
    });
    picks.truncate(MAX_OPPORTUNITIES);
    picks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(symbol: &str, change_pct: f64) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            price: 10.0,
            change_pct,
            currency: "USD".to_string(),
            volume: None,
            is_favorable: change_pct > 0.0,
            technicals: Technicals::default(),
        }
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(volatility_band(5.01), VolatilityBand::High);
        assert_eq!(volatility_band(-6.0), VolatilityBand::High);
        assert_eq!(volatility_band(5.0), VolatilityBand::Medium);
        assert_eq!(volatility_band(-2.5), VolatilityBand::Medium);
        assert_eq!(volatility_band(2.0), VolatilityBand::Low);
        assert_eq!(volatility_band(0.0), VolatilityBand::Low);
    }

    #[test]
    fn test_outlook_text() {
        assert_eq!(outlook(6.27), "Strong momentum with +6.3% gain");
        assert_eq!(outlook(2.5), "Positive trend with +2.5% gain");
        assert_eq!(outlook(0.1), "Slight upward movement");
        assert_eq!(outlook(0.0), "Stable price action");
        assert_eq!(outlook(-1.9), "Stable price action");
        assert_eq!(outlook(-3.24), "Downward trend with -3.2% loss");
        assert_eq!(outlook(-7.0), "Strong decline with -7% loss");
    }

    #[test]
    fn test_technicals_on_short_series() {
        let t = technicals(&[10.0, 10.5], 5.0);
        assert_eq!(t.ma_5, None);
        assert_eq!(t.ma_20, None);
        assert_eq!(t.rsi_14, None);
        assert_eq!(t.volatility_pct, None);
        assert_eq!(t.band, VolatilityBand::Medium);
    }

    #[test]
    fn test_technicals_on_month_of_closes() {
        let closes: Vec<f64> = (1..=21).map(|i| i as f64).collect();
        let t = technicals(&closes, 5.0);
        assert_eq!(t.ma_5, Some(19.0));
        assert_eq!(t.ma_20, Some(11.5));
        assert_eq!(t.rsi_14, Some(100.0));
        assert!(t.volatility_pct.unwrap() > 0.0);
    }

    #[test]
    fn test_opportunities_filter_and_order() {
        let quotes = vec![
            quote("AAPL", 0.4),
            quote("GC=F", 0.4),
            quote("THYAO.IS", 3.1),
            quote("MSFT", -2.0),
            quote("NVDA", 0.9),
        ];
        let picks: Vec<String> = opportunities(&quotes).into_iter().map(|q| q.symbol).collect();
        assert_eq!(picks, vec!["THYAO.IS", "NVDA", "GC=F"]);
    }

    #[test]
    fn test_opportunities_capped_at_ten() {
        let quotes: Vec<Quote> = (0..15).map(|i| quote(&format!("S{i}"), 1.0 + i as f64)).collect();
        let picks = opportunities(&quotes);
        assert_eq!(picks.len(), MAX_OPPORTUNITIES);
        assert_eq!(picks[0].symbol, "S14");
    }
}
