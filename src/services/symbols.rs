//! Default symbol universe and the exchange-suffix conventions built on it.

/// Most liquid Borsa Istanbul equities.
pub const ISTANBUL_SYMBOLS: &[&str] = &[
    // Banks
    "AKBNK.IS", "GARAN.IS", "HALKB.IS", "ISCTR.IS", "YKBNK.IS", "VAKBN.IS", "TSKB.IS", "SKBNK.IS",
    "ALBRK.IS",
    // Holdings
    "KCHOL.IS", "SAHOL.IS", "DOHOL.IS", "EKGYO.IS", "GSDHO.IS", "BIMAS.IS", "SISE.IS", "EREGL.IS",
    "ARCLK.IS", "ENKAI.IS",
    // Energy
    "EUPWR.IS", "SMRTG.IS", "ODAS.IS", "ASTOR.IS", "AYDEM.IS", "ZOREN.IS", "KONTR.IS", "GWIND.IS",
    // Industry & auto
    "FROTO.IS", "TOASO.IS", "TTRAK.IS", "TMSN.IS", "KARSN.IS", "PETKM.IS", "TUPRS.IS", "VESTL.IS",
    // Transport
    "THYAO.IS", "PGSUS.IS", "TAVHL.IS", "CLEBI.IS",
    // Retail & food
    "MGROS.IS", "SOKM.IS", "AEFES.IS", "CCOLA.IS", "ULKER.IS", "MAVI.IS",
    // Tech & telecom
    "ASELS.IS", "TCELL.IS", "TTKOM.IS", "SDTTR.IS", "VBTYZ.IS",
];

/// Global equities quoted without an exchange suffix.
pub const GLOBAL_SYMBOLS: &[&str] = &[
    // Tech
    "AAPL", "MSFT", "GOOGL", "GOOG", "AMZN", "NVDA", "TSLA", "META", "NFLX", "AMD", "INTC", "AVGO",
    "QCOM", "CSCO", "ORCL", "ADBE", "CRM", "NOW", "SNOW", "PANW", "CRWD", "ZS", "DDOG", "NET",
    "MDB", "PLTR", "U", "TTD", "TWLO", "SQ", "PYPL",
    // Finance
    "JPM", "V", "MA", "BAC", "WFC", "C", "GS", "MS", "BLK", "AXP", "SCHW", "USB", "PNC", "TFC",
    "COF", "BK", "STT", "SPGI", "MCO", "ICE", "CME", "MSCI",
    // Consumer
    "WMT", "COST", "HD", "LOW", "TGT", "TJX", "NKE", "LULU", "SBUX", "MCD", "YUM", "CMG", "DPZ",
    "ROST", "ULTA", "DG", "DLTR", "PG", "KO", "PEP", "PM", "MO", "CL", "KMB", "EL", "CLX", "CHD",
    // Healthcare
    "JNJ", "UNH", "LLY", "ABBV", "MRK", "PFE", "TMO", "ABT", "DHR", "BMY", "AMGN", "GILD", "VRTX",
    "REGN", "CI", "CVS", "HUM", "ELV", "HCA", "MOH",
    // Media
    "DIS", "CMCSA", "PARA", "WBD", "FOXA", "SPOT", "RBLX", "EA", "TTWO",
    // Industrials
    "BA", "CAT", "GE", "HON", "UNP", "UPS", "FDX", "LMT", "RTX", "NOC", "GD", "MMM", "EMR", "ITW",
    "ETN", "PH", "ROK", "DOV",
    // Energy
    "XOM", "CVX", "COP", "SLB", "EOG", "MPC", "PSX", "VLO", "OXY", "HAL", "BKR", "DVN", "FANG",
    "HES",
    // Autos
    "F", "GM", "TM", "HMC", "STLA", "RIVN", "LCID",
    // Semiconductors
    "TXN", "ADI", "MCHP", "KLAC", "LRCX", "AMAT", "MU", "NXPI", "ON", "MRVL", "SWKS",
    // E-commerce & payments
    "SHOP", "MELI", "EBAY", "ETSY", "SE", "BABA", "JD", "PDD", "COIN", "SOFI",
    // Telecom
    "T", "VZ", "TMUS", "CHTR",
    // REITs
    "PLD", "AMT", "CCI", "EQIX", "SPG", "PSA", "O", "WELL", "DLR", "VICI",
    // Utilities
    "NEE", "DUK", "SO", "D", "AEP", "EXC", "SRE", "XEL",
    // Other
    "BRK-B", "BRK.B", "TSM", "ASML", "NVO", "UL", "SAP", "TTE", "SHEL", "BP",
];

/// Commodity futures with their display names.
pub const COMMODITY_SYMBOLS: &[(&str, &str)] = &[
    ("GC=F", "Gold"),
    ("SI=F", "Silver"),
    ("HG=F", "Copper"),
    ("CL=F", "Crude Oil"),
];

const ISTANBUL_SUFFIX: &str = ".IS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    Istanbul,
    Global,
    Commodity,
}

pub fn market_of(symbol: &str) -> Market {
    if commodity_name(symbol).is_some() || symbol.contains('=') {
        Market::Commodity
    } else if symbol.ends_with(ISTANBUL_SUFFIX) {
        Market::Istanbul
    } else {
        Market::Global
    }
}

pub fn commodity_name(symbol: &str) -> Option<&'static str> {
    COMMODITY_SYMBOLS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, name)| *name)
}

fn is_global(symbol: &str) -> bool {
    GLOBAL_SYMBOLS.contains(&symbol)
}

/// Trim, uppercase and attach the Istanbul suffix to bare local tickers.
///
/// Known global tickers, symbols that already carry a suffix and futures/FX
/// symbols (containing `=`) are left as they are.
pub fn normalize(symbol: &str) -> String {
    let symbol = symbol.trim().to_ascii_uppercase();
    if symbol.is_empty()
        || is_global(&symbol)
        || commodity_name(&symbol).is_some()
        || symbol.contains('.')
        || symbol.contains('=')
    {
        return symbol;
    }
    format!("{symbol}{ISTANBUL_SUFFIX}")
}

pub fn default_currency(symbol: &str) -> &'static str {
    if symbol.ends_with(ISTANBUL_SUFFIX) {
        "TRY"
    } else {
        "USD"
    }
}

/// Fallback display name when the endpoint did not provide one.
pub fn display_name(symbol: &str) -> String {
    match commodity_name(symbol) {
        Some(name) => name.to_string(),
        None => symbol.trim_end_matches(ISTANBUL_SUFFIX).to_string(),
    }
}

/// Every catalogue symbol, Istanbul first, without duplicates.
pub fn default_universe() -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let all = ISTANBUL_SYMBOLS
        .iter()
        .chain(GLOBAL_SYMBOLS.iter())
        .chain(COMMODITY_SYMBOLS.iter().map(|(s, _)| s));
    for symbol in all {
        if !out.iter().any(|s| s == symbol) {
            out.push(symbol.to_string());
        }
    }
    out
}
