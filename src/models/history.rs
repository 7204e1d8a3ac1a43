use serde::{Deserialize, Serialize};

/// One bar of a chart, prices rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Price history behind the detail view of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartHistory {
    pub symbol: String,
    pub name: String,
    pub period: String,
    pub history: Vec<ChartPoint>,
}
