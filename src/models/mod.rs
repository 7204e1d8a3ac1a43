mod history;
mod portfolio;
mod quote;

pub use history::{ChartHistory, ChartPoint};
pub use portfolio::{canonical_symbol, PortfolioEntry};
pub use quote::{FetchOutcome, Quote, Technicals, VolatilityBand};
