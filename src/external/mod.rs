pub mod chart_provider;
pub mod yahoo;
