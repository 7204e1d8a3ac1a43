pub mod export_service;
pub mod history_service;
pub mod indicators;
pub mod insight_service;
pub mod portfolio_service;
pub mod quote_service;
pub mod symbols;
