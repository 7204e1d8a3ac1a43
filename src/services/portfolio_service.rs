use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{FetchOutcome, PortfolioEntry, Quote};
use crate::services::quote_service;
use crate::services::symbols::normalize;
use crate::state::AppState;

fn validated(symbol: &str) -> Result<String, AppError> {
    let symbol = normalize(symbol);
    if symbol.is_empty() {
        return Err(AppError::Validation("Symbol cannot be empty".into()));
    }
    Ok(symbol)
}

/// Build an entry carrying the current quote, or a bare entry if the quote can't be had.
pub async fn snapshot_entry(state: &AppState, symbol: &str) -> PortfolioEntry {
    match quote_service::fetch_one(state.price_provider.as_ref(), symbol).await {
        FetchOutcome::Fetched(quote) => PortfolioEntry::from_quote(quote),
        FetchOutcome::Dropped { reason, .. } => {
            warn!("No snapshot for {} ({}); saving the bare symbol", symbol, reason);
            PortfolioEntry::new(symbol)
        }
    }
}

/// Save `symbol`. Returns `false` when it was already saved; no request is made then.
pub async fn add(state: &mut AppState, symbol: &str) -> Result<bool, AppError> {
    let symbol = validated(symbol)?;
    if state.portfolio.contains(&symbol) {
        return Ok(false);
    }

    let entry = snapshot_entry(state, &symbol).await;
    let added = state.portfolio.add(entry)?;
    if added {
        info!("➕ Added {} to portfolio", symbol);
    }
    Ok(added)
}

pub fn remove(state: &mut AppState, symbol: &str) -> Result<bool, AppError> {
    let symbol = validated(symbol)?;
    let removed = state.portfolio.remove(&symbol)?;
    if removed {
        info!("➖ Removed {} from portfolio", symbol);
    }
    Ok(removed)
}

/// Sidebar toggle: returns whether the symbol is saved afterwards.
pub async fn toggle(state: &mut AppState, symbol: &str) -> Result<bool, AppError> {
    let symbol = validated(symbol)?;
    if state.portfolio.contains(&symbol) {
        remove(state, &symbol)?;
        Ok(false)
    } else {
        add(state, &symbol).await?;
        Ok(true)
    }
}

pub fn contains(state: &AppState, symbol: &str) -> bool {
    state.portfolio.contains(&normalize(symbol))
}

/// Fresh quotes for every saved symbol, batched like any other cycle.
pub async fn refresh(state: &AppState) -> Vec<Quote> {
    let symbols = state.portfolio.symbols();
    quote_service::fetch_quotes(state.price_provider.as_ref(), &symbols, state.config.batch).await
}
