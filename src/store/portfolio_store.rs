use std::sync::Arc;

use tracing::{info, warn};

use super::kv::KeyValueStore;
use super::StoreError;
use crate::models::{canonical_symbol, PortfolioEntry};

pub const PORTFOLIO_KEY: &str = "portfolio";

/// The user's saved symbols, mirrored to a [`KeyValueStore`] on every mutation.
///
/// Symbols are unique (ASCII case-insensitive). A failed write leaves the
/// in-memory list exactly as it was before the call.
pub struct PortfolioStore {
    storage: Arc<dyn KeyValueStore>,
    entries: Vec<PortfolioEntry>,
}

impl PortfolioStore {
    /// Load the persisted list. Absent or unreadable data starts an empty portfolio.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let entries = match storage.get(PORTFOLIO_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<PortfolioEntry>>(&raw) {
                Ok(entries) => dedupe(entries),
                Err(e) => {
                    warn!("Stored portfolio is corrupt, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read stored portfolio, starting empty: {}", e);
                Vec::new()
            }
        };

        info!("📁 Loaded portfolio with {} entries", entries.len());
        Self { storage, entries }
    }

    pub fn list(&self) -> &[PortfolioEntry] {
        &self.entries
    }

    pub fn symbols(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.symbol.clone()).collect()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.iter().any(|e| e.matches(symbol))
    }

    /// Returns `false` without touching storage when the symbol is already saved.
    ///
    /// The symbol is stored trimmed and uppercased; a blank one is rejected.
    pub fn add(&mut self, mut entry: PortfolioEntry) -> Result<bool, StoreError> {
        entry.symbol = canonical_symbol(&entry.symbol);
        if entry.symbol.is_empty() {
            return Err(StoreError::EmptySymbol);
        }
        if self.contains(&entry.symbol) {
            return Ok(false);
        }

        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)?;
        Ok(true)
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, symbol: &str) -> Result<bool, StoreError> {
        if !self.contains(symbol) {
            return Ok(false);
        }

        let next: Vec<PortfolioEntry> = self
            .entries
            .iter()
            .filter(|e| !e.matches(symbol))
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(true)
    }

    /// Flip membership of `entry.symbol`; returns the membership after the call.
    pub fn toggle(&mut self, entry: PortfolioEntry) -> Result<bool, StoreError> {
        if self.contains(&entry.symbol) {
            self.remove(&entry.symbol)?;
            Ok(false)
        } else {
            self.add(entry)?;
            Ok(true)
        }
    }

    fn commit(&mut self, next: Vec<PortfolioEntry>) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&next)?;
        self.storage.set(PORTFOLIO_KEY, &raw)?;
        self.entries = next;
        Ok(())
    }
}

fn dedupe(entries: Vec<PortfolioEntry>) -> Vec<PortfolioEntry> {
    let mut kept: Vec<PortfolioEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if !kept.iter().any(|k| k.matches(&entry.symbol)) {
            kept.push(entry);
        }
    }
    kept
}
