use std::sync::Arc;

use crate::config::AppConfig;
use crate::external::chart_provider::ChartProvider;
use crate::store::{KeyValueStore, PortfolioStore};

/// Everything a command needs, built once at startup and passed down explicitly.
pub struct AppState {
    pub config: AppConfig,
    pub price_provider: Arc<dyn ChartProvider>,
    pub portfolio: PortfolioStore,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        price_provider: Arc<dyn ChartProvider>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config,
            price_provider,
            portfolio: PortfolioStore::load(storage),
        }
    }
}
