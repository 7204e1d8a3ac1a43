pub mod kv;
pub mod portfolio_store;

use thiserror::Error;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use portfolio_store::{PortfolioStore, PORTFOLIO_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("symbol cannot be empty")]
    EmptySymbol,
}
