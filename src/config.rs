use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;
use crate::external::yahoo::DEFAULT_CHART_BASE_URL;

pub const DEFAULT_BATCH_SIZE: usize = 3;
pub const DEFAULT_BATCH_PAUSE_MS: u64 = 500;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DATA_DIR: &str = ".tickerboard";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (tickerboard)";

/// How a fetch cycle paces its requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    pub size: usize,
    pub pause: Duration,
}

impl BatchPolicy {
    pub fn new(size: usize, pause: Duration) -> Self {
        Self { size: size.max(1), pause }
    }
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, Duration::from_millis(DEFAULT_BATCH_PAUSE_MS))
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub chart_base_url: url::Url,
    pub batch: BatchPolicy,
    pub http_timeout: Duration,
    pub user_agent: String,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup, so tests need not touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup("CHART_BASE_URL").unwrap_or_else(|| DEFAULT_CHART_BASE_URL.to_string());
        let chart_base_url = url::Url::parse(&base)
            .map_err(|e| AppError::Config(format!("CHART_BASE_URL '{}' is invalid: {}", base, e)))?;

        let batch_size = lookup("FETCH_BATCH_SIZE")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BATCH_SIZE);
        let batch_pause_ms = lookup("FETCH_BATCH_PAUSE_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_BATCH_PAUSE_MS);
        let timeout_secs = lookup("HTTP_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);

        let config = Self {
            chart_base_url,
            batch: BatchPolicy::new(batch_size, Duration::from_millis(batch_pause_ms)),
            http_timeout: Duration::from_secs(timeout_secs),
            user_agent: lookup("USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            data_dir: lookup("TICKERBOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.chart_base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "CHART_BASE_URL '{}' cannot take a symbol path",
                self.chart_base_url
            )));
        }
        if self.http_timeout.is_zero() {
            return Err(AppError::Config("HTTP_TIMEOUT_SECS must be greater than zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.chart_base_url.as_str(), DEFAULT_CHART_BASE_URL);
        assert_eq!(config.batch.size, 3);
        assert_eq!(config.batch.pause, Duration::from_millis(500));
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.data_dir, PathBuf::from(".tickerboard"));
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FETCH_BATCH_SIZE", "lots"),
            ("FETCH_BATCH_PAUSE_MS", "-1"),
        ]))
        .unwrap();
        assert_eq!(config.batch, BatchPolicy::default());
    }

    #[test]
    fn test_zero_batch_size_becomes_one() {
        let config = AppConfig::from_lookup(lookup_from(&[("FETCH_BATCH_SIZE", "0")])).unwrap();
        assert_eq!(config.batch.size, 1);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("CHART_BASE_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_opaque_base_url_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("CHART_BASE_URL", "mailto:quotes@example.test")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
