//! Environment-driven service configuration.
//!
//! # Environment Variables
//!
//! - `BIND_HOST`: listen address (default: 0.0.0.0)
//! - `PORT`: HTTP port (default: 8080)
//! - `SENTIMENT_SERVICE_URL`: classifier base URL (default: http://localhost:8000);
//!   `off` disables the classifier and uses keyword analysis only
//! - `SENTIMENT_TIMEOUT_SECS`: classifier request timeout (default: 10)
//! - `MINDEASE_STORE`: "memory" (default) or "sqlite"
//! - `MINDEASE_DB_PATH`: SQLite file (default: mindease.db)

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::insight::sentiment::DEFAULT_TIMEOUT_SECS;
use crate::insight::{
    CopingSelector, FallbackAnalyzer, MoodPipeline, SentimentAnalyzer, SentimentClient,
};
use crate::storage::{InMemoryMoodStore, MoodStore, SqliteMoodStore, StoreError};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_SENTIMENT_URL: &str = "http://localhost:8000";
const DEFAULT_DB_PATH: &str = "mindease.db";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to open mood store: {0}")]
    Store(#[from] StoreError),
}

/// Where sentiment analysis comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerMode {
    /// Remote classifier with keyword fallback.
    Remote { base_url: String, timeout: Duration },
    /// Keyword analysis only.
    Offline,
}

/// Which mood store backs the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite { path: PathBuf },
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MindEaseConfig {
    pub host: String,
    pub port: u16,
    pub analyzer: AnalyzerMode,
    pub store: StoreBackend,
}

impl Default for MindEaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            analyzer: AnalyzerMode::Remote {
                base_url: DEFAULT_SENTIMENT_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            store: StoreBackend::Memory,
        }
    }
}

impl MindEaseConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("BIND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("SENTIMENT_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "SENTIMENT_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let analyzer = match get("SENTIMENT_SERVICE_URL") {
            Some(url) if url.eq_ignore_ascii_case("off") => AnalyzerMode::Offline,
            url => AnalyzerMode::Remote {
                base_url: url.unwrap_or_else(|| DEFAULT_SENTIMENT_URL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        };

        let store = match get("MINDEASE_STORE").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("sqlite") => StoreBackend::Sqlite {
                path: PathBuf::from(
                    get("MINDEASE_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
                ),
            },
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "MINDEASE_STORE",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            analyzer,
            store,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the mood pipeline this configuration describes.
    pub fn build_pipeline(&self) -> Result<MoodPipeline, ConfigError> {
        let analyzer: Arc<dyn SentimentAnalyzer> = match &self.analyzer {
            AnalyzerMode::Remote { base_url, timeout } => {
                Arc::new(SentimentClient::new(base_url.clone(), *timeout)?)
            }
            AnalyzerMode::Offline => Arc::new(FallbackAnalyzer::default()),
        };

        let store: Arc<dyn MoodStore> = match &self.store {
            StoreBackend::Memory => Arc::new(InMemoryMoodStore::new()),
            StoreBackend::Sqlite { path } => Arc::new(SqliteMoodStore::new(path.clone())?),
        };

        Ok(MoodPipeline::new(analyzer, CopingSelector::default(), store))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<MindEaseConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MindEaseConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, MindEaseConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9000"),
            ("BIND_HOST", "127.0.0.1"),
            ("SENTIMENT_SERVICE_URL", "http://classifier:8000"),
            ("SENTIMENT_TIMEOUT_SECS", "3"),
            ("MINDEASE_STORE", "sqlite"),
            ("MINDEASE_DB_PATH", "/tmp/moods.db"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(
            config.analyzer,
            AnalyzerMode::Remote {
                base_url: "http://classifier:8000".into(),
                timeout: Duration::from_secs(3),
            }
        );
        assert_eq!(
            config.store,
            StoreBackend::Sqlite {
                path: PathBuf::from("/tmp/moods.db")
            }
        );
    }

    #[test]
    fn test_offline_mode() {
        let config = load(&[("SENTIMENT_SERVICE_URL", "OFF")]).unwrap();
        assert_eq!(config.analyzer, AnalyzerMode::Offline);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidValue { key: "PORT", .. })
        ));
        assert!(matches!(
            load(&[("SENTIMENT_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidValue { key: "SENTIMENT_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            load(&[("MINDEASE_STORE", "postgres")]),
            Err(ConfigError::InvalidValue { key: "MINDEASE_STORE", .. })
        ));
    }

    #[tokio::test]
    async fn test_build_offline_pipeline() {
        let config = load(&[("SENTIMENT_SERVICE_URL", "off")]).unwrap();
        let pipeline = config.build_pipeline().unwrap();
        let result = pipeline.analyze_text("feeling great").await;
        assert!(result.is_fallback);
    }
}
