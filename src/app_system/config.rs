use std::fs;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::retry::RetryPolicy;

pub const PRODUCT_CATEGORIES: [&str; 5] = ["Electronics", "Clothing", "Books", "Home & Kitchen", "Sports"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

/// Catalog configuration: defaults, then an optional JSON file, then environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub categories: Vec<String>,
    pub store_latency_ms: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub buffer_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            categories: PRODUCT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            store_latency_ms: 300,
            retry_attempts: 3,
            retry_delay_ms: 500,
            buffer_size: 32,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup("CATALOG_CONFIG") {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        if let Some(value) = lookup("CATALOG_CATEGORIES") {
            config.categories = value
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(value) = parse_var(&lookup, "CATALOG_STORE_LATENCY_MS")? {
            config.store_latency_ms = value;
        }
        if let Some(value) = parse_var(&lookup, "CATALOG_RETRY_ATTEMPTS")? {
            config.retry_attempts = value;
        }
        if let Some(value) = parse_var(&lookup, "CATALOG_RETRY_DELAY_MS")? {
            config.retry_delay_ms = value;
        }
        if let Some(value) = parse_var(&lookup, "CATALOG_BUFFER_SIZE")? {
            config.buffer_size = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the catalog cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The store channel cannot be created with zero capacity.
        if self.buffer_size == 0 {
            return Err(ConfigError::InvalidVar {
                name: "buffer_size",
                value: "0".to_string(),
            });
        }
        // No categorised product could pass validation.
        if self.categories.is_empty() {
            return Err(ConfigError::InvalidVar {
                name: "categories",
                value: String::new(),
            });
        }
        Ok(())
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, Duration::from_millis(self.retry_delay_ms))
    }

    pub fn store_latency(&self) -> Duration {
        Duration::from_millis(self.store_latency_ms)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        None => Ok(None),
    }
}
