//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STARFRUIT_BACKEND_URL` - Base URL of the order/catalog backend
//! - `STARFRUIT_BACKEND_TOKEN` - Bearer credential for order submission
//!
//! ## Optional
//! - `STARFRUIT_STORAGE_DIR` - Directory for persisted cart state
//!   (default: `.starfruit`)
//! - `STARFRUIT_CATALOG_TTL_SECS` - Catalog cache TTL in seconds
//!   (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_STORAGE_DIR: &str = ".starfruit";
const DEFAULT_CATALOG_TTL_SECS: &str = "300";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart engine configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Order/catalog backend configuration.
    pub backend: BackendConfig,
    /// Directory holding the persisted cart and buy-now slots.
    pub storage_dir: PathBuf,
}

/// Order/catalog backend configuration.
///
/// Implements `Debug` manually to redact the bearer credential.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the REST backend (e.g. `https://api.example.com`).
    pub base_url: Url,
    /// Bearer credential sent with order submissions. Supplied by the
    /// authentication collaborator; this crate only forwards it.
    pub bearer_token: SecretString,
    /// How long catalog responses are cached.
    pub catalog_cache_ttl: Duration,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("base_url", &self.base_url.as_str())
            .field("bearer_token", &"[REDACTED]")
            .field("catalog_cache_ttl", &self.catalog_cache_ttl)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend = BackendConfig::from_env()?;
        let storage_dir =
            PathBuf::from(get_env_or_default("STARFRUIT_STORAGE_DIR", DEFAULT_STORAGE_DIR));

        Ok(Self {
            backend,
            storage_dir,
        })
    }
}

impl BackendConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_required_env("STARFRUIT_BACKEND_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STARFRUIT_BACKEND_URL".to_string(), e.to_string())
            })?;
        let bearer_token = SecretString::from(get_required_env("STARFRUIT_BACKEND_TOKEN")?);
        let ttl_secs = get_env_or_default("STARFRUIT_CATALOG_TTL_SECS", DEFAULT_CATALOG_TTL_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "STARFRUIT_CATALOG_TTL_SECS".to_string(),
                    e.to_string(),
                )
            })?;

        Ok(Self {
            base_url,
            bearer_token,
            catalog_cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
