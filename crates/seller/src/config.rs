//! Seller service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SELLER_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `SELLER_BASE_URL` - Public URL for the seller service
//!
//! ## Optional
//! - `SELLER_HOST` - Bind address (default: 127.0.0.1)
//! - `SELLER_PORT` - Listen port (default: 3000)
//! - `SELLER_UPLOAD_DIR` - Local object store root (default: uploads)
//! - `SELLER_PUBLIC_UPLOAD_URL` - Public prefix for uploaded objects
//!   (default: `<SELLER_BASE_URL>/uploads/`)
//! - `SELLER_LOGIN_PATH` - Where unauthenticated users are sent (default: /login)
//! - `SELLER_MAX_UPLOAD_BYTES` - Request body limit for submissions (default: 10 MiB)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Seller service configuration.
///
/// `SecretString` keeps the database URL out of `Debug` output.
#[derive(Debug, Clone)]
pub struct SellerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the seller service
    pub base_url: String,
    /// Object storage configuration
    pub storage: StorageConfig,
    /// Redirect target for unauthenticated requests
    pub login_path: String,
    /// Maximum accepted request body size for submissions
    pub max_upload_bytes: usize,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Local object store configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory uploaded objects are written to
    pub upload_dir: PathBuf,
    /// Public URL prefix objects are served from
    pub public_url: Url,
}

impl SellerConfig {
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

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub(crate) fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(get);

        let database_url = vars
            .optional("SELLER_DATABASE_URL")
            .or_else(|| vars.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("SELLER_DATABASE_URL".to_string()))?;
        let host = vars.parsed("SELLER_HOST", "127.0.0.1")?;
        let port = vars.parsed("SELLER_PORT", "3000")?;
        let base_url = vars.required("SELLER_BASE_URL")?;
        let storage = StorageConfig::from_vars(&vars, &base_url)?;
        let login_path = vars.or_default("SELLER_LOGIN_PATH", "/login");
        let max_upload_bytes = vars
            .optional("SELLER_MAX_UPLOAD_BYTES")
            .map(|v| {
                v.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("SELLER_MAX_UPLOAD_BYTES".to_string(), e.to_string())
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        let sentry_dsn = vars.optional("SENTRY_DSN");
        let sentry_environment = vars.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = vars
            .optional("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = vars
            .optional("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            storage,
            login_path,
            max_upload_bytes,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StorageConfig {
    fn from_vars<F: Fn(&str) -> Option<String>>(
        vars: &Vars<F>,
        base_url: &str,
    ) -> Result<Self, ConfigError> {
        let upload_dir = PathBuf::from(vars.or_default("SELLER_UPLOAD_DIR", "uploads"));
        let raw_url = vars.optional("SELLER_PUBLIC_UPLOAD_URL").unwrap_or_else(|| {
            format!("{}/uploads/", base_url.trim_end_matches('/'))
        });
        let public_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SELLER_PUBLIC_UPLOAD_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            upload_dir,
            public_url,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup with the usual required/optional/default helpers.
struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a variable with a default value and parse it.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }
}
