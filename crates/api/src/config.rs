//! # API Configuration Module
//!
//! Loads the health server's listener settings from the environment.
//!
//! ## Environment Variables
//!
//! - `HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `PORT`: The port to listen on (default: 3000)
//! - `REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 30)

use eyre::{Result, WrapErr};
use std::env;
use tracing::warn;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Configuration for the Warden health server
///
/// # Example
///
/// ```
/// use eyre::Result;
/// use warden_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the server to listen on
    pub port: u16,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid u16.
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("PORT") {
            Ok(value) => value.trim().parse().wrap_err("Invalid PORT value")?,
            Err(_) => DEFAULT_PORT,
        };

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            host,
            port,
            request_timeout,
        })
    }

    /// Like [`ApiConfig::from_env`], but a bad value falls back to the
    /// defaults instead of failing.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|err| {
            warn!("Invalid health server configuration, using defaults: {:#}", err);
            Self::default()
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
