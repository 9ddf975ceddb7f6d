//! Configuration management

use std::path::PathBuf;

use quakecat_ingest::IdScheme;
use serde::{Deserialize, Serialize};

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default CSV source, resolved against the working directory.
pub const DEFAULT_SOURCE_PATH: &str = "earthquakes1970-2014.csv";

/// Default CORS allowed origin for local development.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub catalogue: CatalogueConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
}

/// Catalogue source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueConfig {
    pub source_path: PathBuf,
    pub id_scheme: IdScheme,
    /// Load the source during startup instead of on the first request
    pub preload: bool,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Config {
    /// Load configuration from `.env`, the environment, and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let id_scheme = match var("QUAKECAT_ID_SCHEME") {
            Some(raw) => raw.parse()?,
            None => defaults.catalogue.id_scheme,
        };

        let config = Config {
            server: ServerConfig {
                host: var("QUAKECAT_HOST").unwrap_or(defaults.server.host),
                port: var("QUAKECAT_PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.server.port),
                shutdown_timeout_secs: var("QUAKECAT_SHUTDOWN_TIMEOUT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.server.shutdown_timeout_secs),
            },
            catalogue: CatalogueConfig {
                source_path: var("QUAKECAT_SOURCE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.catalogue.source_path),
                id_scheme,
                preload: var("QUAKECAT_PRELOAD")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.catalogue.preload),
            },
            cors: CorsConfig {
                allowed_origins: var("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(|origin| origin.trim().to_string())
                            .filter(|origin| !origin.is_empty())
                            .collect()
                    })
                    .unwrap_or(defaults.cors.allowed_origins),
                allow_credentials: var("CORS_ALLOW_CREDENTIALS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.cors.allow_credentials),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.catalogue.source_path.as_os_str().is_empty() {
            anyhow::bail!("QUAKECAT_SOURCE_PATH cannot be empty");
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            },
            catalogue: CatalogueConfig {
                source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
                id_scheme: IdScheme::Sequential,
                preload: false,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: true,
            },
        }
    }
}
