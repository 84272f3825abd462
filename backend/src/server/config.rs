//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use pastebin::domain::{RandomSlugGenerator, SlugLengthError};
use pastebin::inbound::http::request_time::TimeOverridePolicy;
use pastebin::inbound::http::state::PublicBaseUrl;
use pastebin::outbound::persistence::DbPool;
use pastebin::settings::AppSettings;
use thiserror::Error;

/// Reasons the loaded settings cannot start a server.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid base url `{value}`: {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },
    #[error(transparent)]
    InvalidSlugLength(#[from] SlugLengthError),
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) base_url: PublicBaseUrl,
    pub(crate) time_override: TimeOverridePolicy,
    pub(crate) slugs: RandomSlugGenerator,
    pub(crate) sweep_interval: Option<Duration>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Validate settings and derive a configuration without storage.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, ConfigError> {
        let bind_addr =
            settings
                .bind_addr()
                .parse()
                .map_err(|source| ConfigError::InvalidBindAddr {
                    value: settings.bind_addr().to_owned(),
                    source,
                })?;
        let base_url =
            PublicBaseUrl::parse(settings.base_url()).map_err(|source| {
                ConfigError::InvalidBaseUrl {
                    value: settings.base_url().to_owned(),
                    source,
                }
            })?;
        let slugs = RandomSlugGenerator::new(settings.slug_length())?;

        Ok(Self {
            bind_addr,
            base_url,
            time_override: TimeOverridePolicy::from_test_mode(settings.test_mode),
            slugs,
            sweep_interval: settings.sweep_interval(),
            db_pool: None,
        })
    }

    /// Attach a database connection pool; pastes are kept in memory otherwise.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
