//! Service configuration loaded via OrthoConfig.
//!
//! Settings layer CLI arguments over environment variables over files.
//! Ports carry declared defaults; the remaining fields are optional and
//! their accessors supply fallbacks, so an empty environment yields a
//! runnable development service.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

mod token_secret;

pub use token_secret::{BuildMode, TokenSecretError, token_secret_from_env};

const DEFAULT_ENVIRONMENT: &str = "dev";
const DEFAULT_BCRYPT_COST: u32 = 12;
const DEFAULT_TOKEN_ISSUER: &str = "lang-learn-svc";
const DEFAULT_TOKEN_TTL_SECS: u64 = 12 * 60 * 60;
const DEFAULT_DB_NAME: &str = "langlearndb";

/// HTTP service and security settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SVC")]
pub struct ServiceSettings {
    /// Port the HTTP server listens on.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Deployment environment label, reported in logs.
    pub environment: Option<String>,
    /// Version reported by `/ping`.
    #[ortho_config(cli_long = "service-version")]
    pub version: Option<String>,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
    /// Issuer claim stamped on and required of bearer tokens.
    pub token_issuer: Option<String>,
    /// Bearer token lifetime in seconds.
    pub token_ttl_secs: Option<u64>,
}

impl ServiceSettings {
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }

    /// Configured version, falling back to the crate version.
    #[must_use]
    pub fn version(&self) -> &str {
        self.version
            .as_deref()
            .unwrap_or(env!("CARGO_PKG_VERSION"))
    }

    #[must_use]
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    #[must_use]
    pub fn token_issuer(&self) -> &str {
        self.token_issuer.as_deref().unwrap_or(DEFAULT_TOKEN_ISSUER)
    }

    #[must_use]
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS))
    }
}

/// PostgreSQL connection settings.
///
/// Either a complete `url` or discrete `host`/`user`/`password` parts may
/// be given. With neither, [`DatabaseSettings::url`] returns `None` and the
/// service runs against the in-memory store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DB")]
pub struct DatabaseSettings {
    /// Complete connection URL; wins over the discrete parts.
    pub url: Option<String>,
    pub host: Option<String>,
    #[ortho_config(default = 5432)]
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl DatabaseSettings {
    /// Connection URL, or `None` when no database is configured.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lang_learn::config::DatabaseSettings;
    ///
    /// let settings = DatabaseSettings {
    ///     url: None,
    ///     host: Some("db".to_owned()),
    ///     port: 5432,
    ///     user: Some("svc".to_owned()),
    ///     password: Some("secret".to_owned()),
    ///     name: None,
    /// };
    /// assert_eq!(
    ///     settings.url().as_deref(),
    ///     Some("postgres://svc:secret@db:5432/langlearndb")
    /// );
    /// ```
    #[must_use]
    pub fn url(&self) -> Option<String> {
        if let Some(url) = self.url.as_deref().filter(|url| !url.is_empty()) {
            return Some(url.to_owned());
        }
        let host = self.host.as_deref().filter(|host| !host.is_empty())?;
        let credentials = match (self.user.as_deref(), self.password.as_deref()) {
            (Some(user), Some(password)) => format!("{user}:{password}@"),
            (Some(user), None) => format!("{user}@"),
            _ => String::new(),
        };
        Some(format!(
            "postgres://{credentials}{host}:{port}/{name}",
            port = self.port,
            name = self.name.as_deref().unwrap_or(DEFAULT_DB_NAME),
        ))
    }
}
