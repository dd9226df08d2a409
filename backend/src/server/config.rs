//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use lang_learn::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) token_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_issuer: String,
    pub(crate) token_ttl: Duration,
    pub(crate) bcrypt_cost: u32,
    pub(crate) version: String,
}

impl ServerConfig {
    /// Construct a configuration bound to `bind_addr` that signs tokens with
    /// `token_secret`. Without a pool the server keeps its data in memory.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            token_secret,
            token_issuer: String::from("lang-learn-svc"),
            token_ttl: Duration::from_secs(12 * 60 * 60),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the issuer claim and lifetime of bearer tokens.
    #[must_use]
    pub fn with_tokens(mut self, issuer: impl Into<String>, ttl: Duration) -> Self {
        self.token_issuer = issuer.into();
        self.token_ttl = ttl;
        self
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Version reported by `/ping`.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
