//! bcrypt password adapter.
//!
//! Hashing and verification are CPU-bound, so both run on Tokio's blocking
//! pool. The active trace id is re-installed there so failures still
//! correlate with the request.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::TraceId;
use crate::domain::ports::{PasswordCheckError, PasswordService, PasswordServiceError};

/// Default work factor.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

fn hash_regex() -> &'static Regex {
    static HASH_RE: OnceLock<Regex> = OnceLock::new();
    HASH_RE.get_or_init(|| {
        Regex::new(r"^\$2[ayb]\$.{56}$")
            .unwrap_or_else(|error| panic!("bcrypt hash regex failed to compile: {error}"))
    })
}

/// Password service backed by the `bcrypt` crate.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordService {
    cost: u32,
}

impl BcryptPasswordService {
    /// Build a service hashing with `cost` rounds (4..=31).
    #[must_use]
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordService {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

async fn on_blocking_pool<T, F>(work: F) -> Result<T, String>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    let handle = tokio::task::spawn_blocking(work);
    let joined = match trace_id {
        Some(id) => TraceId::scope(id, handle).await,
        None => handle.await,
    };
    joined.map_err(|err| err.to_string())
}

#[async_trait]
impl PasswordService for BcryptPasswordService {
    async fn hash(&self, plaintext: &str) -> Result<String, PasswordServiceError> {
        let cost = self.cost;
        let plaintext = Zeroizing::new(plaintext.to_owned());
        on_blocking_pool(move || bcrypt::hash(plaintext.as_bytes(), cost))
            .await
            .map_err(PasswordServiceError::hashing)?
            .map_err(|err| PasswordServiceError::hashing(err.to_string()))
    }

    fn is_valid(&self, candidate: &str) -> bool {
        !hash_regex().is_match(candidate)
    }

    async fn check(&self, hash: &str, plaintext: &str) -> Result<(), PasswordCheckError> {
        let hash = hash.to_owned();
        let plaintext = Zeroizing::new(plaintext.to_owned());
        let matched = on_blocking_pool(move || bcrypt::verify(plaintext.as_bytes(), &hash))
            .await
            .map_err(PasswordCheckError::failure)?
            .map_err(|err| {
                debug!(error = %err, "bcrypt verification failed");
                PasswordCheckError::failure(err.to_string())
            })?;
        if matched {
            Ok(())
        } else {
            Err(PasswordCheckError::mismatch())
        }
    }
}
