//! HS256 JSON Web Token adapter.
//!
//! Tokens carry `iss`, `sub`, `jti`, `iat` and `exp`. Expiry is judged
//! against the injected clock with no leeway, so a token is rejected from
//! the second its lifetime ends.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::UserId;
use crate::domain::ports::{TokenError, TokenService};

/// Issuer stamped on tokens unless configured otherwise.
pub const DEFAULT_ISSUER: &str = "lang-learn-svc";
/// Token lifetime unless configured otherwise.
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    jti: String,
    iat: i64,
    exp: i64,
}

/// Token service signing with a shared HMAC secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build a service signing with `secret`.
    pub fn new(
        secret: &Zeroizing<Vec<u8>>,
        issuer: impl Into<String>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let issuer = issuer.into();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            issuer,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &UserId) -> Result<String, TokenError> {
        let iat = self.clock.utc().timestamp();
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: subject.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::issue(err.to_string()))
    }

    fn subject(&self, token: &str) -> Result<UserId, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                warn!(error = %err, "rejected bearer token");
                TokenError::invalid(err.to_string())
            })?
            .claims;

        if claims.exp <= self.clock.utc().timestamp() {
            warn!(jti = %claims.jti, "rejected expired bearer token");
            return Err(TokenError::invalid("token expired"));
        }
        UserId::new(&claims.sub).map_err(|err| TokenError::invalid(err.to_string()))
    }
}
