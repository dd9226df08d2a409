//! Token signing secret loading.
//!
//! The secret is read from a file so it can be mounted from a secret store.
//! Release builds insist on a real secret; debug builds fall back to a
//! random one so local runs need no setup.

use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use tracing::warn;
use zeroize::Zeroizing;

const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing secret and emit warnings.
    Debug,
    /// Release builds require a secret file of adequate length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lang_learn::config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while loading the token secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenSecretError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file exists but is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not sign with an ephemeral secret.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Load the token signing secret according to the environment and build
/// mode.
///
/// # Examples
///
/// ```rust
/// use lang_learn::config::{BuildMode, token_secret_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let secret_path = std::env::temp_dir().join("token_secret_example");
/// std::fs::write(&secret_path, vec![b'k'; 32])?;
///
/// let secret_path = secret_path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_SECRET_FILE" => Some(secret_path.clone()),
///     _ => None,
/// });
///
/// let secret = token_secret_from_env(&env, BuildMode::Release)?;
/// assert_eq!(secret.len(), 32);
///
/// std::fs::remove_file(std::env::temp_dir().join("token_secret_example"))?;
/// # Ok(())
/// # }
/// ```
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, TokenSecretError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| TOKEN_SECRET_DEFAULT_PATH.to_string()),
    );

    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let length = bytes.len();
            if mode == BuildMode::Release && length < TOKEN_SECRET_MIN_LEN {
                return Err(TokenSecretError::SecretTooShort {
                    path,
                    length,
                    min_len: TOKEN_SECRET_MIN_LEN,
                });
            }
            Ok(bytes)
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token secret (dev only)"
                );
                Ok(ephemeral_secret())
            } else {
                Err(TokenSecretError::SecretRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenSecretError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return Ok(false);
    };
    match parse_bool(&value) {
        Some(true) if !mode.is_debug() => Err(TokenSecretError::EphemeralNotAllowed),
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(
                value = %value,
                "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled"
            );
            Ok(false)
        }
        None => Err(TokenSecretError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn ephemeral_secret() -> Zeroizing<Vec<u8>> {
    let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
