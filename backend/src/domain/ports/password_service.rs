//! Port for password hashing and verification.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing a password.
    pub enum PasswordServiceError {
        /// The hashing backend failed.
        Hashing { message: String } => "failed to hash password: {message}",
    }
}

define_port_error! {
    /// Outcome of a failed password check.
    pub enum PasswordCheckError {
        /// The plaintext does not match the stored hash.
        Mismatch => "password does not match",
        /// The check itself could not be carried out.
        Failure { message: String } => "failed to check password: {message}",
    }
}

/// Salted, slow password hashing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordService: Send + Sync {
    /// Hash `plaintext` with a fresh salt.
    async fn hash(&self, plaintext: &str) -> Result<String, PasswordServiceError>;

    /// Whether `candidate` is acceptable as a new password.
    ///
    /// A value that already looks like a salted hash is rejected so hashes
    /// are never hashed twice.
    fn is_valid(&self, candidate: &str) -> bool;

    /// Verify `plaintext` against a stored `hash`.
    async fn check(&self, hash: &str, plaintext: &str) -> Result<(), PasswordCheckError>;
}
