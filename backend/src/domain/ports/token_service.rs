//! Port for issuing and verifying bearer tokens.

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Signing a new token failed.
        Issue { message: String } => "failed to issue token: {message}",
        /// The token is malformed, tampered with, expired or foreign.
        Invalid { message: String } => "invalid token: {message}",
    }
}

/// Bearer token codec binding a token to the user it was issued for.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token whose subject is `subject`.
    fn issue(&self, subject: &UserId) -> Result<String, TokenError>;

    /// Verify `token` and return its subject.
    fn subject(&self, token: &str) -> Result<UserId, TokenError>;
}
