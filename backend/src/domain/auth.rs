//! Authentication primitives and the ownership guard.
//!
//! [`LoginCredentials`] carries what a caller presents to obtain a token;
//! [`AuthContext`] carries who a token resolved to. Domain services receive
//! an `AuthContext` on every operation that mutates owned data and call
//! [`AuthContext::authorize`] before touching persistence.

use std::fmt;

use zeroize::Zeroizing;

use super::{Error, UserId};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<LoginValidationError> for Error {
    fn from(value: LoginValidationError) -> Self {
        Self::invalid_input(value.to_string())
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim, zeroized on drop.
///
/// # Examples
/// ```
/// use lang_learn::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.com ", "pw").unwrap();
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity of the caller for one operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    subject: Option<UserId>,
}

impl AuthContext {
    /// Context with no authenticated caller.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { subject: None }
    }

    /// Context for an authenticated caller.
    #[must_use]
    pub const fn for_subject(subject: UserId) -> Self {
        Self {
            subject: Some(subject),
        }
    }

    #[must_use]
    pub const fn subject(&self) -> Option<&UserId> {
        self.subject.as_ref()
    }

    /// Authenticated subject, or `Unauthorized` when there is none.
    pub fn require_subject(&self) -> Result<UserId, Error> {
        self.subject
            .ok_or_else(|| Error::unauthorized("failed to retrieve valid authorised identity"))
    }

    /// Allow the operation only when the caller is `owner`.
    ///
    /// `denied` is the message reported when the caller is someone else.
    pub fn authorize(&self, owner: &UserId, denied: &str) -> Result<(), Error> {
        match &self.subject {
            None => Err(Error::unauthorized("no authenticated subject")),
            Some(subject) if subject == owner => Ok(()),
            Some(_) => Err(Error::unauthorized(denied)),
        }
    }
}
