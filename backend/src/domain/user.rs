//! User aggregate.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::UserId;

/// Upper bound shared by bounded text fields.
pub const MAX_FIELD_LEN: usize = 255;

/// Validation errors returned by [`User::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidId,
    EmptyEmail,
    EmailTooLong { max: usize },
    InvalidEmail,
    EmptyPasswordHash,
    PasswordHashTooLong { max: usize },
    EmptyFirstName,
    EmptyLastName,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "id format is invalid"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => {
                write!(f, "email must not be longer than {max} characters")
            }
            Self::InvalidEmail => write!(f, "email format is invalid"),
            Self::EmptyPasswordHash => write!(f, "password must not be empty"),
            Self::PasswordHashTooLong { max } => {
                write!(f, "password must not be longer than {max} characters")
            }
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Registered learner.
///
/// `password_hash` never leaves the process: it is skipped when serializing.
///
/// ## Invariants
/// - `id` is well formed.
/// - `email` is a non-empty address of at most 255 characters.
/// - `password_hash` is non-empty and at most 255 characters.
/// - `first_name` and `last_name` are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The subset of a [`User`] that JSON Patch documents may touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserPatch {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
        )
        .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl User {
    /// Check every invariant, reporting the first violation.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if !self.id.is_well_formed() {
            return Err(UserValidationError::InvalidId);
        }

        if self.email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if self.email.chars().count() > MAX_FIELD_LEN {
            return Err(UserValidationError::EmailTooLong { max: MAX_FIELD_LEN });
        }
        if !email_regex().is_match(&self.email) {
            return Err(UserValidationError::InvalidEmail);
        }

        if self.password_hash.is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        if self.password_hash.chars().count() > MAX_FIELD_LEN {
            return Err(UserValidationError::PasswordHashTooLong { max: MAX_FIELD_LEN });
        }

        if self.first_name.is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        if self.last_name.is_empty() {
            return Err(UserValidationError::EmptyLastName);
        }
        Ok(())
    }

    /// Current values of the patchable fields.
    #[must_use]
    pub fn patchable(&self) -> UserPatch {
        UserPatch {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }

    /// Overwrite the patchable fields.
    pub fn merge(&mut self, patch: UserPatch) {
        self.email = patch.email;
        self.first_name = patch.first_name;
        self.last_name = patch.last_name;
    }
}
