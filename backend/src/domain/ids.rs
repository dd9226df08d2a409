//! Strongly typed resource identifiers.
//!
//! Every aggregate is keyed by a UUID. The newtypes keep user, course and
//! lesson identifiers from being mixed up at call sites while sharing one
//! parsing rule: a hyphenated UUID string with no surrounding whitespace.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a string is not a usable identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdValidationError {
    /// Input was empty.
    Empty,
    /// Input was not a UUID.
    Malformed,
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::Malformed => write!(f, "identifier must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdValidationError {}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// Parse an identifier from its string form.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                parse_uuid(id.as_ref()).map(Self)
            }

            /// Wrap an already parsed UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Whether the identifier may key a stored entity.
            #[must_use]
            pub fn is_well_formed(&self) -> bool {
                !self.0.is_nil()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0.to_string()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

fn parse_uuid(raw: &str) -> Result<Uuid, IdValidationError> {
    if raw.is_empty() {
        return Err(IdValidationError::Empty);
    }
    if raw.trim() != raw {
        return Err(IdValidationError::Malformed);
    }
    Uuid::parse_str(raw).map_err(|_| IdValidationError::Malformed)
}

define_id! {
    /// Identifier of a registered user.
    ///
    /// # Examples
    /// ```
    /// use lang_learn::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
    /// assert!(id.is_well_formed());
    /// ```
    UserId
}

define_id! {
    /// Identifier of a course.
    CourseId
}

define_id! {
    /// Identifier of a lesson.
    LessonId
}
