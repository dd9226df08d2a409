//! Lesson aggregate.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{LessonId, UserId, user::MAX_FIELD_LEN};

/// Validation errors returned by [`Lesson::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonValidationError {
    InvalidId,
    InvalidCreatedBy,
    EmptyTitle,
    TitleTooLong { max: usize },
    EmptyText,
    EmptyLanguage,
}

impl fmt::Display for LessonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "id format is invalid"),
            Self::InvalidCreatedBy => write!(f, "lesson createdBy ID format is invalid"),
            Self::EmptyTitle => write!(f, "lesson title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "lesson title must not be longer than {max} characters")
            }
            Self::EmptyText => write!(f, "lesson text must not be empty"),
            Self::EmptyLanguage => write!(f, "lesson language must not be empty"),
        }
    }
}

impl std::error::Error for LessonValidationError {}

/// A unit of study text written in one language.
///
/// `created_by` owns the lesson: only that user may replace or delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub text: String,
    pub language: String,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lesson {
    /// Check every invariant, reporting the first violation.
    pub fn validate(&self) -> Result<(), LessonValidationError> {
        if !self.id.is_well_formed() {
            return Err(LessonValidationError::InvalidId);
        }
        if !self.created_by.is_well_formed() {
            return Err(LessonValidationError::InvalidCreatedBy);
        }
        if self.title.is_empty() {
            return Err(LessonValidationError::EmptyTitle);
        }
        if self.title.chars().count() > MAX_FIELD_LEN {
            return Err(LessonValidationError::TitleTooLong { max: MAX_FIELD_LEN });
        }
        if self.text.is_empty() {
            return Err(LessonValidationError::EmptyText);
        }
        if self.language.is_empty() {
            return Err(LessonValidationError::EmptyLanguage);
        }
        Ok(())
    }
}
