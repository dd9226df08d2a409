//! Course aggregate.
//!
//! A course is an owned, ordered list of lessons. The order of
//! [`Course::lessons`] is the order learners see and is preserved by every
//! adapter.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CourseId, LessonId, UserId, user::MAX_FIELD_LEN};

/// Validation errors returned by [`Course::validate`] and [`Course::merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseValidationError {
    InvalidId,
    EmptyTitle,
    TitleTooLong { max: usize },
    InvalidCreatedBy,
    InvalidLessonId { index: usize },
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "id format is invalid"),
            Self::EmptyTitle => write!(f, "course title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "course title must not be longer than {max} characters")
            }
            Self::InvalidCreatedBy => write!(f, "course createdBy ID format is invalid"),
            Self::InvalidLessonId { index } => {
                write!(f, "course lessons[{index}] - lesson ID format is invalid")
            }
        }
    }
}

impl std::error::Error for CourseValidationError {}

/// Owned, ordered collection of lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub lessons: Vec<LessonId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The subset of a [`Course`] that JSON Patch documents may touch.
///
/// Lesson identifiers stay as strings so a malformed entry can be reported
/// by position once the patch has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoursePatch {
    pub title: String,
    pub lessons: Vec<String>,
}

impl Course {
    /// Check every invariant, reporting the first violation.
    pub fn validate(&self) -> Result<(), CourseValidationError> {
        if !self.id.is_well_formed() {
            return Err(CourseValidationError::InvalidId);
        }
        if self.title.is_empty() {
            return Err(CourseValidationError::EmptyTitle);
        }
        if self.title.chars().count() > MAX_FIELD_LEN {
            return Err(CourseValidationError::TitleTooLong { max: MAX_FIELD_LEN });
        }
        if !self.created_by.is_well_formed() {
            return Err(CourseValidationError::InvalidCreatedBy);
        }
        if let Some(index) = self.lessons.iter().position(|id| !id.is_well_formed()) {
            return Err(CourseValidationError::InvalidLessonId { index });
        }
        Ok(())
    }

    /// Current values of the patchable fields.
    #[must_use]
    pub fn patchable(&self) -> CoursePatch {
        CoursePatch {
            title: self.title.clone(),
            lessons: self.lessons.iter().map(ToString::to_string).collect(),
        }
    }

    /// Overwrite the patchable fields, parsing each lesson identifier.
    ///
    /// The course is left untouched when any identifier fails to parse.
    pub fn merge(&mut self, patch: CoursePatch) -> Result<(), CourseValidationError> {
        let lessons = patch
            .lessons
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                LessonId::new(raw).map_err(|_| CourseValidationError::InvalidLessonId { index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.title = patch.title;
        self.lessons = lessons;
        Ok(())
    }
}
