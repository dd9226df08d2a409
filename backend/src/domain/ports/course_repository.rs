//! Port for course persistence.
//!
//! A course's lesson ordering is part of the aggregate: adapters persist it
//! alongside the course row and return it in the stored order. Operations
//! that touch more than one table run as a single unit.

use async_trait::async_trait;

use crate::domain::{Course, CourseId, Lesson, UserId};

use super::RepositoryError;

/// Storage for [`Course`] aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a course and the lessons it was created with, atomically.
    ///
    /// `lessons` appear in the same order as `course.lessons`.
    async fn create(&self, course: &Course, lessons: &[Lesson]) -> Result<(), RepositoryError>;

    /// Fetch a course with its ordered lesson identifiers.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError>;

    /// All courses, or only those created by `created_by`.
    async fn list(&self, created_by: Option<UserId>) -> Result<Vec<Course>, RepositoryError>;

    /// Overwrite the title and lesson ordering.
    ///
    /// Returns `false` when no row matched `course.id`.
    async fn update(&self, course: &Course) -> Result<bool, RepositoryError>;

    /// Remove a course, its lesson ordering and its enrollments.
    ///
    /// Returns `false` when no row matched.
    async fn delete(&self, id: &CourseId) -> Result<bool, RepositoryError>;

    /// Insert `lesson` and append it to the end of the course, atomically.
    async fn append_lesson(&self, id: &CourseId, lesson: &Lesson) -> Result<(), RepositoryError>;
}
