//! Port for lesson persistence.

use async_trait::async_trait;

use crate::domain::{Lesson, LessonId};

use super::RepositoryError;

/// Storage for [`Lesson`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Insert a standalone lesson.
    async fn create(&self, lesson: &Lesson) -> Result<(), RepositoryError>;

    /// Fetch a lesson by identifier.
    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, RepositoryError>;

    /// Every lesson.
    async fn list(&self) -> Result<Vec<Lesson>, RepositoryError>;

    /// Overwrite title, text and language.
    ///
    /// Returns `false` when no row matched `lesson.id`.
    async fn update(&self, lesson: &Lesson) -> Result<bool, RepositoryError>;

    /// Remove a lesson and drop it from every course ordering.
    ///
    /// Returns `false` when no row matched.
    async fn delete(&self, id: &LessonId) -> Result<bool, RepositoryError>;
}
