//! Driving port for lessons.

use async_trait::async_trait;

use crate::domain::{AuthContext, Error, Lesson};

/// Caller-supplied lesson content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDraft {
    pub title: String,
    pub text: String,
    pub language: String,
}

impl LessonDraft {
    /// Whether every field has content.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !(self.title.is_empty() || self.text.is_empty() || self.language.is_empty())
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonService: Send + Sync {
    /// Create a lesson owned by the caller.
    async fn create_lesson(&self, ctx: &AuthContext, draft: LessonDraft) -> Result<Lesson, Error>;

    async fn get_lesson(&self, lesson_id: &str) -> Result<Lesson, Error>;

    async fn list_lessons(&self) -> Result<Vec<Lesson>, Error>;

    /// Delete a lesson the caller owns.
    async fn delete_lesson(&self, ctx: &AuthContext, lesson_id: &str) -> Result<(), Error>;

    /// Replace the content of a lesson the caller owns.
    async fn update_lesson(
        &self,
        ctx: &AuthContext,
        lesson_id: &str,
        draft: LessonDraft,
    ) -> Result<(), Error>;
}
