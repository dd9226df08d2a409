//! Driving port for courses.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AuthContext, Course, Error, Lesson};

use super::LessonDraft;

/// Caller-supplied course with the lessons it starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub title: String,
    pub lessons: Vec<LessonDraft>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseService: Send + Sync {
    /// Create a course and its lessons, all owned by the caller.
    async fn create_course(&self, ctx: &AuthContext, new_course: NewCourse)
    -> Result<Course, Error>;

    async fn get_course(&self, course_id: &str) -> Result<Course, Error>;

    /// All courses, optionally only those created by one user.
    async fn list_courses(&self, created_by: Option<String>) -> Result<Vec<Course>, Error>;

    async fn delete_course(&self, ctx: &AuthContext, course_id: &str) -> Result<(), Error>;

    /// Apply a JSON Patch document to the title and lesson ordering.
    async fn patch_course(&self, ctx: &AuthContext, course_id: &str, patch: Value)
    -> Result<(), Error>;

    /// Create a lesson and append it to a course the caller owns.
    async fn append_lesson(
        &self,
        ctx: &AuthContext,
        course_id: &str,
        draft: LessonDraft,
    ) -> Result<Lesson, Error>;
}
