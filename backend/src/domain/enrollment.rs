//! Enrollment of a user in a course.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{CourseId, LessonId, UserId};

/// Links a user to a course and remembers where they are in it.
///
/// `active_lesson_id` is `None` until the learner opens a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCourse {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub active_lesson_id: Option<LessonId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
