//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Course, CourseId, Language, Lesson, LessonId, User, UserCourse, UserId,
};

use super::schema::{course_lessons, courses, languages, lessons, user_courses, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading and inserting users.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset overwriting every mutable user column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub profile_pic: &'a str,
    pub password_hash: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            profile_pic: user.profile_pic.clone(),
            password_hash: user.password_hash.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl<'a> From<&'a User> for UserUpdate<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            email: &user.email,
            first_name: &user.first_name,
            last_name: &user.last_name,
            profile_pic: &user.profile_pic,
            password_hash: &user.password_hash,
            updated_at: user.updated_at,
        }
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            profile_pic: row.profile_pic,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Languages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = languages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LanguageRow {
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Language> for LanguageRow {
    fn from(language: &Language) -> Self {
        Self {
            code: language.code.clone(),
            name: language.name.clone(),
            created_at: language.created_at,
            updated_at: language.updated_at,
        }
    }
}

impl From<LanguageRow> for Language {
    fn from(row: LanguageRow) -> Self {
        Self {
            code: row.code,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Lessons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LessonRow {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub language: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset replacing lesson content.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = lessons)]
pub(crate) struct LessonUpdate<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub language: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl From<&Lesson> for LessonRow {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: *lesson.id.as_uuid(),
            title: lesson.title.clone(),
            text: lesson.text.clone(),
            language: lesson.language.clone(),
            created_by: *lesson.created_by.as_uuid(),
            created_at: lesson.created_at,
            updated_at: lesson.updated_at,
        }
    }
}

impl<'a> From<&'a Lesson> for LessonUpdate<'a> {
    fn from(lesson: &'a Lesson) -> Self {
        Self {
            title: &lesson.title,
            text: &lesson.text,
            language: &lesson.language,
            updated_at: lesson.updated_at,
        }
    }
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Self {
            id: LessonId::from_uuid(row.id),
            title: row.title,
            text: row.text,
            language: row.language,
            created_by: UserId::from_uuid(row.created_by),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub title: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            id: *course.id.as_uuid(),
            title: course.title.clone(),
            created_by: *course.created_by.as_uuid(),
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

impl CourseRow {
    /// Rebuild the aggregate from its row and ordered lesson ids.
    pub(crate) fn into_course(self, lessons: Vec<LessonId>) -> Course {
        Course {
            id: CourseId::from_uuid(self.id),
            title: self.title,
            lessons,
            created_by: UserId::from_uuid(self.created_by),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// One position in a course's lesson ordering.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = course_lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseLessonRow {
    pub course_id: Uuid,
    pub lesson_id: Uuid,
    pub lesson_number: i32,
}

// ---------------------------------------------------------------------------
// Enrollments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserCourseRow {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub active_lesson_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserCourse> for UserCourseRow {
    fn from(enrollment: &UserCourse) -> Self {
        Self {
            user_id: *enrollment.user_id.as_uuid(),
            course_id: *enrollment.course_id.as_uuid(),
            active_lesson_id: enrollment.active_lesson_id.map(|id| *id.as_uuid()),
            created_at: enrollment.created_at,
            updated_at: enrollment.updated_at,
        }
    }
}

impl From<UserCourseRow> for UserCourse {
    fn from(row: UserCourseRow) -> Self {
        Self {
            user_id: UserId::from_uuid(row.user_id),
            course_id: CourseId::from_uuid(row.course_id),
            active_lesson_id: row.active_lesson_id.map(LessonId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
