//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered users. `email` is unique.
    users (id) {
        id -> Uuid,
        email -> Varchar,
        first_name -> Text,
        last_name -> Text,
        profile_pic -> Text,
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Language catalogue keyed by short code.
    languages (code) {
        code -> Text,
        name -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    lessons (id) {
        id -> Uuid,
        title -> Varchar,
        text -> Text,
        language -> Text,
        created_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    courses (id) {
        id -> Uuid,
        title -> Varchar,
        created_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered lesson membership of a course.
    ///
    /// `lesson_number` orders lessons within one course; gaps are allowed.
    course_lessons (course_id, lesson_number) {
        course_id -> Uuid,
        lesson_id -> Uuid,
        lesson_number -> Int4,
    }
}

diesel::table! {
    /// User enrollments on courses.
    user_courses (user_id, course_id) {
        user_id -> Uuid,
        course_id -> Uuid,
        active_lesson_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(course_lessons -> courses (course_id));
diesel::joinable!(user_courses -> users (user_id));
diesel::joinable!(user_courses -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    languages,
    lessons,
    courses,
    course_lessons,
    user_courses,
);
