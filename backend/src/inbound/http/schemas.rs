//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or a change would break an invariant.
    #[schema(rename = "invalid_input")]
    InvalidInput,
    /// The referenced entity does not exist.
    #[schema(rename = "resource_not_found")]
    ResourceNotFound,
    /// Credentials are missing or invalid, or the caller is not the owner.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The write collides with existing data.
    #[schema(rename = "resource_conflict")]
    ResourceConflict,
    /// An unexpected error occurred on the server.
    #[schema(rename = "system_error")]
    SystemError,
    /// The operation is not available.
    #[schema(rename = "not_implemented")]
    NotImplemented,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_input")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "user email must not be empty")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "6f1c4b56-8d7e-4f0e-9c3a-1b2d3e4f5a6b")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`]. The password hash is never
/// serialised.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Ada")]
    first_name: String,
    #[schema(example = "Lovelace")]
    last_name: String,
    /// Profile picture URL; may be empty.
    profile_pic: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Language`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Language)]
pub struct LanguageSchema {
    #[schema(example = "es")]
    code: String,
    #[schema(example = "Spanish")]
    name: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Lesson`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Lesson)]
pub struct LessonSchema {
    id: String,
    #[schema(example = "Greetings")]
    title: String,
    #[schema(example = "Hola means hello.")]
    text: String,
    /// Language code.
    #[schema(example = "es")]
    language: String,
    /// Owning user id.
    created_by: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::Course`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Course)]
pub struct CourseSchema {
    id: String,
    #[schema(example = "Spanish for travellers")]
    title: String,
    /// Lesson ids in course order.
    lessons: Vec<String>,
    /// Owning user id.
    created_by: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for [`crate::domain::UserCourse`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserCourse)]
pub struct UserCourseSchema {
    user_id: String,
    course_id: String,
    /// Lesson the user is currently on, if any.
    active_lesson_id: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// OpenAPI schema for an RFC 6902 JSON Patch operation.
#[derive(ToSchema)]
#[schema(as = json_patch::PatchOperation)]
pub struct PatchOperationSchema {
    /// One of `add`, `remove`, `replace`, `move`, `copy`, `test`.
    #[schema(example = "replace")]
    op: String,
    #[schema(example = "/title")]
    path: String,
    /// Source pointer for `move` and `copy`.
    from: Option<String>,
    value: Option<serde_json::Value>,
}
