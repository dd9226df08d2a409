//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence layers, together with the services that enforce ownership,
//! validation and patch semantics. Adapters only see the ports in
//! [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error payload with a closed set of
//!   [`ErrorCode`] values.
//! - User, Language, Course, Lesson, UserCourse: the stored aggregates.
//! - AuthContext: the caller identity threaded through owned operations.
//! - PatchDocument and apply_patch: JSON Patch handling with no-op detection.
//! - *ServiceImpl: implementations of the driving ports.

pub mod auth;
pub mod course;
pub mod enrollment;
pub mod error;
pub mod ids;
pub mod language;
pub mod lesson;
pub mod patch;
pub mod ports;
pub mod trace_id;
pub mod user;

mod course_service;
mod language_service;
mod lesson_service;
pub(crate) mod service_support;
mod user_service;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::auth::{AuthContext, LoginCredentials, LoginValidationError};
pub use self::course::{Course, CoursePatch, CourseValidationError};
pub use self::course_service::CourseServiceImpl;
pub use self::enrollment::UserCourse;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{CourseId, IdValidationError, LessonId, UserId};
pub use self::language::{Language, LanguageValidationError};
pub use self::language_service::LanguageServiceImpl;
pub use self::lesson::{Lesson, LessonValidationError};
pub use self::lesson_service::LessonServiceImpl;
pub use self::patch::{PatchDocument, PatchOutcome, apply_patch};
pub use self::trace_id::TraceId;
pub use self::user::{MAX_FIELD_LEN, User, UserPatch, UserValidationError};
pub use self::user_service::UserServiceImpl;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient result alias for fallible domain and API operations.
///
/// # Examples
/// ```
/// use lang_learn::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("course does not exist"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
