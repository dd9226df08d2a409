//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, identifiers, passwords, tokens) are
//! implemented in `outbound`; driving ports (the per-entity services) are
//! implemented in `domain` and consumed by `inbound`.

mod macros;
pub(crate) use macros::define_port_error;

mod course_repository;
mod course_service;
mod enrollment_repository;
mod id_service;
mod language_repository;
mod language_service;
mod lesson_repository;
mod lesson_service;
mod password_service;
mod repository_error;
mod token_service;
mod user_repository;
mod user_service;

pub use course_repository::CourseRepository;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use course_service::MockCourseService;
pub use course_service::{CourseService, NewCourse};
pub use enrollment_repository::EnrollmentRepository;
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
#[cfg(test)]
pub use id_service::MockIdService;
pub use id_service::{IdService, IdServiceError};
pub use language_repository::LanguageRepository;
#[cfg(test)]
pub use language_repository::MockLanguageRepository;
pub use language_service::LanguageService;
#[cfg(test)]
pub use language_service::MockLanguageService;
pub use lesson_repository::LessonRepository;
#[cfg(test)]
pub use lesson_repository::MockLessonRepository;
#[cfg(test)]
pub use lesson_service::MockLessonService;
pub use lesson_service::{LessonDraft, LessonService};
#[cfg(test)]
pub use password_service::MockPasswordService;
pub use password_service::{PasswordCheckError, PasswordService, PasswordServiceError};
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::{NewUser, UserService};
