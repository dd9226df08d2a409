//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by PostgreSQL via Diesel with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Validation, ownership and patching stay in the domain.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) never leave this module.
//! - **Atomic aggregates**: writes spanning a course and its lesson ordering
//!   run inside one transaction.
//! - **Typed errors**: Diesel and pool failures map to
//!   [`RepositoryError`](crate::domain::ports::RepositoryError), with unique
//!   violations reported as conflicts.
//!
//! # Example
//!
//! ```no_run
//! use lang_learn::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/langlearndb")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_course_repository;
mod diesel_enrollment_repository;
mod diesel_error_mapping;
mod diesel_language_repository;
mod diesel_lesson_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_language_repository::DieselLanguageRepository;
pub use diesel_lesson_repository::DieselLessonRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError, run_migrations};
