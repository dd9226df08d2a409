//! Port abstraction for user persistence adapters.

use async_trait::async_trait;

use crate::domain::{User, UserId};

use super::RepositoryError;

/// Storage for [`User`] records.
///
/// `email` is unique across users; adapters report a clash as
/// [`RepositoryError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch a user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Overwrite every mutable column of an existing user.
    ///
    /// Returns `false` when no row matched `user.id`.
    async fn update(&self, user: &User) -> Result<bool, RepositoryError>;

    /// Remove a user together with their enrollments.
    ///
    /// Returns `false` when no row matched.
    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError>;
}
