//! Driving port for user self-service.
//!
//! Identifiers arrive as raw strings from inbound adapters; implementations
//! validate them and report malformed values as `InvalidInput`.

use async_trait::async_trait;
use serde_json::Value;
use zeroize::Zeroizing;

use crate::domain::{AuthContext, Error, User, UserCourse};

/// Registration payload for a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: Zeroizing<String>,
    pub first_name: String,
    pub last_name: String,
    pub profile_pic: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a user, hashing the supplied password.
    async fn create_user(&self, new_user: NewUser) -> Result<User, Error>;

    async fn get_user(&self, user_id: &str) -> Result<User, Error>;

    async fn get_user_by_email(&self, email: &str) -> Result<User, Error>;

    /// Resolve the user owning `email` when `password` matches.
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, Error>;

    /// Courses the caller is enrolled on. Callers may only list their own.
    async fn list_enrollments(
        &self,
        ctx: &AuthContext,
        user_id: &str,
    ) -> Result<Vec<UserCourse>, Error>;

    /// Apply a JSON Patch document to the caller's email and names.
    async fn patch_user(&self, ctx: &AuthContext, user_id: &str, patch: Value)
    -> Result<(), Error>;

    async fn delete_user(&self, ctx: &AuthContext, user_id: &str) -> Result<(), Error>;

    async fn set_profile_pic(
        &self,
        ctx: &AuthContext,
        user_id: &str,
        profile_pic: &str,
    ) -> Result<(), Error>;

    async fn set_password(&self, ctx: &AuthContext, user_id: &str, password: &str)
    -> Result<(), Error>;

    /// Enroll the caller on a course.
    async fn enroll(
        &self,
        ctx: &AuthContext,
        user_id: &str,
        course_id: &str,
    ) -> Result<UserCourse, Error>;
}
