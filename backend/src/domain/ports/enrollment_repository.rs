//! Port for user/course enrollments.

use async_trait::async_trait;

use crate::domain::{UserCourse, UserId};

use super::RepositoryError;

/// Storage for [`UserCourse`] links.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Record an enrollment; enrolling twice on one course is a conflict.
    async fn enroll(&self, enrollment: &UserCourse) -> Result<(), RepositoryError>;

    /// Every enrollment of one user.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserCourse>, RepositoryError>;
}
