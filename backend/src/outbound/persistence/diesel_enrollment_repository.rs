//! PostgreSQL-backed `EnrollmentRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EnrollmentRepository, RepositoryError};
use crate::domain::{UserCourse, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserCourseRow;
use super::pool::DbPool;
use super::schema::user_courses;

/// Enrollments keyed by `(user_id, course_id)`; a repeat enrollment hits the
/// primary key and surfaces as a conflict.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn enroll(&self, enrollment: &UserCourse) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(user_courses::table)
            .values(UserCourseRow::from(enrollment))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserCourse>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserCourseRow> = user_courses::table
            .filter(user_courses::user_id.eq(user_id.as_uuid()))
            .select(UserCourseRow::as_select())
            .order_by(user_courses::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(UserCourse::from).collect())
    }
}
