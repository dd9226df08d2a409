//! PostgreSQL-backed `LessonRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{LessonRepository, RepositoryError};
use crate::domain::{Lesson, LessonId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{LessonRow, LessonUpdate};
use super::pool::DbPool;
use super::schema::{course_lessons, lessons};

#[derive(Clone)]
pub struct DieselLessonRepository {
    pool: DbPool,
}

impl DieselLessonRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LessonRepository for DieselLessonRepository {
    async fn create(&self, lesson: &Lesson) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(lessons::table)
            .values(LessonRow::from(lesson))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<LessonRow> = lessons::table
            .find(id.as_uuid())
            .select(LessonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Lesson::from))
    }

    async fn list(&self) -> Result<Vec<Lesson>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<LessonRow> = lessons::table
            .select(LessonRow::as_select())
            .order_by(lessons::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    async fn update(&self, lesson: &Lesson) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(lessons::table.find(lesson.id.as_uuid()))
            .set(LessonUpdate::from(lesson))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &LessonId) -> Result<bool, RepositoryError> {
        let lesson_id = *id.as_uuid();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::delete(
                    course_lessons::table.filter(course_lessons::lesson_id.eq(lesson_id)),
                )
                .execute(conn)
                .await?;
                let affected = diesel::delete(lessons::table.find(lesson_id))
                    .execute(conn)
                    .await?;
                Ok(affected > 0)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
