//! PostgreSQL-backed `CourseRepository` implementation.
//!
//! A course spans the `courses` row and its `course_lessons` ordering. Writes
//! touching both run in one transaction; deleting a course relies on
//! `ON DELETE CASCADE` for the ordering and enrollments.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Nullable};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{CourseRepository, RepositoryError};
use crate::domain::{Course, CourseId, Lesson, LessonId, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CourseLessonRow, CourseRow, LessonRow};
use super::pool::DbPool;
use super::schema::{course_lessons, courses, lessons};

#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "course orderings stay far below i32::MAX entries"
)]
fn ordering_rows(course_id: Uuid, lessons: &[LessonId]) -> Vec<CourseLessonRow> {
    lessons
        .iter()
        .enumerate()
        .map(|(position, lesson_id)| CourseLessonRow {
            course_id,
            lesson_id: *lesson_id.as_uuid(),
            lesson_number: position as i32,
        })
        .collect()
}

/// Highest `lesson_number` in a course's ordering, `NULL` when it is empty.
fn last_lesson_number(
    course_id: Uuid,
) -> course_lessons::BoxedQuery<'static, Pg, Nullable<Integer>> {
    course_lessons::table
        .filter(course_lessons::course_id.eq(course_id))
        .select(diesel::dsl::max(course_lessons::lesson_number))
        .into_boxed()
}

async fn load_orderings(
    conn: &mut AsyncPgConnection,
    course_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<LessonId>>, diesel::result::Error> {
    let rows: Vec<CourseLessonRow> = course_lessons::table
        .filter(course_lessons::course_id.eq_any(course_ids))
        .select(CourseLessonRow::as_select())
        .order_by((course_lessons::course_id, course_lessons::lesson_number))
        .load(conn)
        .await?;

    let mut orderings: HashMap<Uuid, Vec<LessonId>> = HashMap::new();
    for row in rows {
        orderings
            .entry(row.course_id)
            .or_default()
            .push(LessonId::from_uuid(row.lesson_id));
    }
    Ok(orderings)
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn create(&self, course: &Course, lessons: &[Lesson]) -> Result<(), RepositoryError> {
        let course_row = CourseRow::from(course);
        let lesson_rows: Vec<LessonRow> = lessons.iter().map(LessonRow::from).collect();
        let ordering = ordering_rows(course_row.id, &course.lessons);

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(courses::table)
                    .values(&course_row)
                    .execute(conn)
                    .await?;
                if !lesson_rows.is_empty() {
                    diesel::insert_into(lessons::table)
                        .values(&lesson_rows)
                        .execute(conn)
                        .await?;
                }
                if !ordering.is_empty() {
                    diesel::insert_into(course_lessons::table)
                        .values(&ordering)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = courses::table
            .find(id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut orderings = load_orderings(&mut conn, &[row.id])
            .await
            .map_err(map_diesel_error)?;
        let lessons = orderings.remove(&row.id).unwrap_or_default();
        Ok(Some(row.into_course(lessons)))
    }

    async fn list(&self, created_by: Option<UserId>) -> Result<Vec<Course>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = courses::table
            .select(CourseRow::as_select())
            .order_by(courses::created_at.asc())
            .into_boxed();
        if let Some(owner) = created_by {
            query = query.filter(courses::created_by.eq(*owner.as_uuid()));
        }
        let rows: Vec<CourseRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut orderings = load_orderings(&mut conn, &ids)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let lessons = orderings.remove(&row.id).unwrap_or_default();
                row.into_course(lessons)
            })
            .collect())
    }

    async fn update(&self, course: &Course) -> Result<bool, RepositoryError> {
        let course_id = *course.id.as_uuid();
        let ordering = ordering_rows(course_id, &course.lessons);

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let affected = diesel::update(courses::table.find(course_id))
                    .set((
                        courses::title.eq(&course.title),
                        courses::updated_at.eq(course.updated_at),
                    ))
                    .execute(conn)
                    .await?;
                if affected == 0 {
                    return Ok(false);
                }
                diesel::delete(course_lessons::table.filter(course_lessons::course_id.eq(course_id)))
                    .execute(conn)
                    .await?;
                if !ordering.is_empty() {
                    diesel::insert_into(course_lessons::table)
                        .values(&ordering)
                        .execute(conn)
                        .await?;
                }
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(courses::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn append_lesson(&self, id: &CourseId, lesson: &Lesson) -> Result<(), RepositoryError> {
        let course_id = *id.as_uuid();
        let lesson_row = LessonRow::from(lesson);

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(lessons::table)
                    .values(&lesson_row)
                    .execute(conn)
                    .await?;
                let last: Option<i32> = last_lesson_number(course_id).first(conn).await?;
                diesel::insert_into(course_lessons::table)
                    .values(CourseLessonRow {
                        course_id,
                        lesson_id: lesson_row.id,
                        lesson_number: last.map_or(0, |n| n + 1),
                    })
                    .execute(conn)
                    .await?;
                diesel::update(courses::table.find(course_id))
                    .set(courses::updated_at.eq(lesson_row.created_at))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
