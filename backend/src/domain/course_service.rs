//! Course domain logic.
//!
//! Owned operations load the course first and then compare the caller with
//! `created_by`, so a missing course is reported as `ResourceNotFound` even
//! to callers who would not own it.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::Value;

use crate::domain::ports::{CourseRepository, CourseService, IdService, LessonDraft, NewCourse};
use crate::domain::service_support::{parse_id, read_failed, write_failed};
use crate::domain::{
    AuthContext, Course, CourseId, CourseValidationError, Error, Lesson, LessonId, PatchDocument,
    PatchOutcome, UserId, apply_patch,
};

const INVALID_COURSE_ID: &str = "format of courseID is invalid";
const EMPTY_LESSON_FIELDS: &str = "lesson title, text and language must not be empty";

/// Course service implementing the [`CourseService`] driving port.
#[derive(Clone)]
pub struct CourseServiceImpl<C> {
    courses: Arc<C>,
    ids: Arc<dyn IdService>,
    clock: Arc<dyn Clock>,
}

impl<C> CourseServiceImpl<C> {
    pub fn new(courses: Arc<C>, ids: Arc<dyn IdService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            courses,
            ids,
            clock,
        }
    }
}

impl<C> CourseServiceImpl<C>
where
    C: CourseRepository,
{
    fn course_id(&self, raw: &str) -> Result<CourseId, Error> {
        parse_id(self.ids.as_ref(), raw, INVALID_COURSE_ID)
    }

    async fn fetch(&self, id: &CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(read_failed("failed to retrieve course"))?
            .ok_or_else(|| Error::not_found("course does not exist"))
    }

    fn new_lesson(&self, draft: LessonDraft, owner: UserId) -> Result<Lesson, Error> {
        let id = self
            .ids
            .generate()
            .map_err(|err| Error::system("failed to generate lessonID").with_cause(err))?;
        let now = self.clock.utc();
        Ok(Lesson {
            id: LessonId::from_uuid(id),
            title: draft.title,
            text: draft.text,
            language: draft.language,
            created_by: owner,
            created_at: now,
            updated_at: now,
        })
    }
}

#[async_trait]
impl<C> CourseService for CourseServiceImpl<C>
where
    C: CourseRepository,
{
    async fn create_course(
        &self,
        ctx: &AuthContext,
        new_course: NewCourse,
    ) -> Result<Course, Error> {
        if new_course.title.is_empty() {
            return Err(Error::invalid_input("course title must not be empty"));
        }
        let owner = ctx.require_subject()?;

        let course_id = self
            .ids
            .generate()
            .map_err(|err| Error::system("failed to generate courseID").with_cause(err))?;

        let mut lessons = Vec::with_capacity(new_course.lessons.len());
        for (index, draft) in new_course.lessons.into_iter().enumerate() {
            let lesson = self.new_lesson(draft, owner)?;
            lesson.validate().map_err(|err| {
                Error::invalid_input(format!("lessons[{index}] is invalid: {err}")).with_cause(err)
            })?;
            lessons.push(lesson);
        }

        let now = self.clock.utc();
        let course = Course {
            id: CourseId::from_uuid(course_id),
            title: new_course.title,
            lessons: lessons.iter().map(|lesson| lesson.id).collect(),
            created_by: owner,
            created_at: now,
            updated_at: now,
        };
        course
            .validate()
            .map_err(|err| Error::invalid_input("course is invalid").with_cause(err))?;

        self.courses
            .create(&course, &lessons)
            .await
            .map_err(write_failed("failed to create course", "course already exists"))?;
        Ok(course)
    }

    async fn get_course(&self, course_id: &str) -> Result<Course, Error> {
        let id = self.course_id(course_id)?;
        self.fetch(&id).await
    }

    async fn list_courses(&self, created_by: Option<String>) -> Result<Vec<Course>, Error> {
        let creator = match created_by.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_id::<UserId>(
                self.ids.as_ref(),
                raw,
                "format of userID given as createdBy is invalid",
            )?),
        };
        self.courses
            .list(creator)
            .await
            .map_err(read_failed("failed to retrieve courses"))
    }

    async fn delete_course(&self, ctx: &AuthContext, course_id: &str) -> Result<(), Error> {
        let id = self.course_id(course_id)?;
        let course = self.fetch(&id).await?;
        ctx.authorize(
            &course.created_by,
            "user is not authorised to delete this course",
        )?;

        let deleted = self
            .courses
            .delete(&id)
            .await
            .map_err(read_failed("failed to delete course"))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found("course does not exist"))
        }
    }

    async fn patch_course(
        &self,
        ctx: &AuthContext,
        course_id: &str,
        patch: Value,
    ) -> Result<(), Error> {
        let id = self.course_id(course_id)?;
        let doc = PatchDocument::decode(patch)?;
        let mut course = self.fetch(&id).await?;
        ctx.authorize(
            &course.created_by,
            "users are only authorised to patch their own courses",
        )?;

        let PatchOutcome::Patched(patched) = apply_patch(&course.patchable(), &doc)? else {
            return Ok(());
        };

        let invalid = |err: CourseValidationError| {
            Error::invalid_input("patch would leave course in invalid state").with_cause(err)
        };
        course.merge(patched).map_err(invalid)?;
        course.validate().map_err(invalid)?;
        course.updated_at = self.clock.utc();

        let updated = self
            .courses
            .update(&course)
            .await
            .map_err(read_failed("failed to update course with patched attributes"))?;
        if updated {
            Ok(())
        } else {
            Err(Error::not_found("course does not exist"))
        }
    }

    async fn append_lesson(
        &self,
        ctx: &AuthContext,
        course_id: &str,
        draft: LessonDraft,
    ) -> Result<Lesson, Error> {
        if !draft.is_complete() {
            return Err(Error::invalid_input(EMPTY_LESSON_FIELDS));
        }
        let id = self.course_id(course_id)?;
        let course = self.fetch(&id).await?;
        ctx.authorize(
            &course.created_by,
            "user is not authorised to add a lesson to this course",
        )?;

        let lesson = self.new_lesson(draft, course.created_by)?;
        lesson
            .validate()
            .map_err(|err| Error::invalid_input("lesson is invalid").with_cause(err))?;
        self.courses
            .append_lesson(&id, &lesson)
            .await
            .map_err(write_failed("failed to add lesson to course", "lesson already exists"))?;
        Ok(lesson)
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
