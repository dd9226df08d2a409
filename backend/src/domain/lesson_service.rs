//! Standalone lesson domain logic.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{IdService, LessonDraft, LessonRepository, LessonService};
use crate::domain::service_support::{parse_id, read_failed, write_failed};
use crate::domain::{AuthContext, Error, Lesson, LessonId};

const INVALID_LESSON_ID: &str = "format of lessonID is invalid";
const EMPTY_FIELDS: &str = "lesson title, text and language must not be empty";

/// Lesson service implementing the [`LessonService`] driving port.
#[derive(Clone)]
pub struct LessonServiceImpl<L> {
    lessons: Arc<L>,
    ids: Arc<dyn IdService>,
    clock: Arc<dyn Clock>,
}

impl<L> LessonServiceImpl<L> {
    pub fn new(lessons: Arc<L>, ids: Arc<dyn IdService>, clock: Arc<dyn Clock>) -> Self {
        Self {
            lessons,
            ids,
            clock,
        }
    }
}

impl<L> LessonServiceImpl<L>
where
    L: LessonRepository,
{
    fn lesson_id(&self, raw: &str) -> Result<LessonId, Error> {
        parse_id(self.ids.as_ref(), raw, INVALID_LESSON_ID)
    }

    async fn fetch(&self, id: &LessonId) -> Result<Lesson, Error> {
        self.lessons
            .find_by_id(id)
            .await
            .map_err(read_failed("failed to retrieve lesson"))?
            .ok_or_else(|| Error::not_found("lesson does not exist"))
    }
}

#[async_trait]
impl<L> LessonService for LessonServiceImpl<L>
where
    L: LessonRepository,
{
    async fn create_lesson(&self, ctx: &AuthContext, draft: LessonDraft) -> Result<Lesson, Error> {
        if !draft.is_complete() {
            return Err(Error::invalid_input(EMPTY_FIELDS));
        }
        let owner = ctx.require_subject()?;
        let id = self
            .ids
            .generate()
            .map_err(|err| Error::system("failed to generate lessonID").with_cause(err))?;

        let now = self.clock.utc();
        let lesson = Lesson {
            id: LessonId::from_uuid(id),
            title: draft.title,
            text: draft.text,
            language: draft.language,
            created_by: owner,
            created_at: now,
            updated_at: now,
        };
        lesson
            .validate()
            .map_err(|err| Error::invalid_input("lesson is invalid").with_cause(err))?;

        self.lessons
            .create(&lesson)
            .await
            .map_err(write_failed("failed to create lesson", "lesson already exists"))?;
        Ok(lesson)
    }

    async fn get_lesson(&self, lesson_id: &str) -> Result<Lesson, Error> {
        let id = self.lesson_id(lesson_id)?;
        self.fetch(&id).await
    }

    async fn list_lessons(&self) -> Result<Vec<Lesson>, Error> {
        self.lessons
            .list()
            .await
            .map_err(read_failed("failed to retrieve lessons"))
    }

    async fn delete_lesson(&self, ctx: &AuthContext, lesson_id: &str) -> Result<(), Error> {
        let id = self.lesson_id(lesson_id)?;
        let lesson = self.fetch(&id).await?;
        ctx.authorize(
            &lesson.created_by,
            "user is not authorized to delete this lesson",
        )?;

        let deleted = self
            .lessons
            .delete(&id)
            .await
            .map_err(read_failed("failed to delete lesson"))?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found("lesson does not exist"))
        }
    }

    async fn update_lesson(
        &self,
        ctx: &AuthContext,
        lesson_id: &str,
        draft: LessonDraft,
    ) -> Result<(), Error> {
        if !draft.is_complete() {
            return Err(Error::invalid_input(EMPTY_FIELDS));
        }
        let id = self.lesson_id(lesson_id)?;
        let mut lesson = self.fetch(&id).await?;
        ctx.authorize(
            &lesson.created_by,
            "user is not authorized to update this lesson",
        )?;

        lesson.title = draft.title;
        lesson.text = draft.text;
        lesson.language = draft.language;
        lesson
            .validate()
            .map_err(|err| Error::invalid_input("lesson is invalid").with_cause(err))?;
        lesson.updated_at = self.clock.utc();

        let updated = self
            .lessons
            .update(&lesson)
            .await
            .map_err(read_failed("failed to update lesson"))?;
        if updated {
            Ok(())
        } else {
            Err(Error::not_found("lesson does not exist"))
        }
    }
}
