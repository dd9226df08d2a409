//! In-process store used when no database is configured.
//!
//! One [`MemoryStore`] implements every repository port over a single
//! mutex-guarded state, so cross-aggregate cleanup (enrollments on course
//! deletion, orderings on lesson deletion) happens under one lock just as the
//! database does it in one transaction. Uniqueness rules match the SQL
//! schema: user email, language code, entity ids and `(user, course)`
//! enrollments.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    CourseRepository, EnrollmentRepository, LanguageRepository, LessonRepository,
    RepositoryError, UserRepository,
};
use crate::domain::{Course, CourseId, Language, Lesson, LessonId, User, UserCourse, UserId};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    languages: Vec<Language>,
    courses: Vec<Course>,
    lessons: Vec<Lesson>,
    enrollments: Vec<UserCourse>,
}

/// Volatile implementation of every repository port.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Every mutation checks before it writes, so a poisoned lock never holds
    // a partial write.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn replace<T: Clone>(items: &mut [T], matches: impl Fn(&T) -> bool, value: &T) -> bool {
    match items.iter_mut().find(|item| matches(item)) {
        Some(slot) => {
            *slot = value.clone();
            true
        }
        None => false,
    }
}

fn remove<T>(items: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = items.len();
    items.retain(|item| !matches(item));
    items.len() != before
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.id == user.id) {
            return Err(RepositoryError::conflict("users_pkey"));
        }
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::conflict("users_email_key"));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock().users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, user: &User) -> Result<bool, RepositoryError> {
        let mut state = self.lock();
        if state
            .users
            .iter()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(RepositoryError::conflict("users_email_key"));
        }
        Ok(replace(&mut state.users, |u| u.id == user.id, user))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let mut state = self.lock();
        let removed = remove(&mut state.users, |u| u.id == *id);
        if removed {
            state.enrollments.retain(|e| e.user_id != *id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl LanguageRepository for MemoryStore {
    async fn create(&self, language: &Language) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state.languages.iter().any(|l| l.code == language.code) {
            return Err(RepositoryError::conflict("languages_pkey"));
        }
        state.languages.push(language.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Language>, RepositoryError> {
        let mut languages = self.lock().languages.clone();
        languages.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(languages)
    }

    async fn update(&self, language: &Language) -> Result<bool, RepositoryError> {
        let mut state = self.lock();
        match state.languages.iter_mut().find(|l| l.code == language.code) {
            Some(stored) => {
                stored.name.clone_from(&language.name);
                stored.updated_at = language.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, code: &str) -> Result<bool, RepositoryError> {
        Ok(remove(&mut self.lock().languages, |l| l.code == code))
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        self.lock().languages.clear();
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn create(&self, course: &Course, lessons: &[Lesson]) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state.courses.iter().any(|c| c.id == course.id) {
            return Err(RepositoryError::conflict("courses_pkey"));
        }
        if lessons
            .iter()
            .any(|new| state.lessons.iter().any(|l| l.id == new.id))
        {
            return Err(RepositoryError::conflict("lessons_pkey"));
        }
        state.courses.push(course.clone());
        state.lessons.extend_from_slice(lessons);
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, RepositoryError> {
        Ok(self.lock().courses.iter().find(|c| c.id == *id).cloned())
    }

    async fn list(&self, created_by: Option<UserId>) -> Result<Vec<Course>, RepositoryError> {
        Ok(self
            .lock()
            .courses
            .iter()
            .filter(|c| created_by.is_none_or(|owner| c.created_by == owner))
            .cloned()
            .collect())
    }

    async fn update(&self, course: &Course) -> Result<bool, RepositoryError> {
        let mut state = self.lock();
        match state.courses.iter_mut().find(|c| c.id == course.id) {
            Some(stored) => {
                stored.title.clone_from(&course.title);
                stored.lessons.clone_from(&course.lessons);
                stored.updated_at = course.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, RepositoryError> {
        let mut state = self.lock();
        let removed = remove(&mut state.courses, |c| c.id == *id);
        if removed {
            state.enrollments.retain(|e| e.course_id != *id);
        }
        Ok(removed)
    }

    async fn append_lesson(&self, id: &CourseId, lesson: &Lesson) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state.lessons.iter().any(|l| l.id == lesson.id) {
            return Err(RepositoryError::conflict("lessons_pkey"));
        }
        let Some(course) = state.courses.iter_mut().find(|c| c.id == *id) else {
            return Err(RepositoryError::query("record not found"));
        };
        course.lessons.push(lesson.id);
        course.updated_at = lesson.created_at;
        state.lessons.push(lesson.clone());
        Ok(())
    }
}

#[async_trait]
impl LessonRepository for MemoryStore {
    async fn create(&self, lesson: &Lesson) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state.lessons.iter().any(|l| l.id == lesson.id) {
            return Err(RepositoryError::conflict("lessons_pkey"));
        }
        state.lessons.push(lesson.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, RepositoryError> {
        Ok(self.lock().lessons.iter().find(|l| l.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Lesson>, RepositoryError> {
        Ok(self.lock().lessons.clone())
    }

    async fn update(&self, lesson: &Lesson) -> Result<bool, RepositoryError> {
        Ok(replace(&mut self.lock().lessons, |l| l.id == lesson.id, lesson))
    }

    async fn delete(&self, id: &LessonId) -> Result<bool, RepositoryError> {
        let mut state = self.lock();
        for course in &mut state.courses {
            course.lessons.retain(|lesson| lesson != id);
        }
        Ok(remove(&mut state.lessons, |l| l.id == *id))
    }
}

#[async_trait]
impl EnrollmentRepository for MemoryStore {
    async fn enroll(&self, enrollment: &UserCourse) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state
            .enrollments
            .iter()
            .any(|e| e.user_id == enrollment.user_id && e.course_id == enrollment.course_id)
        {
            return Err(RepositoryError::conflict("user_courses_pkey"));
        }
        state.enrollments.push(enrollment.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserCourse>, RepositoryError> {
        Ok(self
            .lock()
            .enrollments
            .iter()
            .filter(|e| e.user_id == *user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{
        created_at, now, random_user_id, sample_course, sample_lesson, sample_user,
    };
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> MemoryStore {
        MemoryStore::new()
    }

    fn enrollment(user_id: UserId, course_id: CourseId) -> UserCourse {
        UserCourse {
            user_id,
            course_id,
            active_lesson_id: None,
            created_at: created_at(),
            updated_at: created_at(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_a_conflict(store: MemoryStore) {
        let first = sample_user(random_user_id());
        let second = sample_user(random_user_id());
        UserRepository::create(&store, &first).await.expect("first insert");

        let err = UserRepository::create(&store, &second)
            .await
            .expect_err("same email");
        assert!(matches!(err, RepositoryError::Conflict { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_user_drops_their_enrollments(store: MemoryStore) {
        let user = sample_user(random_user_id());
        let course = sample_course(random_user_id(), vec![]);
        UserRepository::create(&store, &user).await.expect("user");
        CourseRepository::create(&store, &course, &[]).await.expect("course");
        store
            .enroll(&enrollment(user.id, course.id))
            .await
            .expect("enrolled");

        assert!(UserRepository::delete(&store, &user.id).await.expect("delete"));
        assert!(store.list_for_user(&user.id).await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn repeat_enrollment_is_a_conflict(store: MemoryStore) {
        let link = enrollment(random_user_id(), sample_course(random_user_id(), vec![]).id);
        store.enroll(&link).await.expect("first");
        assert!(matches!(
            store.enroll(&link).await,
            Err(RepositoryError::Conflict { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_lesson_removes_it_from_courses(store: MemoryStore) {
        let owner = random_user_id();
        let kept = sample_lesson(owner);
        let dropped = sample_lesson(owner);
        let course = sample_course(owner, vec![kept.id, dropped.id]);
        CourseRepository::create(&store, &course, &[kept.clone(), dropped.clone()])
            .await
            .expect("course");

        assert!(LessonRepository::delete(&store, &dropped.id).await.expect("delete"));

        let stored = CourseRepository::find_by_id(&store, &course.id)
            .await
            .expect("find")
            .expect("course present");
        assert_eq!(stored.lessons, vec![kept.id]);
    }

    #[rstest]
    #[tokio::test]
    async fn append_lesson_extends_the_ordering(store: MemoryStore) {
        let owner = random_user_id();
        let course = sample_course(owner, vec![]);
        CourseRepository::create(&store, &course, &[]).await.expect("course");
        let mut lesson = sample_lesson(owner);
        lesson.created_at = now();

        store
            .append_lesson(&course.id, &lesson)
            .await
            .expect("appended");

        let stored = CourseRepository::find_by_id(&store, &course.id)
            .await
            .expect("find")
            .expect("course present");
        assert_eq!(stored.lessons, vec![lesson.id]);
        assert_eq!(stored.updated_at, now());
        assert!(LessonRepository::find_by_id(&store, &lesson.id)
            .await
            .expect("find lesson")
            .is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn list_courses_filters_by_owner(store: MemoryStore) {
        let owner = random_user_id();
        let mine = sample_course(owner, vec![]);
        let theirs = sample_course(random_user_id(), vec![]);
        CourseRepository::create(&store, &mine, &[]).await.expect("mine");
        CourseRepository::create(&store, &theirs, &[]).await.expect("theirs");

        let listed = CourseRepository::list(&store, Some(owner)).await.expect("list");
        assert_eq!(listed, vec![mine]);
        assert_eq!(CourseRepository::list(&store, None).await.expect("all").len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn updating_unknown_rows_reports_false(store: MemoryStore) {
        let lesson = sample_lesson(random_user_id());
        assert!(!LessonRepository::update(&store, &lesson).await.expect("update"));
        assert!(!LanguageRepository::delete(&store, "xx").await.expect("delete"));
    }
}
