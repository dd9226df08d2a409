//! Shared fixtures for domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::MockIdService;
use crate::domain::{AuthContext, Course, CourseId, Lesson, LessonId, User, UserId};

pub(crate) struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock { utc_now: now() })
}

/// Identifier service that accepts any UUID and mints random v4 values.
pub(crate) fn uuid_ids() -> Arc<MockIdService> {
    let mut ids = MockIdService::new();
    ids.expect_is_valid()
        .returning(|raw| Uuid::parse_str(raw).is_ok());
    ids.expect_generate().returning(|| Ok(Uuid::new_v4()));
    Arc::new(ids)
}

pub(crate) fn ctx_for(id: UserId) -> AuthContext {
    AuthContext::for_subject(id)
}

pub(crate) fn random_user_id() -> UserId {
    UserId::from_uuid(Uuid::new_v4())
}

pub(crate) fn sample_user(id: UserId) -> User {
    User {
        id,
        email: "ada@example.com".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        profile_pic: "ada.png".to_owned(),
        password_hash: "$2b$04$abcdefghijklmnopqrstuuQ2Jq8m1kVv0bKqC3m6o8S0V0o8Q0bKq".to_owned(),
        created_at: created_at(),
        updated_at: created_at(),
    }
}

pub(crate) fn sample_lesson(owner: UserId) -> Lesson {
    Lesson {
        id: LessonId::from_uuid(Uuid::new_v4()),
        title: "Greetings".to_owned(),
        text: "Hola. Buenos días.".to_owned(),
        language: "es".to_owned(),
        created_by: owner,
        created_at: created_at(),
        updated_at: created_at(),
    }
}

pub(crate) fn sample_course(owner: UserId, lessons: Vec<LessonId>) -> Course {
    Course {
        id: CourseId::from_uuid(Uuid::new_v4()),
        title: "Spanish basics".to_owned(),
        lessons,
        created_by: owner,
        created_at: created_at(),
        updated_at: created_at(),
    }
}
