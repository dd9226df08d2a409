//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;

use crate::domain::UserId;
use crate::domain::ports::{
    MockCourseService, MockLanguageService, MockLessonService, MockTokenService, MockUserService,
    TokenError,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Subject resolved from [`CALLER_TOKEN`].
pub const CALLER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
/// Bearer token accepted by [`TestPorts::authenticated`].
pub const CALLER_TOKEN: &str = "caller-token";

/// Mocked ports; set expectations on the fields before building state.
#[derive(Default)]
pub struct TestPorts {
    pub users: MockUserService,
    pub languages: MockLanguageService,
    pub courses: MockCourseService,
    pub lessons: MockLessonService,
    pub tokens: MockTokenService,
}

impl TestPorts {
    /// Ports whose token service accepts [`CALLER_TOKEN`] as [`CALLER`].
    pub fn authenticated() -> Self {
        let mut ports = Self::default();
        ports.tokens.expect_subject().returning(|token| {
            if token == CALLER_TOKEN {
                Ok(caller())
            } else {
                Err(TokenError::invalid("unknown token"))
            }
        });
        ports
    }
}

pub fn caller() -> UserId {
    UserId::new(CALLER).expect("fixture caller id")
}

/// `Authorization` header carrying [`CALLER_TOKEN`].
pub fn bearer() -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {CALLER_TOKEN}"))
}

/// Build handler state from mocked ports.
pub fn state_with(ports: TestPorts) -> HttpState {
    HttpState::new(
        HttpStatePorts {
            users: Arc::new(ports.users),
            languages: Arc::new(ports.languages),
            courses: Arc::new(ports.courses),
            lessons: Arc::new(ports.lessons),
            tokens: Arc::new(ports.tokens),
        },
        "1.2.3",
    )
}
