//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseService, LanguageService, LessonService, TokenService, UserService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserService>,
    pub languages: Arc<dyn LanguageService>,
    pub courses: Arc<dyn CourseService>,
    pub lessons: Arc<dyn LessonService>,
    pub tokens: Arc<dyn TokenService>,
    /// Version reported by the ping endpoint.
    pub version: String,
}

/// Parameter object bundling the port implementations for [`HttpState`].
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserService>,
    pub languages: Arc<dyn LanguageService>,
    pub courses: Arc<dyn CourseService>,
    pub lessons: Arc<dyn LessonService>,
    pub tokens: Arc<dyn TokenService>,
}

impl HttpState {
    /// Construct state from a ports bundle and the reported version.
    pub fn new(ports: HttpStatePorts, version: impl Into<String>) -> Self {
        let HttpStatePorts {
            users,
            languages,
            courses,
            lessons,
            tokens,
        } = ports;
        Self {
            users,
            languages,
            courses,
            lessons,
            tokens,
            version: version.into(),
        }
    }
}
