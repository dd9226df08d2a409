//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers that describe domain types without coupling them
//! to utoipa. Protected routes use the bearer token issued by `POST /auth`.
//!
//! The generated document is served by Swagger UI in debug builds and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::{AuthRequest, AuthResponse};
use crate::inbound::http::courses::{CreateCourseRequest, LessonRequest};
use crate::inbound::http::health::PingResponse;
use crate::inbound::http::languages::{CreateLanguageRequest, RenameLanguageRequest};
use crate::inbound::http::schemas::{
    CourseSchema, ErrorCodeSchema, ErrorSchema, LanguageSchema, LessonSchema,
    PatchOperationSchema, UserCourseSchema, UserSchema,
};
use crate::inbound::http::users::{CreateUserRequest, PasswordRequest, ProfilePicRequest};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /auth."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Language learning API",
        description = "Users, languages, courses, lessons and enrolments behind bearer token authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::authenticate,
        crate::inbound::http::health::ping,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::list_user_courses,
        crate::inbound::http::users::enroll,
        crate::inbound::http::users::set_profile_pic,
        crate::inbound::http::users::set_password,
        crate::inbound::http::languages::create_language,
        crate::inbound::http::languages::list_languages,
        crate::inbound::http::languages::delete_languages,
        crate::inbound::http::languages::update_language,
        crate::inbound::http::languages::delete_language,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::patch_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::courses::append_lesson,
        crate::inbound::http::lessons::create_lesson,
        crate::inbound::http::lessons::list_lessons,
        crate::inbound::http::lessons::get_lesson,
        crate::inbound::http::lessons::update_lesson,
        crate::inbound::http::lessons::delete_lesson,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        LanguageSchema,
        LessonSchema,
        CourseSchema,
        UserCourseSchema,
        PatchOperationSchema,
        AuthRequest,
        AuthResponse,
        PingResponse,
        CreateUserRequest,
        ProfilePicRequest,
        PasswordRequest,
        CreateLanguageRequest,
        RenameLanguageRequest,
        CreateCourseRequest,
        LessonRequest,
    )),
    tags(
        (name = "auth", description = "Bearer token issuance"),
        (name = "health", description = "Liveness and version"),
        (name = "users", description = "User accounts and enrolments"),
        (name = "languages", description = "Supported language catalogue"),
        (name = "courses", description = "Courses and their lesson ordering"),
        (name = "lessons", description = "Standalone lesson content")
    )
)]
pub struct ApiDoc;
