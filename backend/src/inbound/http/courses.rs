//! Courses API handlers.
//!
//! ```text
//! POST   /v1/courses
//! GET    /v1/courses?createdby={user_id}
//! GET    /v1/courses/{course_id}
//! PATCH  /v1/courses/{course_id}
//! DELETE /v1/courses/{course_id}
//! POST   /v1/courses/{course_id}/lessons
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Course;
use crate::domain::ports::{LessonDraft, NewCourse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::schemas::{
    CourseSchema, ErrorSchema, LessonSchema, PatchOperationSchema,
};
use crate::inbound::http::state::HttpState;

/// Lesson content as submitted by clients.
///
/// Missing fields decode as empty strings so the domain reports which
/// lesson is incomplete.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct LessonRequest {
    #[schema(example = "Greetings")]
    pub title: String,
    #[schema(example = "Hola means hello.")]
    pub text: String,
    /// Language code.
    #[schema(example = "es")]
    pub language: String,
}

impl From<LessonRequest> for LessonDraft {
    fn from(value: LessonRequest) -> Self {
        Self {
            title: value.title,
            text: value.text,
            language: value.language,
        }
    }
}

/// Body for `POST /v1/courses`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub title: String,
    /// Lessons in course order; each becomes a new lesson owned by the caller.
    #[serde(default)]
    pub lessons: Vec<LessonRequest>,
}

impl From<CreateCourseRequest> for NewCourse {
    fn from(value: CreateCourseRequest) -> Self {
        Self {
            title: value.title,
            lessons: value.lessons.into_iter().map(LessonDraft::from).collect(),
        }
    }
}

/// Filter for `GET /v1/courses`.
#[derive(Debug, Deserialize)]
pub struct CourseFilter {
    #[serde(rename = "createdby")]
    pub created_by: Option<String>,
}

/// Create a course together with its lessons.
#[utoipa::path(
    post,
    path = "/v1/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseSchema),
        (status = 400, description = "Invalid course or lesson", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<CreateCourseRequest>,
) -> ApiResult<HttpResponse> {
    let course = state
        .courses
        .create_course(&caller.context(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(course))
}

/// List courses, optionally only those created by one user.
#[utoipa::path(
    get,
    path = "/v1/courses",
    params(("createdby" = Option<String>, Query, description = "Creator user id")),
    responses(
        (status = 200, description = "Courses", body = [CourseSchema]),
        (status = 400, description = "Malformed creator id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    filter: web::Query<CourseFilter>,
) -> ApiResult<web::Json<Vec<Course>>> {
    let courses = state
        .courses
        .list_courses(filter.into_inner().created_by)
        .await?;
    Ok(web::Json(courses))
}

/// Fetch a course with its ordered lesson ids.
#[utoipa::path(
    get,
    path = "/v1/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = CourseSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{course_id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<Course>> {
    Ok(web::Json(
        state.courses.get_course(&path.into_inner()).await?,
    ))
}

/// Apply a JSON Patch to a course the caller created.
///
/// Only `title` and `lessons` may be targeted; `lessons` must stay a list of
/// existing lesson ids.
#[utoipa::path(
    patch,
    path = "/v1/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course id")),
    request_body(content = [PatchOperationSchema], content_type = "application/json-patch+json"),
    responses(
        (status = 204, description = "Patched, or nothing to change"),
        (status = 400, description = "Invalid patch", body = ErrorSchema),
        (status = 401, description = "Not the course creator", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "patchCourse"
)]
#[patch("/courses/{course_id}")]
pub async fn patch_course(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    state
        .courses
        .patch_course(&caller.context(), &path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a course the caller created. Its lessons are kept.
#[utoipa::path(
    delete,
    path = "/v1/courses/{course_id}",
    params(("course_id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 401, description = "Not the course creator", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{course_id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .courses
        .delete_course(&caller.context(), &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Create a lesson and append it to the end of a course.
#[utoipa::path(
    post,
    path = "/v1/courses/{course_id}/lessons",
    params(("course_id" = String, Path, description = "Course id")),
    request_body = LessonRequest,
    responses(
        (status = 201, description = "Lesson appended", body = LessonSchema),
        (status = 400, description = "Invalid lesson", body = ErrorSchema),
        (status = 401, description = "Not the course creator", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "appendLesson"
)]
#[post("/courses/{course_id}/lessons")]
pub async fn append_lesson(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<LessonRequest>,
) -> ApiResult<HttpResponse> {
    let lesson = state
        .courses
        .append_lesson(
            &caller.context(),
            &path.into_inner(),
            payload.into_inner().into(),
        )
        .await?;
    Ok(HttpResponse::Created().json(lesson))
}

/// Register the course routes on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_course)
        .service(list_courses)
        .service(append_lesson)
        .service(get_course)
        .service(patch_course)
        .service(delete_course);
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
