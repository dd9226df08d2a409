//! Lessons API handlers.
//!
//! ```text
//! POST   /v1/lessons
//! GET    /v1/lessons
//! GET    /v1/lessons/{lesson_id}
//! PUT    /v1/lessons/{lesson_id}
//! DELETE /v1/lessons/{lesson_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::Lesson;
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::courses::LessonRequest;
use crate::inbound::http::schemas::{ErrorSchema, LessonSchema};
use crate::inbound::http::state::HttpState;

/// Create a standalone lesson owned by the caller.
#[utoipa::path(
    post,
    path = "/v1/lessons",
    request_body = LessonRequest,
    responses(
        (status = 201, description = "Lesson created", body = LessonSchema),
        (status = 400, description = "Invalid lesson", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "createLesson"
)]
#[post("/lessons")]
pub async fn create_lesson(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<LessonRequest>,
) -> ApiResult<HttpResponse> {
    let lesson = state
        .lessons
        .create_lesson(&caller.context(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(lesson))
}

/// List every lesson.
#[utoipa::path(
    get,
    path = "/v1/lessons",
    responses(
        (status = 200, description = "Lessons", body = [LessonSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "listLessons"
)]
#[get("/lessons")]
pub async fn list_lessons(
    state: web::Data<HttpState>,
    _caller: Authenticated,
) -> ApiResult<web::Json<Vec<Lesson>>> {
    Ok(web::Json(state.lessons.list_lessons().await?))
}

/// Fetch one lesson.
#[utoipa::path(
    get,
    path = "/v1/lessons/{lesson_id}",
    params(("lesson_id" = String, Path, description = "Lesson id")),
    responses(
        (status = 200, description = "Lesson", body = LessonSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "getLesson"
)]
#[get("/lessons/{lesson_id}")]
pub async fn get_lesson(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<Lesson>> {
    Ok(web::Json(
        state.lessons.get_lesson(&path.into_inner()).await?,
    ))
}

/// Replace the content of a lesson the caller created.
#[utoipa::path(
    put,
    path = "/v1/lessons/{lesson_id}",
    params(("lesson_id" = String, Path, description = "Lesson id")),
    request_body = LessonRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid lesson", body = ErrorSchema),
        (status = 401, description = "Not the lesson creator", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "updateLesson"
)]
#[put("/lessons/{lesson_id}")]
pub async fn update_lesson(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<LessonRequest>,
) -> ApiResult<HttpResponse> {
    state
        .lessons
        .update_lesson(
            &caller.context(),
            &path.into_inner(),
            payload.into_inner().into(),
        )
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a lesson the caller created, removing it from every course.
#[utoipa::path(
    delete,
    path = "/v1/lessons/{lesson_id}",
    params(("lesson_id" = String, Path, description = "Lesson id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not the lesson creator", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "deleteLesson"
)]
#[delete("/lessons/{lesson_id}")]
pub async fn delete_lesson(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .lessons
        .delete_lesson(&caller.context(), &path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the lesson routes on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_lesson)
        .service(list_lessons)
        .service(get_lesson)
        .service(update_lesson)
        .service(delete_lesson);
}
