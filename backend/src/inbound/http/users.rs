//! Users API handlers.
//!
//! ```text
//! POST   /v1/users
//! GET    /v1/users/{user_id}
//! PATCH  /v1/users/{user_id}
//! DELETE /v1/users/{user_id}
//! GET    /v1/users/{user_id}/courses
//! PUT    /v1/users/{user_id}/courses/{course_id}
//! PUT    /v1/users/{user_id}/profilePic
//! PUT    /v1/users/{user_id}/password
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroizing;

use crate::domain::ports::NewUser;
use crate::domain::{User, UserCourse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::schemas::{
    ErrorSchema, PatchOperationSchema, UserCourseSchema, UserSchema,
};
use crate::inbound::http::state::HttpState;

/// Registration body for `POST /v1/users`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub profile_pic: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            email: value.email,
            password: Zeroizing::new(value.password),
            first_name: value.first_name,
            last_name: value.last_name,
            profile_pic: value.profile_pic,
        }
    }
}

/// Body for `PUT /v1/users/{user_id}/profilePic`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct ProfilePicRequest {
    pub profile_pic: String,
}

/// Body for `PUT /v1/users/{user_id}/password`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct PasswordRequest {
    pub password: String,
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create_user(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let user = state.users.get_user(&path.into_inner()).await?;
    Ok(web::Json(user))
}

/// Apply a JSON Patch to the caller's own account.
///
/// Only `email`, `first_name` and `last_name` may be targeted.
#[utoipa::path(
    patch,
    path = "/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    request_body(content = [PatchOperationSchema], content_type = "application/json-patch+json"),
    responses(
        (status = 204, description = "Patched, or nothing to change"),
        (status = 400, description = "Invalid patch", body = ErrorSchema),
        (status = 401, description = "Not the account owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "patchUser"
)]
#[patch("/users/{user_id}")]
pub async fn patch_user(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    state
        .users
        .patch_user(&caller.context(), &path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete the caller's own account.
#[utoipa::path(
    delete,
    path = "/v1/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not the account owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state
        .users
        .delete_user(&caller.context(), &path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List the caller's enrollments.
#[utoipa::path(
    get,
    path = "/v1/users/{user_id}/courses",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Enrollments", body = [UserCourseSchema]),
        (status = 401, description = "Not the account owner", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUserCourses"
)]
#[get("/users/{user_id}/courses")]
pub async fn list_user_courses(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<UserCourse>>> {
    let enrollments = state
        .users
        .list_enrollments(&caller.context(), &path.into_inner())
        .await?;
    Ok(web::Json(enrollments))
}

/// Enroll the caller on a course.
#[utoipa::path(
    put,
    path = "/v1/users/{user_id}/courses/{course_id}",
    params(
        ("user_id" = String, Path, description = "User id"),
        ("course_id" = String, Path, description = "Course id")
    ),
    responses(
        (status = 200, description = "Enrolled", body = UserCourseSchema),
        (status = 401, description = "Not the account owner", body = ErrorSchema),
        (status = 404, description = "User or course not found", body = ErrorSchema),
        (status = 409, description = "Already enrolled", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "enrollUser"
)]
#[put("/users/{user_id}/courses/{course_id}")]
pub async fn enroll(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<UserCourse>> {
    let (user_id, course_id) = path.into_inner();
    let enrollment = state
        .users
        .enroll(&caller.context(), &user_id, &course_id)
        .await?;
    Ok(web::Json(enrollment))
}

/// Replace the caller's profile picture URL.
#[utoipa::path(
    put,
    path = "/v1/users/{user_id}/profilePic",
    params(("user_id" = String, Path, description = "User id")),
    request_body = ProfilePicRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 401, description = "Not the account owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "setProfilePic"
)]
#[put("/users/{user_id}/profilePic")]
pub async fn set_profile_pic(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<ProfilePicRequest>,
) -> ApiResult<HttpResponse> {
    state
        .users
        .set_profile_pic(
            &caller.context(),
            &path.into_inner(),
            &payload.profile_pic,
        )
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Replace the caller's password.
#[utoipa::path(
    put,
    path = "/v1/users/{user_id}/password",
    params(("user_id" = String, Path, description = "User id")),
    request_body = PasswordRequest,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Unacceptable password", body = ErrorSchema),
        (status = 401, description = "Not the account owner", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "setPassword"
)]
#[put("/users/{user_id}/password")]
pub async fn set_password(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<PasswordRequest>,
) -> ApiResult<HttpResponse> {
    let password = Zeroizing::new(payload.into_inner().password);
    state
        .users
        .set_password(&caller.context(), &path.into_inner(), &password)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the user routes on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(list_user_courses)
        .service(enroll)
        .service(set_profile_pic)
        .service(set_password)
        .service(get_user)
        .service(patch_user)
        .service(delete_user);
}

#[cfg(test)]
mod tests;
