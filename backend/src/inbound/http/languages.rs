//! Languages API handlers.
//!
//! Any authenticated caller may manage languages.
//!
//! ```text
//! POST   /v1/languages
//! GET    /v1/languages
//! DELETE /v1/languages
//! PUT    /v1/languages/{code}
//! DELETE /v1/languages/{code}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::Language;
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::schemas::{ErrorSchema, LanguageSchema};
use crate::inbound::http::state::HttpState;

/// Body for `POST /v1/languages`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateLanguageRequest {
    #[schema(example = "es")]
    pub code: String,
    #[schema(example = "Spanish")]
    pub name: String,
}

/// Body for `PUT /v1/languages/{code}`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct RenameLanguageRequest {
    pub name: String,
}

/// Register a language.
#[utoipa::path(
    post,
    path = "/v1/languages",
    request_body = CreateLanguageRequest,
    responses(
        (status = 204, description = "Created"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 409, description = "Code already registered", body = ErrorSchema)
    ),
    tags = ["languages"],
    operation_id = "createLanguage"
)]
#[post("/languages")]
pub async fn create_language(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    payload: web::Json<CreateLanguageRequest>,
) -> ApiResult<HttpResponse> {
    state
        .languages
        .create_language(&payload.code, &payload.name)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List every language, ordered by code.
#[utoipa::path(
    get,
    path = "/v1/languages",
    responses(
        (status = 200, description = "Languages", body = [LanguageSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["languages"],
    operation_id = "listLanguages"
)]
#[get("/languages")]
pub async fn list_languages(
    state: web::Data<HttpState>,
    _caller: Authenticated,
) -> ApiResult<web::Json<Vec<Language>>> {
    Ok(web::Json(state.languages.list_languages().await?))
}

/// Remove every language.
#[utoipa::path(
    delete,
    path = "/v1/languages",
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["languages"],
    operation_id = "deleteLanguages"
)]
#[delete("/languages")]
pub async fn delete_languages(
    state: web::Data<HttpState>,
    _caller: Authenticated,
) -> ApiResult<HttpResponse> {
    state.languages.delete_languages().await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Rename a language.
#[utoipa::path(
    put,
    path = "/v1/languages/{code}",
    params(("code" = String, Path, description = "Language code")),
    request_body = RenameLanguageRequest,
    responses(
        (status = 204, description = "Renamed"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["languages"],
    operation_id = "updateLanguage"
)]
#[put("/languages/{code}")]
pub async fn update_language(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<RenameLanguageRequest>,
) -> ApiResult<HttpResponse> {
    state
        .languages
        .update_language(&path.into_inner(), &payload.name)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Remove one language.
#[utoipa::path(
    delete,
    path = "/v1/languages/{code}",
    params(("code" = String, Path, description = "Language code")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["languages"],
    operation_id = "deleteLanguage"
)]
#[delete("/languages/{code}")]
pub async fn delete_language(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.languages.delete_language(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the language routes on a scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_language)
        .service(list_languages)
        .service(delete_languages)
        .service(update_language)
        .service(delete_language);
}
