//! Token issuance endpoint.
//!
//! ```text
//! POST /auth {"email":"ada@example.com","password":"hunter2"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Credentials exchanged for a bearer token.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

/// Issued bearer token.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/auth",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 404, description = "Unknown email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "authenticate",
    security([])
)]
#[post("/auth")]
pub async fn authenticate(
    state: web::Data<HttpState>,
    payload: web::Json<AuthRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let AuthRequest { email, password } = payload.into_inner();
    let user = state.users.authenticate(&email, &password).await?;
    let access_token = state
        .tokens
        .issue(&user.id)
        .map_err(|err| Error::system("failed to issue token").with_cause(err))?;
    info!(user_id = %user.id, "issued bearer token");
    Ok(web::Json(AuthResponse {
        access_token,
        token_type: "Bearer".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::TokenError;
    use crate::domain::{User, UserId};
    use crate::inbound::http::test_utils::{CALLER, TestPorts, caller, state_with};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::Utc;
    use mockall::predicate::eq;
    use serde_json::{Value, json};

    fn user() -> User {
        User {
            id: caller(),
            email: "ada@example.com".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            profile_pic: String::new(),
            password_hash: "$2b$04$hash".to_owned(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    async fn post(ports: TestPorts, body: Value) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(ports)))
                .service(authenticate),
        )
        .await;
        let request = test::TestRequest::post()
            .uri("/auth")
            .set_json(body)
            .to_request();
        let response = test::call_service(&app, request).await;
        let status = response.status();
        (status, test::read_body_json(response).await)
    }

    #[actix_web::test]
    async fn correct_credentials_yield_a_bearer_token() {
        let mut ports = TestPorts::default();
        ports
            .users
            .expect_authenticate()
            .with(eq("ada@example.com"), eq("hunter2"))
            .return_once(|_, _| Ok(user()));
        ports
            .tokens
            .expect_issue()
            .withf(|subject| subject.to_string() == CALLER)
            .return_once(|_| Ok("signed".to_owned()));

        let (status, body) = post(
            ports,
            json!({"email": "ada@example.com", "password": "hunter2"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"access_token": "signed", "token_type": "Bearer"}));
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorized() {
        let mut ports = TestPorts::default();
        ports
            .users
            .expect_authenticate()
            .return_once(|_, _| Err(Error::unauthorized("invalid credentials")));
        ports.tokens.expect_issue().never();

        let (status, body) = post(
            ports,
            json!({"email": "ada@example.com", "password": "nope"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "invalid credentials");
    }

    #[actix_web::test]
    async fn signing_failure_is_a_system_error() {
        let mut ports = TestPorts::default();
        ports
            .users
            .expect_authenticate()
            .return_once(|_, _| Ok(user()));
        ports
            .tokens
            .expect_issue()
            .return_once(|_: &UserId| Err(TokenError::issue("no key")));

        let (status, body) = post(
            ports,
            json!({"email": "ada@example.com", "password": "hunter2"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "unexpected system error");
    }
}
