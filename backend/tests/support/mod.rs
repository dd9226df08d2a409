//! Shared helpers for HTTP integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`. This
//! module wires the real domain services over the in-memory store so each
//! test drives the full request pipeline without a database.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use zeroize::Zeroizing;

use lang_learn::Trace;
use lang_learn::domain::{
    CourseServiceImpl, LanguageServiceImpl, LessonServiceImpl, UserServiceImpl,
};
use lang_learn::inbound::http;
use lang_learn::inbound::http::state::{HttpState, HttpStatePorts};
use lang_learn::outbound::ids::UuidV4IdService;
use lang_learn::outbound::memory::MemoryStore;
use lang_learn::outbound::password::BcryptPasswordService;
use lang_learn::outbound::token::JwtTokenService;

pub const PASSWORD: &str = "correct horse battery staple";
const SECRET: &[u8] = b"integration-test-secret-that-is-long-enough";
/// Minimum bcrypt cost keeps hashing fast in tests.
const BCRYPT_COST: u32 = 4;

/// Token service matching the one installed by [`state`].
pub fn token_service() -> JwtTokenService {
    JwtTokenService::new(
        &Zeroizing::new(SECRET.to_vec()),
        "lang-learn-svc",
        Duration::from_secs(60 * 60),
        Arc::new(DefaultClock),
    )
}

/// HTTP state backed by a fresh in-memory store.
pub fn state() -> web::Data<HttpState> {
    let store = Arc::new(MemoryStore::new());
    let ids = Arc::new(UuidV4IdService);
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = HttpStatePorts {
        users: Arc::new(UserServiceImpl::new(
            store.clone(),
            store.clone(),
            store.clone(),
            ids.clone(),
            Arc::new(BcryptPasswordService::new(BCRYPT_COST)),
            clock.clone(),
        )),
        languages: Arc::new(LanguageServiceImpl::new(store.clone(), clock.clone())),
        courses: Arc::new(CourseServiceImpl::new(
            store.clone(),
            ids.clone(),
            clock.clone(),
        )),
        lessons: Arc::new(LessonServiceImpl::new(store, ids, clock)),
        tokens: Arc::new(token_service()),
    };
    web::Data::new(HttpState::new(ports, "9.9.9"))
}

/// Application with the production routes and middleware.
pub fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Trace)
        .configure(http::configure)
}

/// A registered user together with a bearer header value for them.
pub struct Registered {
    pub id: String,
    pub email: String,
    pub bearer: String,
}

impl Registered {
    pub fn authorization(&self) -> (actix_web::http::header::HeaderName, String) {
        (AUTHORIZATION, self.bearer.clone())
    }
}

/// Register `email` and exchange its credentials for a token.
pub async fn register<S, B>(app: &S, email: &str) -> Registered
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let created = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/v1/users")
            .set_json(json!({
                "email": email,
                "password": PASSWORD,
                "first_name": "Ada",
                "last_name": "Lovelace",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED, "registration failed");
    let user: Value = test::read_body_json(created).await;

    let token = login(app, email, PASSWORD).await;
    Registered {
        id: user["id"].as_str().unwrap_or_default().to_owned(),
        email: email.to_owned(),
        bearer: format!("Bearer {token}"),
    }
}

/// Authenticate and return the issued access token.
pub async fn login<S, B>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: actix_web::body::MessageBody,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth")
            .set_json(json!({"email": email, "password": password}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "authentication failed");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    body["access_token"]
        .as_str()
        .unwrap_or_default()
        .to_owned()
}
